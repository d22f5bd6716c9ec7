//! Typewriter text effect
//!
//! [`Typewriter`] is the pure state machine; [`use_typewriter`] drives it from
//! a timer and exposes the visible text as a signal.

use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::generation::Generation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Typing,
    Holding,
    Deleting,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    index: usize,
    chars: usize,
    phase: Phase,
    speed: Duration,
    pause: Duration,
}

impl Typewriter {
    pub fn new<I, P>(phrases: I, speed: Duration, pause: Duration) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(|p| p.as_ref().chars().collect())
                .collect(),
            index: 0,
            chars: 0,
            phase: Phase::Typing,
            speed,
            pause,
        }
    }

    /// Currently visible prefix of the current phrase
    pub fn text(&self) -> String {
        self.phrases
            .get(self.index)
            .map(|p| p[..self.chars].iter().collect())
            .unwrap_or_default()
    }

    pub fn phrase_index(&self) -> usize {
        self.index
    }

    /// Advance one step and return how long to wait before the next one
    pub fn tick(&mut self) -> Duration {
        let Some(len) = self.phrases.get(self.index).map(Vec::len) else {
            return self.pause;
        };

        match self.phase {
            Phase::Typing => {
                if self.chars < len {
                    self.chars += 1;
                    self.speed
                } else {
                    self.phase = Phase::Holding;
                    self.pause
                }
            }
            Phase::Holding => {
                self.phase = Phase::Deleting;
                self.speed / 2
            }
            Phase::Deleting => {
                if self.chars > 0 {
                    self.chars -= 1;
                    self.speed / 2
                } else {
                    self.phase = Phase::Typing;
                    self.index = (self.index + 1) % self.phrases.len();
                    self.speed
                }
            }
        }
    }
}

/// Animated text cycling through `phrases`; stops when the owner unmounts
pub fn use_typewriter(phrases: &[&str], speed: Duration, pause: Duration) -> ReadSignal<String> {
    let (text, set_text) = signal(String::new());
    let generation = Generation::new();
    let ticket = generation.next();
    let mut machine = Typewriter::new(phrases.iter().copied(), speed, pause);

    let stop = generation.clone();
    on_cleanup(move || stop.invalidate());

    spawn_local(async move {
        loop {
            let delay = machine.tick();
            if !generation.is_current(ticket) {
                break;
            }
            set_text.set(machine.text());
            let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
            gloo_timers::future::TimeoutFuture::new(millis).await;
        }
    });

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> Typewriter {
        Typewriter::new(
            ["ab", "xyz"],
            Duration::from_millis(100),
            Duration::from_millis(2000),
        )
    }

    #[test]
    fn test_types_one_char_per_tick() {
        let mut tw = machine();
        assert_eq!(tw.text(), "");
        assert_eq!(tw.tick(), Duration::from_millis(100));
        assert_eq!(tw.text(), "a");
        tw.tick();
        assert_eq!(tw.text(), "ab");
    }

    #[test]
    fn test_pauses_then_deletes_at_double_speed() {
        let mut tw = machine();
        tw.tick();
        tw.tick();
        assert_eq!(tw.tick(), Duration::from_millis(2000));
        assert_eq!(tw.text(), "ab");
        assert_eq!(tw.tick(), Duration::from_millis(50));
        assert_eq!(tw.tick(), Duration::from_millis(50));
        assert_eq!(tw.text(), "a");
    }

    #[test]
    fn test_cycles_phrases() {
        let mut tw = machine();
        // type 2, hold, start delete, delete 2, advance
        for _ in 0..7 {
            tw.tick();
        }
        assert_eq!(tw.phrase_index(), 1);
        assert_eq!(tw.text(), "");
        tw.tick();
        assert_eq!(tw.text(), "x");

        for _ in 0..9 {
            tw.tick();
        }
        assert_eq!(tw.phrase_index(), 0);
    }

    #[test]
    fn test_multibyte_phrases() {
        let mut tw = Typewriter::new(["全栈"], Duration::from_millis(10), Duration::from_millis(10));
        tw.tick();
        assert_eq!(tw.text(), "全");
    }

    #[test]
    fn test_no_phrases() {
        let mut tw = Typewriter::new(Vec::<String>::new(), Duration::from_millis(10), Duration::from_millis(30));
        assert_eq!(tw.tick(), Duration::from_millis(30));
        assert_eq!(tw.text(), "");
    }
}
