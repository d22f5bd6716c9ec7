//! Chat session state
//!
//! Everything the chat page knows lives in [`ChatSession`]: the browser's
//! session id, which conversation is showing (or that an unsaved new one is),
//! its messages, the conversation list, character/model choices, the
//! in-flight guard, the error banner and an in-progress rename.
//!
//! The page owns one `ChatSession` in a signal and performs the network calls;
//! this type only decides what to send and how responses change the view.

use chrono::Utc;

use crate::api::{ApiClient, Navigator, Transport};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::types::{
    AICharacter, AIModel, ChatRequest, ChatResponse, Conversation, ConversationDetail,
    ConversationTarget, Message,
};

/// Header fallback when no character is configured
pub const DEFAULT_ASSISTANT_NAME: &str = "Assistant";
/// Header fallback for an unsaved conversation
pub const NEW_CONVERSATION_TITLE: &str = "New conversation";
/// Longest message the input accepts
pub const MAX_INPUT_CHARS: usize = 10_000;

/// A message that has been shown optimistically and still awaits its reply
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSend {
    pub request: ChatRequest,
    /// View the message was sent from
    epoch: u64,
}

/// What the page should do after a reply was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SendOutcome {
    /// A conversation was created server-side; reload the list
    pub refresh_conversations: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct Rename {
    id: u64,
    draft: String,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    session_id: String,
    target: ConversationTarget,
    current: Option<Conversation>,
    messages: Vec<Message>,
    conversations: Vec<Conversation>,
    characters: Vec<AICharacter>,
    models: Vec<AIModel>,
    selected_character: Option<u64>,
    selected_model: Option<String>,
    in_flight: bool,
    error: Option<String>,
    rename: Option<Rename>,
    /// Bumped whenever the visible conversation changes
    epoch: u64,
    preferred_model: String,
    title_max_chars: usize,
}

impl ChatSession {
    pub fn new(session_id: impl Into<String>, config: &ClientConfig) -> Self {
        Self {
            session_id: session_id.into(),
            target: ConversationTarget::New,
            current: None,
            messages: Vec::new(),
            conversations: Vec::new(),
            characters: Vec::new(),
            models: Vec::new(),
            selected_character: None,
            selected_model: None,
            in_flight: false,
            error: None,
            rename: None,
            epoch: 0,
            preferred_model: config.preferred_model.clone(),
            title_max_chars: config.title_max_chars,
        }
    }

    // ============= Accessors =============

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn target(&self) -> ConversationTarget {
        self.target
    }

    pub fn current(&self) -> Option<&Conversation> {
        self.current.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn characters(&self) -> &[AICharacter] {
        &self.characters
    }

    pub fn models(&self) -> &[AIModel] {
        &self.models
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn is_selected(&self, id: u64) -> bool {
        self.target == ConversationTarget::Existing(id)
    }

    pub fn selected_character(&self) -> Option<&AICharacter> {
        let id = self.selected_character?;
        self.characters.iter().find(|c| c.id == id)
    }

    pub fn selected_model(&self) -> Option<&AIModel> {
        let name = self.selected_model.as_deref()?;
        self.models.iter().find(|m| m.name == name)
    }

    /// Character name shown in the header
    pub fn assistant_name(&self) -> String {
        self.selected_character()
            .map(|c| c.name.clone())
            .unwrap_or_else(|| DEFAULT_ASSISTANT_NAME.to_string())
    }

    /// Conversation title shown in the header
    pub fn header_title(&self) -> String {
        self.current
            .as_ref()
            .map(|c| c.title.clone())
            .unwrap_or_else(|| NEW_CONVERSATION_TITLE.to_string())
    }

    pub fn show_character_selector(&self) -> bool {
        self.characters.len() > 1
    }

    pub fn show_model_selector(&self) -> bool {
        self.models.len() > 1
    }

    /// Whether a send with this input would go out
    pub fn can_send(&self, input: &str) -> bool {
        !self.in_flight && !input.trim().is_empty()
    }

    // ============= Options =============

    /// Replace the character list; keeps a valid selection, else picks the first
    pub fn set_characters(&mut self, characters: Vec<AICharacter>) {
        self.characters = characters;
        let still_valid = self
            .selected_character
            .is_some_and(|id| self.characters.iter().any(|c| c.id == id));
        if !still_valid {
            self.selected_character = self.characters.first().map(|c| c.id);
        }
    }

    /// Replace the model list; keeps a valid selection, else prefers the
    /// configured model and falls back to the first
    pub fn set_models(&mut self, models: Vec<AIModel>) {
        self.models = models;
        let still_valid = self
            .selected_model
            .as_deref()
            .is_some_and(|name| self.models.iter().any(|m| m.name == name));
        if !still_valid {
            self.selected_model = self
                .models
                .iter()
                .find(|m| m.name == self.preferred_model)
                .or_else(|| self.models.first())
                .map(|m| m.name.clone());
        }
    }

    pub fn select_character(&mut self, id: u64) {
        if self.characters.iter().any(|c| c.id == id) {
            self.selected_character = Some(id);
        }
    }

    pub fn select_model(&mut self, name: &str) {
        if self.models.iter().any(|m| m.name == name) {
            self.selected_model = Some(name.to_string());
        }
    }

    // ============= Sending =============

    /// Start sending `input`.
    ///
    /// Returns `None`, and changes nothing, for blank input or while another
    /// request is in flight. Otherwise the user message is appended right
    /// away and the request to issue is returned.
    pub fn begin_send(&mut self, input: &str) -> Option<PendingSend> {
        if !self.can_send(input) {
            return None;
        }
        let text: String = input.trim().chars().take(MAX_INPUT_CHARS).collect();

        self.messages.push(Message::user(text.clone()));
        self.in_flight = true;
        self.error = None;

        Some(PendingSend {
            request: ChatRequest {
                message: text,
                character_id: self.selected_character.unwrap_or(0),
                provider: self.selected_model.clone().unwrap_or_default(),
                session_id: self.session_id.clone(),
                conversation_id: self.target,
            },
            epoch: self.epoch,
        })
    }

    /// Apply the outcome of a send.
    ///
    /// The optimistic user message is never rolled back. If the user switched
    /// conversations meanwhile, the reply is not shown in the new view.
    pub fn complete_send(
        &mut self,
        pending: &PendingSend,
        result: Result<ChatResponse>,
    ) -> SendOutcome {
        self.in_flight = false;
        let same_view = pending.epoch == self.epoch;

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!("Chat request failed: {}", e);
                if same_view {
                    self.error = Some(e.to_string());
                }
                return SendOutcome::default();
            }
        };

        let created = pending.request.conversation_id.is_new() && resp.conversation_id != 0;
        if !same_view {
            return SendOutcome {
                refresh_conversations: created,
            };
        }

        self.messages.push(Message::assistant(resp.reply));

        if created && self.target.is_new() {
            let now = Utc::now();
            self.current = Some(Conversation {
                id: resp.conversation_id,
                session_id: self.session_id.clone(),
                title: title_from_message(&pending.request.message, self.title_max_chars),
                created_at: now,
                updated_at: now,
            });
            self.target = ConversationTarget::Existing(resp.conversation_id);
        }

        SendOutcome {
            refresh_conversations: created,
        }
    }

    // ============= Conversations =============

    pub fn set_conversations(&mut self, conversations: Vec<Conversation>) {
        self.conversations = conversations;
    }

    /// Show a conversation loaded from the backend
    pub fn show_conversation(&mut self, detail: ConversationDetail) {
        self.epoch += 1;
        self.target = ConversationTarget::Existing(detail.conversation.id);
        self.messages = detail
            .messages
            .iter()
            .filter_map(Message::from_history)
            .collect();
        self.current = Some(detail.conversation);
        self.error = None;
    }

    /// Switch to an unsaved new conversation
    pub fn start_new(&mut self) {
        self.epoch += 1;
        self.target = ConversationTarget::New;
        self.current = None;
        self.messages.clear();
    }

    /// Drop a deleted conversation; clears the view if it was showing
    pub fn remove_conversation(&mut self, id: u64) {
        self.conversations.retain(|c| c.id != id);
        if self.is_selected(id) {
            self.start_new();
        }
        if self.rename.as_ref().is_some_and(|r| r.id == id) {
            self.rename = None;
        }
    }

    // ============= Rename =============

    pub fn begin_rename(&mut self, id: u64) {
        let Some(conv) = self.conversations.iter().find(|c| c.id == id) else {
            return;
        };
        self.rename = Some(Rename {
            id,
            draft: conv.title.clone(),
        });
    }

    pub fn renaming(&self) -> Option<u64> {
        self.rename.as_ref().map(|r| r.id)
    }

    pub fn rename_draft(&self) -> String {
        self.rename.as_ref().map(|r| r.draft.clone()).unwrap_or_default()
    }

    pub fn set_rename_draft(&mut self, draft: impl Into<String>) {
        if let Some(rename) = self.rename.as_mut() {
            rename.draft = draft.into();
        }
    }

    /// Leave rename mode. Returns the `(id, title)` to save, or `None` when
    /// the draft is blank (cancel) or nothing was being renamed.
    pub fn finish_rename(&mut self) -> Option<(u64, String)> {
        let rename = self.rename.take()?;
        let title = rename.draft.trim();
        if title.is_empty() {
            return None;
        }
        Some((rename.id, title.to_string()))
    }

    pub fn cancel_rename(&mut self) {
        self.rename = None;
    }

    /// Record a successful rename
    pub fn apply_rename(&mut self, id: u64, title: &str) {
        if let Some(conv) = self.conversations.iter_mut().find(|c| c.id == id) {
            conv.title = title.to_string();
        }
        if let Some(current) = self.current.as_mut().filter(|c| c.id == id) {
            current.title = title.to_string();
        }
    }
}

/// Default title for a conversation started with `message`
pub fn title_from_message(message: &str, max_chars: usize) -> String {
    let mut chars = message.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Question asked before a conversation is deleted
pub const DELETE_CONVERSATION_PROMPT: &str = "Delete this conversation?";

/// Delete a conversation once the user confirms. `None` when they declined
/// and nothing was sent.
pub async fn delete_conversation<T, S, N>(
    client: &ApiClient<T, S, N>,
    id: u64,
    confirm: impl FnOnce(&str) -> bool,
) -> Option<Result<()>>
where
    T: Transport,
    S: KeyValueStore,
    N: Navigator,
{
    if !confirm(DELETE_CONVERSATION_PROMPT) {
        return None;
    }
    Some(client.delete_conversation(id).await.map(drop))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::types::{HistoryMessage, Role};

    fn session() -> ChatSession {
        ChatSession::new("session_1_abc", &ClientConfig::default())
    }

    fn conv(id: u64, title: &str) -> Conversation {
        Conversation {
            id,
            session_id: "session_1_abc".to_string(),
            title: title.to_string(),
            ..Conversation::default()
        }
    }

    fn reply(text: &str, conversation_id: u64) -> ChatResponse {
        ChatResponse {
            reply: text.to_string(),
            session_id: "session_1_abc".to_string(),
            conversation_id,
            model: "deepseek-chat".to_string(),
            token_usage: Default::default(),
        }
    }

    fn model(name: &str) -> AIModel {
        AIModel {
            name: name.to_string(),
            ..AIModel::default()
        }
    }

    fn character(id: u64, name: &str) -> AICharacter {
        AICharacter {
            id,
            name: name.to_string(),
            ..AICharacter::default()
        }
    }

    #[test]
    fn test_blank_input_is_noop() {
        let mut s = session();
        assert!(s.begin_send("").is_none());
        assert!(s.begin_send("   \n\t").is_none());
        assert!(s.messages().is_empty());
        assert!(!s.is_in_flight());
    }

    #[test]
    fn test_send_ignored_while_in_flight() {
        let mut s = session();
        assert!(s.begin_send("first").is_some());
        assert!(s.begin_send("second").is_none());
        assert_eq!(s.messages().len(), 1);
    }

    #[test]
    fn test_begin_send_builds_request() {
        let mut s = session();
        s.set_characters(vec![character(3, "Mono"), character(4, "Other")]);
        s.set_models(vec![model("kimi"), model("deepseek")]);

        let pending = s.begin_send("  hello  ").unwrap();
        assert_eq!(pending.request.message, "hello");
        assert_eq!(pending.request.character_id, 3);
        assert_eq!(pending.request.provider, "deepseek");
        assert_eq!(pending.request.session_id, "session_1_abc");
        assert_eq!(pending.request.conversation_id, ConversationTarget::New);
        assert_eq!(s.messages()[0].role, Role::User);
        assert!(s.is_in_flight());
    }

    #[test]
    fn test_new_conversation_gets_stub() {
        let mut s = session();
        let long = "a".repeat(40);
        let pending = s.begin_send(&long).unwrap();

        let outcome = s.complete_send(&pending, Ok(reply("hi", 7)));
        assert!(outcome.refresh_conversations);
        assert_eq!(s.target(), ConversationTarget::Existing(7));
        let current = s.current().unwrap();
        assert_eq!(current.title, format!("{}...", "a".repeat(30)));
        assert_eq!(current.session_id, "session_1_abc");
        assert_eq!(s.messages().len(), 2);
        assert_eq!(s.messages()[1].role, Role::Assistant);
        assert!(!s.is_in_flight());
    }

    #[test]
    fn test_existing_conversation_does_not_refresh() {
        let mut s = session();
        s.show_conversation(ConversationDetail {
            conversation: conv(5, "old"),
            messages: vec![],
        });
        let pending = s.begin_send("again").unwrap();
        assert_eq!(pending.request.conversation_id, ConversationTarget::Existing(5));

        let outcome = s.complete_send(&pending, Ok(reply("ok", 5)));
        assert!(!outcome.refresh_conversations);
        assert_eq!(s.current().unwrap().title, "old");
    }

    #[test]
    fn test_failure_keeps_user_message() {
        let mut s = session();
        let pending = s.begin_send("hello").unwrap();
        let outcome = s.complete_send(&pending, Err(ApiError::Network("offline".to_string())));

        assert!(!outcome.refresh_conversations);
        assert_eq!(s.messages().len(), 1);
        assert_eq!(s.error(), Some("offline"));
        assert!(!s.is_in_flight());

        // next send clears the banner
        s.begin_send("retry").unwrap();
        assert!(s.error().is_none());
    }

    #[test]
    fn test_reply_after_switching_view_is_not_shown() {
        let mut s = session();
        let pending = s.begin_send("hello").unwrap();
        s.start_new();

        let outcome = s.complete_send(&pending, Ok(reply("late", 9)));
        assert!(outcome.refresh_conversations);
        assert!(s.messages().is_empty());
        assert!(s.current().is_none());
        assert!(!s.is_in_flight());
    }

    #[test]
    fn test_delete_selected_conversation_clears_view() {
        let mut s = session();
        s.set_conversations(vec![conv(1, "one"), conv(2, "two")]);
        s.show_conversation(ConversationDetail {
            conversation: conv(2, "two"),
            messages: vec![HistoryMessage {
                id: 1,
                session_id: String::new(),
                character_id: 0,
                message_type: "user".to_string(),
                content: "hi".to_string(),
                token_count: 0,
                created_at: Utc::now(),
            }],
        });
        assert_eq!(s.messages().len(), 1);

        s.remove_conversation(2);
        assert!(s.current().is_none());
        assert!(s.messages().is_empty());
        assert_eq!(s.target(), ConversationTarget::New);
        assert_eq!(s.conversations().len(), 1);
    }

    #[test]
    fn test_delete_other_conversation_keeps_view() {
        let mut s = session();
        s.set_conversations(vec![conv(1, "one"), conv(2, "two")]);
        s.show_conversation(ConversationDetail {
            conversation: conv(2, "two"),
            messages: vec![],
        });
        s.remove_conversation(1);
        assert!(s.is_selected(2));
    }

    #[test]
    fn test_rename_flow() {
        let mut s = session();
        s.set_conversations(vec![conv(1, "one")]);
        s.show_conversation(ConversationDetail {
            conversation: conv(1, "one"),
            messages: vec![],
        });

        s.begin_rename(1);
        assert_eq!(s.renaming(), Some(1));
        assert_eq!(s.rename_draft(), "one");
        s.set_rename_draft("  renamed ");

        let (id, title) = s.finish_rename().unwrap();
        assert_eq!((id, title.as_str()), (1, "renamed"));
        assert!(s.renaming().is_none());

        s.apply_rename(id, &title);
        assert_eq!(s.conversations()[0].title, "renamed");
        assert_eq!(s.header_title(), "renamed");
    }

    #[test]
    fn test_empty_rename_cancels() {
        let mut s = session();
        s.set_conversations(vec![conv(1, "one")]);
        s.begin_rename(1);
        s.set_rename_draft("   ");
        assert!(s.finish_rename().is_none());
        assert!(s.renaming().is_none());
        assert_eq!(s.conversations()[0].title, "one");

        s.begin_rename(1);
        s.set_rename_draft("other");
        s.cancel_rename();
        assert!(s.finish_rename().is_none());
    }

    #[test]
    fn test_model_preference() {
        let mut s = session();
        s.set_models(vec![model("kimi"), model("qwen")]);
        assert_eq!(s.selected_model().unwrap().name, "kimi");

        let mut s = session();
        s.set_models(vec![model("kimi"), model("deepseek")]);
        assert_eq!(s.selected_model().unwrap().name, "deepseek");

        s.select_model("kimi");
        s.set_models(vec![model("kimi"), model("deepseek")]);
        assert_eq!(s.selected_model().unwrap().name, "kimi");

        s.select_model("missing");
        assert_eq!(s.selected_model().unwrap().name, "kimi");
    }

    #[test]
    fn test_selectors_only_with_choices() {
        let mut s = session();
        s.set_characters(vec![character(1, "Mono")]);
        s.set_models(vec![model("deepseek")]);
        assert!(!s.show_character_selector());
        assert!(!s.show_model_selector());
        assert_eq!(s.assistant_name(), "Mono");

        s.set_characters(vec![character(1, "Mono"), character(2, "Other")]);
        assert!(s.show_character_selector());
    }

    #[test]
    fn test_header_defaults() {
        let s = session();
        assert_eq!(s.assistant_name(), DEFAULT_ASSISTANT_NAME);
        assert_eq!(s.header_title(), NEW_CONVERSATION_TITLE);
    }

    #[test]
    fn test_title_truncation() {
        assert_eq!(title_from_message("short", 30), "short");
        assert_eq!(title_from_message(&"x".repeat(30), 30), "x".repeat(30));
        assert_eq!(title_from_message("你好世界", 2), "你好...");
    }

    #[test]
    fn test_input_capped() {
        let mut s = session();
        let pending = s.begin_send(&"y".repeat(MAX_INPUT_CHARS + 5)).unwrap();
        assert_eq!(pending.request.message.chars().count(), MAX_INPUT_CHARS);
    }
}
