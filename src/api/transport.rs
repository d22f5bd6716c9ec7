//! HTTP transport seam
//!
//! The API client only needs "send this request, give me status and body".
//! In the browser that is `fetch` through `gloo-net`, raced against a timer.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;

use crate::error::{ApiError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request, once.
///
/// Implementations return `Err` only when no response arrived at all
/// (network failure, timeout). Non-2xx responses are `Ok`.
#[async_trait(?Send)]
pub trait Transport: Clone + 'static {
    async fn send(&self, request: HttpRequest, timeout: Duration) -> Result<HttpResponse>;
}

/// Browser `fetch` transport
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl FetchTransport {
    async fn fetch(request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let resp = match request.body {
            Some(body) => builder.body(body).map_err(ApiError::network)?.send().await,
            None => builder.send().await,
        }
        .map_err(ApiError::network)?;

        let status = resp.status();
        let status_text = resp.status_text();
        // A body that cannot be read is treated as empty; the status still decides.
        let body = resp.text().await.unwrap_or_default();

        Ok(HttpResponse {
            status,
            status_text,
            body,
        })
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest, timeout: Duration) -> Result<HttpResponse> {
        let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
        let fetch = Box::pin(Self::fetch(request));
        let timer = Box::pin(TimeoutFuture::new(millis));

        // The losing fetch is dropped, which stops us from waiting on it; the
        // browser may still finish the request in the background.
        match select(fetch, timer).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err(ApiError::Timeout(timeout.as_secs())),
        }
    }
}
