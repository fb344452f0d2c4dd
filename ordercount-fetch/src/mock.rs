//! Scripted in-memory transport for tests.
//!
//! Replies are served in the order they were queued and every request is
//! recorded, so tests can assert on both sides of the conversation.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;
use crate::transport::{ApiRequest, ApiResponse, ApiTransport};

/// Transport that replays queued responses.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<ApiResponse, FetchError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    /// Creates a transport with no queued replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a JSON response.
    #[must_use]
    pub fn reply_json(self, status: u16, body: &Value) -> Self {
        self.push(Ok(ApiResponse::new(status, body.to_string())))
    }

    /// Queues a response with a raw body.
    #[must_use]
    pub fn reply_raw(self, status: u16, body: &str) -> Self {
        self.push(Ok(ApiResponse::new(status, body)))
    }

    /// Queues a transport failure.
    #[must_use]
    pub fn reply_error(self, message: &str) -> Self {
        self.push(Err(FetchError::Transport(message.to_string())))
    }

    fn push(self, reply: Result<ApiResponse, FetchError>) -> Self {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
        self
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of queued replies not yet served.
    pub fn pending_replies(&self) -> usize {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, FetchError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Transport("no scripted reply".to_string())))
    }
}
