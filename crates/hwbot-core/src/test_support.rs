//! In-memory port implementations shared by the unit tests.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{
    api::StatusApi,
    domain::{ChatId, MessageId, MessageRef},
    messaging::port::{MessagingCapabilities, MessagingPort},
    Error, Result,
};

pub struct RecordingMessenger {
    sent: Mutex<Vec<(ChatId, String)>>,
    attempts: AtomicUsize,
    fail: bool,
    limit: usize,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl Default for RecordingMessenger {
    fn default() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            attempts: AtomicUsize::new(0),
            fail: false,
            limit: 4096,
            cancel_after: None,
        }
    }
}

impl RecordingMessenger {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Cancel `token` once `n` sends have been attempted.
    pub fn cancel_after(n: usize, token: CancellationToken) -> Self {
        Self {
            cancel_after: Some((n, token)),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(ChatId, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessagingPort for RecordingMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        MessagingCapabilities {
            max_message_len: self.limit,
        }
    }

    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
        let n = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some((limit, token)) = &self.cancel_after {
            if n >= *limit {
                token.cancel();
            }
        }
        if self.fail {
            return Err(Error::Delivery("chat not found".to_string()));
        }
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        Ok(MessageRef {
            chat_id,
            message_id: MessageId(n as i32),
        })
    }
}

/// Replays scripted fetch results; once exhausted, keeps failing with a transport error.
#[derive(Default)]
pub struct ScriptedApi {
    script: Mutex<VecDeque<Result<serde_json::Value>>>,
    calls: Mutex<Vec<i64>>,
}

impl ScriptedApi {
    pub fn new(script: Vec<Result<serde_json::Value>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `from_date` values seen by each fetch.
    pub fn calls(&self) -> Vec<i64> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusApi for ScriptedApi {
    async fn fetch(&self, from_date: i64) -> Result<serde_json::Value> {
        self.calls.lock().unwrap().push(from_date);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Transport("connection refused".to_string())))
    }
}
