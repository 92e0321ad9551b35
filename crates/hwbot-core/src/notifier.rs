use std::sync::Arc;

use tracing::{error, info};

use crate::{domain::ChatId, messaging::port::MessagingPort};

/// Best-effort delivery of text to the single configured chat.
///
/// Send failures are logged and swallowed: a failed notification must never
/// take down the poll loop, even when the notification is itself a failure report.
#[derive(Clone)]
pub struct Notifier {
    messenger: Arc<dyn MessagingPort>,
    target: ChatId,
}

impl Notifier {
    pub fn new(messenger: Arc<dyn MessagingPort>, target: ChatId) -> Self {
        Self { messenger, target }
    }

    /// Returns whether the messenger accepted the message. Callers are free to ignore it.
    pub async fn deliver(&self, message: &str) -> bool {
        let limit = self.messenger.capabilities().max_message_len;
        let text = truncate_chars(message, limit);

        info!(chat_id = self.target.0, "sending message: {text}");
        match self.messenger.send_text(self.target, &text).await {
            Ok(_) => {
                info!(chat_id = self.target.0, "message sent");
                true
            }
            Err(e) => {
                error!(
                    chat_id = self.target.0,
                    kind = e.kind().as_str(),
                    "failed to send message: {e}"
                );
                false
            }
        }
    }
}

fn truncate_chars(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingMessenger;

    #[tokio::test]
    async fn delivers_to_configured_target() {
        let messenger = Arc::new(RecordingMessenger::default());
        let notifier = Notifier::new(messenger.clone(), ChatId(42));

        assert!(notifier.deliver("hello").await);

        let sent = messenger.sent();
        assert_eq!(sent, vec![(ChatId(42), "hello".to_string())]);
    }

    #[tokio::test]
    async fn swallows_send_failures() {
        let messenger = Arc::new(RecordingMessenger::failing());
        let notifier = Notifier::new(messenger.clone(), ChatId(7));

        assert!(!notifier.deliver("lost").await);
        assert_eq!(messenger.attempts(), 1);
    }

    #[tokio::test]
    async fn truncates_to_messenger_limit() {
        let messenger = Arc::new(RecordingMessenger::with_limit(10));
        let notifier = Notifier::new(messenger.clone(), ChatId(1));

        notifier.deliver("абвгдеёжзийклм").await;

        let sent = messenger.sent();
        assert_eq!(sent[0].1, "абвгдеё...");
        assert_eq!(sent[0].1.chars().count(), 10);
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("abcd", 3), "...");
    }
}
