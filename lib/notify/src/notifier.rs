//! Notification fan-out.
//!
//! Audit notices prefer the shared audit channel; when the channel is
//! unreachable (or not configured) the notice goes to every super admin's
//! private chat instead, so record changes are never silently unlogged.

use crate::report::{Audience, DeliveryReport};
use station_roster_core::{ChatId, ChatUserId};
use station_roster_transport::Messenger;
use std::sync::Arc;
use tracing::{instrument, warn};

/// Sends audit notices and direct messages without failing the caller.
#[derive(Debug, Clone)]
pub struct Notifier<M> {
    messenger: Arc<M>,
    audit_chat: Option<ChatId>,
    super_admins: Vec<ChatUserId>,
}

impl<M: Messenger> Notifier<M> {
    #[must_use]
    pub fn new(
        messenger: Arc<M>,
        audit_chat: Option<ChatId>,
        super_admins: impl IntoIterator<Item = ChatUserId>,
    ) -> Self {
        Self {
            messenger,
            audit_chat,
            super_admins: super_admins.into_iter().collect(),
        }
    }

    /// Publishes an audit notice.
    ///
    /// Tries the audit channel first; on failure the notice goes to each
    /// super admin individually, prefixed with the delivery error so admins
    /// know the channel is broken. One admin being unreachable never blocks
    /// the others.
    #[instrument(skip(self, text))]
    pub async fn audit(&self, text: &str) -> DeliveryReport {
        let mut report = DeliveryReport::new();

        let fallback_text = if let Some(chat) = self.audit_chat {
            match self.messenger.send_text(chat, text).await {
                Ok(()) => {
                    report.push(Audience::AuditChannel, Ok(()));
                    return report;
                }
                Err(error) => {
                    warn!(chat = %chat, %error, "audit channel unreachable, falling back");
                    let annotated = format!("❌ Guruhga yuborilmadi:\n{text}\n\nXato: {error}");
                    report.push(Audience::AuditChannel, Err(error));
                    annotated
                }
            }
        } else {
            text.to_string()
        };

        for admin in &self.super_admins {
            let result = self
                .messenger
                .send_text(ChatId::from(*admin), &fallback_text)
                .await;
            if let Err(error) = &result {
                warn!(admin = %admin, %error, "audit fallback delivery failed");
            }
            report.push(Audience::SuperAdmin(*admin), result);
        }

        if !report.any_delivered() {
            warn!("audit notice reached no one");
        }
        report
    }

    /// Sends a best-effort direct message to one user's private chat.
    pub async fn direct(&self, user: ChatUserId, text: &str) -> DeliveryReport {
        let mut report = DeliveryReport::new();
        let result = self.messenger.send_text(ChatId::from(user), text).await;
        if let Err(error) = &result {
            warn!(user = %user, %error, "direct notification failed");
        }
        report.push(Audience::User(user), result);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use station_roster_transport::RecordingMessenger;

    fn admins() -> Vec<ChatUserId> {
        vec![ChatUserId::new(100), ChatUserId::new(200)]
    }

    #[tokio::test]
    async fn audit_prefers_the_channel() {
        let messenger = Arc::new(RecordingMessenger::new());
        let audit_chat = ChatId::new(-1000);
        let notifier = Notifier::new(messenger.clone(), Some(audit_chat), admins());

        let report = notifier.audit("worker added").await;

        assert!(report.any_delivered());
        assert_eq!(report.deliveries.len(), 1);
        assert_eq!(messenger.texts_to(audit_chat), ["worker added"]);
        assert!(messenger.texts_to(ChatId::new(100)).is_empty());
    }

    #[tokio::test]
    async fn audit_falls_back_to_every_admin_with_error_detail() {
        let messenger = Arc::new(RecordingMessenger::new());
        let audit_chat = ChatId::new(-1000);
        messenger.fail_chat(audit_chat);
        let notifier = Notifier::new(messenger.clone(), Some(audit_chat), admins());

        let report = notifier.audit("worker added").await;

        assert!(report.any_delivered());
        assert_eq!(report.deliveries.len(), 3);
        assert!(!report.deliveries[0].delivered());
        for admin_chat in [ChatId::new(100), ChatId::new(200)] {
            let texts = messenger.texts_to(admin_chat);
            assert_eq!(texts.len(), 1);
            assert!(texts[0].starts_with("❌ Guruhga yuborilmadi:\nworker added"));
            assert!(texts[0].contains("Xato:"));
        }
    }

    #[tokio::test]
    async fn audit_without_channel_goes_straight_to_admins() {
        let messenger = Arc::new(RecordingMessenger::new());
        let notifier = Notifier::new(messenger.clone(), None, admins());

        let report = notifier.audit("head removed").await;

        assert_eq!(report.deliveries.len(), 2);
        assert!(report
            .deliveries
            .iter()
            .all(|d| matches!(d.audience, Audience::SuperAdmin(_))));
    }

    #[tokio::test]
    async fn one_unreachable_admin_does_not_block_the_rest() {
        let messenger = Arc::new(RecordingMessenger::new());
        let audit_chat = ChatId::new(-1000);
        messenger.fail_chat(audit_chat);
        messenger.fail_chat(ChatId::new(100));
        let notifier = Notifier::new(messenger.clone(), Some(audit_chat), admins());

        let report = notifier.audit("worker updated").await;

        assert!(report.any_delivered());
        assert_eq!(report.failures().len(), 2);
        assert_eq!(messenger.texts_to(ChatId::new(200)), ["worker updated"]);
    }

    #[tokio::test]
    async fn direct_failure_is_contained() {
        let messenger = Arc::new(RecordingMessenger::new());
        let user = ChatUserId::new(77);
        messenger.fail_chat(ChatId::from(user));
        let notifier = Notifier::new(messenger, None, admins());

        let report = notifier.direct(user, "welcome").await;

        assert!(!report.any_delivered());
        assert_eq!(report.deliveries[0].audience, Audience::User(user));
    }
}
