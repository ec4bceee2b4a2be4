use std::sync::{Arc, Mutex};

use crate::domain::ports::{NotificationLevel, Notifier};

/// Forwards notifications to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        match level {
            NotificationLevel::Info => tracing::info!(target: "notify", "{message}"),
            NotificationLevel::Success => tracing::info!(target: "notify", "✔ {message}"),
            NotificationLevel::Error => tracing::error!(target: "notify", "{message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// Keeps every notification in memory, for embedding callers and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        match self.notifications.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn messages(&self, level: NotificationLevel) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter(|n| n.level == level)
            .map(|n| n.message)
            .collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        let notification = Notification {
            level,
            message: message.to_string(),
        };
        match self.notifications.lock() {
            Ok(mut guard) => guard.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_notifier_records_in_order() {
        let notifier = MemoryNotifier::new();
        notifier.info("Uploading XII Marksheet to IPFS...");
        notifier.error("Failed to upload XII Marksheet");

        let all = notifier.notifications();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].level, NotificationLevel::Info);
        assert_eq!(
            notifier.messages(NotificationLevel::Error),
            vec!["Failed to upload XII Marksheet".to_string()]
        );
    }

    #[test]
    fn test_clones_share_storage() {
        let notifier = MemoryNotifier::new();
        let clone = notifier.clone();
        clone.success("Request submitted successfully!");
        assert_eq!(notifier.notifications().len(), 1);
    }
}
