//! Toast Notifications
//!
//! Transient messages shown after saves, failures and AI requests.

/// Upper bound on toasts kept at once; the oldest is dropped first
pub const MAX_VISIBLE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

impl NotificationLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "notification notification-success",
            NotificationLevel::Error => "notification notification-error",
            NotificationLevel::Info => "notification notification-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NotificationCenter {
    items: Vec<Notification>,
    next_id: u64,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a toast and return its id (monotonic)
    pub fn push(&mut self, level: NotificationLevel, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notification { id, level, message: message.into() });
        if self.items.len() > MAX_VISIBLE {
            self.items.remove(0);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut center = NotificationCenter::new();
        let a = center.push(NotificationLevel::Success, "Task moved");
        let b = center.push(NotificationLevel::Error, "Could not save");
        assert!(b > a);
        assert_eq!(center.items().len(), 2);
        assert_eq!(center.items()[1].level, NotificationLevel::Error);
    }

    #[test]
    fn test_dismiss() {
        let mut center = NotificationCenter::new();
        let id = center.push(NotificationLevel::Info, "Searching");
        assert!(center.dismiss(id));
        assert!(!center.dismiss(id));
        assert!(center.is_empty());
    }

    #[test]
    fn test_oldest_dropped_past_limit() {
        let mut center = NotificationCenter::new();
        for i in 0..(MAX_VISIBLE + 2) {
            center.push(NotificationLevel::Info, format!("n{}", i));
        }
        assert_eq!(center.items().len(), MAX_VISIBLE);
        assert_eq!(center.items()[0].message, "n2");
        // Ids keep counting after drops
        let next = center.push(NotificationLevel::Info, "last");
        assert_eq!(next, (MAX_VISIBLE + 2) as u64);
    }
}
