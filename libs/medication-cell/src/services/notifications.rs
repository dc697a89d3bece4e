use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Reminder, ReminderKind, ScheduleError};

/// Per-user notification feeds. A feed is seeded with sample entries the
/// first time it is touched, then only mutated by the reminder worker and
/// by user actions (mark read, remove).
#[derive(Clone, Default)]
pub struct NotificationService {
    reminders: Arc<RwLock<HashMap<String, Vec<Reminder>>>>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self, user_id: &str, now: DateTime<Utc>) -> Vec<Reminder> {
        let mut reminders = self.reminders.write().await;
        reminders
            .entry(user_id.to_string())
            .or_insert_with(|| seed_reminders(now))
            .clone()
    }

    pub async fn push(&self, user_id: &str, reminder: Reminder) {
        debug!("Notification for {}: {}", user_id, reminder.title);
        let mut reminders = self.reminders.write().await;
        reminders
            .entry(user_id.to_string())
            .or_default()
            .push(reminder);
    }

    pub async fn mark_read(
        &self,
        user_id: &str,
        reminder_id: Uuid,
    ) -> Result<Reminder, ScheduleError> {
        let mut reminders = self.reminders.write().await;
        let reminder = reminders
            .get_mut(user_id)
            .and_then(|list| list.iter_mut().find(|r| r.id == reminder_id))
            .ok_or(ScheduleError::ReminderNotFound)?;
        reminder.is_read = true;
        Ok(reminder.clone())
    }

    pub async fn remove(&self, user_id: &str, reminder_id: Uuid) -> Result<(), ScheduleError> {
        let mut reminders = self.reminders.write().await;
        let list = reminders
            .get_mut(user_id)
            .ok_or(ScheduleError::ReminderNotFound)?;
        let before = list.len();
        list.retain(|r| r.id != reminder_id);
        if list.len() == before {
            return Err(ScheduleError::ReminderNotFound);
        }
        Ok(())
    }

    pub async fn unread_count(&self, user_id: &str) -> usize {
        let reminders = self.reminders.read().await;
        reminders
            .get(user_id)
            .map(|list| list.iter().filter(|r| !r.is_read).count())
            .unwrap_or(0)
    }
}

/// Sample feed shown before any real reminders have fired.
fn seed_reminders(now: DateTime<Utc>) -> Vec<Reminder> {
    vec![
        Reminder {
            id: Uuid::new_v4(),
            kind: ReminderKind::Medication,
            title: "Medication Time".to_string(),
            message: "Time to take Aspirin 100mg".to_string(),
            time: now,
            is_read: false,
        },
        Reminder {
            id: Uuid::new_v4(),
            kind: ReminderKind::Appointment,
            title: "Medical Appointment Tomorrow".to_string(),
            message: "You have an appointment with Dr. Ahmed Hassan tomorrow at 2:00 PM"
                .to_string(),
            time: now - Duration::hours(2),
            is_read: false,
        },
    ]
}
