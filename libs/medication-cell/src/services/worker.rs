use chrono::{DateTime, Utc};
use tokio::time::{interval, Duration};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{Reminder, ReminderKind};
use crate::services::notifications::NotificationService;
use crate::services::schedule::MedicationScheduleService;

const SCAN_INTERVAL: Duration = Duration::from_secs(60);

/// Background reminder loop: on each tick, scan all active schedules and
/// raise a notification for every dose that has come due. Minute-resolution
/// and O(schedules) per tick - sized for a user-facing feed, not for a
/// large fleet of schedules.
pub struct ReminderWorker {
    schedules: MedicationScheduleService,
    notifications: NotificationService,
    scan_interval: Duration,
}

impl ReminderWorker {
    pub fn new(schedules: MedicationScheduleService, notifications: NotificationService) -> Self {
        Self {
            schedules,
            notifications,
            scan_interval: SCAN_INTERVAL,
        }
    }

    pub fn with_interval(mut self, scan_interval: Duration) -> Self {
        self.scan_interval = scan_interval;
        self
    }

    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        info!("Starting medication reminder worker");
        tokio::spawn(async move { self.run().await })
    }

    async fn run(self) {
        let mut ticker = interval(self.scan_interval);
        loop {
            ticker.tick().await;
            self.scan(Utc::now()).await;
        }
    }

    /// One pass over all schedules. Public so tests can drive the clock.
    pub async fn scan(&self, now: DateTime<Utc>) {
        let due = self.schedules.collect_due(now).await;
        for (user_id, schedule) in due {
            debug!(
                "Dose due for user {}: {} at {}",
                user_id, schedule.medication_name, schedule.next_dose
            );
            self.notifications
                .push(
                    &user_id,
                    Reminder {
                        id: Uuid::new_v4(),
                        kind: ReminderKind::Medication,
                        title: "Medication Time".to_string(),
                        message: format!(
                            "Time to take {} - dose: {}",
                            schedule.medication_name, schedule.dosage
                        ),
                        time: now,
                        is_read: false,
                    },
                )
                .await;
        }
    }
}
