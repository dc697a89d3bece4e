use chrono::{TimeZone, Utc};

use medication_cell::models::{AddMedicationRequest, ReminderKind};
use medication_cell::services::notifications::NotificationService;
use medication_cell::services::schedule::MedicationScheduleService;
use medication_cell::services::worker::ReminderWorker;

fn at(h: u32, m: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, h, m, 0).unwrap()
}

async fn seeded_service(user: &str) -> (MedicationScheduleService, uuid::Uuid) {
    let schedules = MedicationScheduleService::new();
    let schedule = schedules
        .add(
            user,
            AddMedicationRequest {
                name: "Aspirin 100mg".to_string(),
                dosage: "1 tablet".to_string(),
                times: Some(vec!["08:00".to_string(), "20:00".to_string()]),
                times_per_day: None,
            },
            at(7, 0),
        )
        .await
        .unwrap();
    (schedules, schedule.id)
}

#[tokio::test]
async fn a_due_dose_raises_one_medication_reminder() {
    let (schedules, _) = seeded_service("user").await;
    let notifications = NotificationService::new();
    let worker = ReminderWorker::new(schedules.clone(), notifications.clone());

    // Touch the feed before the dose fires so the seed entries are separate.
    let baseline = notifications.list("user", at(7, 30)).await.len();

    worker.scan(at(8, 1)).await;

    let feed = notifications.list("user", at(8, 1)).await;
    assert_eq!(feed.len(), baseline + 1);

    let raised = feed.last().unwrap();
    assert_eq!(raised.kind, ReminderKind::Medication);
    assert!(raised.message.contains("Aspirin 100mg"));
    assert!(raised.message.contains("1 tablet"));
    assert!(!raised.is_read);

    // The same dose does not fire again on the next tick.
    worker.scan(at(8, 2)).await;
    assert_eq!(notifications.list("user", at(8, 2)).await.len(), baseline + 1);
}

#[tokio::test]
async fn scan_advances_the_schedule_past_the_due_dose() {
    let (schedules, _) = seeded_service("user").await;
    let notifications = NotificationService::new();
    let worker = ReminderWorker::new(schedules.clone(), notifications.clone());

    worker.scan(at(8, 1)).await;

    let listed = schedules.list("user", at(8, 1)).await;
    assert_eq!(listed[0].next_dose, at(20, 0));
    // The missed dose stays un-taken.
    assert!(listed[0].taken_today.is_empty());
}

#[tokio::test]
async fn inactive_schedules_do_not_fire() {
    let (schedules, schedule_id) = seeded_service("user").await;
    let notifications = NotificationService::new();
    let worker = ReminderWorker::new(schedules.clone(), notifications.clone());

    schedules.toggle("user", schedule_id).await.unwrap();
    let baseline = notifications.list("user", at(7, 30)).await.len();

    worker.scan(at(8, 1)).await;
    assert_eq!(notifications.list("user", at(8, 1)).await.len(), baseline);
}
