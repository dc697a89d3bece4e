use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{AddMedicationRequest, MedicationSchedule, ScheduleError};

fn parse_dose_time(time: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| ScheduleError::InvalidTime(time.to_string()))
}

/// Earliest dose that is strictly in the future today and not already
/// taken; when every slot today is exhausted or past, tomorrow's first
/// slot. The result is always strictly greater than `now`.
///
/// Dose times are interpreted on the UTC wall clock.
pub fn next_dose_after(
    times: &[String],
    taken_today: &[String],
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, ScheduleError> {
    let first = times.first().ok_or(ScheduleError::NoTimes)?;
    let today = now.date_naive();

    for time in times {
        let dose = today.and_time(parse_dose_time(time)?).and_utc();
        if dose > now && !taken_today.iter().any(|t| t == time) {
            return Ok(dose);
        }
    }

    let tomorrow = today + Duration::days(1);
    Ok(tomorrow.and_time(parse_dose_time(first)?).and_utc())
}

/// Default dose times for an N-times-daily schedule: starting at 08:00,
/// spread across a 12 hour span.
pub fn default_times(times_per_day: u8) -> Result<Vec<String>, ScheduleError> {
    if !(1..=4).contains(&times_per_day) {
        return Err(ScheduleError::InvalidFrequency);
    }

    let count = times_per_day as u32;
    Ok((0..count)
        .map(|i| format!("{:02}:00", 8 + i * (12 / count)))
        .collect())
}

/// Per-user medication schedules. Session state only - schedules and their
/// taken sets do not survive a restart.
#[derive(Clone, Default)]
pub struct MedicationScheduleService {
    schedules: Arc<RwLock<HashMap<String, Vec<MedicationSchedule>>>>,
}

impl MedicationScheduleService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self, user_id: &str, now: DateTime<Utc>) -> Vec<MedicationSchedule> {
        let mut schedules = self.schedules.write().await;
        let user_schedules = schedules.entry(user_id.to_string()).or_default();
        for schedule in user_schedules.iter_mut() {
            roll_over_day(schedule, now);
        }
        user_schedules.clone()
    }

    pub async fn add(
        &self,
        user_id: &str,
        request: AddMedicationRequest,
        now: DateTime<Utc>,
    ) -> Result<MedicationSchedule, ScheduleError> {
        if request.name.trim().is_empty() || request.dosage.trim().is_empty() {
            return Err(ScheduleError::MissingNameOrDosage);
        }

        let times = match (request.times, request.times_per_day) {
            (Some(times), _) if !times.is_empty() => {
                for time in &times {
                    parse_dose_time(time)?;
                }
                times
            }
            (_, Some(count)) => default_times(count)?,
            _ => return Err(ScheduleError::NoTimes),
        };

        let schedule = MedicationSchedule {
            id: Uuid::new_v4(),
            medication_name: request.name.trim().to_string(),
            dosage: request.dosage.trim().to_string(),
            next_dose: next_dose_after(&times, &[], now)?,
            times,
            is_active: true,
            taken_today: Vec::new(),
            taken_on: now.date_naive(),
        };

        info!(
            "User {} added medication schedule for {}",
            user_id, schedule.medication_name
        );

        let mut schedules = self.schedules.write().await;
        schedules
            .entry(user_id.to_string())
            .or_default()
            .push(schedule.clone());
        Ok(schedule)
    }

    /// Record a dose as taken and recompute the next one.
    pub async fn mark_taken(
        &self,
        user_id: &str,
        schedule_id: Uuid,
        time: &str,
        now: DateTime<Utc>,
    ) -> Result<MedicationSchedule, ScheduleError> {
        let mut schedules = self.schedules.write().await;
        let schedule = find_schedule(&mut schedules, user_id, schedule_id)?;

        if !schedule.times.iter().any(|t| t == time) {
            return Err(ScheduleError::UnknownDoseTime(time.to_string()));
        }

        roll_over_day(schedule, now);
        if !schedule.taken_today.iter().any(|t| t == time) {
            schedule.taken_today.push(time.to_string());
        }
        schedule.next_dose = next_dose_after(&schedule.times, &schedule.taken_today, now)?;

        debug!(
            "User {} marked {} taken at {}; next dose {}",
            user_id, schedule.medication_name, time, schedule.next_dose
        );
        Ok(schedule.clone())
    }

    pub async fn toggle(
        &self,
        user_id: &str,
        schedule_id: Uuid,
    ) -> Result<MedicationSchedule, ScheduleError> {
        let mut schedules = self.schedules.write().await;
        let schedule = find_schedule(&mut schedules, user_id, schedule_id)?;
        schedule.is_active = !schedule.is_active;
        Ok(schedule.clone())
    }

    pub async fn delete(&self, user_id: &str, schedule_id: Uuid) -> Result<(), ScheduleError> {
        let mut schedules = self.schedules.write().await;
        let user_schedules = schedules.get_mut(user_id).ok_or(ScheduleError::NotFound)?;
        let before = user_schedules.len();
        user_schedules.retain(|s| s.id != schedule_id);
        if user_schedules.len() == before {
            return Err(ScheduleError::NotFound);
        }
        Ok(())
    }

    /// One scan of every user's active schedules: collect the doses that
    /// have come due and advance each schedule past them, so a dose is
    /// reported exactly once. O(schedules) per call.
    pub async fn collect_due(&self, now: DateTime<Utc>) -> Vec<(String, MedicationSchedule)> {
        let mut due = Vec::new();
        let mut schedules = self.schedules.write().await;

        for (user_id, user_schedules) in schedules.iter_mut() {
            for schedule in user_schedules.iter_mut() {
                if !schedule.is_active {
                    continue;
                }
                roll_over_day(schedule, now);
                if schedule.next_dose <= now {
                    due.push((user_id.clone(), schedule.clone()));
                    // A skipped dose stays un-taken; the pointer still moves
                    // to the next future slot.
                    if let Ok(next) = next_dose_after(&schedule.times, &schedule.taken_today, now) {
                        schedule.next_dose = next;
                    }
                }
            }
        }

        due
    }
}

/// Reset the taken set when the calendar day has moved past `taken_on`.
fn roll_over_day(schedule: &mut MedicationSchedule, now: DateTime<Utc>) {
    let today = now.date_naive();
    if schedule.taken_on < today {
        schedule.taken_today.clear();
        schedule.taken_on = today;
    }
}

fn find_schedule<'a>(
    schedules: &'a mut HashMap<String, Vec<MedicationSchedule>>,
    user_id: &str,
    schedule_id: Uuid,
) -> Result<&'a mut MedicationSchedule, ScheduleError> {
    schedules
        .get_mut(user_id)
        .and_then(|list| list.iter_mut().find(|s| s.id == schedule_id))
        .ok_or(ScheduleError::NotFound)
}
