use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::debug;

use doctor_cell::models::Doctor;

use crate::models::{BookingDraft, BookingError, ConfirmedBooking};

/// Per-user booking drafts. Drafts are transient session state - they live
/// only in memory and are discarded on confirmation.
#[derive(Clone, Default)]
pub struct DraftService {
    drafts: Arc<RwLock<HashMap<String, BookingDraft>>>,
}

impl DraftService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn draft_for(&self, user_id: &str) -> BookingDraft {
        self.drafts
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn select_doctor(&self, user_id: &str, doctor: Doctor) -> BookingDraft {
        debug!("User {} selected doctor {}", user_id, doctor.id);
        let mut drafts = self.drafts.write().await;
        let draft = drafts.entry(user_id.to_string()).or_default();
        draft.select_doctor(doctor);
        draft.clone()
    }

    pub async fn select_date(
        &self,
        user_id: &str,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<BookingDraft, BookingError> {
        let mut drafts = self.drafts.write().await;
        let draft = drafts.entry(user_id.to_string()).or_default();
        draft.select_date(date, today)?;
        Ok(draft.clone())
    }

    pub async fn select_time(
        &self,
        user_id: &str,
        slot: &str,
    ) -> Result<BookingDraft, BookingError> {
        let mut drafts = self.drafts.write().await;
        let draft = drafts.entry(user_id.to_string()).or_default();
        draft.select_time(slot)?;
        Ok(draft.clone())
    }

    pub async fn set_reason(&self, user_id: &str, reason: String) -> BookingDraft {
        let mut drafts = self.drafts.write().await;
        let draft = drafts.entry(user_id.to_string()).or_default();
        draft.set_reason(reason);
        draft.clone()
    }

    /// Confirm the user's draft without discarding it. Used to build the
    /// appointment record first, so a failed backend insert leaves the draft
    /// intact for a retry.
    pub async fn confirm(&self, user_id: &str) -> Result<ConfirmedBooking, BookingError> {
        let drafts = self.drafts.read().await;
        drafts
            .get(user_id)
            .ok_or(BookingError::Incomplete)?
            .confirm()
    }

    /// Drop the user's draft after its confirmation has been acted on. A
    /// second confirm then starts from an empty draft, so rapid duplicate
    /// submissions cannot double-book.
    pub async fn discard(&self, user_id: &str) {
        self.drafts.write().await.remove(user_id);
    }
}
