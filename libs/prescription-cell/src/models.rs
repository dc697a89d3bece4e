use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One medication line on a prescription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionItem {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: Uuid,
    pub doctor_id: String,
    pub patient_id: String,
    pub appointment_id: Option<Uuid>,
    pub diagnosis: String,
    pub medications: Vec<PrescriptionItem>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePrescriptionRequest {
    pub patient_id: String,
    pub appointment_id: Option<Uuid>,
    pub diagnosis: String,
    pub medications: Vec<PrescriptionItem>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrescriptionError {
    #[error("Diagnosis is required")]
    MissingDiagnosis,

    #[error("A prescription needs at least one medication")]
    NoMedications,

    #[error("Each medication needs a name and dosage")]
    IncompleteMedication,
}

/// Validate an authoring request before it is sent to the backend.
pub fn validate_prescription(request: &CreatePrescriptionRequest) -> Result<(), PrescriptionError> {
    if request.diagnosis.trim().is_empty() {
        return Err(PrescriptionError::MissingDiagnosis);
    }
    if request.medications.is_empty() {
        return Err(PrescriptionError::NoMedications);
    }
    for item in &request.medications {
        if item.name.trim().is_empty() || item.dosage.trim().is_empty() {
            return Err(PrescriptionError::IncompleteMedication);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn item(name: &str, dosage: &str) -> PrescriptionItem {
        PrescriptionItem {
            name: name.to_string(),
            dosage: dosage.to_string(),
            frequency: "twice daily".to_string(),
            duration: "7 days".to_string(),
            instructions: None,
        }
    }

    fn request(diagnosis: &str, medications: Vec<PrescriptionItem>) -> CreatePrescriptionRequest {
        CreatePrescriptionRequest {
            patient_id: "patient-1".to_string(),
            appointment_id: None,
            diagnosis: diagnosis.to_string(),
            medications,
            notes: None,
        }
    }

    #[test]
    fn diagnosis_is_required() {
        assert_matches!(
            validate_prescription(&request("  ", vec![item("Amoxicillin 500mg", "1 capsule")])),
            Err(PrescriptionError::MissingDiagnosis)
        );
    }

    #[test]
    fn at_least_one_medication_is_required() {
        assert_matches!(
            validate_prescription(&request("Tonsillitis", vec![])),
            Err(PrescriptionError::NoMedications)
        );
    }

    #[test]
    fn every_medication_needs_name_and_dosage() {
        assert_matches!(
            validate_prescription(&request("Tonsillitis", vec![item("", "1 capsule")])),
            Err(PrescriptionError::IncompleteMedication)
        );
        assert_matches!(
            validate_prescription(&request("Tonsillitis", vec![item("Amoxicillin 500mg", "")])),
            Err(PrescriptionError::IncompleteMedication)
        );
    }

    #[test]
    fn a_complete_request_passes() {
        assert!(validate_prescription(&request(
            "Tonsillitis",
            vec![item("Amoxicillin 500mg", "1 capsule")]
        ))
        .is_ok());
    }
}
