use tracing::debug;

use crate::models::{ConsultationType, Doctor, DoctorError};

/// In-memory doctor catalog. The directory is seeded once at startup and
/// read-only afterwards; the durable doctor registry lives behind the
/// external backend and is out of scope here.
pub struct DoctorDirectory {
    doctors: Vec<Doctor>,
}

impl DoctorDirectory {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        Self { doctors }
    }

    /// The seed catalog used by the booking flow.
    pub fn with_seed_catalog() -> Self {
        let slots = |times: &[&str]| times.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        Self::new(vec![
            Doctor {
                id: 1,
                name: "Dr. Ahmed Hassan".to_string(),
                specialty: "Cardiology".to_string(),
                rating: 4.8,
                years_experience: 15,
                clinic: "Al-Nour Hospital".to_string(),
                address: "Nile Street, Maadi, Cairo".to_string(),
                consultation_fee: 200.0,
                available_slots: slots(&["09:00", "10:00", "11:00", "14:00", "15:00"]),
                consultation_type: ConsultationType::Clinic,
            },
            Doctor {
                id: 2,
                name: "Dr. Mona El-Sayed".to_string(),
                specialty: "Dermatology".to_string(),
                rating: 4.9,
                years_experience: 12,
                clinic: "Beauty Clinic".to_string(),
                address: "Tahrir Street, Downtown, Cairo".to_string(),
                consultation_fee: 150.0,
                available_slots: slots(&["10:00", "11:00", "16:00", "17:00"]),
                consultation_type: ConsultationType::Clinic,
            },
            Doctor {
                id: 3,
                name: "Dr. Karim Mostafa".to_string(),
                specialty: "Cardiology".to_string(),
                rating: 4.7,
                years_experience: 10,
                clinic: "Online Consultation".to_string(),
                address: "Available Online".to_string(),
                consultation_fee: 100.0,
                available_slots: slots(&["08:00", "09:00", "20:00", "21:00"]),
                consultation_type: ConsultationType::Video,
            },
            Doctor {
                id: 4,
                name: "Dr. Tarek Abdelrahman".to_string(),
                specialty: "Orthopedics".to_string(),
                rating: 4.6,
                years_experience: 18,
                clinic: "New Cairo Hospital".to_string(),
                address: "90th Street, New Cairo".to_string(),
                consultation_fee: 250.0,
                available_slots: slots(&["09:30", "11:30", "14:30", "16:30"]),
                consultation_type: ConsultationType::Clinic,
            },
            Doctor {
                id: 5,
                name: "Dr. Sara Ibrahim".to_string(),
                specialty: "Pediatrics".to_string(),
                rating: 4.8,
                years_experience: 14,
                clinic: "Pediatric Clinic".to_string(),
                address: "Haram Street, Giza".to_string(),
                consultation_fee: 180.0,
                available_slots: slots(&["10:30", "12:00", "15:30", "17:30"]),
                consultation_type: ConsultationType::Clinic,
            },
            Doctor {
                id: 6,
                name: "Dr. Omar Farouk".to_string(),
                specialty: "General Medicine".to_string(),
                rating: 4.5,
                years_experience: 8,
                clinic: "Online Consultation".to_string(),
                address: "Available Online".to_string(),
                consultation_fee: 80.0,
                available_slots: slots(&["07:00", "08:30", "21:30", "22:00"]),
                consultation_type: ConsultationType::Video,
            },
        ])
    }

    pub fn all(&self) -> &[Doctor] {
        &self.doctors
    }

    /// Exact match on the specialty field, preserving catalog order.
    pub fn filter_by_specialty(&self, specialty: &str) -> Vec<Doctor> {
        debug!("Filtering doctors by specialty: {}", specialty);
        self.doctors
            .iter()
            .filter(|d| d.specialty == specialty)
            .cloned()
            .collect()
    }

    /// Doctors ordered by rating, highest first. Stable for equal ratings.
    pub fn sorted_by_rating(&self) -> Vec<Doctor> {
        let mut sorted = self.doctors.clone();
        sorted.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(std::cmp::Ordering::Equal));
        sorted
    }

    pub fn find(&self, doctor_id: u32) -> Result<&Doctor, DoctorError> {
        self.doctors
            .iter()
            .find(|d| d.id == doctor_id)
            .ok_or(DoctorError::NotFound)
    }

    /// Distinct specialties in first-seen catalog order, for filter menus.
    pub fn specialties(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for doctor in &self.doctors {
            if !seen.contains(&doctor.specialty) {
                seen.push(doctor.specialty.clone());
            }
        }
        seen
    }
}

impl Default for DoctorDirectory {
    fn default() -> Self {
        Self::with_seed_catalog()
    }
}
