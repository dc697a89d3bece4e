use crate::models::{Medication, Pharmacy};

/// In-memory pharmacy catalog, seeded once at startup. Stock levels and
/// prices are sample data; a durable inventory is out of scope.
pub struct PharmacyCatalog {
    pharmacies: Vec<Pharmacy>,
}

impl PharmacyCatalog {
    pub fn new(pharmacies: Vec<Pharmacy>) -> Self {
        Self { pharmacies }
    }

    pub fn with_seed_catalog() -> Self {
        let med = |id: u32, name: &str, dosage: &str, price: f64, in_stock: bool, rx: bool| {
            Medication {
                id,
                name: name.to_string(),
                dosage: dosage.to_string(),
                price,
                in_stock,
                prescription_required: rx,
            }
        };

        Self::new(vec![
            Pharmacy {
                id: 1,
                name: "Al-Huda Pharmacy".to_string(),
                rating: 4.8,
                delivery_time: "30-45 minutes".to_string(),
                delivery_fee: 15.0,
                min_order: 50.0,
                address: "10th of Ramadan City, Sharqia".to_string(),
                phone: "01234567890".to_string(),
                medications: vec![
                    med(1, "Aspirin 100mg", "30 tablets", 25.0, true, false),
                    med(2, "Paracetamol 500mg", "20 tablets", 18.0, true, false),
                    med(3, "Amoxicillin 500mg", "14 capsules", 45.0, true, true),
                    med(7, "Vitamin D 1000 IU", "30 capsules", 35.0, true, false),
                    med(8, "Iron 65mg", "30 tablets", 28.0, true, false),
                    med(9, "Antibiotic Ointment", "15g", 22.0, true, false),
                ],
            },
            Pharmacy {
                id: 2,
                name: "Al-Dawaa Pharmacy".to_string(),
                rating: 4.6,
                delivery_time: "45-60 minutes".to_string(),
                delivery_fee: 10.0,
                min_order: 40.0,
                address: "Nasr City, Cairo".to_string(),
                phone: "01234567891".to_string(),
                medications: vec![
                    med(4, "Ibuprofen 400mg", "20 tablets", 22.0, true, false),
                    med(5, "Omeprazole 20mg", "14 capsules", 35.0, false, true),
                    med(6, "Loratadine 10mg", "10 tablets", 28.0, true, false),
                    med(10, "Children's Cough Syrup", "120ml", 32.0, true, false),
                    med(11, "Anti-Inflammatory Eye Drops", "10ml", 42.0, true, true),
                    med(12, "Moisturizing Face Cream", "50g", 65.0, true, false),
                ],
            },
            Pharmacy {
                id: 3,
                name: "Al-Ezaby Pharmacy".to_string(),
                rating: 4.7,
                delivery_time: "25-40 minutes".to_string(),
                delivery_fee: 12.0,
                min_order: 45.0,
                address: "Alexandria".to_string(),
                phone: "01234567892".to_string(),
                medications: vec![
                    med(13, "Calcium 600mg", "30 tablets", 38.0, true, false),
                    med(14, "Antacid", "20 tablets", 24.0, true, false),
                    med(15, "Strong Painkiller", "10 tablets", 55.0, true, true),
                    med(16, "Vitamin C 1000mg", "30 effervescent tablets", 48.0, true, false),
                    med(17, "Broad-Spectrum Antibiotic", "7 capsules", 68.0, true, true),
                    med(18, "75% Hand Sanitizer", "250ml", 15.0, true, false),
                ],
            },
        ])
    }

    pub fn all(&self) -> &[Pharmacy] {
        &self.pharmacies
    }

    pub fn find(&self, pharmacy_id: u32) -> Option<&Pharmacy> {
        self.pharmacies.iter().find(|p| p.id == pharmacy_id)
    }

    pub fn find_medication(&self, pharmacy_id: u32, medication_id: u32) -> Option<&Medication> {
        self.find(pharmacy_id)?
            .medications
            .iter()
            .find(|m| m.id == medication_id)
    }

    /// Case-insensitive substring search within one pharmacy's stock list.
    pub fn search_medications(&self, pharmacy_id: u32, query: &str) -> Vec<Medication> {
        let needle = query.to_lowercase();
        self.find(pharmacy_id)
            .map(|pharmacy| {
                pharmacy
                    .medications
                    .iter()
                    .filter(|m| m.name.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for PharmacyCatalog {
    fn default() -> Self {
        Self::with_seed_catalog()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_is_case_insensitive_substring_match() {
        let catalog = PharmacyCatalog::with_seed_catalog();

        let hits = catalog.search_medications(1, "vitamin");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Vitamin D 1000 IU");

        assert!(catalog.search_medications(1, "xyz").is_empty());
        assert_eq!(catalog.search_medications(1, "").len(), 6);
    }

    #[test]
    fn medication_lookup_is_scoped_to_the_pharmacy() {
        let catalog = PharmacyCatalog::with_seed_catalog();

        assert!(catalog.find_medication(1, 1).is_some());
        // Medication 4 belongs to pharmacy 2.
        assert!(catalog.find_medication(1, 4).is_none());
        assert!(catalog.find_medication(2, 4).is_some());
    }
}
