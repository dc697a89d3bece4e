use serde::Serialize;

use crate::models::{CartItem, Medication};

/// Accumulating order state. Items are keyed by (medication id, pharmacy
/// id); quantity zero removes the line. The cart does not block items from
/// different pharmacies - delivery pricing reads the first line's pharmacy
/// only, see `OrderingService::delivery_fee`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Add one unit. An existing line for the same medication and pharmacy
    /// is incremented; otherwise a new line with quantity one is appended.
    pub fn add(&mut self, medication: Medication, pharmacy_id: u32) {
        if let Some(item) = self.find_mut(medication.id, pharmacy_id) {
            item.quantity += 1;
            return;
        }
        self.items.push(CartItem {
            medication,
            quantity: 1,
            pharmacy_id,
        });
    }

    /// Set a line's quantity. Zero removes the line entirely.
    pub fn update_quantity(&mut self, medication_id: u32, pharmacy_id: u32, quantity: u32) {
        if quantity == 0 {
            self.remove(medication_id, pharmacy_id);
            return;
        }
        if let Some(item) = self.find_mut(medication_id, pharmacy_id) {
            item.quantity = quantity;
        }
    }

    pub fn remove(&mut self, medication_id: u32, pharmacy_id: u32) {
        self.items
            .retain(|item| !(item.medication.id == medication_id && item.pharmacy_id == pharmacy_id));
    }

    /// Sum of price x quantity over all lines.
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.medication.price * item.quantity as f64)
            .sum()
    }

    /// Total unit count, i.e. the cart badge number.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Pharmacy of the first line, which is what delivery pricing uses.
    pub fn first_pharmacy_id(&self) -> Option<u32> {
        self.items.first().map(|item| item.pharmacy_id)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn find_mut(&mut self, medication_id: u32, pharmacy_id: u32) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| item.medication.id == medication_id && item.pharmacy_id == pharmacy_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::PharmacyCatalog;

    fn medication(pharmacy_id: u32, medication_id: u32) -> Medication {
        PharmacyCatalog::with_seed_catalog()
            .find_medication(pharmacy_id, medication_id)
            .unwrap()
            .clone()
    }

    #[test]
    fn adding_the_same_medication_twice_increments_one_line() {
        let mut cart = Cart::default();
        let aspirin = medication(1, 1); // price 25

        cart.add(aspirin.clone(), 1);
        cart.add(aspirin, 1);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total(), 50.0);
    }

    #[test]
    fn same_medication_id_in_another_pharmacy_is_a_separate_line() {
        let mut cart = Cart::default();
        cart.add(medication(1, 1), 1);
        cart.add(medication(2, 4), 2);

        assert_eq!(cart.items().len(), 2);
    }

    #[test]
    fn quantity_zero_removes_the_line() {
        let mut cart = Cart::default();
        cart.add(medication(1, 2), 1);
        assert!(!cart.is_empty());

        cart.update_quantity(2, 1, 0);
        assert!(cart.is_empty());
        assert!(!cart.items().iter().any(|i| i.medication.id == 2));
    }

    #[test]
    fn total_is_price_times_quantity_across_lines() {
        let mut cart = Cart::default();
        cart.add(medication(1, 1), 1); // 25
        cart.update_quantity(1, 1, 3); // 75
        cart.add(medication(1, 2), 1); // 18

        assert_eq!(cart.total(), 93.0);
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn first_pharmacy_follows_insertion_order() {
        let mut cart = Cart::default();
        assert_eq!(cart.first_pharmacy_id(), None);

        cart.add(medication(2, 4), 2);
        cart.add(medication(1, 1), 1);
        assert_eq!(cart.first_pharmacy_id(), Some(2));

        // Removing the first line shifts the delivery pharmacy.
        cart.remove(4, 2);
        assert_eq!(cart.first_pharmacy_id(), Some(1));
    }
}
