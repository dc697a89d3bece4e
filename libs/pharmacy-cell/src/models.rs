use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub id: u32,
    pub name: String,
    pub dosage: String,
    pub price: f64,
    pub in_stock: bool,
    pub prescription_required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pharmacy {
    pub id: u32,
    pub name: String,
    pub rating: f32,
    pub delivery_time: String,
    pub delivery_fee: f64,
    pub min_order: f64,
    pub address: String,
    pub phone: String,
    pub medications: Vec<Medication>,
}

/// One cart line. Items are keyed by (medication id, pharmacy id).
#[derive(Debug, Clone, Serialize)]
pub struct CartItem {
    pub medication: Medication,
    pub quantity: u32,
    pub pharmacy_id: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Cash,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    pub item_count: u32,
    pub items_total: f64,
    pub delivery_fee: f64,
    pub final_total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderConfirmation {
    pub items_total: f64,
    pub delivery_fee: f64,
    pub final_total: f64,
    pub delivery_estimate: String,
    pub payment_method: PaymentMethod,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    #[error("Pharmacy not found")]
    UnknownPharmacy,

    #[error("Medication not found")]
    UnknownMedication,

    #[error("{0} is out of stock")]
    OutOfStock(String),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Delivery address is required")]
    MissingAddress,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub pharmacy_id: u32,
    pub medication_id: u32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub pharmacy_id: u32,
    pub medication_id: u32,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub delivery_address: String,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Deserialize)]
pub struct MedicationSearchQuery {
    pub search: Option<String>,
}
