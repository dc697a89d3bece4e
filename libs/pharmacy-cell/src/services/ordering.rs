use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::models::{CartError, CartSummary, CheckoutRequest, OrderConfirmation};
use crate::services::cart::Cart;
use crate::services::catalog::PharmacyCatalog;

/// Per-user carts over the shared pharmacy catalog. Carts are session
/// state only; checkout produces a confirmation and clears the cart, with
/// no idempotency or retry around the action.
#[derive(Clone)]
pub struct OrderingService {
    catalog: Arc<PharmacyCatalog>,
    carts: Arc<RwLock<HashMap<String, Cart>>>,
}

impl OrderingService {
    pub fn new(catalog: Arc<PharmacyCatalog>) -> Self {
        Self {
            catalog,
            carts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn catalog(&self) -> &PharmacyCatalog {
        &self.catalog
    }

    pub async fn add_to_cart(
        &self,
        user_id: &str,
        pharmacy_id: u32,
        medication_id: u32,
    ) -> Result<CartSummary, CartError> {
        self.catalog
            .find(pharmacy_id)
            .ok_or(CartError::UnknownPharmacy)?;
        let medication = self
            .catalog
            .find_medication(pharmacy_id, medication_id)
            .ok_or(CartError::UnknownMedication)?
            .clone();

        if !medication.in_stock {
            return Err(CartError::OutOfStock(medication.name));
        }

        debug!("User {} adding medication {} to cart", user_id, medication_id);
        let mut carts = self.carts.write().await;
        let cart = carts.entry(user_id.to_string()).or_default();
        cart.add(medication, pharmacy_id);
        Ok(self.summarize(cart))
    }

    pub async fn update_quantity(
        &self,
        user_id: &str,
        pharmacy_id: u32,
        medication_id: u32,
        quantity: u32,
    ) -> CartSummary {
        let mut carts = self.carts.write().await;
        let cart = carts.entry(user_id.to_string()).or_default();
        cart.update_quantity(medication_id, pharmacy_id, quantity);
        self.summarize(cart)
    }

    pub async fn remove_from_cart(
        &self,
        user_id: &str,
        pharmacy_id: u32,
        medication_id: u32,
    ) -> CartSummary {
        let mut carts = self.carts.write().await;
        let cart = carts.entry(user_id.to_string()).or_default();
        cart.remove(medication_id, pharmacy_id);
        self.summarize(cart)
    }

    pub async fn cart_summary(&self, user_id: &str) -> CartSummary {
        let carts = self.carts.read().await;
        let cart = carts.get(user_id).cloned().unwrap_or_default();
        self.summarize(&cart)
    }

    /// Delivery fee comes from the FIRST cart line's pharmacy only. A cart
    /// mixing pharmacies is not blocked and will be priced by whichever
    /// pharmacy happens to be first.
    pub fn delivery_fee(&self, cart: &Cart) -> f64 {
        cart.first_pharmacy_id()
            .and_then(|id| self.catalog.find(id))
            .map(|pharmacy| pharmacy.delivery_fee)
            .unwrap_or(0.0)
    }

    /// Place the order: requires a non-empty cart and a delivery address.
    /// Clears the cart on success.
    pub async fn checkout(
        &self,
        user_id: &str,
        request: CheckoutRequest,
    ) -> Result<OrderConfirmation, CartError> {
        let mut carts = self.carts.write().await;
        let cart = carts.entry(user_id.to_string()).or_default();

        if cart.is_empty() {
            return Err(CartError::EmptyCart);
        }
        if request.delivery_address.trim().is_empty() {
            return Err(CartError::MissingAddress);
        }

        let items_total = cart.total();
        let delivery_fee = self.delivery_fee(cart);
        let final_total = items_total + delivery_fee;
        let delivery_estimate = cart
            .first_pharmacy_id()
            .and_then(|id| self.catalog.find(id))
            .map(|pharmacy| pharmacy.delivery_time.clone())
            .unwrap_or_default();

        cart.clear();
        info!("Order placed by {} for {} EGP", user_id, final_total);

        Ok(OrderConfirmation {
            items_total,
            delivery_fee,
            final_total,
            delivery_estimate: delivery_estimate.clone(),
            payment_method: request.payment_method,
            message: format!(
                "Order confirmed for {} EGP. Delivery within {}",
                final_total, delivery_estimate
            ),
        })
    }

    fn summarize(&self, cart: &Cart) -> CartSummary {
        let items_total = cart.total();
        let delivery_fee = self.delivery_fee(cart);
        CartSummary {
            items: cart.items().to_vec(),
            item_count: cart.item_count(),
            items_total,
            delivery_fee,
            final_total: items_total + delivery_fee,
        }
    }
}
