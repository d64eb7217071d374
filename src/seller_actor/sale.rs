//! Resolving one request against the ledger.
//!
//! These functions take the already-locked [`ProductionStatus`], so callers
//! decide how long the critical section lasts. They never sleep or await.

use crate::framework::{ProductionStatus, SaleOutcome};
use crate::model::{BakeryConfig, ItemRequest};

/// Surcharge per subtype level over the base unit price.
pub const SUBTYPE_PREMIUM: f64 = 0.1;

/// Price of `quantity` units at `base_price`; subtype `n > 0` adds `n * 10%`.
pub fn sale_price(base_price: f64, quantity: u32, subtype: u32) -> f64 {
    let price = base_price * f64::from(quantity);
    if subtype > 0 {
        price * (1.0 + SUBTYPE_PREMIUM * f64::from(subtype))
    } else {
        price
    }
}

/// Whether the shelf holds enough of the requested product.
///
/// Stock is tracked per product type only; the subtype does not matter here.
pub fn is_available(status: &ProductionStatus, request: &ItemRequest) -> bool {
    status.available(request.product) >= u64::from(request.quantity)
}

/// Sells the request if stock allows, otherwise records a missing-item request.
pub fn resolve_request(status: &mut ProductionStatus, request: &ItemRequest, config: &BakeryConfig) -> SaleOutcome {
    if !is_available(status, request) {
        status.missing_items_requests += 1;
        return SaleOutcome::OutOfStock;
    }

    status.sold_items[request.product.index()] += u64::from(request.quantity);
    let price = sale_price(config.base_price(request.product), request.quantity, request.subtype);
    status.total_profit += price;
    SaleOutcome::Sold { price }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerId, ProductType};

    fn stocked(product: ProductType, produced: u64, sold: u64) -> ProductionStatus {
        let mut status = ProductionStatus::default();
        status.produced_items[product.index()] = produced;
        status.sold_items[product.index()] = sold;
        status
    }

    #[test]
    fn sold_out_bread_is_a_missing_item() {
        let config = BakeryConfig::default();
        let mut status = stocked(ProductType::Bread, 5, 5);
        let request = ItemRequest::new(CustomerId(1), ProductType::Bread, 0, 1);

        assert_eq!(resolve_request(&mut status, &request, &config), SaleOutcome::OutOfStock);
        assert_eq!(status.missing_items_requests, 1);
        assert_eq!(status.sold_items[ProductType::Bread.index()], 5);
        assert_eq!(status.total_profit, 0.0);
    }

    #[test]
    fn premium_cake_sale_updates_stock_and_profit() {
        let mut config = BakeryConfig::default();
        config.product_prices[ProductType::Cake.index()] = 4.00;
        let mut status = stocked(ProductType::Cake, 10, 2);
        let request = ItemRequest::new(CustomerId(2), ProductType::Cake, 1, 3);

        let outcome = resolve_request(&mut status, &request, &config);
        let SaleOutcome::Sold { price } = outcome else {
            panic!("expected a sale, got {outcome:?}");
        };
        assert!((price - 13.20).abs() < 1e-9);
        assert_eq!(status.sold_items[ProductType::Cake.index()], 5);
        assert!((status.total_profit - 13.20).abs() < 1e-9);
        assert_eq!(status.missing_items_requests, 0);
    }

    #[test]
    fn exact_remaining_stock_can_be_sold() {
        let config = BakeryConfig::default();
        let mut status = stocked(ProductType::Sweet, 3, 1);
        let request = ItemRequest::new(CustomerId(3), ProductType::Sweet, 0, 2);
        assert!(resolve_request(&mut status, &request, &config).is_sold());
        assert_eq!(status.available(ProductType::Sweet), 0);
    }

    #[test]
    fn availability_is_idempotent_on_an_unchanged_snapshot() {
        let status = stocked(ProductType::Paste, 4, 2);
        let fits = ItemRequest::new(CustomerId(4), ProductType::Paste, 0, 2);
        let too_many = ItemRequest::new(CustomerId(4), ProductType::Paste, 0, 3);
        assert_eq!(is_available(&status, &fits), is_available(&status, &fits));
        assert!(is_available(&status, &fits));
        assert!(!is_available(&status, &too_many));
        assert!(!is_available(&status, &too_many));
    }

    #[test]
    fn base_subtype_has_no_premium() {
        assert_eq!(sale_price(2.5, 2, 0), 5.0);
        assert!((sale_price(2.0, 1, 3) - 2.6).abs() < 1e-9);
    }
}
