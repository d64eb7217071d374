//! Product catalogue and the item requests customers place against it.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Number of product types the bakery sells.
pub const PRODUCT_TYPE_COUNT: usize = 7;

/// The closed set of things a bakery produces and sells.
///
/// Discriminants double as indices into the per-product arrays of
/// [`BakeryConfig`](crate::model::BakeryConfig) and
/// [`ProductionStatus`](crate::framework::ProductionStatus).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Bread = 0,
    Sandwich = 1,
    Cake = 2,
    Sweet = 3,
    SweetPatisserie = 4,
    SavoryPatisserie = 5,
    Paste = 6,
}

impl ProductType {
    /// Every product type, in index order.
    pub const ALL: [ProductType; PRODUCT_TYPE_COUNT] = [
        ProductType::Bread,
        ProductType::Sandwich,
        ProductType::Cake,
        ProductType::Sweet,
        ProductType::SweetPatisserie,
        ProductType::SavoryPatisserie,
        ProductType::Paste,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Maps an index back to its product type, `None` when out of range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            ProductType::Bread => "bread",
            ProductType::Sandwich => "sandwich",
            ProductType::Cake => "cake",
            ProductType::Sweet => "sweet",
            ProductType::SweetPatisserie => "sweet_patisserie",
            ProductType::SavoryPatisserie => "savory_patisserie",
            ProductType::Paste => "paste",
        }
    }
}

impl Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Type-safe identifier for customers, assigned by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomerId(pub u64);

impl Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "customer_{}", self.0)
    }
}

/// Type-safe identifier for sellers behind the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SellerId(pub u32);

impl Display for SellerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "seller_{}", self.0)
    }
}

/// One order line placed by a customer.
///
/// A visit consists of several of these, sent one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemRequest {
    pub customer_id: CustomerId,
    pub product: ProductType,
    pub subtype: u32,
    pub quantity: u32,
}

impl ItemRequest {
    pub fn new(customer_id: CustomerId, product: ProductType, subtype: u32, quantity: u32) -> Self {
        Self {
            customer_id,
            product,
            subtype,
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_match_declaration_order() {
        for (i, product) in ProductType::ALL.iter().enumerate() {
            assert_eq!(product.index(), i);
            assert_eq!(ProductType::from_index(i), Some(*product));
        }
        assert_eq!(ProductType::from_index(PRODUCT_TYPE_COUNT), None);
    }

    #[test]
    fn customer_id_display() {
        assert_eq!(CustomerId(7).to_string(), "customer_7");
    }
}
