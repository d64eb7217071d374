//! Pure data: the product catalogue, item requests and the bakery configuration.

pub mod config;
pub mod product;

pub use config::*;
pub use product::*;
