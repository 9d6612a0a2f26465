//! Cache types for backend API responses.

use crate::models::{Category, Product};

/// Cached value types for catalog reads.
///
/// Parameter reads are deliberately never cached here: cap-sensitive cart
/// mutations must see admin changes on the very next fetch.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Vec<Product>),
    Categories(Vec<Category>),
}
