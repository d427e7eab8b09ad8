//! Items

use crate::products::ProductKey;

/// A single cart line: a product reference and how many of it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LineItem {
    product: Option<ProductKey>,
    quantity: u32,
}

impl LineItem {
    /// Creates a line item for the given product.
    pub fn new(product: ProductKey, quantity: u32) -> Self {
        Self {
            product: Some(product),
            quantity,
        }
    }

    /// Creates a line item with no product attached (fees, gift wrap and the like).
    pub fn detached(quantity: u32) -> Self {
        Self {
            product: None,
            quantity,
        }
    }

    /// Returns the product of the item, if any
    pub fn product(&self) -> Option<ProductKey> {
        self.product
    }

    /// Returns the quantity of the item
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}
