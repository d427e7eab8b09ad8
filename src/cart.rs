//! Cart

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    items::LineItem,
    pricing::{PricingError, active_price_subtotal},
    products::{Product, ProductKey},
};

/// Errors related to cart construction.
#[derive(Debug, Error)]
pub enum CartError {
    /// A product's price currency differs from the cart currency (product, price currency, cart currency).
    #[error("Product {1} is priced in {2}, but cart has currency {3}")]
    ProductCurrencyMismatch(ProductKey, String, &'static str, &'static str),

    /// The contents total currency differs from the cart currency (total currency, cart currency).
    #[error("Contents total has currency {0}, but cart has currency {1}")]
    TotalCurrencyMismatch(&'static str, &'static str),

    /// A line item has a quantity of zero (index).
    #[error("Line item {0} has a quantity of zero")]
    ZeroQuantity(usize),

    /// Contents total could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Read-only snapshot of a cart for a single render.
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    catalog: SlotMap<ProductKey, Product<'a>>,
    items: Vec<LineItem>,
    contents_total: Money<'a, Currency>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            catalog: SlotMap::with_key(),
            items: Vec::new(),
            contents_total: Money::from_minor(0, currency),
            currency,
        }
    }

    /// Create a cart with a contents total computed by the host (coupons, fees or
    /// manual overrides already applied).
    ///
    /// # Errors
    ///
    /// Returns a `CartError` on a currency mismatch or a zero quantity.
    pub fn with_items(
        catalog: SlotMap<ProductKey, Product<'a>>,
        items: impl Into<Vec<LineItem>>,
        contents_total: Money<'a, Currency>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let items = items.into();

        validate(&catalog, &items, currency)?;

        let total_currency = contents_total.currency();

        if total_currency != currency {
            return Err(CartError::TotalCurrencyMismatch(
                total_currency.iso_alpha_code,
                currency.iso_alpha_code,
            ));
        }

        Ok(Cart {
            catalog,
            items,
            contents_total,
            currency,
        })
    }

    /// Create a cart whose contents total is the sum of each line's active price at `now`.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` on a currency mismatch, a zero quantity or a pricing overflow.
    pub fn priced_at(
        catalog: SlotMap<ProductKey, Product<'a>>,
        items: impl Into<Vec<LineItem>>,
        currency: &'static Currency,
        now: Timestamp,
    ) -> Result<Self, CartError> {
        let items = items.into();

        validate(&catalog, &items, currency)?;

        let lines = items.iter().filter_map(|item| {
            let product = catalog.get(item.product()?)?;

            Some((product, item.quantity()))
        });

        let contents_total = active_price_subtotal(lines, currency, now)?;

        Ok(Cart {
            catalog,
            items,
            contents_total,
            currency,
        })
    }

    /// Look up a product in the cart catalog.
    pub fn product(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.catalog.get(key)
    }

    /// Resolve the product attached to a line item.
    ///
    /// Returns `None` when the item has no product or the key is not in the catalog.
    pub fn product_for(&self, item: &LineItem) -> Option<&Product<'a>> {
        self.product(item.product()?)
    }

    /// Iterate line items alongside their resolved products.
    pub fn lines(&self) -> impl Iterator<Item = (&LineItem, Option<&Product<'a>>)> {
        self.items.iter().map(|item| (item, self.product_for(item)))
    }

    /// Line items in cart order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Post-discount total of the cart contents.
    pub fn contents_total(&self) -> Money<'a, Currency> {
        self.contents_total
    }

    /// Get the number of line items in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

fn validate(
    catalog: &SlotMap<ProductKey, Product<'_>>,
    items: &[LineItem],
    currency: &'static Currency,
) -> Result<(), CartError> {
    if let Some(idx) = items.iter().position(|item| item.quantity() == 0) {
        return Err(CartError::ZeroQuantity(idx));
    }

    for (key, product) in catalog {
        let prices = std::iter::once(product.regular_price).chain(product.sale_price);

        for price in prices {
            let price_currency = price.currency();

            if price_currency != currency {
                return Err(CartError::ProductCurrencyMismatch(
                    key,
                    product.name.clone(),
                    price_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use super::*;

    fn catalog<'a>() -> (SlotMap<ProductKey, Product<'a>>, ProductKey, ProductKey) {
        let mut catalog = SlotMap::with_key();

        let mug = catalog.insert(
            Product::new("Mug", Money::from_minor(1000, GBP))
                .with_sale_price(Money::from_minor(800, GBP)),
        );
        let tea = catalog.insert(Product::new("Tea", Money::from_minor(250, GBP)));

        (catalog, mug, tea)
    }

    #[test]
    fn new_cart_is_empty() {
        let cart = Cart::new(GBP);

        assert!(cart.is_empty());
        assert_eq!(cart.contents_total(), Money::from_minor(0, GBP));
        assert_eq!(cart.currency(), GBP);
    }

    #[test]
    fn priced_at_sums_active_prices() -> TestResult {
        let (catalog, mug, tea) = catalog();

        let cart = Cart::priced_at(
            catalog,
            [LineItem::new(mug, 2), LineItem::new(tea, 1)],
            GBP,
            Timestamp::UNIX_EPOCH,
        )?;

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.contents_total(), Money::from_minor(1850, GBP));

        Ok(())
    }

    #[test]
    fn with_items_keeps_host_total() -> TestResult {
        let (catalog, mug, _) = catalog();

        let cart = Cart::with_items(
            catalog,
            [LineItem::new(mug, 1)],
            Money::from_minor(500, GBP),
            GBP,
        )?;

        assert_eq!(cart.contents_total(), Money::from_minor(500, GBP));

        Ok(())
    }

    #[test]
    fn zero_quantity_errors() {
        let (catalog, mug, tea) = catalog();

        let result = Cart::priced_at(
            catalog,
            [LineItem::new(mug, 1), LineItem::new(tea, 0)],
            GBP,
            Timestamp::UNIX_EPOCH,
        );

        assert!(matches!(result, Err(CartError::ZeroQuantity(1))));
    }

    #[test]
    fn product_currency_mismatch_errors() {
        let mut catalog = SlotMap::with_key();
        let key = catalog.insert(Product::new("Mug", Money::from_minor(1000, USD)));

        let result = Cart::priced_at(catalog, [LineItem::new(key, 1)], GBP, Timestamp::UNIX_EPOCH);

        match result {
            Err(CartError::ProductCurrencyMismatch(product, name, price_currency, cart_currency)) => {
                assert_eq!(product, key);
                assert_eq!(name, "Mug");
                assert_eq!(price_currency, USD.iso_alpha_code);
                assert_eq!(cart_currency, GBP.iso_alpha_code);
            }
            other => panic!("expected ProductCurrencyMismatch error, got {other:?}"),
        }
    }

    #[test]
    fn total_currency_mismatch_errors() {
        let (catalog, mug, _) = catalog();

        let result = Cart::with_items(
            catalog,
            [LineItem::new(mug, 1)],
            Money::from_minor(800, USD),
            GBP,
        );

        assert!(matches!(result, Err(CartError::TotalCurrencyMismatch(_, _))));
    }

    #[test]
    fn lines_resolve_products() -> TestResult {
        let (catalog, mug, _) = catalog();

        let cart = Cart::priced_at(
            catalog,
            [LineItem::new(mug, 1), LineItem::detached(1)],
            GBP,
            Timestamp::UNIX_EPOCH,
        )?;

        let names: Vec<Option<&str>> = cart
            .lines()
            .map(|(_, product)| product.map(|product| product.name.as_str()))
            .collect();

        assert_eq!(names, vec![Some("Mug"), None]);

        Ok(())
    }
}
