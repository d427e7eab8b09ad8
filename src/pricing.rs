//! Pricing

use jiff::Timestamp;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{cart::Cart, products::Product};

/// Errors that can occur while pricing cart lines.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Unit price multiplied by quantity does not fit in minor units.
    #[error("line subtotal overflowed for quantity {0}")]
    Overflow(u32),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Multiplies a unit price by a quantity.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the result does not fit in minor units.
pub fn line_subtotal(
    unit_price: Money<'_, Currency>,
    quantity: u32,
) -> Result<Money<'_, Currency>, PricingError> {
    let minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(PricingError::Overflow(quantity))?;

    Ok(Money::from_minor(minor, unit_price.currency()))
}

/// Regular (undiscounted) price of `quantity` units of `product`.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the result does not fit in minor units.
pub fn line_regular_subtotal<'a>(
    product: &Product<'a>,
    quantity: u32,
) -> Result<Money<'a, Currency>, PricingError> {
    line_subtotal(product.regular_price, quantity)
}

/// Sum of regular price × quantity across every line of the cart.
///
/// Lines without a resolvable product contribute nothing. An empty cart is zero.
///
/// # Errors
///
/// Returns a [`PricingError`] on overflow or currency mismatch.
pub fn regular_price_subtotal<'a>(cart: &Cart<'a>) -> Result<Money<'a, Currency>, PricingError> {
    cart.lines()
        .filter_map(|(item, product)| product.map(|product| (item, product)))
        .try_fold(
            Money::from_minor(0, cart.currency()),
            |acc, (item, product)| -> Result<_, PricingError> {
                let line = line_regular_subtotal(product, item.quantity())?;

                Ok(acc.add(line)?)
            },
        )
}

/// Sum of the price actually charged (sale price while on sale) across `lines`.
///
/// # Errors
///
/// Returns a [`PricingError`] on overflow or currency mismatch.
pub fn active_price_subtotal<'a, 'p, I>(
    lines: I,
    currency: &'static Currency,
    now: Timestamp,
) -> Result<Money<'a, Currency>, PricingError>
where
    'a: 'p,
    I: IntoIterator<Item = (&'p Product<'a>, u32)>,
{
    lines.into_iter().try_fold(
        Money::from_minor(0, currency),
        |acc, (product, quantity)| -> Result<_, PricingError> {
            let line = line_subtotal(product.active_price(now), quantity)?;

            Ok(acc.add(line)?)
        },
    )
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use slotmap::SlotMap;
    use testresult::TestResult;

    use crate::{items::LineItem, products::ProductKey};

    use super::*;

    #[test]
    fn line_subtotal_multiplies_by_quantity() -> TestResult {
        assert_eq!(
            line_subtotal(Money::from_minor(3000, GBP), 3)?,
            Money::from_minor(9000, GBP)
        );

        Ok(())
    }

    #[test]
    fn line_subtotal_overflow_errors() {
        let result = line_subtotal(Money::from_minor(i64::MAX, GBP), 2);

        assert_eq!(result, Err(PricingError::Overflow(2)));
    }

    #[test]
    fn regular_price_subtotal_of_empty_cart_is_zero() -> TestResult {
        let cart = Cart::new(GBP);

        assert_eq!(regular_price_subtotal(&cart)?, Money::from_minor(0, GBP));

        Ok(())
    }

    #[test]
    fn regular_price_subtotal_ignores_detached_lines() -> TestResult {
        let mut catalog: SlotMap<ProductKey, Product<'_>> = SlotMap::with_key();

        let mug = catalog.insert(
            Product::new("Mug", Money::from_minor(1000, GBP))
                .with_sale_price(Money::from_minor(800, GBP)),
        );

        let items = [LineItem::new(mug, 2), LineItem::detached(4)];
        let cart = Cart::with_items(catalog, items, Money::from_minor(1600, GBP), GBP)?;

        assert_eq!(regular_price_subtotal(&cart)?, Money::from_minor(2000, GBP));

        Ok(())
    }

    #[test]
    fn active_price_subtotal_uses_sale_prices() -> TestResult {
        let now = Timestamp::UNIX_EPOCH;
        let mug = Product::new("Mug", Money::from_minor(1000, GBP))
            .with_sale_price(Money::from_minor(800, GBP));
        let tea = Product::new("Tea", Money::from_minor(250, GBP));

        let total = active_price_subtotal([(&mug, 2), (&tea, 1)], GBP, now)?;

        assert_eq!(total, Money::from_minor(1850, GBP));

        Ok(())
    }

    #[test]
    fn active_price_subtotal_rejects_mixed_currencies() {
        let now = Timestamp::UNIX_EPOCH;
        let tea = Product::new("Tea", Money::from_minor(250, USD));

        let result = active_price_subtotal([(&tea, 1)], GBP, now);

        assert!(matches!(result, Err(PricingError::Money(_))));
    }
}
