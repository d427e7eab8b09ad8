//! Fixtures
//!
//! YAML cart fixtures under `fixtures/carts/<name>.yml`:
//!
//! ```yaml
//! currency: GBP
//! now: 2026-03-01T12:00:00Z
//! products:
//!   jacket:
//!     name: Jacket
//!     regular_price: 100.00 GBP
//!     sale_price: 80.00 GBP
//!     sale_ends: 2026-03-31T00:00:00Z
//! items:
//!   - product: jacket
//!     quantity: 2
//! contents_total: 160.00 GBP
//! ```
//!
//! Without `contents_total` the cart charges each product's active price at `now`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use jiff::Timestamp;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;
use slotmap::SlotMap;
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    context::{RenderContext, View},
    items::LineItem,
    products::{Product, ProductKey},
};

/// Directory cart fixtures are loaded from by default.
pub const DEFAULT_BASE_PATH: &str = "./fixtures/carts";

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Line item references a product the fixture does not define
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Cart creation error
    #[error("Failed to create cart: {0}")]
    Cart(#[from] CartError),
}

/// Cart fixture file
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// ISO currency code of the cart
    pub currency: String,

    /// Instant the cart is rendered at
    pub now: Timestamp,

    /// Map of product key -> product fixture
    #[serde(default)]
    pub products: FxHashMap<String, ProductFixture>,

    /// Line items in cart order
    #[serde(default)]
    pub items: Vec<ItemFixture>,

    /// Amount the cart charges (e.g., "160.00 GBP"); priced from active prices when absent
    #[serde(default)]
    pub contents_total: Option<String>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Regular price (e.g., "100.00 GBP")
    pub regular_price: String,

    /// Sale price, if the product has one
    #[serde(default)]
    pub sale_price: Option<String>,

    /// Start of the sale
    #[serde(default)]
    pub sale_starts: Option<Timestamp>,

    /// End of the sale
    #[serde(default)]
    pub sale_ends: Option<Timestamp>,
}

/// Line Item Fixture
#[derive(Debug, Deserialize)]
pub struct ItemFixture {
    /// Product key; omitted for a line whose product is gone
    #[serde(default)]
    pub product: Option<String>,

    /// Quantity
    pub quantity: u32,
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let mut product = Product::new(fixture.name, parse_money(&fixture.regular_price)?);

        if let Some(sale_price) = fixture.sale_price {
            product = product.with_sale_price(parse_money(&sale_price)?);
        }

        if let Some(starts) = fixture.sale_starts {
            product = product.with_sale_starts(starts);
        }

        if let Some(ends) = fixture.sale_ends {
            product = product.with_sale_ends(ends);
        }

        Ok(product)
    }
}

/// A cart loaded from a fixture, with the instant it is rendered at.
#[derive(Debug)]
pub struct Fixture<'a> {
    cart: Cart<'a>,
    now: Timestamp,
    product_keys: FxHashMap<String, ProductKey>,
}

impl<'a> Fixture<'a> {
    /// Load `fixtures/carts/<name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or does not describe a valid cart.
    pub fn load(name: &str) -> Result<Self, FixtureError> {
        Self::load_from(DEFAULT_BASE_PATH, name)
    }

    /// Load `<base_path>/<name>.yml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or does not describe a valid cart.
    pub fn load_from(base_path: impl AsRef<Path>, name: &str) -> Result<Self, FixtureError> {
        let file_path = base_path.as_ref().join(format!("{name}.yml"));
        let contents =
            fs::read_to_string(&file_path).map_err(|err| FixtureError::Io(file_path, err))?;

        Self::from_yaml_str(&contents)
    }

    /// Parse a cart fixture from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, a price or currency is
    /// invalid, an item references an unknown product, or the cart is invalid.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, FixtureError> {
        let fixture: CartFixture = serde_norway::from_str(yaml)?;
        let currency = parse_currency(&fixture.currency)?;

        let mut catalog: SlotMap<ProductKey, Product<'a>> = SlotMap::with_key();
        let mut product_keys = FxHashMap::default();

        for (key, product_fixture) in fixture.products {
            let product_key = catalog.insert(product_fixture.try_into()?);

            product_keys.insert(key, product_key);
        }

        let items = fixture
            .items
            .into_iter()
            .map(|item| match item.product {
                Some(key) => product_keys
                    .get(&key)
                    .map(|product_key| LineItem::new(*product_key, item.quantity))
                    .ok_or(FixtureError::ProductNotFound(key)),
                None => Ok(LineItem::detached(item.quantity)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let cart = match fixture.contents_total {
            Some(total) => Cart::with_items(catalog, items, parse_money(&total)?, currency)?,
            None => Cart::priced_at(catalog, items, currency, fixture.now)?,
        };

        Ok(Self {
            cart,
            now: fixture.now,
            product_keys,
        })
    }

    /// The loaded cart.
    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// Instant the cart is rendered at.
    pub fn now(&self) -> Timestamp {
        self.now
    }

    /// Get a product key by its fixture key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product_key(&self, key: &str) -> Result<ProductKey, FixtureError> {
        self.product_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get a product by its fixture key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product<'a>, FixtureError> {
        self.cart
            .product(self.product_key(key)?)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// A render context for the cart on `view` at the fixture's instant.
    pub fn context(&self, view: View) -> RenderContext<'_, 'a> {
        RenderContext::new(&self.cart, view, self.now)
    }
}

/// Parse price string (e.g., "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = parse_currency(currency_code)?;

    let minor_units = amount
        .checked_mul(Decimal::from(10_i64.pow(currency.exponent)))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

fn parse_money(s: &str) -> Result<Money<'static, Currency>, FixtureError> {
    let (minor_units, currency) = parse_price(s)?;

    Ok(Money::from_minor(minor_units, currency))
}

fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}
