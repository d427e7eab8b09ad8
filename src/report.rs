//! Savings Report
//!
//! Console table of what each cart line would cost at regular prices against
//! what it is charged, followed by the cart-wide savings summary.

use std::{fmt::Write, io};

use decimal_percentage::Percentage;
use jiff::Timestamp;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    hooks::SavingsHooks,
    pricing::{PricingError, line_regular_subtotal, line_subtotal},
    savings::{SavingsError, cart_regular_price_subtotal, savings, savings_percent},
};

/// Errors that can occur when building or writing a savings report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Error pricing a cart line.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Error computing the cart savings.
    #[error(transparent)]
    Savings(#[from] SavingsError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error writing the report.
    #[error("Failed to write report")]
    IO,
}

/// One priced cart line.
#[derive(Debug, Clone)]
pub struct ReportLine<'a> {
    /// Product name, `None` when the line has no product
    pub name: Option<String>,

    /// Quantity
    pub quantity: u32,

    /// Regular price × quantity
    pub regular_subtotal: Option<Money<'a, Currency>>,

    /// Price charged × quantity
    pub subtotal: Option<Money<'a, Currency>>,

    /// Whether the product is on sale
    pub on_sale: bool,
}

impl<'a> ReportLine<'a> {
    /// Amount saved on this line.
    ///
    /// # Errors
    ///
    /// Returns a `MoneyError` if the subtotals are in different currencies.
    pub fn savings(&self) -> Result<Option<Money<'a, Currency>>, MoneyError> {
        match (self.regular_subtotal, self.subtotal) {
            (Some(regular), Some(charged)) => Ok(Some(regular.sub(charged)?)),
            _ => Ok(None),
        }
    }
}

/// Savings of one cart at one instant.
#[derive(Debug, Clone)]
pub struct SavingsReport<'a> {
    lines: Vec<ReportLine<'a>>,
    regular_subtotal: Money<'a, Currency>,
    contents_total: Money<'a, Currency>,
    savings: Money<'a, Currency>,
}

impl<'a> SavingsReport<'a> {
    /// Price every line of `cart` at `now` and compute its savings through `hooks`.
    ///
    /// # Errors
    ///
    /// Returns a `ReportError` if a line or the savings cannot be priced.
    pub fn new<H>(cart: &Cart<'a>, now: Timestamp, hooks: &H) -> Result<Self, ReportError>
    where
        H: SavingsHooks + ?Sized,
    {
        let lines = cart
            .lines()
            .map(|(item, product)| -> Result<ReportLine<'a>, PricingError> {
                let quantity = item.quantity();

                let Some(product) = product else {
                    return Ok(ReportLine {
                        name: None,
                        quantity,
                        regular_subtotal: None,
                        subtotal: None,
                        on_sale: false,
                    });
                };

                Ok(ReportLine {
                    name: Some(product.name.clone()),
                    quantity,
                    regular_subtotal: Some(line_regular_subtotal(product, quantity)?),
                    subtotal: Some(line_subtotal(product.active_price(now), quantity)?),
                    on_sale: product.is_on_sale(now),
                })
            })
            .collect::<Result<Vec<_>, PricingError>>()?;

        Ok(Self {
            lines,
            regular_subtotal: cart_regular_price_subtotal(cart, hooks)?,
            contents_total: cart.contents_total(),
            savings: savings(cart, hooks)?,
        })
    }

    /// Priced lines in cart order.
    pub fn lines(&self) -> &[ReportLine<'a>] {
        &self.lines
    }

    /// Regular price subtotal of the cart.
    pub fn regular_subtotal(&self) -> Money<'a, Currency> {
        self.regular_subtotal
    }

    /// Amount the cart charges.
    pub fn contents_total(&self) -> Money<'a, Currency> {
        self.contents_total
    }

    /// Cart savings.
    pub fn savings(&self) -> Money<'a, Currency> {
        self.savings
    }

    /// Savings as a fraction of the regular subtotal.
    pub fn savings_percent(&self) -> Percentage {
        savings_percent(self.savings, self.regular_subtotal)
    }

    /// Prints the report to the console.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Regular", "Charged", "Saved"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record(line_cells(idx, line)?);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(2..6), Alignment::right());

        let table_str = colorize_borders(&table.to_string());

        writeln!(out, "\n{table_str}").map_err(|_err| ReportError::IO)?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReportError> {
        let percent_points = percent_points_from_fractional_percentage(self.savings_percent());

        let rows = [
            (" Regular subtotal:", format!("{}  ", self.regular_subtotal)),
            (" Total:", format!("{}  ", self.contents_total)),
            (
                " Savings:",
                format!("({percent_points:.2}%) {}  ", self.savings),
            ),
        ];

        let label_width = rows
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);

        let value_width = rows
            .iter()
            .map(|(_, value)| value.chars().count())
            .max()
            .unwrap_or(0);

        for (label, value) in &rows {
            writeln!(out, "{label:>label_width$}  {value:>value_width$}")
                .map_err(|_err| ReportError::IO)?;
        }

        writeln!(out).map_err(|_err| ReportError::IO)
    }
}

fn line_cells(idx: usize, line: &ReportLine<'_>) -> Result<[String; 6], ReportError> {
    let name = match (&line.name, line.on_sale) {
        (Some(name), true) => format!("{name} (sale)"),
        (Some(name), false) => name.clone(),
        (None, _) => "<missing product>".to_string(),
    };

    let saved = match line.savings()? {
        Some(saved) if saved.to_minor_units() > 0 => {
            let percent = line
                .regular_subtotal
                .map(|regular| savings_percent(saved, regular))
                .map(percent_points_from_fractional_percentage)
                .unwrap_or_default();

            format!("({percent:.2}%) -{saved}")
        }
        _ => String::new(),
    };

    Ok([
        format!("#{:<3}", idx + 1),
        name,
        line.quantity.to_string(),
        line.regular_subtotal
            .map(|money| money.to_string())
            .unwrap_or_default(),
        line.subtotal
            .map(|money| money.to_string())
            .unwrap_or_default(),
        saved,
    ])
}

/// Converts a fractional percentage to percent points for display.
fn percent_points_from_fractional_percentage(percentage: Percentage) -> Decimal {
    // `Percentage` is a fraction (e.g. 0.25), so multiply by 100 to print percent points.
    ((percentage * Decimal::ONE) * Decimal::from_i64(100).unwrap_or(Decimal::ZERO)).round_dp(2)
}

/// Wraps runs of box-drawing characters in ANSI dark-grey escape codes.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            _ = out.write_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            _ = out.write_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}
