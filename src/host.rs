//! Host Collaborators
//!
//! Formatting and translation services normally provided by the storefront.
//! The defaults here let the presenter run standalone.

use jiff::{Timestamp, tz::TimeZone};
use rust_decimal::RoundingStrategy;
use rustc_hash::FxHashMap;
use rusty_money::{Formatter, Money, Params, Position, iso::Currency};
use tracing::warn;

use crate::{
    config::{CurrencyPosition, MoneyFormat},
    markup::{Element, Fragment},
};

/// Groups of three digits, enough for any amount held in minor units.
const THOUSANDS: &[usize] = &[3; 6];

const NO_GROUPING: &[usize] = &[];

/// The amount with its sign; the symbol is placed by the markup.
const SIGNED_AMOUNT: &[Position] = &[Position::Sign, Position::Amount];

/// Formats money amounts as display markup.
pub trait MoneyFormatter {
    /// Format an amount as price markup.
    fn format(&self, money: &Money<'_, Currency>) -> String;

    /// Markup for a product on sale: the regular price struck through, then the sale price.
    fn sale_price_html(
        &self,
        regular: &Money<'_, Currency>,
        sale: &Money<'_, Currency>,
    ) -> String {
        Fragment::Group(vec![
            Element::new("del")
                .attr("aria-hidden", "true")
                .child(Fragment::html(self.format(regular)))
                .into(),
            Fragment::text(" "),
            Element::new("ins")
                .child(Fragment::html(self.format(sale)))
                .into(),
        ])
        .render()
    }

    /// The bare decimal amount, without markup or symbol (`200`, `12.5`).
    fn plain(&self, money: &Money<'_, Currency>) -> String {
        money.amount().normalize().to_string()
    }
}

/// Formats instants as display dates.
pub trait DateFormatter {
    /// Format `at` with a `strftime` pattern, `None` if the pattern cannot be rendered.
    fn format(&self, at: Timestamp, pattern: &str) -> Option<String>;
}

/// Looks up translated user-facing strings.
pub trait Translator {
    /// Translate `text` in `domain`, returning `text` itself when there is no translation.
    fn translate(&self, text: &str, domain: &str) -> String;
}

/// Price markup shaped like the storefront's own:
/// `<span class="woocommerce-Price-amount amount"><bdi>…</bdi></span>`.
#[derive(Debug, Clone, Default)]
pub struct PriceHtmlFormatter {
    format: MoneyFormat,
}

impl PriceHtmlFormatter {
    /// Create a formatter with the given display settings.
    pub fn new(format: MoneyFormat) -> Self {
        Self { format }
    }

    fn amount(&self, money: &Money<'_, Currency>) -> String {
        let decimals = self.format.decimals.unwrap_or(money.currency().exponent);

        let mut rounded = money
            .amount()
            .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(decimals);

        let (digit_separator, separator_pattern) = match self.format.thousand_separator {
            Some(separator) => (separator, THOUSANDS),
            None => (',', NO_GROUPING),
        };

        Formatter::money(
            &Money::from_decimal(rounded, money.currency()),
            Params {
                digit_separator,
                exponent_separator: self.format.decimal_separator,
                separator_pattern,
                positions: SIGNED_AMOUNT,
                rounding: None,
                symbol: None,
                code: None,
            },
        )
    }
}

impl MoneyFormatter for PriceHtmlFormatter {
    fn format(&self, money: &Money<'_, Currency>) -> String {
        let symbol: Fragment = Element::new("span")
            .attr("class", "woocommerce-Price-currencySymbol")
            .child(Fragment::text(money.currency().symbol))
            .into();

        let amount = Fragment::text(self.amount(money));
        let space = Fragment::html("&nbsp;");

        let parts = match self.format.currency_position {
            CurrencyPosition::Left => vec![symbol, amount],
            CurrencyPosition::Right => vec![amount, symbol],
            CurrencyPosition::LeftSpace => vec![symbol, space, amount],
            CurrencyPosition::RightSpace => vec![amount, space, symbol],
        };

        let price: Fragment = Element::new("span")
            .attr("class", "woocommerce-Price-amount amount")
            .child(Element::new("bdi").child(Fragment::Group(parts)))
            .into();

        price.render()
    }
}

/// Renders dates in a fixed time zone with `jiff`'s `strftime`.
#[derive(Debug, Clone)]
pub struct ZonedDateFormatter {
    time_zone: TimeZone,
}

impl ZonedDateFormatter {
    /// Create a formatter displaying dates in `time_zone`.
    pub fn new(time_zone: TimeZone) -> Self {
        Self { time_zone }
    }
}

impl Default for ZonedDateFormatter {
    fn default() -> Self {
        Self::new(TimeZone::UTC)
    }
}

impl DateFormatter for ZonedDateFormatter {
    fn format(&self, at: Timestamp, pattern: &str) -> Option<String> {
        let zoned = at.to_zoned(self.time_zone.clone());

        match jiff::fmt::strtime::format(pattern, &zoned) {
            Ok(formatted) => Some(formatted),
            Err(err) => {
                warn!(%pattern, error = %err, "failed to format date");
                None
            }
        }
    }
}

/// Returns every string untranslated.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

impl Translator for PassthroughTranslator {
    fn translate(&self, text: &str, _domain: &str) -> String {
        text.to_string()
    }
}

/// Translates strings of one domain from a lookup table.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    domain: String,
    entries: FxHashMap<String, String>,
}

impl CatalogTranslator {
    /// Create a translator for `domain`.
    pub fn new(domain: impl Into<String>, entries: FxHashMap<String, String>) -> Self {
        Self {
            domain: domain.into(),
            entries,
        }
    }
}

impl Translator for CatalogTranslator {
    fn translate(&self, text: &str, domain: &str) -> String {
        if domain != self.domain {
            return text.to_string();
        }

        self.entries
            .get(text)
            .map_or_else(|| text.to_string(), Clone::clone)
    }
}
