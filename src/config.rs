//! Presenter Config

use std::{fs, path::Path};

use jiff::tz::TimeZone;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

/// Translation domain strings are looked up in unless configured otherwise.
pub const DEFAULT_TEXT_DOMAIN: &str = "lattice-savings";

/// "Month Day, Year", e.g. `March 31, 2026`.
pub const DEFAULT_DATE_FORMAT: &str = "%B %-d, %Y";

/// Classes rendering a clock glyph from the dashicons font.
pub const DEFAULT_ICON_CLASS: &str = "dashicons dashicons-clock product-price__clock";

/// Config Errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Unknown IANA time zone
    #[error("Unknown time zone {0}: {1}")]
    TimeZone(String, #[source] jiff::Error),
}

/// Where the currency symbol sits relative to the amount.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyPosition {
    /// `£99.99`
    #[default]
    Left,

    /// `99.99£`
    Right,

    /// `£ 99.99`
    LeftSpace,

    /// `99.99 £`
    RightSpace,
}

/// Money display settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MoneyFormat {
    /// Separator between whole and fractional units
    pub decimal_separator: char,

    /// Separator between groups of thousands, no grouping when absent
    pub thousand_separator: Option<char>,

    /// Number of decimals shown; the currency's own exponent when absent
    pub decimals: Option<u32>,

    /// Currency symbol placement
    pub currency_position: CurrencyPosition,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            thousand_separator: Some(','),
            decimals: None,
            currency_position: CurrencyPosition::Left,
        }
    }
}

/// Savings presenter settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PresenterConfig {
    /// Translation domain for user-facing strings
    pub text_domain: String,

    /// `strftime` pattern for the sale end date (itself translatable)
    pub date_format: String,

    /// IANA time zone sale end dates are displayed in
    pub time_zone: String,

    /// Default classes of the "price valid till" icon
    pub icon_class: String,

    /// Default title of the savings row (itself translatable)
    pub savings_title: String,

    /// Money display settings
    pub money: MoneyFormat,

    /// Source string -> translated string
    pub translations: FxHashMap<String, String>,

    /// Return the `product_subtotal` hook result instead of the rebuilt markup.
    ///
    /// Off by default: the hook runs but its result is discarded.
    pub honor_product_subtotal_override: bool,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            text_domain: DEFAULT_TEXT_DOMAIN.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            time_zone: "UTC".to_string(),
            icon_class: DEFAULT_ICON_CLASS.to_string(),
            savings_title: "Savings".to_string(),
            money: MoneyFormat::default(),
            translations: FxHashMap::default(),
            honor_product_subtotal_override: false,
        }
    }
}

impl PresenterConfig {
    /// Parse config from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or names an unknown time zone.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: PresenterConfig = serde_norway::from_str(yaml)?;

        config.time_zone()?;

        Ok(config)
    }

    /// Load config from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Resolve the configured time zone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TimeZone`] if the name is not a known IANA zone.
    pub fn time_zone(&self) -> Result<TimeZone, ConfigError> {
        if self.time_zone.eq_ignore_ascii_case("utc") {
            return Ok(TimeZone::UTC);
        }

        TimeZone::get(&self.time_zone)
            .map_err(|err| ConfigError::TimeZone(self.time_zone.clone(), err))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn empty_document_uses_defaults() -> TestResult {
        let config = PresenterConfig::from_yaml_str("{}")?;

        assert_eq!(config, PresenterConfig::default());
        assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);
        assert!(!config.honor_product_subtotal_override);

        Ok(())
    }

    #[test]
    fn partial_document_overrides_fields() -> TestResult {
        let config = PresenterConfig::from_yaml_str(
            r"
savings_title: You saved
money:
  decimal_separator: ','
  thousand_separator: '.'
  currency_position: right_space
translations:
  Savings: Ersparnis
",
        )?;

        assert_eq!(config.savings_title, "You saved");
        assert_eq!(config.money.decimal_separator, ',');
        assert_eq!(config.money.thousand_separator, Some('.'));
        assert_eq!(config.money.currency_position, CurrencyPosition::RightSpace);
        assert_eq!(config.money.decimals, None);
        assert_eq!(config.icon_class, DEFAULT_ICON_CLASS);
        assert_eq!(
            config.translations.get("Savings").map(String::as_str),
            Some("Ersparnis")
        );

        Ok(())
    }

    #[test]
    fn invalid_yaml_errors() {
        let result = PresenterConfig::from_yaml_str("money: [");

        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn unknown_time_zone_errors() {
        let result = PresenterConfig::from_yaml_str("time_zone: Mars/Olympus_Mons");

        assert!(
            matches!(result, Err(ConfigError::TimeZone(name, _)) if name == "Mars/Olympus_Mons"),
            "expected TimeZone error"
        );
    }

    #[test]
    fn from_path_reads_file() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;

        writeln!(file, "icon_class: icon-clock")?;

        let config = PresenterConfig::from_path(file.path())?;

        assert_eq!(config.icon_class, "icon-clock");

        Ok(())
    }

    #[test]
    fn from_path_missing_file_errors() {
        let result = PresenterConfig::from_path("/nonexistent/lattice-savings.yml");

        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
