//! Utils

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::context::View;

/// Page to render the cart on
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    /// The cart page
    Cart,

    /// The checkout page
    Checkout,

    /// Any other page
    Other,
}

impl From<ViewArg> for View {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Cart => View::Cart,
            ViewArg::Checkout => View::Checkout,
            ViewArg::Other => View::Other,
        }
    }
}

/// Arguments for the cart rendering examples
#[derive(Debug, Parser)]
pub struct ExampleCartArgs {
    /// Cart fixture to load from `fixtures/carts`
    #[clap(short, long, default_value = "scenario_a")]
    pub fixture: String,

    /// Page to render the cart on
    #[clap(short, long, value_enum, default_value_t = ViewArg::Cart)]
    pub view: ViewArg,

    /// Presenter configuration file (YAML)
    #[clap(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_defaults() {
        let args = ExampleCartArgs::parse_from(["render_cart"]);

        assert_eq!(args.fixture, "scenario_a");
        assert_eq!(View::from(args.view), View::Cart);
        assert_eq!(args.config, None);
    }

    #[test]
    fn parses_view_and_config() {
        let args = ExampleCartArgs::parse_from([
            "render_cart",
            "-f",
            "scenario_d",
            "--view",
            "checkout",
            "-c",
            "savings.yml",
        ]);

        assert_eq!(args.fixture, "scenario_d");
        assert_eq!(View::from(args.view), View::Checkout);
        assert_eq!(args.config, Some(PathBuf::from("savings.yml")));
    }
}
