//! Lattice Savings prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError},
    config::{ConfigError, CurrencyPosition, MoneyFormat, PresenterConfig},
    context::{RenderContext, View},
    fixtures::{Fixture, FixtureError},
    hooks::{
        CartSubtotal, DEFAULT_PRIORITY, HookPipeline, LinePrice, NoopHooks, ProductSubtotal,
        SavingsHooks,
    },
    host::{
        CatalogTranslator, DateFormatter, MoneyFormatter, PassthroughTranslator,
        PriceHtmlFormatter, Translator, ZonedDateFormatter,
    },
    items::LineItem,
    markup::{AllowList, Element, Fragment, sanitize},
    presenter::SavingsPresenter,
    pricing::PricingError,
    products::{Product, ProductKey},
    registry::{ExtensionPoint, HostCall, HostOutput, Registry},
    report::{ReportError, SavingsReport},
    savings::{SavingsError, savings_percent},
};
