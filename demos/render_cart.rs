//! Render Cart Example
//!
//! Loads a cart fixture and prints every string the presenter decorates,
//! followed by a savings report.
//!
//! Use `-f` to load a cart fixture by name
//! Use `-v` to pick the page being rendered (`cart`, `checkout` or `other`)
//! Use `-c` to load a presenter configuration file
//!
//! Set `RUST_LOG=lattice_savings=debug` to see why lines are left undecorated.

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lattice_savings::{
    config::PresenterConfig,
    fixtures::Fixture,
    host::{MoneyFormatter, PriceHtmlFormatter},
    presenter::SavingsPresenter,
    pricing::line_subtotal,
    registry::{HostCall, HostOutput, Registry},
    report::SavingsReport,
    utils::ExampleCartArgs,
};

/// Render Cart Example
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = ExampleCartArgs::parse();

    let config = match args.config.as_deref() {
        Some(path) => PresenterConfig::from_path(path)?,
        None => PresenterConfig::default(),
    };

    let formatter = PriceHtmlFormatter::new(config.money.clone());
    let presenter = SavingsPresenter::new(config)?;

    let mut registry = Registry::new();
    presenter.register(&mut registry);

    let fixture = Fixture::load(&args.fixture)?;
    let ctx = fixture.context(args.view.into());
    let cart = fixture.cart();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "Registered extension points:")?;

    for registration in registry.iter() {
        writeln!(
            out,
            "  {} (priority {})",
            registration.point.hook_name(),
            registration.priority
        )?;
    }

    writeln!(out, "\nRendering {:?} view of `{}`:", ctx.view(), args.fixture)?;

    for (idx, (item, product)) in cart.lines().enumerate() {
        let Some(product) = product else {
            writeln!(out, "\n#{} <missing product>", idx + 1)?;
            continue;
        };

        let unit = product.active_price(ctx.now());
        let price = formatter.format(&unit);
        let subtotal = formatter.format(&line_subtotal(unit, item.quantity())?);

        writeln!(out, "\n#{} {} × {}", idx + 1, product.name, item.quantity())?;

        let calls = [
            ("price", HostCall::CartItemPrice { price: &price, item }),
            (
                "subtotal",
                HostCall::CartItemSubtotal {
                    subtotal: &subtotal,
                    item,
                },
            ),
            (
                "product subtotal",
                HostCall::CartProductSubtotal {
                    subtotal: &subtotal,
                    product,
                    quantity: item.quantity(),
                },
            ),
        ];

        for (label, call) in calls {
            if let HostOutput::Filtered(html) = presenter.dispatch(&ctx, call) {
                writeln!(out, "  {label}: {html}")?;
            }
        }
    }

    let cart_subtotal = formatter.format(&cart.contents_total());

    if let HostOutput::Filtered(html) = presenter.dispatch(
        &ctx,
        HostCall::CartSubtotal {
            subtotal: &cart_subtotal,
        },
    ) {
        writeln!(out, "\nCart subtotal: {html}")?;
    }

    match presenter.dispatch(&ctx, HostCall::Head) {
        HostOutput::Emit(Some(style)) => writeln!(out, "Head: {style}")?,
        _ => writeln!(out, "Head: <none>")?,
    }

    match presenter.dispatch(&ctx, HostCall::CartTotalsBeforeOrderTotal) {
        HostOutput::Emit(Some(row)) => writeln!(out, "Savings row: {row}")?,
        _ => writeln!(out, "Savings row: <none>")?,
    }

    SavingsReport::new(cart, ctx.now(), presenter.hooks())?.write_to(&mut out)?;

    Ok(())
}
