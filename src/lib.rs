//! Lattice Savings
//!
//! Shows shoppers how much they save: aggregates a cart's savings against
//! regular prices and decorates the storefront's price strings with struck-through
//! regular prices, "price valid till" markers and a savings row in the totals
//! tables.
//!
//! The presenter never owns cart state. Each call receives a [`RenderContext`]
//! holding a read-only [`Cart`] snapshot, the [`View`] being rendered and the
//! current instant, and returns the decorated string or the input unchanged.
//!
//! [`RenderContext`]: context::RenderContext
//! [`Cart`]: cart::Cart
//! [`View`]: context::View

pub mod cart;
pub mod config;
pub mod context;
pub mod fixtures;
pub mod hooks;
pub mod host;
pub mod items;
pub mod markup;
pub mod prelude;
pub mod presenter;
pub mod pricing;
pub mod products;
pub mod registry;
pub mod report;
pub mod savings;
pub mod utils;
