//! Composition root for the link pipeline
//!
//! [`HypermediaBuilder`] selects the base URL strategy, the enrichers and
//! their order, and the link factory, either fluently or from a
//! [`HypermediaConfig`](crate::config::HypermediaConfig).

pub mod builder;

pub use builder::HypermediaBuilder;
