//! Catalog domain: products, their image assets, and the pure services that
//! reason about them. Nothing in here performs I/O.
pub mod domain;
pub mod services;
