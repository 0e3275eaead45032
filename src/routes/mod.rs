//! HTTP route modules for the order service.
//!
//! - `orders`: insert, list and bulk-delete orders, optionally per namespace

pub mod orders;
