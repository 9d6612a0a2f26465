//! Pawstore Core - Shared types library.
//!
//! This crate provides common types used across all Pawstore components:
//! - `storefront` - Client library for the retailer's REST backend
//! - `cli` - Terminal front end for browsing, cart, and checkout
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
