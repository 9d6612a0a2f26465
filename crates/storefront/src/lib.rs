//! Pawstore Storefront library.
//!
//! Client-side domain layer for the pet-supply storefront: catalog access,
//! a cart with per-day purchase limits, checkout, and session handling, all
//! wired to the retailer's REST backend. Durable state (inventory, orders,
//! accounts, parameter values) lives server-side; this crate owns only the
//! locally persisted cart and session plus the logic around them.
//!
//! # Architecture
//!
//! - [`api`] - REST client for the retailer backend (catalog reads cached)
//! - [`params`] - system parameter cache with hardcoded fallbacks
//! - [`cart`] - cart engine and write-through persisted store
//! - [`session`] - authentication session holder with attempt lockout
//! - [`checkout`] - order submission from a cart snapshot
//! - [`state`] - the single owned [`state::Storefront`] store object
//!   injected into consumers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod models;
pub mod notify;
pub mod params;
pub mod session;
pub mod state;
