//! GranitoSkate Core - Shared types library.
//!
//! This crate provides common types used across the GranitoSkate management
//! backend components:
//! - `admin` - JSON API server wrapping the Shopify Admin API
//! - `cli` - Command-line tools for migrations and administrator management
//!
//! # Architecture
//!
//! The core crate contains only types and parsing logic - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, Shopify GIDs,
//!   prices, roles and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
