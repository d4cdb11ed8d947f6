//! Core types for the GranitoSkate management backend.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod gid;
pub mod id;
pub mod price;
pub mod role;
pub mod status;

pub use email::{Email, EmailError};
pub use gid::{GidError, ShopifyGid};
pub use id::*;
pub use price::Price;
pub use role::AdminRole;
pub use status::*;
