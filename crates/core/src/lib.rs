//! `provchain-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the registry error model and the strongly-typed identifiers shared by the
//! registry crate.

pub mod error;
pub mod id;

pub use error::{RegistryError, RegistryResult};
pub use id::{AccountId, ProductId};
