//! `warehouse-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no terminal or IO concerns).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use id::SessionId;
pub use value_object::{Money, Quantity, ValueObject};
