//! Accounting module (cash balance + operation log).
//!
//! Pure domain logic only: no IO, no persistence concerns.

pub mod ledger;

pub use ledger::{Ledger, OperationLog, OperationRecord};
