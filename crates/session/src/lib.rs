//! Session domain module.
//!
//! One `Session` owns the cash ledger, the inventory and the operation log.
//! Balance changes, sales and purchases go through `handle`/`apply`; every
//! applied event is recorded in the operation log.

pub mod session;

pub use session::{
    AdjustBalance, BalanceAdjusted, PurchaseRecorded, RecordPurchase, RecordSale, SaleRecorded,
    Session, SessionCommand, SessionEvent,
};
