//! Interactive terminal front-end for the warehouse ledger.
//!
//! Reads one command per line, routes it to a handler, and lets the handler
//! prompt for whatever it needs. All business rules live in
//! `warehouse-session`; this crate only parses input and prints results.

pub mod command;
pub mod config;
pub mod console;
pub mod error;
pub mod shell;

pub use command::CommandName;
pub use config::Config;
pub use console::Console;
pub use error::{InputError, ShellError};
pub use shell::Shell;
