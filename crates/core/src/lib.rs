#![warn(clippy::all, missing_docs)]

//! Core domain logic for the monoledger board-game bookkeeper.
//!
//! This crate hosts the property catalog, player registry, monopoly
//! detection, the transaction engine and the command table used by the
//! interactive shell and any future frontends.

pub mod catalog;
pub mod command;
pub mod config;
pub mod error;
pub mod ledger;
pub mod monopoly;
pub mod registry;

pub use catalog::{Catalog, CatalogLoader, Property};
pub use command::{Command, CommandKind, HouseAction, PlayerView};
pub use config::{AppConfig, Rules};
pub use error::LedgerError;
pub use ledger::{GoCredit, Ledger, Receipt};
pub use registry::{Player, Registry};
