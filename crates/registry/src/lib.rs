//! Transactional channel registry for RelayDB.
//!
//! This crate provides:
//! - A redb-backed storage [`Environment`] with closure-scoped transactions
//! - Access-scoped transaction views ([`ReadTxn`], [`WriteTxn`]) over the
//!   two coupled registry tables
//! - Cursor pagination over the ascending descriptor order
//!
//! The registry manages exactly two tables keyed on the channel
//! descriptor: channel configurations and the last-relay timestamps used
//! for rate limiting. Writes to a channel's throttle policy invalidate the
//! paired timestamp; removing a channel removes both entries. Callers
//! never touch the tables directly, so the two cannot drift out of sync.

mod env;
mod error;
mod page;
mod store;
mod tables;
mod txn;

pub use env::{Environment, DB_FILE_NAME};
pub use error::{RegistryError, Result};
pub use page::{page_count, page_range, PageRange};
pub use tables::Tables;
pub use txn::{ReadTxn, WriteTxn};
