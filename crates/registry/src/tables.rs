//! Table definitions for the registry store.
//!
//! Both tables are keyed on the raw descriptor bytes, which ties a
//! channel to its rate-limit timestamp and defines the ascending iteration
//! order that pagination walks. Exactly these two tables exist; declaring
//! them here is the registry's two-table bound.

use redb::TableDefinition;

/// Table definitions for the channel registry.
pub struct Tables;

impl Tables {
    /// Channel configurations: descriptor bytes → postcard channel record.
    pub const CHANNELS: TableDefinition<'static, &'static [u8], &'static [u8]> =
        TableDefinition::new("channel");

    /// Last-relay instants: descriptor bytes → 8-byte little-endian
    /// milliseconds since epoch, strictly positive.
    pub const TIMESTAMPS: TableDefinition<'static, &'static [u8], &'static [u8]> =
        TableDefinition::new("timestamp");
}
