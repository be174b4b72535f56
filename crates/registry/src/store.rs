//! Channel and timestamp stores.
//!
//! Stateless operations over the registry tables. Reads are generic over
//! the engine's readable tables so the same code serves read-only and
//! read-write transactions. The cross-table consistency rule lives in
//! [`crate::WriteTxn`], not here.

use redb::{ReadableTable, ReadableTableMetadata, Table};
use snafu::ResultExt;

use relaydb_types::{codec, Channel, Descriptor, Timestamp};

use crate::error::{CodecSnafu, Result, StorageSnafu};
use crate::page::page_range;

/// Raw write-transaction table type for both registry tables.
pub(crate) type RawTable<'txn> = Table<'txn, &'static [u8], &'static [u8]>;

/// Channel record operations.
pub(crate) struct ChannelStore;

impl ChannelStore {
    /// Returns the channel stored under `descriptor`, if any.
    pub fn get<T>(table: &T, descriptor: &Descriptor) -> Result<Option<Channel>>
    where
        T: ReadableTable<&'static [u8], &'static [u8]>,
    {
        match table.get(descriptor.as_bytes()).context(StorageSnafu)? {
            Some(guard) => {
                let channel: Channel = codec::decode(guard.value()).context(CodecSnafu)?;
                debug_assert_eq!(
                    &channel.descriptor, descriptor,
                    "stored descriptor must equal its lookup key"
                );
                Ok(Some(channel))
            }
            None => Ok(None),
        }
    }

    /// Serializes and upserts a channel keyed on its descriptor.
    pub fn put(table: &mut RawTable<'_>, channel: &Channel) -> Result<()> {
        let encoded = codec::encode(channel).context(CodecSnafu)?;
        table
            .insert(channel.descriptor.as_bytes(), &encoded[..])
            .context(StorageSnafu)?;
        Ok(())
    }

    /// Deletes the channel under `descriptor`. Idempotent.
    pub fn delete(table: &mut RawTable<'_>, descriptor: &Descriptor) -> Result<bool> {
        let existed = table.remove(descriptor.as_bytes()).context(StorageSnafu)?;
        Ok(existed.is_some())
    }

    /// Live number of stored channels.
    pub fn count<T>(table: &T) -> Result<u64>
    where
        T: ReadableTableMetadata,
    {
        table.len().context(StorageSnafu)
    }

    /// Materializes one page of channels in ascending descriptor order.
    ///
    /// The walk is a forward cursor from the table start: entries before
    /// the page are skipped one by one, so the cost is O(page * per_page).
    pub fn page<T>(table: &T, page: u64, per_page: u64) -> Result<Vec<Channel>>
    where
        T: ReadableTable<&'static [u8], &'static [u8]>,
    {
        let total = Self::count(table)?;
        let Some(range) = page_range(total, page, per_page) else {
            return Ok(Vec::new());
        };

        let mut channels = Vec::with_capacity((range.end - range.start) as usize);
        for (index, entry) in table.iter().context(StorageSnafu)?.enumerate() {
            let index = index as u64;
            if index >= range.end {
                break;
            }
            let (_, value) = entry.context(StorageSnafu)?;
            if index < range.start {
                continue;
            }
            channels.push(codec::decode(value.value()).context(CodecSnafu)?);
        }

        debug_assert!(channels.len() as u64 <= per_page);
        Ok(channels)
    }
}

/// Last-relay timestamp operations.
pub(crate) struct TimestampStore;

impl TimestampStore {
    /// Returns the timestamp stored under `descriptor`, if any.
    pub fn get<T>(table: &T, descriptor: &Descriptor) -> Result<Option<Timestamp>>
    where
        T: ReadableTable<&'static [u8], &'static [u8]>,
    {
        match table.get(descriptor.as_bytes()).context(StorageSnafu)? {
            Some(guard) => {
                let timestamp = Timestamp::decode(guard.value()).context(CodecSnafu)?;
                debug_assert!(
                    timestamp.is_positive(),
                    "stored timestamps are strictly positive"
                );
                Ok(Some(timestamp))
            }
            None => Ok(None),
        }
    }

    /// Upserts the timestamp for `descriptor`.
    pub fn put(
        table: &mut RawTable<'_>,
        descriptor: &Descriptor,
        timestamp: Timestamp,
    ) -> Result<()> {
        let encoded = timestamp.encode();
        table
            .insert(descriptor.as_bytes(), &encoded[..])
            .context(StorageSnafu)?;
        Ok(())
    }

    /// Deletes the timestamp under `descriptor`. Idempotent.
    pub fn delete(table: &mut RawTable<'_>, descriptor: &Descriptor) -> Result<bool> {
        let existed = table.remove(descriptor.as_bytes()).context(StorageSnafu)?;
        Ok(existed.is_some())
    }

    /// Live number of stored timestamps.
    pub fn count<T>(table: &T) -> Result<u64>
    where
        T: ReadableTableMetadata,
    {
        table.len().context(StorageSnafu)
    }
}
