//! Access-scoped transaction views over the registry tables.
//!
//! A transaction view is valid only for the duration of the
//! [`crate::Environment::update`] or [`crate::Environment::view`] call that
//! owns it; the borrow checker prevents it from being retained. Each view
//! carries the access level its environment was opened with, and every
//! gated operation checks it as a hard precondition.

use redb::{ReadOnlyTable, ReadTransaction, WriteTransaction};
use snafu::ResultExt;

use relaydb_types::{Access, Channel, Descriptor, Timestamp};

use crate::error::{Result, TableSnafu};
use crate::store::{ChannelStore, RawTable, TimestampStore};
use crate::tables::Tables;

/// Aborts on an operation invoked under the wrong access level.
///
/// Wrong access is a programmer error in the calling plane, never a
/// recoverable condition: it must fail loudly, not be ignored or mapped to
/// an error value.
#[track_caller]
fn require(access: Access, required: Access, operation: &str) {
    assert!(
        access == required,
        "{operation} requires {required} access, but the environment was opened with {access}"
    );
}

/// Read-only view of the registry on a point-in-time snapshot.
pub struct ReadTxn {
    channels: ReadOnlyTable<&'static [u8], &'static [u8]>,
    timestamps: ReadOnlyTable<&'static [u8], &'static [u8]>,
    access: Access,
}

impl ReadTxn {
    pub(crate) fn open(txn: &ReadTransaction, access: Access) -> Result<Self> {
        Ok(Self {
            channels: txn.open_table(Tables::CHANNELS).context(TableSnafu)?,
            timestamps: txn.open_table(Tables::TIMESTAMPS).context(TableSnafu)?,
            access,
        })
    }

    /// Returns the channel stored under `descriptor`, if any.
    ///
    /// Control or Relay access. An absent key is `None`, not an error.
    pub fn channel(&self, descriptor: &Descriptor) -> Result<Option<Channel>> {
        ChannelStore::get(&self.channels, descriptor)
    }

    /// Returns the last-relay timestamp for `descriptor`, if any.
    ///
    /// Control or Relay access. A present value is always strictly
    /// positive.
    pub fn timestamp(&self, descriptor: &Descriptor) -> Result<Option<Timestamp>> {
        TimestampStore::get(&self.timestamps, descriptor)
    }

    /// Live number of channel entries.
    pub fn count_channels(&self) -> Result<u64> {
        ChannelStore::count(&self.channels)
    }

    /// Live number of timestamp entries.
    pub fn count_timestamps(&self) -> Result<u64> {
        TimestampStore::count(&self.timestamps)
    }

    /// Returns page `page` (1-indexed) of channels, `per_page` per page,
    /// in ascending descriptor order. Control access only.
    ///
    /// An out-of-range page yields an empty vector, not an error; the
    /// result never exceeds `per_page` entries. The cursor walks forward
    /// from the table start, so the cost is O(page * per_page), an
    /// accepted scaling limit for a bounded registry.
    pub fn channel_page(&self, page: u64, per_page: u64) -> Result<Vec<Channel>> {
        require(self.access, Access::Control, "channel_page");
        ChannelStore::page(&self.channels, page, per_page)
    }
}

/// Read-write view of the registry.
///
/// Writes become visible to readers only when the owning update commits;
/// any error returned from the update closure rolls all of them back.
pub struct WriteTxn<'txn> {
    channels: RawTable<'txn>,
    timestamps: RawTable<'txn>,
    access: Access,
}

impl<'txn> WriteTxn<'txn> {
    pub(crate) fn open(txn: &'txn WriteTransaction, access: Access) -> Result<Self> {
        Ok(Self {
            channels: txn.open_table(Tables::CHANNELS).context(TableSnafu)?,
            timestamps: txn.open_table(Tables::TIMESTAMPS).context(TableSnafu)?,
            access,
        })
    }

    /// Returns the channel stored under `descriptor`, if any.
    pub fn channel(&self, descriptor: &Descriptor) -> Result<Option<Channel>> {
        ChannelStore::get(&self.channels, descriptor)
    }

    /// Returns the last-relay timestamp for `descriptor`, if any.
    pub fn timestamp(&self, descriptor: &Descriptor) -> Result<Option<Timestamp>> {
        TimestampStore::get(&self.timestamps, descriptor)
    }

    /// Live number of channel entries.
    pub fn count_channels(&self) -> Result<u64> {
        ChannelStore::count(&self.channels)
    }

    /// Live number of timestamp entries.
    pub fn count_timestamps(&self) -> Result<u64> {
        TimestampStore::count(&self.timestamps)
    }

    /// Returns page `page` (1-indexed) of channels, `per_page` per page,
    /// in ascending descriptor order. Control access only.
    pub fn channel_page(&self, page: u64, per_page: u64) -> Result<Vec<Channel>> {
        require(self.access, Access::Control, "channel_page");
        ChannelStore::page(&self.channels, page, per_page)
    }

    /// Serializes and upserts `channel` keyed on its descriptor. Control
    /// access only.
    ///
    /// If a previous record exists under the same descriptor and its
    /// `min_period` differs from the new one, the paired timestamp entry
    /// is erased: a policy change invalidates the route's observed
    /// rate-limit history. An unchanged `min_period` leaves the timestamp
    /// untouched.
    #[allow(clippy::float_cmp)]
    pub fn put_channel(&mut self, channel: &Channel) -> Result<()> {
        require(self.access, Access::Control, "put_channel");

        let previous = ChannelStore::get(&self.channels, &channel.descriptor)?;
        ChannelStore::put(&mut self.channels, channel)?;

        if let Some(previous) = previous {
            if previous.min_period != channel.min_period {
                self.remove_timestamp(&channel.descriptor)?;
            }
        }
        Ok(())
    }

    /// Upserts the last-relay timestamp for `descriptor`. Relay access
    /// only. `timestamp` must be a pre-validated instant, strictly
    /// positive.
    ///
    /// A relay-side write here may race a control-side `min_period`
    /// change: a timestamp stored just after the policy-change
    /// invalidation survives until the next change. The registry
    /// deliberately does not lock across the two planes' environments.
    pub fn put_timestamp(&mut self, descriptor: &Descriptor, timestamp: Timestamp) -> Result<()> {
        require(self.access, Access::Relay, "put_timestamp");
        debug_assert!(
            timestamp.is_positive(),
            "timestamps in the registry are strictly positive"
        );
        TimestampStore::put(&mut self.timestamps, descriptor, timestamp)
    }

    /// Removes the channel under `descriptor` together with its paired
    /// timestamp entry, whether or not either existed. Control access
    /// only. Idempotent.
    pub fn remove_channel(&mut self, descriptor: &Descriptor) -> Result<()> {
        require(self.access, Access::Control, "remove_channel");
        ChannelStore::delete(&mut self.channels, descriptor)?;
        TimestampStore::delete(&mut self.timestamps, descriptor)?;
        Ok(())
    }

    /// Removes only the timestamp entry. Control access only. Idempotent.
    fn remove_timestamp(&mut self, descriptor: &Descriptor) -> Result<()> {
        require(self.access, Access::Control, "remove_timestamp");
        TimestampStore::delete(&mut self.timestamps, descriptor)?;
        Ok(())
    }
}
