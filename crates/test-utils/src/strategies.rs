//! Proptest strategies for RelayDB domain types.
//!
//! Reusable generators for property-based testing across crates.
//! Strategies produce well-formed domain values while exploring edge
//! cases through random variation.
//!
//! # Usage
//!
//! ```no_run
//! use proptest::prelude::*;
//! use relaydb_test_utils::strategies;
//!
//! proptest! {
//!     #[test]
//!     fn my_property(channel in strategies::arb_channel()) {
//!         // test invariant with a randomly generated channel
//!     }
//! }
//! ```

use proptest::prelude::*;

use relaydb_types::{Address, Channel, Descriptor, Timestamp};

/// Generates a descriptor of 1-32 characters in route syntax, e.g.
/// `team-3/feed-9`.
pub fn arb_descriptor() -> impl Strategy<Value = Descriptor> {
    "[a-z][a-z0-9/_-]{0,31}".prop_map(|value| Descriptor::new(value))
}

/// Generates an address with an optional display name.
pub fn arb_address() -> impl Strategy<Value = Address> {
    ("[a-z]{1,12}", prop::option::of("[A-Z][a-z]{1,11}")).prop_map(|(user, name)| Address {
        email: format!("{user}@example.com"),
        name,
    })
}

/// Generates a strictly positive millisecond timestamp.
pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
    (1u64..=u64::MAX).prop_map(Timestamp::new)
}

/// Generates a full channel record.
pub fn arb_channel() -> impl Strategy<Value = Channel> {
    (
        arb_descriptor(),
        "[A-Za-z0-9]{16,48}",
        arb_address(),
        proptest::collection::vec(arb_address(), 1..4),
        proptest::collection::vec(arb_address(), 0..3),
        proptest::collection::vec(arb_address(), 0..3),
        "[a-z]{3,10}\\.com",
        0.0f32..600.0f32,
        1i32..=10_000_000i32,
    )
        .prop_map(
            |(descriptor, token, sender, recipients, cc, bcc, domain, min_period, max_size)| {
                Channel {
                    descriptor,
                    token,
                    sender,
                    recipients,
                    cc,
                    bcc,
                    domain,
                    min_period,
                    max_size,
                }
            },
        )
}
