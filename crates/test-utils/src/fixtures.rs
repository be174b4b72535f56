//! Canned domain values for scenario tests.

use relaydb_types::{Address, Channel, Descriptor, Timestamp};

/// A fully populated channel under the given descriptor.
///
/// Mirrors a realistic control-plane registration: one recipient plus cc
/// and bcc entries, a half-second throttle window, a 10 MB size cap.
pub fn channel(descriptor: &str) -> Channel {
    Channel {
        descriptor: Descriptor::new(descriptor),
        token: "dGhpcy1pcy1ub3QtYS1yZWFsLXRva2Vu".to_string(),
        sender: Address {
            email: "alerts@acme-relay.io".to_string(),
            name: Some("Acme Alerts".to_string()),
        },
        recipients: vec![Address {
            email: "ops@acme.io".to_string(),
            name: Some("Acme Ops".to_string()),
        }],
        cc: vec![Address {
            email: "oncall@acme.io".to_string(),
            name: None,
        }],
        bcc: vec![Address {
            email: "audit@acme.io".to_string(),
            name: None,
        }],
        domain: "acme-relay.io".to_string(),
        min_period: 0.5,
        max_size: 10_000_000,
    }
}

/// The fixture channel with a different throttle window.
pub fn channel_with_min_period(descriptor: &str, min_period: f32) -> Channel {
    Channel {
        min_period,
        ..channel(descriptor)
    }
}

/// A fixed, strictly positive relay instant.
pub fn timestamp() -> Timestamp {
    Timestamp::new(1_545_396_245_000)
}
