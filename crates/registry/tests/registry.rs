//! Scenario tests for the channel registry.
//!
//! Each test initializes a fresh registry in a temporary directory. The
//! engine holds an exclusive lock per store, so tests that alternate
//! between the control and relay planes close one environment before
//! opening the next, the way the two deployed processes would hand the
//! store over.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use relaydb_registry::{Environment, RegistryError};
use relaydb_test_utils::fixtures;
use relaydb_types::{Access, Descriptor, RegistryConfig, Timestamp};
use tempfile::TempDir;

/// A freshly initialized registry directory.
struct Harness {
    _dir: TempDir,
    config: RegistryConfig,
}

impl Harness {
    fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let config = RegistryConfig::builder()
            .data_dir(dir.path())
            .build()
            .expect("valid config");
        Environment::initialize(Access::Control, &config).expect("initialize registry");
        Self { _dir: dir, config }
    }

    fn control(&self) -> Environment {
        Environment::open(Access::Control, &self.config).expect("open control environment")
    }

    fn relay(&self) -> Environment {
        Environment::open(Access::Relay, &self.config).expect("open relay environment")
    }
}

fn descriptor(index: usize) -> Descriptor {
    Descriptor::new(format!("route-{index:02}"))
}

/// Inserts the fixture channel under `route-00` .. `route-{count-1}`.
fn put_channels(env: &Environment, count: usize) {
    env.update(|txn| {
        // Reverse insertion order: the table, not the caller, sorts.
        for index in (0..count).rev() {
            txn.put_channel(&fixtures::channel(descriptor(index).as_str()))?;
        }
        Ok::<_, RegistryError>(())
    })
    .expect("put channels");
}

#[test]
fn test_empty_registry_has_no_entries() {
    let harness = Harness::new();
    let env = harness.control();

    env.view(|txn| {
        assert_eq!(txn.count_channels()?, 0);
        assert_eq!(txn.count_timestamps()?, 0);
        assert_eq!(txn.channel(&descriptor(0))?, None);
        assert_eq!(txn.timestamp(&descriptor(0))?, None);
        Ok::<_, RegistryError>(())
    })
    .expect("view empty registry");
    env.close();
}

#[test]
fn test_counting_channels_tracks_inserts_and_removals() {
    let harness = Harness::new();
    let env = harness.control();

    put_channels(&env, 20);
    let count = env.view(|txn| txn.count_channels()).expect("count channels");
    assert_eq!(count, 20);

    env.update(|txn| {
        for index in 0..5 {
            txn.remove_channel(&descriptor(index))?;
        }
        Ok::<_, RegistryError>(())
    })
    .expect("remove channels");

    let count = env.view(|txn| txn.count_channels()).expect("count channels");
    assert_eq!(count, 15);
    env.close();
}

#[test]
fn test_counting_timestamps_tracks_inserts() {
    let harness = Harness::new();
    let env = harness.relay();

    env.update(|txn| {
        for index in 0..20 {
            txn.put_timestamp(&descriptor(index), fixtures::timestamp())?;
        }
        Ok::<_, RegistryError>(())
    })
    .expect("put timestamps");

    env.view(|txn| {
        assert_eq!(txn.count_timestamps()?, 20);
        assert_eq!(txn.timestamp(&descriptor(7))?, Some(fixtures::timestamp()));
        Ok::<_, RegistryError>(())
    })
    .expect("view timestamps");
    env.close();
}

#[test]
fn test_stored_channels_come_back_as_written() {
    let harness = Harness::new();
    let env = harness.control();

    let channel = fixtures::channel("route-00");
    env.update(|txn| txn.put_channel(&channel)).expect("put channel");

    let stored = env
        .view(|txn| txn.channel(&channel.descriptor))
        .expect("get channel")
        .expect("channel present");
    assert_eq!(stored, channel);
    env.close();
}

#[test]
fn test_overwriting_a_channel_keeps_the_count() {
    let harness = Harness::new();
    let env = harness.control();

    env.update(|txn| {
        txn.put_channel(&fixtures::channel("route-00"))?;
        let mut updated = fixtures::channel("route-00");
        updated.token = "cm90YXRlZC10b2tlbg".to_string();
        txn.put_channel(&updated)
    })
    .expect("put channel twice");

    env.view(|txn| {
        assert_eq!(txn.count_channels()?, 1);
        let stored = txn.channel(&descriptor(0))?.expect("channel present");
        assert_eq!(stored.token, "cm90YXRlZC10b2tlbg");
        Ok::<_, RegistryError>(())
    })
    .expect("view channel");
    env.close();
}

#[test]
fn test_channel_pages_partition_the_ascending_order() {
    let harness = Harness::new();
    let env = harness.control();

    // Any page of an empty registry is out of range.
    env.view(|txn| {
        assert!(txn.channel_page(1, 10)?.is_empty());
        assert!(txn.channel_page(2, 3)?.is_empty());
        Ok::<_, RegistryError>(())
    })
    .expect("page empty registry");

    put_channels(&env, 20);

    env.view(|txn| {
        let descriptors = |channels: Vec<relaydb_types::Channel>| {
            channels
                .into_iter()
                .map(|channel| channel.descriptor)
                .collect::<Vec<_>>()
        };

        assert_eq!(
            descriptors(txn.channel_page(1, 2)?),
            vec![descriptor(0), descriptor(1)]
        );
        assert_eq!(descriptors(txn.channel_page(5, 1)?), vec![descriptor(4)]);
        assert_eq!(
            descriptors(txn.channel_page(3, 9)?),
            vec![descriptor(18), descriptor(19)]
        );
        // Start index 36 lies past the 20 entries.
        assert!(txn.channel_page(10, 4)?.is_empty());

        let all = descriptors(txn.channel_page(1, 40)?);
        assert_eq!(all.len(), 20);
        assert!(all.windows(2).all(|pair| pair[0] < pair[1]));
        Ok::<_, RegistryError>(())
    })
    .expect("page channels");
    env.close();
}

#[test]
fn test_unchanged_min_period_preserves_the_timestamp() {
    let harness = Harness::new();

    let env = harness.control();
    env.update(|txn| txn.put_channel(&fixtures::channel("route-00")))
        .expect("put channel");
    env.close();

    let env = harness.relay();
    env.update(|txn| txn.put_timestamp(&descriptor(0), fixtures::timestamp()))
        .expect("put timestamp");
    env.close();

    let env = harness.control();
    env.update(|txn| txn.put_channel(&fixtures::channel("route-00")))
        .expect("re-put channel");

    let stored = env
        .view(|txn| txn.timestamp(&descriptor(0)))
        .expect("get timestamp");
    assert_eq!(stored, Some(fixtures::timestamp()));
    env.close();
}

#[test]
fn test_changed_min_period_erases_the_timestamp() {
    let harness = Harness::new();

    let env = harness.control();
    env.update(|txn| txn.put_channel(&fixtures::channel("route-00")))
        .expect("put channel");
    env.close();

    let env = harness.relay();
    env.update(|txn| txn.put_timestamp(&descriptor(0), fixtures::timestamp()))
        .expect("put timestamp");
    env.close();

    let env = harness.control();
    env.update(|txn| txn.put_channel(&fixtures::channel_with_min_period("route-00", 2.5)))
        .expect("put channel with new policy");

    env.view(|txn| {
        assert_eq!(txn.timestamp(&descriptor(0))?, None);
        assert_eq!(txn.count_timestamps()?, 0);
        // The channel itself carries the new policy.
        let stored = txn.channel(&descriptor(0))?.expect("channel present");
        assert_eq!(stored.min_period, 2.5);
        Ok::<_, RegistryError>(())
    })
    .expect("view after policy change");
    env.close();
}

#[test]
fn test_removing_a_channel_removes_its_timestamp() {
    let harness = Harness::new();

    let env = harness.control();
    env.update(|txn| txn.put_channel(&fixtures::channel("route-00")))
        .expect("put channel");
    env.close();

    let env = harness.relay();
    env.update(|txn| txn.put_timestamp(&descriptor(0), fixtures::timestamp()))
        .expect("put timestamp");
    env.close();

    let env = harness.control();
    env.update(|txn| txn.remove_channel(&descriptor(0)))
        .expect("remove channel");

    env.view(|txn| {
        assert_eq!(txn.channel(&descriptor(0))?, None);
        assert_eq!(txn.timestamp(&descriptor(0))?, None);
        Ok::<_, RegistryError>(())
    })
    .expect("view after removal");
    env.close();
}

#[test]
fn test_removing_an_absent_channel_is_idempotent() {
    let harness = Harness::new();
    let env = harness.control();

    env.update(|txn| txn.remove_channel(&descriptor(0)))
        .expect("remove absent channel");
    env.update(|txn| txn.remove_channel(&descriptor(0)))
        .expect("remove absent channel again");

    env.view(|txn| {
        assert_eq!(txn.count_channels()?, 0);
        assert_eq!(txn.count_timestamps()?, 0);
        Ok::<_, RegistryError>(())
    })
    .expect("view after removals");
    env.close();
}

/// Caller-side error type for the rollback test.
#[derive(Debug, PartialEq)]
struct Cancelled;

impl From<RegistryError> for Cancelled {
    fn from(_: RegistryError) -> Self {
        Cancelled
    }
}

#[test]
fn test_failed_updates_roll_back_all_writes() {
    let harness = Harness::new();
    let env = harness.control();

    let result: Result<(), Cancelled> = env.update(|txn| {
        txn.put_channel(&fixtures::channel("route-00"))?;
        txn.put_channel(&fixtures::channel("route-01"))?;
        Err(Cancelled)
    });
    assert_eq!(result, Err(Cancelled));

    env.view(|txn| {
        assert_eq!(txn.count_channels()?, 0);
        assert_eq!(txn.channel(&descriptor(0))?, None);
        Ok::<_, RegistryError>(())
    })
    .expect("view after rollback");
    env.close();
}

#[test]
fn test_views_do_not_observe_in_flight_updates() {
    let harness = Harness::new();
    let env = harness.control();

    env.update(|txn| {
        txn.put_channel(&fixtures::channel("route-00"))?;

        let seen = env.view(|view| view.channel(&descriptor(0)))?;
        assert_eq!(seen, None);
        Ok::<_, RegistryError>(())
    })
    .expect("update with concurrent view");

    let seen = env
        .view(|txn| txn.channel(&descriptor(0)))
        .expect("view after commit");
    assert!(seen.is_some());
    env.close();
}

#[test]
#[should_panic(expected = "requires control access")]
fn test_put_channel_under_relay_access_panics() {
    let harness = Harness::new();
    let env = harness.relay();
    let _ = env.update(|txn| txn.put_channel(&fixtures::channel("route-00")));
}

#[test]
#[should_panic(expected = "requires relay access")]
fn test_put_timestamp_under_control_access_panics() {
    let harness = Harness::new();
    let env = harness.control();
    let _ = env.update(|txn| txn.put_timestamp(&descriptor(0), Timestamp::new(1)));
}

#[test]
#[should_panic(expected = "requires control access")]
fn test_channel_page_under_relay_access_panics() {
    let harness = Harness::new();
    let env = harness.relay();
    let _ = env.view(|txn| txn.channel_page(1, 10));
}

#[test]
#[should_panic(expected = "requires control access")]
fn test_remove_channel_under_relay_access_panics() {
    let harness = Harness::new();
    let env = harness.relay();
    let _ = env.update(|txn| txn.remove_channel(&descriptor(0)));
}
