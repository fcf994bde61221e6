// History store: ordering, clamping, clear

mod common;

use common::minimal_snapshot;
use resmon::history::History;

#[test]
fn test_append_keeps_arrival_order() {
    let mut history = History::new();
    for ts in [1000, 2000, 3000] {
        history.append(minimal_snapshot(ts));
    }
    let timestamps: Vec<u64> = history.all().iter().map(|s| s.timestamp).collect();
    assert_eq!(timestamps, vec![1000, 2000, 3000]);
    assert_eq!(history.len(), 3);
    assert_eq!(history.latest().map(|s| s.timestamp), Some(3000));
}

#[test]
fn test_backwards_timestamp_is_clamped() {
    let mut history = History::new();
    history.append(minimal_snapshot(5000));
    history.append(minimal_snapshot(4000));
    history.append(minimal_snapshot(6000));
    let timestamps: Vec<u64> = history.all().iter().map(|s| s.timestamp).collect();
    assert_eq!(timestamps, vec![5000, 5000, 6000]);
}

#[test]
fn test_clear_then_read_is_empty() {
    let mut history = History::new();
    history.append(minimal_snapshot(1));
    history.append(minimal_snapshot(2));
    history.clear();
    assert!(history.is_empty());
    assert!(history.all().is_empty());
    assert!(history.latest().is_none());

    history.append(minimal_snapshot(10));
    assert_eq!(history.all()[0].timestamp, 10);
}

#[test]
fn test_copy_is_frozen() {
    let mut history = History::new();
    history.append(minimal_snapshot(1));
    let frozen = history.all().to_vec();
    history.append(minimal_snapshot(2));
    assert_eq!(frozen.len(), 1);
    assert_eq!(history.len(), 2);
}
