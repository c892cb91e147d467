//! Integration tests for properties and read tracking.

use std::sync::Arc;

use cssx_core::{NoopTracker, ObservedKey, Property, ReadTracker, RecordingTracker};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[test]
fn trackers_are_usable_as_trait_objects() {
    init_tracing();

    let recording = Arc::new(RecordingTracker::new());
    let trackers: Vec<Arc<dyn ReadTracker>> = vec![Arc::new(NoopTracker), recording.clone()];

    for tracker in &trackers {
        tracker.record_read(&ObservedKey::Viewport);
        tracker.record_read(&ObservedKey::variable("--spacing"));
    }

    assert_eq!(
        recording.reads(),
        vec![ObservedKey::Viewport, ObservedKey::variable("--spacing")]
    );
}

#[test]
fn property_shared_across_threads() {
    let prop = Arc::new(Property::new(0u32));
    let handles: Vec<_> = (1..=4)
        .map(|i| {
            let prop = prop.clone();
            std::thread::spawn(move || {
                prop.set(i);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert!((1..=4).contains(&prop.get()));
}
