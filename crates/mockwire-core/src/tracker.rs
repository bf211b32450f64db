//! Non-owning registry of live instances.
//!
//! Instances are registered under their type identifier when constructed
//! through an intercepted type. The tracker holds only [`Weak`] handles, so
//! it never keeps an instance alive; handles whose instance has been dropped
//! are pruned whenever the type's instances are listed.

use std::sync::{Arc, Weak};

use dashmap::DashMap;
use log::{debug, info, warn};
use parking_lot::RwLock;

use crate::{
    object::{MockObject, ObjectRef},
    value::Value,
};

type WeakRef = Weak<RwLock<dyn MockObject>>;

/// Per-type set of weak instance handles.
#[derive(Debug, Default)]
pub struct InstanceTracker {
    instances: DashMap<String, Vec<WeakRef>>,
}

impl InstanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a non-owning handle to `instance` under `type_id`.
    pub fn register(&self, type_id: &str, instance: &ObjectRef) {
        self.instances
            .entry(type_id.to_string())
            .or_default()
            .push(Arc::downgrade(instance));
        debug!("Tracking new instance of {type_id}");
    }

    /// Returns the live instances of `type_id`, dropping handles to
    /// instances that no longer exist.
    pub fn list(&self, type_id: &str) -> Vec<ObjectRef> {
        let Some(mut handles) = self.instances.get_mut(type_id) else {
            return Vec::new();
        };

        let mut live = Vec::with_capacity(handles.len());
        handles.retain(|handle| match handle.upgrade() {
            Some(instance) => {
                live.push(instance);
                true
            }
            None => false,
        });
        live
    }

    /// Assigns `value` to `field` on every live instance of `type_id`.
    ///
    /// An instance that rejects the assignment is logged and skipped.
    /// Returns the number of instances updated.
    pub fn overwrite_field(&self, type_id: &str, field: &str, value: &Value) -> usize {
        let mut updated = 0;
        for instance in self.list(type_id) {
            match instance.write().set_field(field, value.clone()) {
                Ok(()) => updated += 1,
                Err(e) => warn!("Failed to set {type_id}.{field} on tracked instance: {e}"),
            }
        }
        if updated > 0 {
            info!("Pushed {type_id}.{field} = {value} to {updated} live instance(s)");
        }
        updated
    }

    /// Drops every tracked handle.
    pub fn clear(&self) {
        self.instances.clear();
    }

    /// Type identifiers with at least one registered handle, sorted.
    ///
    /// Dead handles are not pruned here, so a type may be listed whose
    /// instances have all been dropped.
    pub fn tracked_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self
            .instances
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| entry.key().clone())
            .collect();
        types.sort();
        types
    }
}

#[cfg(test)]
mod tests {
    use std::{any::Any, thread};

    use super::*;
    use crate::{error::FieldError, object::field_value};

    #[derive(Default)]
    struct Gauge {
        level: i32,
    }

    impl MockObject for Gauge {
        fn type_ident(&self) -> &str {
            "test.Gauge"
        }

        fn get_field(&self, name: &str) -> Option<Value> {
            (name == "level").then(|| self.level.into())
        }

        fn set_field(&mut self, name: &str, value: Value) -> Result<(), FieldError> {
            match name {
                "level" => self.level = field_value(name, value)?,
                _ => return Err(FieldError::UnknownField(name.to_string())),
            }
            Ok(())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn gauge() -> ObjectRef {
        Arc::new(RwLock::new(Gauge::default()))
    }

    #[test]
    fn test_list_prunes_dropped_instances() {
        let tracker = InstanceTracker::new();
        let mut kept: Vec<ObjectRef> = (0..5).map(|_| gauge()).collect();
        for instance in &kept {
            tracker.register("test.Gauge", instance);
        }

        // Make two of the five unreachable
        kept.truncate(3);

        assert_eq!(tracker.list("test.Gauge").len(), 3);
        assert_eq!(tracker.instances.get("test.Gauge").unwrap().len(), 3);
    }

    #[test]
    fn test_list_unknown_type_is_empty() {
        let tracker = InstanceTracker::new();
        assert!(tracker.list("test.Missing").is_empty());
    }

    #[test]
    fn test_tracker_does_not_keep_instances_alive() {
        let tracker = InstanceTracker::new();
        let instance = gauge();
        tracker.register("test.Gauge", &instance);
        assert_eq!(Arc::strong_count(&instance), 1);
    }

    #[test]
    fn test_overwrite_field_updates_live_instances() {
        let tracker = InstanceTracker::new();
        let a = gauge();
        let b = gauge();
        tracker.register("test.Gauge", &a);
        tracker.register("test.Gauge", &b);

        assert_eq!(tracker.overwrite_field("test.Gauge", "level", &Value::I32(9)), 2);
        assert_eq!(a.read().get_field("level"), Some(Value::I32(9)));
        assert_eq!(b.read().get_field("level"), Some(Value::I32(9)));
    }

    #[test]
    fn test_overwrite_field_failures_do_not_abort() {
        let tracker = InstanceTracker::new();
        let a = gauge();
        tracker.register("test.Gauge", &a);

        assert_eq!(tracker.overwrite_field("test.Gauge", "missing", &Value::I32(1)), 0);
        assert_eq!(
            tracker.overwrite_field("test.Gauge", "level", &Value::Text("x".into())),
            0
        );
        assert_eq!(a.read().get_field("level"), Some(Value::I32(0)));
    }

    #[test]
    fn test_clear_and_tracked_types() {
        let tracker = InstanceTracker::new();
        let a = gauge();
        tracker.register("test.Gauge", &a);
        tracker.register("test.Other", &a);
        assert_eq!(
            tracker.tracked_types(),
            vec!["test.Gauge".to_string(), "test.Other".to_string()]
        );

        tracker.clear();
        assert!(tracker.tracked_types().is_empty());
        assert!(tracker.list("test.Gauge").is_empty());
    }

    #[test]
    fn test_concurrent_register_and_list() {
        let tracker = Arc::new(InstanceTracker::new());
        let keep: Arc<RwLock<Vec<ObjectRef>>> = Arc::new(RwLock::new(Vec::new()));

        let writers: Vec<_> = (0..4)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                let keep = Arc::clone(&keep);
                thread::spawn(move || {
                    for i in 0..50 {
                        let instance = gauge();
                        tracker.register("test.Gauge", &instance);
                        if i % 2 == 0 {
                            keep.write().push(instance);
                        }
                    }
                })
            })
            .collect();
        let reader = {
            let tracker = Arc::clone(&tracker);
            thread::spawn(move || {
                for _ in 0..50 {
                    tracker.list("test.Gauge");
                }
            })
        };

        for writer in writers {
            writer.join().unwrap();
        }
        reader.join().unwrap();

        assert_eq!(tracker.list("test.Gauge").len(), keep.read().len());
        assert_eq!(keep.read().len(), 100);
    }
}
