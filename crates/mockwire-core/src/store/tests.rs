//! Tests for the store module.

use std::{
    any::Any,
    sync::{Arc, Weak},
    thread,
};

use parking_lot::{Mutex, RwLock};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use super::*;
use crate::{
    error::{FieldError, MockError},
    models::{MockField, MockMethod, MockType},
    object::{field_value, MockObject},
    params::{SetField, SetMethod, TypeTarget},
    registry::TypeDescriptor,
    value::{Value, ValueType},
};

#[derive(Default)]
struct Badge {
    title: String,
    level: i32,
}

impl MockObject for Badge {
    fn type_ident(&self) -> &str {
        "test.Badge"
    }

    fn get_field(&self, name: &str) -> Option<Value> {
        match name {
            "title" => Some(self.title.clone().into()),
            "level" => Some(self.level.into()),
            _ => None,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) -> std::result::Result<(), FieldError> {
        match name {
            "title" => self.title = field_value(name, value)?,
            "level" => self.level = field_value(name, value)?,
            _ => return Err(FieldError::UnknownField(name.to_string())),
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Records re-derivation requests.
#[derive(Default)]
struct RecordingHook {
    reloaded: Mutex<Vec<String>>,
}

impl Reinterception for RecordingHook {
    fn reload_type(&self, type_id: &str) {
        self.reloaded.lock().push(type_id.to_string());
    }
}

struct Fixture {
    dir: TempDir,
    tracker: Arc<InstanceTracker>,
    store: PlanStore,
}

fn open_store(dir: TempDir) -> Fixture {
    let registry = Arc::new(TypeRegistry::new());
    registry.register(
        TypeDescriptor::new("test.Badge")
            .field("title", ValueType::Text)
            .field("level", ValueType::I32)
            .constructible::<Badge>(),
    );
    let tracker = Arc::new(InstanceTracker::new());
    let resolver = Arc::new(TemplateResolver::new(
        Arc::clone(&registry),
        Arc::clone(&tracker),
    ));
    let store = PlanStore::open(
        DocumentStore::new(dir.path()).unwrap(),
        Arc::clone(&tracker),
        resolver,
        registry,
    )
    .unwrap();
    Fixture {
        dir,
        tracker,
        store,
    }
}

fn create_test_store() -> Fixture {
    open_store(TempDir::new().expect("Failed to create temp dir"))
}

fn key(name: &str) -> PlanKey {
    PlanKey::new("test", name)
}

fn badge() -> ObjectRef {
    Arc::new(RwLock::new(Badge::default()))
}

#[test]
fn test_create_plan_twice_conflicts() {
    let f = create_test_store();
    f.store.create_plan(&key("p")).unwrap();
    f.store
        .update_mock_type(&key("p"), MockType::new("test.Badge"))
        .unwrap();
    let before = f.store.get_plan(&key("p")).unwrap();

    let err = f.store.create_plan(&key("p")).unwrap_err();
    assert!(matches!(err, MockError::AlreadyExists { .. }));
    assert!(err.is_conflict());
    assert_eq!(f.store.get_plan(&key("p")).unwrap(), before);
}

#[test]
fn test_create_plan_rejects_bad_names() {
    let f = create_test_store();
    let err = f.store.create_plan(&key("../escape")).unwrap_err();
    assert!(matches!(err, MockError::InvalidInput { .. }));
    assert!(f.store.list_plans().is_empty());
}

#[test]
fn test_create_plan_writes_document() {
    let f = create_test_store();
    let plan = f.store.create_plan(&key("p")).unwrap();
    assert!(!plan.active);
    assert!(plan.mock_types.is_empty());
    assert!(f.dir.path().join("test").join("p.json").exists());
}

#[test]
fn test_list_and_get_plans() {
    let f = create_test_store();
    f.store.create_plan(&key("a")).unwrap();
    f.store.create_plan(&key("b")).unwrap();

    let names: Vec<String> = f.store.list_plans().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    assert!(f.store.get_plan(&key("a")).is_some());
    assert!(f.store.get_plan(&key("missing")).is_none());
}

#[test]
fn test_delete_plan_removes_document() {
    let f = create_test_store();
    f.store.create_plan(&key("p")).unwrap();

    assert!(f.store.delete_plan(&key("p")));
    assert!(!f.dir.path().join("test").join("p.json").exists());
    assert!(!f.store.delete_plan(&key("p")));
}

#[test]
fn test_activation_keeps_single_active_plan() {
    let f = create_test_store();
    for name in ["a", "b", "c"] {
        f.store.create_plan(&key(name)).unwrap();
    }

    for name in ["a", "c", "b", "b", "a"] {
        assert!(f.store.activate_plan(&key(name)));
        let active: Vec<Plan> = f.store.list_plans().into_iter().filter(|p| p.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, name);
    }
    assert_eq!(f.store.get_active_plan().unwrap().name, "a");
}

#[test]
fn test_activating_missing_plan_deactivates_all() {
    let f = create_test_store();
    f.store.create_plan(&key("a")).unwrap();
    f.store.activate_plan(&key("a"));

    assert!(!f.store.activate_plan(&key("missing")));
    assert!(f.store.get_active_plan().is_none());
}

#[test]
fn test_concurrent_activation_leaves_one_active() {
    let f = create_test_store();
    let names: Vec<String> = (0..8).map(|i| format!("plan-{i}")).collect();
    for name in &names {
        f.store.create_plan(&key(name)).unwrap();
    }

    let store = &f.store;
    thread::scope(|scope| {
        for name in &names {
            scope.spawn(move || store.activate_plan(&key(name)));
        }
    });

    let active = f.store.list_plans().into_iter().filter(|p| p.active).count();
    assert_eq!(active, 1);
}

#[test]
fn test_add_type_allows_duplicates() {
    let f = create_test_store();
    f.store.create_plan(&key("p")).unwrap();

    assert!(f.store.add_type_to_plan(&key("p"), "test.Badge"));
    assert!(f.store.add_type_to_plan(&key("p"), "test.Badge"));
    assert!(!f.store.add_type_to_plan(&key("missing"), "test.Badge"));
    assert_eq!(f.store.get_plan(&key("p")).unwrap().mock_types.len(), 2);
}

#[test]
fn test_update_mock_type_upserts() {
    let f = create_test_store();
    f.store.create_plan(&key("p")).unwrap();

    let entry = MockType::new("test.Badge")
        .with_template_name("gold")
        .with_field(MockField::new("level", ValueType::I32).with_value("1"));
    assert!(f.store.update_mock_type(&key("p"), entry.clone()).unwrap());

    let entry = entry.with_field(MockField::new("title", ValueType::Text).with_value("Gold"));
    assert!(f.store.update_mock_type(&key("p"), entry).unwrap());

    let plan = f.store.get_plan(&key("p")).unwrap();
    assert_eq!(plan.mock_types.len(), 1);
    assert_eq!(plan.mock_types[0].fields.len(), 2);
    assert!(!f.store.update_mock_type(&key("missing"), MockType::new("x")).unwrap());
}

#[test]
fn test_duplicate_template_name_conflicts_without_changes() {
    let f = create_test_store();
    f.store.create_plan(&key("p")).unwrap();
    f.store
        .update_mock_type(
            &key("p"),
            MockType::new("test.Badge")
                .with_template_name("shared")
                .with_field(MockField::new("level", ValueType::I32).with_value("1")),
        )
        .unwrap();
    f.store
        .update_mock_type(&key("p"), MockType::new("test.Other").with_template_name("mine"))
        .unwrap();
    let before = f.store.get_plan(&key("p")).unwrap();

    let err = f
        .store
        .update_mock_type(
            &key("p"),
            MockType::new("test.Other")
                .with_template_name("shared")
                .with_field(MockField::new("x", ValueType::I32).with_value("2")),
        )
        .unwrap_err();

    assert!(matches!(err, MockError::DuplicateTemplateName { ref template, .. } if template == "shared"));
    assert_eq!(f.store.get_plan(&key("p")).unwrap(), before);
}

#[test]
fn test_delete_mock_type_removes_all_entries() {
    let f = create_test_store();
    f.store.create_plan(&key("p")).unwrap();
    f.store.add_type_to_plan(&key("p"), "test.Badge");
    f.store
        .update_mock_type(&key("p"), MockType::new("test.Badge").with_template_name("gold"))
        .unwrap();

    assert!(f.store.delete_mock_type(&key("p"), "test.Badge"));
    assert!(!f.store.delete_mock_type(&key("p"), "test.Badge"));
    assert!(f.store.get_plan(&key("p")).unwrap().mock_types.is_empty());
}

#[test]
fn test_get_mock_type_by_template() {
    let f = create_test_store();
    f.store.create_plan(&key("p")).unwrap();
    f.store
        .update_mock_type(&key("p"), MockType::new("test.Badge").with_template_name("gold"))
        .unwrap();

    assert!(f.store.get_mock_type(&key("p"), "test.Badge", Some("gold")).is_some());
    assert!(f.store.get_mock_type(&key("p"), "test.Badge", None).is_none());
    assert!(f.store.get_mock_type(&key("p"), "test.Badge", Some("silver")).is_none());
}

#[test]
fn test_update_on_active_plan_pushes_and_reinterprets() {
    let f = create_test_store();
    let hook = Arc::new(RecordingHook::default());
    let weak: Weak<RecordingHook> = Arc::downgrade(&hook);
    f.store.attach_reinterception(weak);

    let live = badge();
    f.tracker.register("test.Badge", &live);

    f.store.create_plan(&key("p")).unwrap();
    f.store.activate_plan(&key("p"));
    f.store
        .update_mock_type(
            &key("p"),
            MockType::new("test.Badge")
                .with_field(MockField::new("level", ValueType::I32).with_value("5"))
                .with_field(MockField::new("title", ValueType::Text).with_value("Ace")),
        )
        .unwrap();

    assert_eq!(live.read().get_field("level"), Some(Value::I32(5)));
    assert_eq!(live.read().get_field("title"), Some(Value::Text("Ace".into())));
    assert_eq!(*hook.reloaded.lock(), vec!["test.Badge".to_string()]);
}

#[test]
fn test_update_on_inactive_plan_has_no_side_effects() {
    let f = create_test_store();
    let hook = Arc::new(RecordingHook::default());
    let weak: Weak<RecordingHook> = Arc::downgrade(&hook);
    f.store.attach_reinterception(weak);

    let live = badge();
    f.tracker.register("test.Badge", &live);

    f.store.create_plan(&key("p")).unwrap();
    f.store
        .update_mock_type(
            &key("p"),
            MockType::new("test.Badge")
                .with_field(MockField::new("level", ValueType::I32).with_value("5")),
        )
        .unwrap();

    assert_eq!(live.read().get_field("level"), Some(Value::I32(0)));
    assert!(hook.reloaded.lock().is_empty());
}

#[test]
fn test_malformed_literal_is_not_pushed() {
    let f = create_test_store();
    let live = badge();
    f.tracker.register("test.Badge", &live);

    f.store.create_plan(&key("p")).unwrap();
    f.store.activate_plan(&key("p"));
    f.store
        .update_mock_type(
            &key("p"),
            MockType::new("test.Badge")
                .with_field(MockField::new("level", ValueType::I32).with_value("abc")),
        )
        .unwrap();

    assert_eq!(live.read().get_field("level"), Some(Value::I32(0)));
}

#[test]
fn test_resolve_active_template() {
    let f = create_test_store();
    f.store.create_plan(&key("p")).unwrap();
    f.store
        .update_mock_type(
            &key("p"),
            MockType::new("test.Badge")
                .with_template_name("gold")
                .with_field(MockField::new("level", ValueType::I32).with_value("3")),
        )
        .unwrap();

    // Nothing active yet
    assert!(f.store.resolve_active_template("test.Badge", "gold").is_none());

    f.store.activate_plan(&key("p"));
    let built = f.store.resolve_active_template("test.Badge", "gold").unwrap();
    assert_eq!(built.read().get_field("level"), Some(Value::I32(3)));
    assert!(f.store.resolve_active_template("test.Badge", "silver").is_none());
}

#[test]
fn test_reload_from_documents_is_equivalent() {
    let f = create_test_store();
    f.store.create_plan(&key("a")).unwrap();
    f.store.create_plan(&key("b")).unwrap();
    f.store
        .update_mock_type(
            &key("a"),
            MockType::new("test.Badge")
                .with_template_name("gold")
                .with_field(MockField::new("level", ValueType::I32).with_value("3"))
                .with_method(MockMethod::new("describe", ValueType::Text).returning("shiny")),
        )
        .unwrap();
    f.store.activate_plan(&key("a"));
    let before = f.store.list_plans();

    let Fixture { dir, .. } = f;
    let reopened = open_store(dir);
    assert_eq!(reopened.store.list_plans(), before);
    assert_eq!(reopened.store.get_active_plan().unwrap().name, "a");
}

#[test]
fn test_open_keeps_only_one_active_plan() {
    let dir = TempDir::new().unwrap();
    let documents = DocumentStore::new(dir.path()).unwrap();
    for name in ["a", "b"] {
        let mut plan = Plan::new(&key(name), jiff::Timestamp::now());
        plan.active = true;
        documents.save(&plan).unwrap();
    }

    let f = open_store(dir);
    let active = f.store.list_plans().into_iter().filter(|p| p.active).count();
    assert_eq!(active, 1);
    assert_eq!(f.store.get_active_plan().unwrap().name, "a");
}

#[test]
fn test_set_field_handler_creates_entry() {
    let f = create_test_store();
    f.store.create_plan(&key("p")).unwrap();
    let live = badge();
    live.write().set_field("level", Value::I32(9)).unwrap();
    f.tracker.register("test.Badge", &live);

    let target = TypeTarget::new(key("p"), "test.Badge");
    let result = f
        .store
        .set_field(&SetField {
            target: target.clone(),
            name: "level".to_string(),
            field_type: ValueType::I32,
            value: Some("4".to_string()),
            template: None,
        })
        .unwrap()
        .unwrap();

    assert_eq!(result.changes, vec!["level = 4".to_string()]);
    let entry = f.store.get_mock_type(&key("p"), "test.Badge", None).unwrap();
    let field = entry.field("level").unwrap();
    assert_eq!(field.value.as_deref(), Some("4"));
    assert_eq!(field.original_value.as_deref(), Some("9"));

    let missing = TypeTarget::new(key("missing"), "test.Badge");
    let none = f
        .store
        .set_field(&SetField {
            target: missing,
            name: "level".to_string(),
            field_type: ValueType::I32,
            value: Some("4".to_string()),
            template: None,
        })
        .unwrap();
    assert!(none.is_none());
}

#[test]
fn test_set_method_handler_updates_existing_variant() {
    let f = create_test_store();
    f.store.create_plan(&key("p")).unwrap();
    let target = TypeTarget::new(key("p"), "test.Badge").with_template(Some("gold".into()));

    for value in ["first", "second"] {
        f.store
            .set_method(&SetMethod {
                target: target.clone(),
                name: "describe".to_string(),
                return_type: ValueType::Text,
                parameter_types: vec!["i32".to_string()],
                return_value: Some(value.to_string()),
                return_template: None,
                active: true,
            })
            .unwrap()
            .unwrap();
    }

    let plan = f.store.get_plan(&key("p")).unwrap();
    assert_eq!(plan.mock_types.len(), 1);
    let method = plan.mock_types[0].method("describe").unwrap();
    assert_eq!(method.return_value.as_deref(), Some("second"));
    assert_eq!(method.signature(), "describe(i32) -> String");
}

#[test]
fn test_handlers_report_missing_targets() {
    let f = create_test_store();
    assert!(f.store.delete_plan_result(&key("missing")).is_none());
    assert!(!f.store.activate_plan_status(&key("missing")).success);
    assert!(f.store.show_mock_types(&TypeTarget::new(key("missing"), "x")).is_none());
    assert!(f.store.list_plans_summary().is_empty());
}
