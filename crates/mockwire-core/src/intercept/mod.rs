//! Interception of construction, method dispatch and accessor reads.
//!
//! Mockable types route their members through an [`Interceptor`]:
//!
//! - constructors call [`Interceptor::construct`]
//! - methods call [`Interceptor::invoke`] with their original body
//! - accessors call [`Interceptor::read_field`] with the stored value
//!
//! Each type's overrides are derived once from the active plan into a
//! [`DispatchTable`] and cached. A cached decision stays in force until the
//! type is explicitly reloaded, even if the plan changes in the meantime.
//!
//! # Examples
//!
//! ```rust
//! use std::any::Any;
//!
//! use mockwire_core::{
//!     models::{MockMethod, MockType, PlanKey},
//!     EngineBuilder, FieldError, Interceptor, MockObject, Value, ValueType,
//! };
//!
//! #[derive(Default)]
//! struct Greeter;
//!
//! impl Greeter {
//!     fn greet(&self, interceptor: &Interceptor) -> String {
//!         interceptor.invoke("app.Greeter", "greet", || "hello".to_string())
//!     }
//! }
//!
//! impl MockObject for Greeter {
//!     fn type_ident(&self) -> &str {
//!         "app.Greeter"
//!     }
//!     fn get_field(&self, _name: &str) -> Option<Value> {
//!         None
//!     }
//!     fn set_field(&mut self, name: &str, _value: Value) -> Result<(), FieldError> {
//!         Err(FieldError::UnknownField(name.to_string()))
//!     }
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let engine = EngineBuilder::new().with_storage_dir(Some(dir.path())).build()?;
//! let key = PlanKey::new("demo", "greetings");
//!
//! engine.store().create_plan(&key)?;
//! engine.store().update_mock_type(
//!     &key,
//!     MockType::new("app.Greeter")
//!         .with_method(MockMethod::new("greet", ValueType::Text).returning("bonjour")),
//! )?;
//! engine.store().activate_plan(&key);
//!
//! let greeter = engine.interceptor().construct(Greeter);
//! assert_eq!(greeter.read().greet(engine.interceptor()), "bonjour");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use dashmap::DashMap;
use log::{debug, info, warn};
use parking_lot::RwLock;

use crate::{
    object::{share, MockObject, ObjectRef},
    registry::{is_accessor_name, TypeRegistry},
    store::{PlanStore, Reinterception},
    tracker::InstanceTracker,
    value::{FromValue, Value},
};

pub mod table;


pub use table::{DispatchTable, InterceptionState, MethodOverride};

/// Decides, per type, which overrides of the active plan apply.
pub struct Interceptor {
    store: Arc<PlanStore>,
    tracker: Arc<InstanceTracker>,
    registry: Arc<TypeRegistry>,
    tables: DashMap<String, InterceptionState>,
}

impl Interceptor {
    pub fn new(
        store: Arc<PlanStore>,
        tracker: Arc<InstanceTracker>,
        registry: Arc<TypeRegistry>,
    ) -> Self {
        Self {
            store,
            tracker,
            registry,
            tables: DashMap::new(),
        }
    }

    /// The dispatch table of `type_id`, deriving it on first use.
    ///
    /// `None` means the type is unmodified.
    pub fn load(&self, type_id: &str) -> Option<Arc<DispatchTable>> {
        if let Some(state) = self.tables.get(type_id) {
            return state.table();
        }

        // Another thread may have derived it meanwhile; the first one wins.
        let derived = self.derive(type_id);
        self.tables
            .entry(type_id.to_string())
            .or_insert(derived)
            .table()
    }

    /// Re-derives `type_id` from the current active plan.
    pub fn reload(&self, type_id: &str) -> Option<Arc<DispatchTable>> {
        let state = self.derive(type_id);
        let table = state.table();
        let previous = self.tables.insert(type_id.to_string(), state);

        let was_intercepted = previous.is_some_and(|s| s.is_intercepted());
        match (was_intercepted, table.is_some()) {
            (false, true) => info!("Intercepting {type_id}"),
            (true, false) => info!("Restored original behavior of {type_id}"),
            _ => debug!("Reloaded {type_id}"),
        }
        table
    }

    /// Reloads every type loaded so far.
    pub fn refresh_all(&self) {
        let type_ids: Vec<String> = self.tables.iter().map(|e| e.key().clone()).collect();
        for type_id in &type_ids {
            self.reload(type_id);
        }
        info!("Refreshed {} loaded type(s)", type_ids.len());
    }

    /// Current cached decision for `type_id`; `None` if never loaded.
    pub fn state(&self, type_id: &str) -> Option<InterceptionState> {
        self.tables.get(type_id).map(|state| state.clone())
    }

    /// Constructs a shared instance, registering it with the tracker when
    /// its type is intercepted.
    pub fn construct<T: MockObject>(&self, value: T) -> Arc<RwLock<T>> {
        let type_id = value.type_ident().to_string();
        let instance = share(value);
        if self.load(&type_id).is_some() {
            let handle: ObjectRef = instance.clone();
            self.tracker.register(&type_id, &handle);
        }
        instance
    }

    /// Dispatches method `method` of `type_id`.
    ///
    /// Returns the overridden result when one is installed, otherwise runs
    /// `original`. An override whose value does not convert to `R` falls
    /// back to `original`.
    pub fn invoke<R, F>(&self, type_id: &str, method: &str, original: F) -> R
    where
        R: FromValue,
        F: FnOnce() -> R,
    {
        let Some(table) = self.load(type_id) else {
            return original();
        };
        let Some(value) = self.method_value(&table, method) else {
            return original();
        };

        match R::from_value(value) {
            Some(result) => result,
            None => {
                warn!("Override for {type_id}.{method}() has the wrong type, calling original");
                original()
            }
        }
    }

    /// Reads `field` through accessor `accessor`.
    ///
    /// Only accessor-style names (`get...`, `is...`) see field overrides;
    /// any other read returns `stored` unchanged.
    pub fn read_field<R: FromValue>(&self, type_id: &str, accessor: &str, field: &str, stored: R) -> R {
        if !is_accessor_name(accessor) {
            return stored;
        }
        let Some(table) = self.load(type_id) else {
            return stored;
        };
        let Some(value) = table.field_override(field) else {
            return stored;
        };

        match R::from_value(value.clone()) {
            Some(result) => result,
            None => {
                warn!("Override for {type_id}.{field} has the wrong type for {accessor}()");
                stored
            }
        }
    }

    fn derive(&self, type_id: &str) -> InterceptionState {
        let Some(plan) = self.store.get_active_plan() else {
            return InterceptionState::Unmodified;
        };
        let Some(entry) = plan.interception_entry(type_id) else {
            return InterceptionState::Unmodified;
        };
        InterceptionState::Intercepted(Arc::new(DispatchTable::derive(
            type_id,
            entry,
            &self.registry,
        )))
    }

    fn method_value(&self, table: &DispatchTable, method: &str) -> Option<Value> {
        match table.method_override(method)? {
            MethodOverride::Literal(value) => Some(value.clone()),
            MethodOverride::Template { type_id, template } => {
                let built = self.store.resolve_active_template(type_id, template);
                if built.is_none() {
                    debug!("Template {type_id}/{template} unavailable, calling original {method}()");
                }
                built.map(Value::Object)
            }
        }
    }
}

impl Reinterception for Interceptor {
    fn reload_type(&self, type_id: &str) {
        self.reload(type_id);
    }
}
