//! Core library for mockwire: live behavior overrides for running programs.
//!
//! A plan describes substitute field values and method return values for
//! selected types. While a plan is active, types that route their members
//! through the [`Interceptor`] report the mocked data, and updates to the
//! plan are pushed into instances that already exist.
//!
//! # Components
//!
//! - [`PlanStore`]: durable plans, single active plan, unique template names
//! - [`Interceptor`]: per-type dispatch derived from the active plan
//! - [`InstanceTracker`]: weak registry of live instances
//! - [`TemplateResolver`]: cycle-safe construction from named templates
//! - [`TypeRegistry`]: declared shapes and constructors of mockable types
//!
//! [`EngineBuilder`] wires one of each together.
//!
//! # Display Architecture
//!
//! Domain models implement [`std::fmt::Display`] as markdown, and the
//! [`display`] module adds wrappers for collections and operation results.
//! The CLI renders that markdown in the terminal.
//!
//! # Quick Start
//!
//! ```rust
//! use mockwire_core::{models::PlanKey, EngineBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let dir = tempfile::tempdir()?;
//! let engine = EngineBuilder::new()
//!     .with_storage_dir(Some(dir.path()))
//!     .build()?;
//!
//! let key = PlanKey::new("shop", "happy-path");
//! let plan = engine.store().create_plan(&key)?;
//! println!("Created plan: {}", plan);
//!
//! engine.store().activate_plan(&key);
//! assert_eq!(engine.store().get_active_plan().map(|p| p.key()), Some(key));
//! # Ok(())
//! # }
//! ```

pub mod coerce;
pub mod display;
pub mod engine;
pub mod error;
pub mod intercept;
pub mod models;
pub mod object;
pub mod params;
pub mod registry;
pub mod resolver;
pub mod storage;
pub mod store;
pub mod tracker;
pub mod value;

// Re-export commonly used types
pub use coerce::{coerce, coerce_return};
pub use display::{
    CreateResult, DeleteResult, LocalDateTime, MockTypes, OperationStatus, PlanSummaries,
    UpdateResult,
};
pub use engine::{Engine, EngineBuilder};
pub use error::{FieldError, MockError, Result};
pub use intercept::{DispatchTable, InterceptionState, Interceptor, MethodOverride};
pub use models::{MockField, MockMethod, MockType, Plan, PlanKey, PlanSummary};
pub use object::{field_value, read_field, share, type_of, MockObject, ObjectRef};
pub use params::{SetField, SetMethod, TypeTarget};
pub use registry::{FieldDescriptor, MethodDescriptor, TypeDescriptor, TypeRegistry};
pub use resolver::TemplateResolver;
pub use storage::DocumentStore;
pub use store::{PlanStore, Reinterception};
pub use tracker::InstanceTracker;
pub use value::{FromValue, Value, ValueType};
