//! Data models for plans and their override entries.
//!
//! This module contains the persisted domain models. Display
//! implementations for these models are located in
//! [`crate::display::models`] to keep data and presentation apart.
//!
//! # Structure
//!
//! ```text
//! Plan (project::name, active)
//!  └── MockType (type_id, template_name?)
//!       ├── MockField  (name, field_type, value? | template?)
//!       └── MockMethod (name, return_type, return_value? | return_template?, active)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use jiff::Timestamp;
//! use mockwire_core::{
//!     models::{MockField, MockMethod, MockType, Plan, PlanKey},
//!     ValueType,
//! };
//!
//! let mut plan = Plan::new(&PlanKey::new("shop", "happy-path"), Timestamp::now());
//! plan.upsert_mock_type(
//!     MockType::new("app.Cart")
//!         .with_field(MockField::new("total", ValueType::I64).with_value("42"))
//!         .with_method(MockMethod::new("currency", ValueType::Text).returning("EUR")),
//! );
//! assert_eq!(plan.document, "shop/happy-path.json");
//! assert!(plan.interception_entry("app.Cart").is_some());
//! ```

pub mod key;
mod literal;
pub mod mock_type;
pub mod plan;
pub mod summary;


pub use key::PlanKey;
pub use mock_type::{MockField, MockMethod, MockType};
pub use plan::Plan;
pub use summary::PlanSummary;
