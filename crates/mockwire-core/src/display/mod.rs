//! Markdown rendering for plans and operation outcomes.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]).
//! Collections and operation outcomes get small wrapper types so the CLI can
//! print any result through the same terminal renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Plan, MockType │───▶│ Wrapper types   │───▶│ Markdown output │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: `PlanSummaries`, `MockTypes`
//! - [`results`]: `CreateResult`, `UpdateResult`, `DeleteResult`
//! - [`status`]: `OperationStatus`
//! - [`datetime`]: `LocalDateTime`
//!
//! # Examples
//!
//! ```rust
//! use jiff::Timestamp;
//! use mockwire_core::{
//!     display::{OperationStatus, UpdateResult},
//!     models::{MockField, MockType},
//!     ValueType,
//! };
//!
//! let mock_type = MockType::new("app.Cart")
//!     .with_field(MockField::new("total", ValueType::I64).with_value("42"));
//! let update = UpdateResult::with_changes(mock_type, vec!["total = 42".to_string()]);
//! assert!(update.to_string().contains("Changes made:"));
//!
//! let status = OperationStatus::failure("Plan shop::missing not found".to_string());
//! assert!(status.to_string().starts_with("Error:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{MockTypes, PlanSummaries};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
