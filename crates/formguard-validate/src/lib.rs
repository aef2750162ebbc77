//! # formguard validation
//!
//! Rule-based form validation. A [`FormValidator`] binds ordered rule chains
//! to named fields, checks the values a host supplies through a
//! [`FieldAccessor`], keeps every failure in its error state and asks an
//! [`ErrorPresenter`] to show the first message of each failing field.
//!
//! ## Example
//!
//! ```rust
//! use formguard_validate::prelude::*;
//!
//! let values = FormValues::new()
//!     .with("email", "someone@example")
//!     .with("age", "17");
//!
//! let mut form = FormValidator::new(values, RecordingPresenter::new());
//! form.add_rule(
//!     "email",
//!     RuleSet::new()
//!         .rule(RequiredRule::new().with_label("Email"))
//!         .rule(EmailRule),
//! );
//! form.add_rule(
//!     "age",
//!     RuleSet::new()
//!         .rule(NumberRule::new().with_label("Age"))
//!         .rule(RangeRule::new(18.0, 65.0)),
//! );
//!
//! assert!(!form.validate());
//! assert_eq!(form.errors().messages("email"), vec!["Invalid email format"]);
//! assert_eq!(form.presenter().message("age"), Some("Must be between 18 and 65"));
//! ```
//!
//! ## Validation Rules
//!
//! - `required` - non-blank value
//! - `min_length` / `max_length` - character counts
//! - `email`, `url`, `phone` - format checks
//! - `number`, `range` - numeric checks
//! - `pattern` - regex with a caller-supplied message
//! - `matches` - equal to a fixed value or another field
//! - `custom` - any predicate returning an optional message
//! - `username`, `password` - composites that report every failure
//!
//! Rules can also be declared as data with a [`FormSchema`].

mod engine;
mod error;
mod host;
mod registry;
mod rules;
mod schema;
mod traits;
pub mod validators;


pub use engine::{FieldOutcome, FormValidator};
pub use error::{FormErrors, RuleError, SchemaError};
pub use host::{
    AsyncFieldAccessor, ErrorPresenter, FieldAccessor, FormValues, NoopPresenter, PresenterEvent,
    RecordingPresenter,
};
pub use registry::{RuleRegistry, RuleSet};
pub use rules::*;
pub use schema::{FormSchema, RuleSpec};
pub use traits::ValidationRule;

/// Re-exported so hosts can implement [`AsyncFieldAccessor`] without
/// depending on `async-trait` directly.
pub use async_trait::async_trait;

/// Prelude module for form validation
pub mod prelude {
    pub use crate::engine::{FieldOutcome, FormValidator};
    pub use crate::error::{FormErrors, RuleError, SchemaError};
    pub use crate::host::{
        AsyncFieldAccessor, ErrorPresenter, FieldAccessor, FormValues, NoopPresenter,
        RecordingPresenter,
    };
    pub use crate::registry::{RuleRegistry, RuleSet};
    pub use crate::rules::*;
    pub use crate::schema::{FormSchema, RuleSpec};
    pub use crate::traits::ValidationRule;
    pub use async_trait::async_trait;
}
