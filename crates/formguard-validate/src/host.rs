//! Capabilities the engine needs from its host.
//!
//! The engine never touches a rendering surface. It reads field values
//! through a [`FieldAccessor`] (or [`AsyncFieldAccessor`]) and asks an
//! [`ErrorPresenter`] to show or clear a field's error.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Reads the current value of a named field.
pub trait FieldAccessor {
    /// Current value of `field`, or `None` when the form has no such field.
    fn read(&self, field: &str) -> Option<String>;
}

impl<T: FieldAccessor + ?Sized> FieldAccessor for &T {
    fn read(&self, field: &str) -> Option<String> {
        (**self).read(field)
    }
}

impl FieldAccessor for HashMap<String, String> {
    fn read(&self, field: &str) -> Option<String> {
        self.get(field).cloned()
    }
}

impl FieldAccessor for BTreeMap<String, String> {
    fn read(&self, field: &str) -> Option<String> {
        self.get(field).cloned()
    }
}

/// Field reads that have to wait on the host.
///
/// ## Example
///
/// ```rust,ignore
/// use formguard_validate::prelude::*;
///
/// struct RemoteForm { client: FormClient }
///
/// #[async_trait]
/// impl AsyncFieldAccessor for RemoteForm {
///     async fn read_async(&self, field: &str) -> Option<String> {
///         self.client.value_of(field).await.ok()
///     }
/// }
/// ```
#[async_trait]
pub trait AsyncFieldAccessor: Send + Sync {
    /// Current value of `field`, or `None` when the form has no such field.
    async fn read_async(&self, field: &str) -> Option<String>;
}

/// Receives presentation requests from the engine.
pub trait ErrorPresenter {
    /// Mark the field invalid and surface `message`.
    fn show(&mut self, field: &str, message: &str);

    /// Remove any invalid marking from the field.
    fn clear(&mut self, field: &str);
}

impl<P: ErrorPresenter + ?Sized> ErrorPresenter for &mut P {
    fn show(&mut self, field: &str, message: &str) {
        (**self).show(field, message)
    }

    fn clear(&mut self, field: &str) {
        (**self).clear(field)
    }
}

/// In-memory form values, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues {
    values: IndexMap<String, String>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a field's value, adding the field if needed.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    /// Remove a field from the form.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.values.shift_remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FormValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl FieldAccessor for FormValues {
    fn read(&self, field: &str) -> Option<String> {
        self.values.get(field).cloned()
    }
}

#[async_trait]
impl AsyncFieldAccessor for FormValues {
    async fn read_async(&self, field: &str) -> Option<String> {
        self.values.get(field).cloned()
    }
}

/// Presenter that ignores every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPresenter;

impl ErrorPresenter for NoopPresenter {
    fn show(&mut self, _field: &str, _message: &str) {}

    fn clear(&mut self, _field: &str) {}
}

/// A presentation request, as seen by [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PresenterEvent {
    Show { field: String, message: String },
    Clear { field: String },
}

/// Presenter that keeps the visible state of every field.
///
/// Useful for headless hosts and tests: it tracks which fields are
/// currently marked invalid, with the message shown, and logs every
/// request in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    visible: IndexMap<String, String>,
    events: Vec<PresenterEvent>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Message currently shown on `field`.
    pub fn message(&self, field: &str) -> Option<&str> {
        self.visible.get(field).map(String::as_str)
    }

    pub fn is_invalid(&self, field: &str) -> bool {
        self.visible.contains_key(field)
    }

    /// Fields currently marked invalid, with their message.
    pub fn visible(&self) -> &IndexMap<String, String> {
        &self.visible
    }

    /// Every request received, oldest first.
    pub fn events(&self) -> &[PresenterEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<PresenterEvent> {
        std::mem::take(&mut self.events)
    }
}

impl ErrorPresenter for RecordingPresenter {
    fn show(&mut self, field: &str, message: &str) {
        self.visible.insert(field.to_string(), message.to_string());
        self.events.push(PresenterEvent::Show {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    fn clear(&mut self, field: &str) {
        self.visible.shift_remove(field);
        self.events.push(PresenterEvent::Clear {
            field: field.to_string(),
        });
    }
}
