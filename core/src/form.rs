//! Draft state behind create/edit dialogs.
//!
//! # Design
//! `set_field` takes a field name and a JSON value, the way a generic form
//! binds inputs. It replaces exactly that one key: the draft is serialized,
//! the key swapped, and the result deserialized back. Unknown keys and values
//! of the wrong type are rejected and leave the draft untouched.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::entities::route_station::{find_collision, RouteStation, RouteStationDraft, SequenceCollision};
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub struct FormState<D> {
    draft: D,
    /// Identifier of the record being edited; `None` for a new record.
    editing: Option<String>,
}

impl<D: Default> Default for FormState<D> {
    fn default() -> Self {
        Self {
            draft: D::default(),
            editing: None,
        }
    }
}

impl<D> FormState<D> {
    pub fn for_edit(id: impl Into<String>, draft: D) -> Self {
        Self {
            draft,
            editing: Some(id.into()),
        }
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    /// Typed mutation for callers that know the draft type.
    pub fn edit(&mut self, f: impl FnOnce(&mut D)) {
        f(&mut self.draft);
    }
}

impl<D: Default> FormState<D> {
    /// Back to an empty create form.
    pub fn reset(&mut self) {
        self.draft = D::default();
        self.editing = None;
    }
}

impl<D: Default + PartialEq> FormState<D> {
    pub fn is_blank(&self) -> bool {
        self.draft == D::default()
    }
}

impl<D: Validate> FormState<D> {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.draft.validate()
    }
}

impl<D: Serialize + DeserializeOwned> FormState<D> {
    /// Replace a single field of the draft.
    pub fn set_field(&mut self, key: &str, value: impl Into<Value>) -> Result<(), ApiError> {
        let mut map = match serde_json::to_value(&self.draft) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(ApiError::Serialization(
                    "draft does not serialize to an object".to_string(),
                ))
            }
            Err(e) => return Err(ApiError::Serialization(e.to_string())),
        };

        match map.get_mut(key) {
            Some(slot) => *slot = value.into(),
            None => {
                return Err(ApiError::Serialization(format!("draft has no field `{key}`")));
            }
        }

        self.draft = serde_json::from_value(Value::Object(map))
            .map_err(|e| ApiError::Deserialization(format!("field `{key}`: {e}")))?;
        Ok(())
    }
}

impl FormState<RouteStationDraft> {
    /// Non-blocking warning when the chosen sequence is already taken by
    /// another station on the route.
    pub fn sequence_warning(&self, existing: &[RouteStation]) -> Option<SequenceCollision> {
        find_collision(existing, self.draft.sequence, self.editing())
    }
}
