// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity to command parameters.
//!
//! [`compile_outbound`] turns the field table of an [`Entity`] into an
//! [`OutboundConverter`]: one `(parameter name, getter)` slot per field, in
//! declaration order, with names resolved and prefixed once. Converting an
//! instance is then a single pass over the slots.
//!
//! ```text
//! Person { name: "Ann", age: 30 }
//!     │  OutboundConverter<Person>
//!     ▼
//! [ ("@name", Text("Ann")), ("@age", I32(30)) ]
//! ```

use std::slice;

use tracing::debug;

use crate::{
    dialect::Dialect,
    error::Result,
    mapping::{Entity, Getter},
    naming,
    value::Value
};

/// Direction of a command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParameterDirection {
    /// Value sent to the database.
    #[default]
    Input,

    /// Reserved slot receiving a stored procedure's return value.
    ReturnValue
}

/// A named value destined for a command.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Parameter name including the dialect marker.
    pub name:      String,
    /// Value; [`Value::Null`] stands for database null.
    pub value:     Value,
    /// Input or return value.
    pub direction: ParameterDirection
}

impl Parameter {
    /// Create an input parameter.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name:      name.into(),
            value:     value.into(),
            direction: ParameterDirection::Input
        }
    }

    /// Create the reserved return-value slot.
    pub fn return_value(name: impl Into<String>) -> Self {
        Self {
            name:      name.into(),
            value:     Value::Null,
            direction: ParameterDirection::ReturnValue
        }
    }

    /// Check if this is an input parameter.
    #[must_use]
    pub fn is_input(&self) -> bool {
        self.direction == ParameterDirection::Input
    }
}

/// Ordered parameters produced from one entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterRecord {
    parameters: Vec<Parameter>
}

impl ParameterRecord {
    /// Create an empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            parameters: Vec::new()
        }
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Check if the record is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Append a parameter.
    pub fn push(&mut self, parameter: Parameter) {
        self.parameters.push(parameter);
    }

    /// Find a parameter by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Iterate in order.
    pub fn iter(&self) -> slice::Iter<'_, Parameter> {
        self.parameters.iter()
    }

    /// Borrow as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Parameter] {
        &self.parameters
    }

    /// `(name, value)` pairs in order.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&str, &Value)> {
        self.parameters
            .iter()
            .map(|p| (p.name.as_str(), &p.value))
            .collect()
    }

    /// Take the parameters out.
    #[must_use]
    pub fn into_vec(self) -> Vec<Parameter> {
        self.parameters
    }
}

impl From<Vec<Parameter>> for ParameterRecord {
    fn from(parameters: Vec<Parameter>) -> Self {
        Self {
            parameters
        }
    }
}

impl FromIterator<Parameter> for ParameterRecord {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        Self {
            parameters: iter.into_iter().collect()
        }
    }
}

impl<'a> IntoIterator for &'a ParameterRecord {
    type Item = &'a Parameter;
    type IntoIter = slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.iter()
    }
}

impl IntoIterator for ParameterRecord {
    type Item = Parameter;
    type IntoIter = std::vec::IntoIter<Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.parameters.into_iter()
    }
}

struct Slot<T> {
    name: String,
    get:  Getter<T>
}

/// Compiled `&T -> ParameterRecord` converter.
///
/// Immutable once built; `Send + Sync` for every `T` since it only holds
/// names and function pointers.
pub struct OutboundConverter<T> {
    slots: Vec<Slot<T>>
}

impl<T> OutboundConverter<T> {
    /// Convert one instance.
    #[must_use]
    pub fn convert(&self, entity: &T) -> ParameterRecord {
        self.slots
            .iter()
            .map(|slot| Parameter::new(slot.name.clone(), (slot.get)(entity)))
            .collect()
    }

    /// Parameter names in output order.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.name.as_str())
    }

    /// Number of parameters produced per call.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the entity has no mappable fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T> std::fmt::Debug for OutboundConverter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutboundConverter")
            .field("entity", &std::any::type_name::<T>())
            .field("parameters", &self.parameter_names().collect::<Vec<_>>())
            .finish()
    }
}

/// Build the outbound converter for `T`.
///
/// # Errors
///
/// [`Error::MappingConfiguration`](crate::Error::MappingConfiguration) for a
/// blank override or two fields resolving to the same name.
pub fn compile_outbound<T: Entity>(dialect: Dialect) -> Result<OutboundConverter<T>> {
    let fields = T::field_mappings();
    let resolved = naming::resolve_all(&fields)?;

    let slots: Vec<Slot<T>> = resolved
        .into_iter()
        .enumerate()
        .map(|(i, (field, name))| Slot {
            name: dialect.parameter_name(i + 1, name),
            get:  field.getter()
        })
        .collect();

    debug!(
        entity = std::any::type_name::<T>(),
        parameters = slots.len(),
        ?dialect,
        "compiled outbound converter"
    );

    Ok(OutboundConverter {
        slots
    })
}
