//! Variable model
//!
//! A named, typed value reachable from a frame or from another variable's
//! children. Variables are backend-owned views into the snapshot's memory;
//! nothing in this workspace mutates them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value-kind tag attached to every resolved variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Scalar,
    Pointer,
    Struct,
    Array,
    Slice,
    Map,
    String,
    Channel,
    Function,
    Interface,
    Other,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Scalar => "scalar",
            ValueKind::Pointer => "pointer",
            ValueKind::Struct => "struct",
            ValueKind::Array => "array",
            ValueKind::Slice => "slice",
            ValueKind::Map => "map",
            ValueKind::String => "string",
            ValueKind::Channel => "channel",
            ValueKind::Function => "function",
            ValueKind::Interface => "interface",
            ValueKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// A named value reachable from a frame or from another variable.
///
/// The child sequence may be arbitrarily deep or wide; consumers are expected
/// to bound their own traversal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,

    /// Declared type's display string
    pub type_name: String,

    pub kind: ValueKind,

    /// Resolved value in its default textual form, if the backend read one
    #[serde(default)]
    pub value: Option<String>,

    /// Fields or elements, in backend order
    #[serde(default)]
    pub children: Vec<Variable>,
}

impl Variable {
    /// Create a childless variable with a resolved value
    pub fn leaf(name: &str, type_name: &str, kind: ValueKind, value: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            kind,
            value: Some(value.to_string()),
            children: Vec::new(),
        }
    }

    /// Create a variable whose value is carried by its children
    pub fn parent(name: &str, type_name: &str, kind: ValueKind, children: Vec<Variable>) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            kind,
            value: None,
            children,
        }
    }
}
