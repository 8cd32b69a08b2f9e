//! Caveat references: named predicates with pre-bound context.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A reference to a named caveat, with zero or more pre-bound arguments.
///
/// A caveat is a side-effect-free boolean predicate declared in the
/// schema. A relationship that carries a caveat stores the caveat's name
/// together with the context values bound when the relationship was
/// written; the remaining free variables are bound at evaluation time by
/// the request context.
///
/// # Equality Semantics
///
/// Two references are equal iff both the name and the bound context are
/// structurally equal. The context map preserves insertion order, and
/// that order participates in equality on the wire, so references with
/// the same name but different bindings are distinct:
///
/// ```
/// use arbor_types::CaveatRef;
/// use serde_json::{json, Map};
///
/// let bare = CaveatRef::new("ip_allowlist");
/// let mut context = Map::new();
/// context.insert("cidr".to_string(), json!("10.0.0.0/8"));
/// let bound = CaveatRef::with_context("ip_allowlist", context);
///
/// assert_ne!(bare, bound);
/// assert_eq!(bare, CaveatRef::new("ip_allowlist"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaveatRef {
    /// Name of the caveat as declared in the schema.
    pub name: String,

    /// Context values bound when the reference was written.
    ///
    /// Values are JSON-like scalars or objects.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub context: Map<String, Value>,
}

impl CaveatRef {
    /// Creates a reference to a caveat with no pre-bound context.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            context: Map::new(),
        }
    }

    /// Creates a reference with pre-bound context values.
    #[must_use]
    pub fn with_context(name: impl Into<String>, context: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            context,
        }
    }

    /// Returns `true` if the reference carries no bound context.
    #[must_use]
    pub fn context_is_empty(&self) -> bool {
        self.context.is_empty()
    }
}

impl std::fmt::Display for CaveatRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.context.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}({})", self.name, Value::Object(self.context.clone()))
        }
    }
}
