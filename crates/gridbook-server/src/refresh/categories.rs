//! CarAPI attribute categories cached in the reference blob

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One upstream attribute and the key it is stored under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Value of the `attribute` query parameter upstream
    pub attribute: &'static str,
    /// Key in the stored JSON document
    pub key: &'static str,
}

/// Every category fetched on a refresh, in request order
pub const CATEGORIES: [Category; 7] = [
    Category {
        attribute: "bodies.type",
        key: "body_types",
    },
    Category {
        attribute: "engines.cylinders",
        key: "cylinders",
    },
    Category {
        attribute: "engines.drive_type",
        key: "drive_types",
    },
    Category {
        attribute: "engines.engine_type",
        key: "engine_types",
    },
    Category {
        attribute: "engines.fuel_type",
        key: "fuel_types",
    },
    Category {
        attribute: "engines.transmission",
        key: "transmission",
    },
    Category {
        attribute: "engines.valves",
        key: "valves",
    },
];

/// Typed view of the stored reference document
///
/// Missing keys (no refresh has succeeded yet) read as empty lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceInfo {
    pub body_types: Vec<Value>,
    pub cylinders: Vec<Value>,
    pub drive_types: Vec<Value>,
    pub engine_types: Vec<Value>,
    pub fuel_types: Vec<Value>,
    pub transmission: Vec<Value>,
    pub valves: Vec<Value>,
}

impl ReferenceInfo {
    /// Read a stored document, tolerating absent or non-list entries
    pub fn from_document(document: &Value) -> Self {
        let list = |key: &str| -> Vec<Value> {
            document
                .get(key)
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default()
        };

        Self {
            body_types: list("body_types"),
            cylinders: list("cylinders"),
            drive_types: list("drive_types"),
            engine_types: list("engine_types"),
            fuel_types: list("fuel_types"),
            transmission: list("transmission"),
            valves: list("valves"),
        }
    }
}
