//! The inventory record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single inventory record.
///
/// The identifier is assigned by the caller and is not checked for
/// uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    /// Caller-assigned identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
}

impl Item {
    /// Create a new item.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.id, self.name, self.description)
    }
}

/// The items every freshly started service holds, in order.
pub fn seed_items() -> Vec<Item> {
    vec![
        Item::new("001", "First Item", "A cool item"),
        Item::new("002", "Second Item", "An even cooler item"),
        Item::new("003", "Third Item", "A crap item"),
    ]
}
