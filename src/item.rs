//! Records flowing through allocation and resolution.

use serde::{Deserialize, Serialize};

/// One entry of a weighted item list, e.g. a single item in a case.
///
/// `chance` is in percentage points: `1.0` means 1% of the ticket space.
/// The optional attributes are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedItem {
    pub name: String,
    pub chance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl WeightedItem {
    pub fn new(name: impl Into<String>, chance: f64) -> Self {
        Self {
            name: name.into(),
            chance,
            value: None,
            rarity: None,
            color: None,
            id: None,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = Some(rarity.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Inclusive ticket interval owned by one item.
///
/// An item with zero tickets gets `start_ticket == end_ticket + 1`, which
/// is why the bounds are signed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRange {
    pub item: String,
    pub start_ticket: i64,
    pub end_ticket: i64,
    pub chance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl TicketRange {
    /// Number of tickets in the range (zero for an empty range).
    pub fn tickets(&self) -> u64 {
        (self.end_ticket - self.start_ticket + 1).max(0) as u64
    }

    pub fn is_empty(&self) -> bool {
        self.start_ticket > self.end_ticket
    }

    #[inline]
    pub fn contains(&self, ticket: i64) -> bool {
        self.start_ticket <= ticket && ticket <= self.end_ticket
    }
}

/// The winning range together with its position in the input list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawResult {
    pub index: usize,
    #[serde(flatten)]
    pub range: TicketRange,
}
