//! Checklist data model.
//!
//! A [`Checklist`] is one of six variants, each an ordered sequence of
//! groups holding leaf items. The variants differ only in their
//! provider-facing field names (see [`wire`]) and in which optional
//! metadata their items carry; the structural core is shared so the
//! validator and state store can operate on all of them uniformly.
//!
//! Groups are stored behind [`Arc`] so that a toggle produces a new
//! checklist value that shares every untouched group with its
//! predecessor.

pub mod wire;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// The six checklist shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    Trip,
    Pet,
    Moving,
    Event,
    NewBeginnings,
    ProjectGoal,
}

impl Variant {
    /// All variants, in display order.
    pub const ALL: [Variant; 6] = [
        Variant::Trip,
        Variant::Pet,
        Variant::Moving,
        Variant::Event,
        Variant::NewBeginnings,
        Variant::ProjectGoal,
    ];

    /// What this variant calls its grouping node ("category", "section",
    /// "week", or "phase"). Used in prompts and human-facing output.
    pub fn group_role(&self) -> &'static str {
        match self {
            Self::Trip => "category",
            Self::Pet | Self::Event | Self::NewBeginnings => "section",
            Self::Moving => "week",
            Self::ProjectGoal => "phase",
        }
    }

    /// The provider-facing field names for this variant.
    pub fn field_names(&self) -> &'static wire::FieldNames {
        wire::field_names(*self)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Trip => "trip",
            Self::Pet => "pet",
            Self::Moving => "moving",
            Self::Event => "event",
            Self::NewBeginnings => "new_beginnings",
            Self::ProjectGoal => "project_goal",
        };
        f.write_str(s)
    }
}

impl FromStr for Variant {
    type Err = VariantParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trip" => Ok(Self::Trip),
            "pet" => Ok(Self::Pet),
            "moving" => Ok(Self::Moving),
            "event" => Ok(Self::Event),
            "new_beginnings" => Ok(Self::NewBeginnings),
            "project_goal" => Ok(Self::ProjectGoal),
            other => Err(VariantParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Variant`] string.
#[derive(Debug, Clone)]
pub struct VariantParseError(pub String);

impl fmt::Display for VariantParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid checklist variant: {:?}", self.0)
    }
}

impl std::error::Error for VariantParseError {}

// ---------------------------------------------------------------------------

/// Importance/priority of an item, where the variant carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Importance {
    High,
    Medium,
    Low,
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        };
        f.write_str(s)
    }
}

impl FromStr for Importance {
    type Err = ImportanceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(Self::High),
            "Medium" => Ok(Self::Medium),
            "Low" => Ok(Self::Low),
            other => Err(ImportanceParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Importance`] string.
#[derive(Debug, Clone)]
pub struct ImportanceParseError(pub String);

impl fmt::Display for ImportanceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid importance: {:?} (expected High, Medium, or Low)", self.0)
    }
}

impl std::error::Error for ImportanceParseError {}

// ---------------------------------------------------------------------------
// Structural core
// ---------------------------------------------------------------------------

/// A leaf checklist entry.
///
/// `id` is unique within its group (not globally). `done` is the only
/// field that changes after generation, and only through
/// [`Checklist::with_toggled`]. The metadata fields are optional; which
/// of them a variant actually populates is governed by its
/// [`wire::FieldNames`] table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<Importance>,
}

impl Item {
    /// A bare item with no metadata, completion unset.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            done: false,
            notes: None,
            quantity: None,
            timeline: None,
            deadline: None,
            importance: None,
        }
    }
}

/// A grouping node: a key (the variant's category/section/week/phase
/// label) and its items. Keys are unique within a checklist and are the
/// addressing handle for [`Checklist::with_toggled`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub key: String,
    pub items: Vec<Item>,
}

/// An immutable checklist value.
///
/// Never mutated in place: [`Checklist::with_toggled`] returns a new
/// value sharing every unaffected group by `Arc` identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub variant: Variant,
    pub groups: Vec<Arc<Group>>,
}

impl Checklist {
    pub fn new(variant: Variant, groups: Vec<Group>) -> Self {
        Self {
            variant,
            groups: groups.into_iter().map(Arc::new).collect(),
        }
    }

    /// Look up an item by `(group key, item id)`.
    pub fn item(&self, group_key: &str, item_id: &str) -> Option<&Item> {
        self.groups
            .iter()
            .find(|g| g.key == group_key)?
            .items
            .iter()
            .find(|i| i.id == item_id)
    }

    /// Total number of items across all groups.
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }

    /// Number of items with the completion flag set.
    pub fn done_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| g.items.iter())
            .filter(|i| i.done)
            .count()
    }

    /// Return a new checklist with the addressed item's completion flag
    /// negated and everything else shared with `self`.
    ///
    /// A `(group_key, item_id)` that matches nothing yields a value equal
    /// to `self` (same `Arc`s throughout); toggling something that isn't
    /// there does nothing.
    pub fn with_toggled(&self, group_key: &str, item_id: &str) -> Checklist {
        let groups = self
            .groups
            .iter()
            .map(|group| {
                if group.key != group_key || !group.items.iter().any(|i| i.id == item_id) {
                    return Arc::clone(group);
                }
                let items = group
                    .items
                    .iter()
                    .map(|item| {
                        let mut item = item.clone();
                        if item.id == item_id {
                            item.done = !item.done;
                        }
                        item
                    })
                    .collect();
                Arc::new(Group {
                    key: group.key.clone(),
                    items,
                })
            })
            .collect();
        Checklist {
            variant: self.variant,
            groups,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
