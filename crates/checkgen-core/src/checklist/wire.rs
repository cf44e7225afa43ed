//! Provider-facing JSON field names, per variant.
//!
//! The generation provider emits (and downstream consumers expect) a
//! different vocabulary for each checklist variant: a trip checklist
//! groups by `name` and marks items `packed`, a pet starter kit groups
//! by `sectionName` and marks items `acquired`, and so on. This module
//! is the single place that vocabulary lives; the validator reads
//! through it and [`to_wire_value`] writes through it.

use serde_json::{Map, Value};

use super::{Checklist, Variant};

/// Field-name table for one variant's wire shape.
///
/// `notes`, `quantity`, `timeline`, `deadline`, and `importance` are the
/// shared metadata slots; an entry of `None` means the variant does not
/// carry that slot at all. `ProjectGoal` maps its `priority`,
/// `suggestedTimelineOrEffort`, and `details` fields onto the
/// importance, timeline, and notes slots respectively.
#[derive(Debug)]
pub struct FieldNames {
    /// Field holding the group's key (e.g. `"sectionName"`).
    pub group_key: &'static str,
    /// Field holding the group's item array (`"items"` or `"tasks"`).
    pub items: &'static str,
    /// Field holding the item's display name.
    pub item_name: &'static str,
    /// Field holding the item's completion flag.
    pub done: &'static str,
    pub notes: Option<&'static str>,
    pub quantity: Option<&'static str>,
    pub timeline: Option<&'static str>,
    pub deadline: Option<&'static str>,
    pub importance: Option<&'static str>,
}

const TRIP: FieldNames = FieldNames {
    group_key: "name",
    items: "items",
    item_name: "itemName",
    done: "packed",
    notes: None,
    quantity: Some("quantitySuggestion"),
    timeline: None,
    deadline: None,
    importance: None,
};

const PET: FieldNames = FieldNames {
    group_key: "sectionName",
    items: "items",
    item_name: "itemName",
    done: "acquired",
    notes: Some("notes"),
    quantity: Some("quantitySuggestion"),
    timeline: None,
    deadline: None,
    importance: None,
};

const MOVING: FieldNames = FieldNames {
    group_key: "week",
    items: "tasks",
    item_name: "taskName",
    done: "completed",
    notes: Some("notes"),
    quantity: None,
    timeline: None,
    deadline: Some("deadline"),
    importance: None,
};

const EVENT: FieldNames = FieldNames {
    group_key: "sectionName",
    items: "tasks",
    item_name: "taskName",
    done: "completed",
    notes: Some("notes"),
    quantity: None,
    timeline: Some("suggestedTimeline"),
    deadline: None,
    importance: None,
};

const NEW_BEGINNINGS: FieldNames = FieldNames {
    group_key: "sectionName",
    items: "tasks",
    item_name: "taskName",
    done: "completed",
    notes: Some("notes"),
    quantity: None,
    timeline: Some("suggestedTimeline"),
    deadline: None,
    importance: Some("importance"),
};

const PROJECT_GOAL: FieldNames = FieldNames {
    group_key: "phaseName",
    items: "tasks",
    item_name: "taskName",
    done: "completed",
    notes: Some("details"),
    quantity: None,
    timeline: Some("suggestedTimelineOrEffort"),
    deadline: None,
    importance: Some("priority"),
};

/// The field table for a variant.
pub fn field_names(variant: Variant) -> &'static FieldNames {
    match variant {
        Variant::Trip => &TRIP,
        Variant::Pet => &PET,
        Variant::Moving => &MOVING,
        Variant::Event => &EVENT,
        Variant::NewBeginnings => &NEW_BEGINNINGS,
        Variant::ProjectGoal => &PROJECT_GOAL,
    }
}

/// Serialize a checklist into its variant's wire shape: an array of
/// group objects using the provider-facing field names.
pub fn to_wire_value(checklist: &Checklist) -> Value {
    let fields = checklist.variant.field_names();

    let groups = checklist
        .groups
        .iter()
        .map(|group| {
            let items = group
                .items
                .iter()
                .map(|item| {
                    let mut obj = Map::new();
                    obj.insert("id".to_string(), Value::String(item.id.clone()));
                    obj.insert(
                        fields.item_name.to_string(),
                        Value::String(item.name.clone()),
                    );
                    obj.insert(fields.done.to_string(), Value::Bool(item.done));
                    if let (Some(key), Some(notes)) = (fields.notes, &item.notes) {
                        obj.insert(key.to_string(), Value::String(notes.clone()));
                    }
                    if let (Some(key), Some(quantity)) = (fields.quantity, &item.quantity) {
                        obj.insert(key.to_string(), Value::String(quantity.clone()));
                    }
                    if let (Some(key), Some(timeline)) = (fields.timeline, &item.timeline) {
                        obj.insert(key.to_string(), Value::String(timeline.clone()));
                    }
                    if let (Some(key), Some(deadline)) = (fields.deadline, &item.deadline) {
                        obj.insert(key.to_string(), Value::String(deadline.clone()));
                    }
                    if let (Some(key), Some(importance)) = (fields.importance, item.importance) {
                        obj.insert(key.to_string(), Value::String(importance.to_string()));
                    }
                    Value::Object(obj)
                })
                .collect();

            let mut obj = Map::new();
            obj.insert(
                fields.group_key.to_string(),
                Value::String(group.key.clone()),
            );
            obj.insert(fields.items.to_string(), Value::Array(items));
            Value::Object(obj)
        })
        .collect();

    Value::Array(groups)
}
