//! Prompt construction: turn a user's request into a generation prompt.
//!
//! Each variant gets a schema reference describing the exact JSON array
//! the validator will accept, so the model's output format is pinned
//! from both sides: the request constrains generation to a single JSON
//! document, and validation rejects anything that drifts.

use crate::checklist::Variant;

/// Shared output-contract preamble appended to every prompt.
const OUTPUT_CONTRACT: &str = "\
Respond with a single JSON document and NOTHING else: no prose before or \
after it, no markdown fencing. The document must be an array in exactly \
the shape shown above. Every id must be unique within its group, and \
every completion flag must be false.";

const TRIP_SCHEMA: &str = r#"## Output Schema

[
  {
    "name": "Clothing",
    "items": [
      {
        "id": "1",
        "itemName": "Swimsuit",
        "packed": false,
        "quantitySuggestion": "2"
      }
    ]
  }
]

"quantitySuggestion" is optional. "packed" is always false."#;

const PET_SCHEMA: &str = r#"## Output Schema

[
  {
    "sectionName": "Feeding",
    "items": [
      {
        "id": "1",
        "itemName": "Food bowl",
        "acquired": false,
        "quantitySuggestion": "2",
        "notes": "Stainless steel is easiest to clean"
      }
    ]
  }
]

"quantitySuggestion" and "notes" are optional. "acquired" is always false."#;

const MOVING_SCHEMA: &str = r#"## Output Schema

[
  {
    "week": "8 Weeks Before",
    "tasks": [
      {
        "id": "1",
        "taskName": "Book a moving company",
        "completed": false,
        "notes": "Get at least three quotes",
        "deadline": "End of the week"
      }
    ]
  }
]

"notes" and "deadline" are optional. "completed" is always false."#;

const EVENT_SCHEMA: &str = r#"## Output Schema

[
  {
    "sectionName": "Venue & Logistics",
    "tasks": [
      {
        "id": "1",
        "taskName": "Shortlist three venues",
        "completed": false,
        "suggestedTimeline": "8 weeks before",
        "notes": "Check capacity and accessibility"
      }
    ]
  }
]

"suggestedTimeline" and "notes" are optional. "completed" is always false."#;

const NEW_BEGINNINGS_SCHEMA: &str = r#"## Output Schema

[
  {
    "sectionName": "First Week",
    "tasks": [
      {
        "id": "1",
        "taskName": "Register your new address",
        "completed": false,
        "importance": "High",
        "suggestedTimeline": "Within 3 days",
        "notes": "Bring your lease and ID"
      }
    ]
  }
]

"importance" (High, Medium, or Low), "suggestedTimeline", and "notes" are
optional. "completed" is always false."#;

const PROJECT_GOAL_SCHEMA: &str = r#"## Output Schema

[
  {
    "phaseName": "Phase 1: Research",
    "tasks": [
      {
        "id": "1",
        "taskName": "Survey existing solutions",
        "completed": false,
        "priority": "High",
        "suggestedTimelineOrEffort": "1 week",
        "details": "Focus on the three market leaders"
      }
    ]
  }
]

"priority" (High, Medium, or Low), "suggestedTimelineOrEffort", and
"details" are optional. "completed" is always false."#;

/// Role line for the variant's assistant persona.
fn intro(variant: Variant) -> &'static str {
    match variant {
        Variant::Trip => {
            "You are a travel packing assistant. Produce a packing checklist, \
             grouped by category, for the trip described below."
        }
        Variant::Pet => {
            "You are a pet-care advisor. Produce a starter-kit checklist, \
             grouped by section, for the new pet described below."
        }
        Variant::Moving => {
            "You are a relocation planner. Produce a week-by-week moving \
             checklist for the move described below."
        }
        Variant::Event => {
            "You are an event planner. Produce a planning checklist, grouped \
             by section, for the event described below."
        }
        Variant::NewBeginnings => {
            "You are a life-transition coach. Produce an action plan, grouped \
             by section, for the new beginning described below."
        }
        Variant::ProjectGoal => {
            "You are a project planner. Produce a phased task plan for the \
             project or goal described below."
        }
    }
}

fn schema_reference(variant: Variant) -> &'static str {
    match variant {
        Variant::Trip => TRIP_SCHEMA,
        Variant::Pet => PET_SCHEMA,
        Variant::Moving => MOVING_SCHEMA,
        Variant::Event => EVENT_SCHEMA,
        Variant::NewBeginnings => NEW_BEGINNINGS_SCHEMA,
        Variant::ProjectGoal => PROJECT_GOAL_SCHEMA,
    }
}

/// Build the full generation prompt for a variant and user request.
pub fn build_prompt(variant: Variant, request: &str) -> String {
    let mut prompt = String::with_capacity(1024);
    prompt.push_str(intro(variant));
    prompt.push_str("\n\n");
    prompt.push_str(schema_reference(variant));
    prompt.push_str("\n\n");
    prompt.push_str(OUTPUT_CONTRACT);
    prompt.push_str("\n\nRequest: ");
    prompt.push_str(request.trim());
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_request() {
        let prompt = build_prompt(Variant::Trip, "3-day beach trip for 2 adults");
        assert!(prompt.contains("3-day beach trip for 2 adults"));
    }

    #[test]
    fn prompt_pins_single_json_document() {
        for variant in Variant::ALL {
            let prompt = build_prompt(variant, "anything");
            assert!(
                prompt.contains("single JSON document"),
                "variant {variant} must pin the output format"
            );
            assert!(prompt.contains("no markdown fencing"));
        }
    }

    #[test]
    fn schema_reference_matches_wire_fields() {
        for variant in Variant::ALL {
            let prompt = build_prompt(variant, "anything");
            let fields = variant.field_names();
            assert!(
                prompt.contains(fields.group_key),
                "variant {variant} prompt missing group key {:?}",
                fields.group_key
            );
            assert!(prompt.contains(fields.item_name));
            assert!(prompt.contains(fields.done));
        }
    }

    #[test]
    fn prompt_trims_request_whitespace() {
        let prompt = build_prompt(Variant::Event, "  garden wedding, 40 guests  ");
        assert!(prompt.ends_with("garden wedding, 40 guests"));
    }
}
