//! `checkgen show` command: print the current checklist.

use anyhow::{Result, bail};

use checkgen_core::checklist::wire;

use crate::session::{self, Session};

/// Run the show command. With `json`, prints the checklist in its wire
/// shape; otherwise a human-readable report.
pub fn run_show(json: bool) -> Result<()> {
    let Some(session) = session::load()? else {
        bail!("no current checklist. Run `checkgen generate <variant> <request>` first.");
    };

    if json {
        let value = wire::to_wire_value(&session.checklist);
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print_session(&session);
    }
    Ok(())
}

/// Print a session checklist as an indented report.
pub fn print_session(session: &Session) {
    let checklist = &session.checklist;

    println!("Checklist: {} ({})", session.variant, session.id);
    println!("Request: {}", session.request);
    println!(
        "Generated: {}",
        session.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "Progress: {}/{} done",
        checklist.done_count(),
        checklist.item_count()
    );

    for group in &checklist.groups {
        println!();
        println!("{}", group.key);
        if group.items.is_empty() {
            println!("  (no items)");
            continue;
        }
        for item in &group.items {
            let mark = if item.done { "x" } else { " " };
            println!("  [{}] {}  {}", mark, item.id, item.name);
            if let Some(importance) = item.importance {
                println!("         importance: {importance}");
            }
            if let Some(quantity) = &item.quantity {
                println!("         quantity: {quantity}");
            }
            if let Some(timeline) = &item.timeline {
                println!("         timeline: {timeline}");
            }
            if let Some(deadline) = &item.deadline {
                println!("         deadline: {deadline}");
            }
            if let Some(notes) = &item.notes {
                println!("         notes: {notes}");
            }
        }
    }
}
