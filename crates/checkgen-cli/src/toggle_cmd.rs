//! `checkgen toggle` command: flip one item's completion flag in the
//! session checklist.

use anyhow::{Context, Result, bail};

use checkgen_core::ChecklistStore;

use crate::session;

/// Run the toggle command. A `(group, item_id)` that matches nothing is
/// a warning, not a failure, mirroring the store's no-op policy.
pub fn run_toggle(group: &str, item_id: &str) -> Result<()> {
    let Some(mut session) = session::load()? else {
        bail!("no current checklist. Run `checkgen generate <variant> <request>` first.");
    };

    if session.checklist.item(group, item_id).is_none() {
        println!(
            "No item {item_id:?} in {} {group:?}; nothing to toggle.",
            session.variant.group_role()
        );
        return Ok(());
    }

    let mut store = ChecklistStore::new();
    store.replace(session.checklist.clone());
    let current = store
        .toggle(group, item_id)
        .context("store lost its checklist")?;
    session.checklist = current.clone();
    session::save(&session)?;

    let item = session
        .checklist
        .item(group, item_id)
        .context("toggled item vanished")?;
    let state = if item.done { "done" } else { "not done" };
    println!("{}: {} is now {state}.", group, item.name);
    println!(
        "Progress: {}/{} done",
        session.checklist.done_count(),
        session.checklist.item_count()
    );
    Ok(())
}
