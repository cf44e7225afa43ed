//! TUI application state: the store plus a cursor over its items.

use checkgen_core::{Checklist, ChecklistStore, Variant};

use crate::session::Session;

/// Application state for the interactive checklist view.
pub struct App {
    pub store: ChecklistStore,
    pub variant: Variant,
    pub request: String,
    /// Flat index into the item positions, in display order.
    pub cursor: usize,
    pub should_quit: bool,
    /// Whether any toggle happened (the session is re-saved on exit).
    pub dirty: bool,
}

impl App {
    pub fn new(session: &Session) -> Self {
        let mut store = ChecklistStore::new();
        store.replace(session.checklist.clone());
        Self {
            store,
            variant: session.variant,
            request: session.request.clone(),
            cursor: 0,
            should_quit: false,
            dirty: false,
        }
    }

    pub fn checklist(&self) -> Option<&Checklist> {
        self.store.current()
    }

    /// `(group index, item index)` pairs in display order.
    pub fn positions(&self) -> Vec<(usize, usize)> {
        let Some(checklist) = self.store.current() else {
            return Vec::new();
        };
        let mut positions = Vec::with_capacity(checklist.item_count());
        for (g, group) in checklist.groups.iter().enumerate() {
            for i in 0..group.items.len() {
                positions.push((g, i));
            }
        }
        positions
    }

    /// The `(group index, item index)` under the cursor.
    pub fn selected(&self) -> Option<(usize, usize)> {
        self.positions().get(self.cursor).copied()
    }

    pub fn move_down(&mut self) {
        let len = self.positions().len();
        if len > 0 && self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Toggle the item under the cursor: exactly one store toggle per
    /// invocation.
    pub fn toggle_selected(&mut self) {
        let Some((g, i)) = self.selected() else {
            return;
        };
        let Some(checklist) = self.store.current() else {
            return;
        };
        let group_key = checklist.groups[g].key.clone();
        let item_id = checklist.groups[g].items[i].id.clone();
        self.store.toggle(&group_key, &item_id);
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkgen_core::{Group, Item};

    fn sample_session() -> Session {
        let checklist = Checklist::new(
            Variant::Trip,
            vec![
                Group {
                    key: "Clothing".to_string(),
                    items: vec![Item::new("1", "Swimsuit"), Item::new("2", "Sun hat")],
                },
                Group {
                    key: "Documents".to_string(),
                    items: vec![Item::new("1", "Passport")],
                },
            ],
        );
        Session::new(Variant::Trip, "beach trip".to_string(), checklist)
    }

    #[test]
    fn positions_flatten_groups_in_order() {
        let app = App::new(&sample_session());
        assert_eq!(app.positions(), vec![(0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn cursor_moves_across_group_boundaries_and_clamps() {
        let mut app = App::new(&sample_session());
        assert_eq!(app.cursor, 0);

        app.move_down();
        app.move_down();
        assert_eq!(app.selected(), Some((1, 0)));

        // Clamped at the last item.
        app.move_down();
        assert_eq!(app.selected(), Some((1, 0)));

        app.move_up();
        app.move_up();
        app.move_up();
        assert_eq!(app.selected(), Some((0, 0)));
    }

    #[test]
    fn toggle_selected_flips_the_cursor_item_only() {
        let mut app = App::new(&sample_session());
        app.move_down();
        app.toggle_selected();

        let checklist = app.checklist().unwrap();
        assert!(checklist.item("Clothing", "2").unwrap().done);
        assert!(!checklist.item("Clothing", "1").unwrap().done);
        assert!(!checklist.item("Documents", "1").unwrap().done);
        assert!(app.dirty);
    }

    #[test]
    fn toggle_twice_marks_dirty_but_restores_value() {
        let session = sample_session();
        let mut app = App::new(&session);
        app.toggle_selected();
        app.toggle_selected();
        assert_eq!(app.checklist().unwrap(), &session.checklist);
        assert!(app.dirty);
    }

    #[test]
    fn empty_checklist_is_safe() {
        let session = Session::new(
            Variant::Trip,
            "empty".to_string(),
            Checklist::new(Variant::Trip, vec![]),
        );
        let mut app = App::new(&session);
        assert!(app.selected().is_none());
        app.move_down();
        app.move_up();
        app.toggle_selected();
        assert!(!app.dirty);
    }
}
