//! Recursive lifecycle walks over a control tree.

use crate::control::{ControlCollection, PageServices};
use crate::error::PageResult;

/// Prefix of automatically assigned identifiers.
pub const AUTOMATIC_ID_PREFIX: &str = "ctl";

/// Page-wide counter for automatic identifiers.
#[derive(Debug, Default)]
pub struct AutoIdCounter {
    next: usize,
}

impl AutoIdCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next identifier: `ctl00`, `ctl01`, ..., `ctl99`, `ctl100`, ...
    pub fn next_id(&mut self) -> String {
        let id = format!("{}{:02}", AUTOMATIC_ID_PREFIX, self.next);
        self.next += 1;
        id
    }
}

impl ControlCollection {
    /// Run `on_init` over the subtree, children before their parent.
    pub fn init_recursive(&mut self, page: &dyn PageServices) -> PageResult {
        for control in self.iter_mut() {
            control.controls_mut().init_recursive(page)?;
            control.on_init(page)?;
        }
        Ok(())
    }

    /// Run `on_load` over the subtree, parents before their children.
    pub fn load_recursive(&mut self, page: &dyn PageServices) -> PageResult {
        for control in self.iter_mut() {
            control.on_load(page)?;
            control.controls_mut().load_recursive(page)?;
        }
        Ok(())
    }

    /// Run `on_pre_render` over the subtree, parents before their children.
    pub fn pre_render_recursive(&mut self, page: &dyn PageServices) -> PageResult {
        for control in self.iter_mut() {
            control.on_pre_render(page)?;
            control.controls_mut().pre_render_recursive(page)?;
        }
        Ok(())
    }

    /// Run `on_unload` over the subtree, children before their parent.
    pub fn unload_recursive(&mut self) {
        for control in self.iter_mut() {
            control.controls_mut().unload_recursive();
            control.on_unload();
        }
    }

    /// Give every control that requires an identifier but has none an
    /// automatic one, in document order. Explicit identifiers are kept.
    pub fn assign_automatic_ids(&mut self, counter: &mut AutoIdCounter) {
        for control in self.iter_mut() {
            if control.requires_id() && control.id().is_none() {
                control.set_id(counter.next_id());
            }
            control.controls_mut().assign_automatic_ids(counter);
        }
    }

    /// Identifiers that appear on more than one sibling anywhere in the
    /// subtree, in document order of their second occurrence.
    pub fn duplicate_sibling_ids(&self) -> Vec<String> {
        let mut duplicates = Vec::new();
        self.collect_duplicate_ids(&mut duplicates);
        duplicates
    }

    fn collect_duplicate_ids(&self, duplicates: &mut Vec<String>) {
        let mut seen: Vec<&str> = Vec::new();
        for control in self.iter() {
            if let Some(id) = control.id() {
                if seen.contains(&id) {
                    if !duplicates.iter().any(|d| d == id) {
                        duplicates.push(id.to_string());
                    }
                } else {
                    seen.push(id);
                }
            }
            control.controls().collect_duplicate_ids(duplicates);
        }
    }

    /// Number of controls in the subtree, excluding this collection's owner.
    pub fn count_recursive(&self) -> usize {
        self.iter()
            .map(|c| 1 + c.controls().count_recursive())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::control::{Control, ControlState};
    use crate::controls::{HtmlForm, Label, Panel, TextBox};
    use crate::testing::StaticPage;

    #[derive(Debug)]
    struct Recorder {
        state: ControlState,
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder {
        fn new(name: &'static str, log: &Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                state: ControlState::new(),
                name,
                log: Arc::clone(log),
            }
        }

        fn record(&self, event: &str) {
            self.log.lock().unwrap().push(format!("{}:{}", self.name, event));
        }
    }

    impl Control for Recorder {
        fn state(&self) -> &ControlState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut ControlState {
            &mut self.state
        }

        fn on_init(&mut self, _page: &dyn PageServices) -> PageResult {
            self.record("init");
            Ok(())
        }

        fn on_load(&mut self, _page: &dyn PageServices) -> PageResult {
            self.record("load");
            Ok(())
        }

        fn on_unload(&mut self) {
            self.record("unload");
        }
    }

    fn tree(log: &Arc<Mutex<Vec<String>>>) -> ControlCollection {
        let mut parent = Recorder::new("parent", log);
        parent.controls_mut().add(Recorder::new("child", log));
        let mut controls = ControlCollection::new();
        controls.add(parent);
        controls.add(Recorder::new("sibling", log));
        controls
    }

    #[test]
    fn test_init_runs_children_first() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut controls = tree(&log);

        controls.init_recursive(&StaticPage::default()).unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            vec!["child:init", "parent:init", "sibling:init"]
        );
    }

    #[test]
    fn test_load_runs_parents_first() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut controls = tree(&log);

        controls.load_recursive(&StaticPage::default()).unwrap();
        assert_eq!(
            *log.lock().unwrap(),
            vec!["parent:load", "child:load", "sibling:load"]
        );
    }

    #[test]
    fn test_unload_runs_children_first() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut controls = tree(&log);

        controls.unload_recursive();
        assert_eq!(
            *log.lock().unwrap(),
            vec!["child:unload", "parent:unload", "sibling:unload"]
        );
    }

    #[test]
    fn test_automatic_ids_in_document_order() {
        let mut form = HtmlForm::new();
        form.controls_mut().add(TextBox::new());
        form.controls_mut().add(TextBox::new().with_id("explicit"));
        form.controls_mut().add(TextBox::new());
        let mut controls = ControlCollection::new();
        controls.add(Label::new());
        controls.add(form);

        controls.assign_automatic_ids(&mut AutoIdCounter::new());

        assert_eq!(controls[0].id(), None);
        assert_eq!(controls[1].id(), None);
        let inner = controls[1].controls();
        assert_eq!(inner[0].id(), Some("ctl00"));
        assert_eq!(inner[1].id(), Some("explicit"));
        assert_eq!(inner[2].id(), Some("ctl01"));
    }

    #[test]
    fn test_counter_widens_past_99() {
        let mut counter = AutoIdCounter::new();
        let ids: Vec<_> = (0..101).map(|_| counter.next_id()).collect();
        assert_eq!(ids[0], "ctl00");
        assert_eq!(ids[9], "ctl09");
        assert_eq!(ids[99], "ctl99");
        assert_eq!(ids[100], "ctl100");
    }

    #[test]
    fn test_duplicate_sibling_ids() {
        let mut panel = Panel::new();
        panel.controls_mut().add(Label::new().with_id("x"));
        panel.controls_mut().add(Label::new().with_id("x"));
        let mut controls = ControlCollection::new();
        controls.add(Label::new().with_id("x"));
        controls.add(panel);
        controls.add(Label::new().with_id("y"));

        assert_eq!(controls.duplicate_sibling_ids(), vec!["x".to_string()]);
        assert_eq!(controls.count_recursive(), 5);
    }
}
