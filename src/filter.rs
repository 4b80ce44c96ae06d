//! Message visibility filter.
//!
//! One `FilterState` per page session, mutated only by the checkbox change
//! handler in `ui::setup` and applied only through `apply_visibility`, so
//! every mutation site goes through the same code path.

use std::cell::RefCell;
use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlElement};

/// Mapping from message source (`agent`, `task`, `system`, ...) to whether
/// panels tagged with it stay visible.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
    visible: HashMap<String, bool>,
}

impl FilterState {
    /// Session-start state: every category the renderer produces shown.
    /// Only the first three have checkboxes; the host categories stay
    /// visible for the whole session.
    pub fn all_visible() -> Self {
        let mut visible = HashMap::new();
        for source in ["agent", "task", "system", "host_agent", "host_request"] {
            visible.insert(source.to_string(), true);
        }
        Self { visible }
    }

    pub fn set_visible(&mut self, source: &str, shown: bool) {
        self.visible.insert(source.to_string(), shown);
    }

    /// Sources absent from the mapping are hidden.
    pub fn is_visible(&self, source: &str) -> bool {
        self.visible.get(source).copied().unwrap_or(false)
    }
}

thread_local! {
    /// The page-session filter state.
    pub static FILTERS: RefCell<FilterState> = RefCell::new(FilterState::all_visible());
}

/// Show or hide every rendered `.message` panel according to `filters`,
/// keyed by the `data-source` attribute recorded at render time.
/// Idempotent: reapplying the same state leaves the DOM unchanged.
pub fn apply_visibility(document: &Document, filters: &FilterState) -> Result<(), JsValue> {
    let panels = document.query_selector_all(".message")?;
    for index in 0..panels.length() {
        let Some(node) = panels.item(index) else { continue };
        if let Ok(panel) = node.dyn_into::<HtmlElement>() {
            let source = panel.get_attribute("data-source").unwrap_or_default();
            let display = if filters.is_visible(&source) { "block" } else { "none" };
            panel.style().set_property("display", display)?;
        }
    }
    Ok(())
}

/// Reapply the shared filter state.  Called after every render and after
/// every checkbox change.
pub fn refresh_visibility(document: &Document) -> Result<(), JsValue> {
    FILTERS.with(|filters| apply_visibility(document, &filters.borrow()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_categories_start_visible() {
        let filters = FilterState::all_visible();
        for source in ["agent", "task", "system", "host_agent", "host_request"] {
            assert!(filters.is_visible(source));
        }
    }

    #[test]
    fn unknown_source_is_hidden() {
        let filters = FilterState::all_visible();
        assert!(!filters.is_visible("debug"));
        assert!(!filters.is_visible(""));
    }

    #[test]
    fn toggling_updates_the_decision() {
        let mut filters = FilterState::all_visible();
        filters.set_visible("task", false);
        assert!(!filters.is_visible("task"));
        filters.set_visible("task", true);
        assert!(filters.is_visible("task"));
    }

    #[test]
    fn decisions_are_stable_across_repeated_queries() {
        // The DOM application is a straight write of these decisions, so
        // idempotence reduces to the lookup being pure.
        let mut filters = FilterState::all_visible();
        filters.set_visible("system", false);
        let first: Vec<bool> = ["agent", "task", "system", "other"]
            .iter()
            .map(|s| filters.is_visible(s))
            .collect();
        let second: Vec<bool> = ["agent", "task", "system", "other"]
            .iter()
            .map(|s| filters.is_visible(s))
            .collect();
        assert_eq!(first, second);
    }
}
