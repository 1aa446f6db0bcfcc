//! UI state and the rendered page surface.
//!
//! [`UiState`] holds the flags the controller's transitions depend on.
//! [`Page`] is what a host displays: the equivalent of the DOM elements the
//! controller writes to. Both are owned by the `Controller` and only handed
//! out by shared reference.

use crate::render::Markup;

/// Flags driving the controller's transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub is_loading: bool,
    pub last_query: String,
    pub error_visible: bool,
    pub modal_open: bool,
}

/// Where the search flow stands. Modal visibility is tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    ErrorShown,
}

impl UiState {
    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Loading
        } else if self.error_visible {
            Phase::ErrorShown
        } else {
            Phase::Idle
        }
    }
}

/// Search button appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchButton {
    pub disabled: bool,
    /// Shows the loading label instead of the idle one.
    pub loading: bool,
}

/// Element holding keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    None,
    SearchInput,
    ModalClose,
}

/// Everything a host renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub search_input: String,
    pub search_button: SearchButton,
    pub spinner_visible: bool,
    pub grid: Markup,
    /// IMDb ids of the cards in `grid`, in display order.
    pub card_ids: Vec<String>,
    /// `Title (Year)` for each entry of `card_ids`, for text hosts.
    pub card_labels: Vec<String>,
    pub stats: String,
    /// Banner text; only shown while `UiState::error_visible` is set.
    pub error_text: String,
    pub modal: Markup,
    pub focus: Focus,
    pub scroll_locked: bool,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            search_input: String::new(),
            search_button: SearchButton {
                disabled: true,
                loading: false,
            },
            spinner_visible: false,
            grid: Markup::empty(),
            card_ids: Vec::new(),
            card_labels: Vec::new(),
            stats: String::new(),
            error_text: String::new(),
            modal: Markup::empty(),
            focus: Focus::None,
            scroll_locked: false,
        }
    }
}

/// Status line for a successful search.
pub fn stats_line(count: usize, query: &str) -> String {
    if count == 0 {
        return String::new();
    }
    let plural = if count == 1 { "" } else { "s" };
    format!("Found {count} result{plural} for \"{query}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_pluralisation() {
        assert_eq!(stats_line(1, "batman"), "Found 1 result for \"batman\"");
        assert_eq!(stats_line(10, "batman"), "Found 10 results for \"batman\"");
        assert_eq!(stats_line(0, "batman"), "");
    }

    #[test]
    fn phase_follows_flags() {
        let mut state = UiState::default();
        assert_eq!(state.phase(), Phase::Idle);
        state.error_visible = true;
        assert_eq!(state.phase(), Phase::ErrorShown);
        state.is_loading = true;
        assert_eq!(state.phase(), Phase::Loading);
    }
}
