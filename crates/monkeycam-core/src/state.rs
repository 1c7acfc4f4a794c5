//! Application state owned by the front end.
//!
//! The front end keeps one [`AppState`] value and passes plain
//! parameters derived from it into the detection pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

use monkeycam_locator::{DaySelector, TimeSlot};

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum View {
    /// Introduction and opening hours.
    #[default]
    Home,
    /// Detection for today's snapshots.
    Today,
    /// Detection for yesterday's snapshots.
    Yesterday,
}

impl View {
    /// The archive day a detection view reads, if any.
    pub fn day(&self) -> Option<DaySelector> {
        match self {
            View::Home => None,
            View::Today => Some(DaySelector::Today),
            View::Yesterday => Some(DaySelector::Yesterday),
        }
    }

    /// Returns true for views that run detections.
    pub fn is_detection(&self) -> bool {
        self.day().is_some()
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Home => write!(f, "Homepage"),
            View::Today => write!(f, "Detect for today"),
            View::Yesterday => write!(f, "Detect for yesterday"),
        }
    }
}

/// Serializable state of the interactive front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    /// Current screen.
    pub view: View,

    /// Slot picked on the current detection screen, if any.
    pub selected_slot: Option<TimeSlot>,
}

impl AppState {
    /// Creates the initial state (home screen, no slot).
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches screen. A slot picked on another screen is forgotten.
    pub fn navigate(&mut self, view: View) {
        if self.view != view {
            self.selected_slot = None;
        }
        self.view = view;
    }

    /// Records the slot choice for the current screen.
    pub fn select_slot(&mut self, slot: Option<TimeSlot>) {
        self.selected_slot = slot;
    }

    /// Parameters for a detection run from the current screen.
    pub fn detection_request(&self) -> Option<(DaySelector, Option<TimeSlot>)> {
        self.view.day().map(|day| (day, self.selected_slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_home() {
        let state = AppState::new();
        assert_eq!(state.view, View::Home);
        assert_eq!(state.detection_request(), None);
    }

    #[test]
    fn test_navigation_clears_slot() {
        let mut state = AppState::new();
        state.navigate(View::Today);
        state.select_slot(Some(TimeSlot::Pm2));
        assert_eq!(
            state.detection_request(),
            Some((DaySelector::Today, Some(TimeSlot::Pm2)))
        );

        state.navigate(View::Yesterday);
        assert_eq!(state.detection_request(), Some((DaySelector::Yesterday, None)));
    }

    #[test]
    fn test_same_view_keeps_slot() {
        let mut state = AppState::new();
        state.navigate(View::Today);
        state.select_slot(Some(TimeSlot::Am11));
        state.navigate(View::Today);
        assert_eq!(state.selected_slot, Some(TimeSlot::Am11));
    }

    #[test]
    fn test_state_serialization() {
        let state = AppState {
            view: View::Yesterday,
            selected_slot: Some(TimeSlot::Pm3),
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"3pm\""));
        let parsed: AppState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
