//! TUI Application State

use tracing::info;

use super::input::KeyAction;
use super::keypad::Keypad;
use crate::core::history::{History, HistoryStore};
use crate::core::{Accumulator, Input};
use crate::handlers::record;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Display and keypad
    #[default]
    Calculator,
    /// History list, newest first
    History,
}

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    accumulator: Accumulator,
    store: HistoryStore,
    keypad: Keypad,
    view: View,
    /// Message for the status line (errors, history notices)
    status: Option<String>,
    /// First visible row of the history view
    history_scroll: usize,
    should_quit: bool,
}

impl CalculatorApp {
    /// Creates an app persisting to `store`
    #[must_use]
    pub fn new(store: HistoryStore) -> Self {
        Self {
            accumulator: Accumulator::new(),
            store,
            keypad: Keypad::new(),
            view: View::Calculator,
            status: None,
            history_scroll: 0,
            should_quit: false,
        }
    }

    /// Returns the accumulator
    #[must_use]
    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the calculation history
    #[must_use]
    pub fn history(&self) -> &History {
        self.store.history()
    }

    /// Returns the current view
    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    /// Returns the status message, if any
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Returns the first visible history row
    #[must_use]
    pub fn history_scroll(&self) -> usize {
        self.history_scroll
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sends one input to the accumulator and records any completed calculation
    pub fn handle_input(&mut self, input: Input) {
        self.keypad.highlight(input);
        self.status = match self.accumulator.apply(input) {
            Ok(Some(entry)) => record(&mut self.store, entry),
            Ok(None) => None,
            Err(err) => Some(err.to_string()),
        };
    }

    /// Handles a click on keypad button `index`
    pub fn press_button(&mut self, index: usize) {
        if let Some(input) = self.keypad.get_button(index).map(|b| b.input) {
            self.handle_input(input);
        }
    }

    /// Applies a key action
    pub fn handle_action(&mut self, action: KeyAction) {
        match (self.view, action) {
            (_, KeyAction::Quit) => self.should_quit = true,
            (_, KeyAction::ToggleHistory) => self.toggle_history(),
            (_, KeyAction::ClearHistory) => self.clear_history(),
            (View::History, KeyAction::Calc(Input::ClearAll)) => self.view = View::Calculator,
            (View::History, KeyAction::ScrollUp) => {
                self.history_scroll = self.history_scroll.saturating_sub(1);
            }
            (View::History, KeyAction::ScrollDown) => {
                let max = self.history().len().saturating_sub(1);
                self.history_scroll = (self.history_scroll + 1).min(max);
            }
            (View::Calculator, KeyAction::Calc(input)) => self.handle_input(input),
            _ => {}
        }
    }

    /// Shows or hides the history view
    pub fn toggle_history(&mut self) {
        self.view = match self.view {
            View::Calculator => View::History,
            View::History => View::Calculator,
        };
        self.history_scroll = 0;
    }

    /// Erases the history and its file
    pub fn clear_history(&mut self) {
        self.history_scroll = 0;
        self.status = Some(match self.store.clear() {
            Ok(()) => {
                info!("history cleared");
                "History cleared successfully".to_string()
            }
            Err(err) => format!("Error saving history: {err}"),
        });
    }
}
