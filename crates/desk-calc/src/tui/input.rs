//! Keyboard input handling
//!
//! Maps crossterm key events to typed actions; calculator keys become
//! [`Input`] events for the accumulator.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::{Input, Operation, UnaryFunction};

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Send an input to the accumulator
    Calc(Input),
    /// Show or hide the history view
    ToggleHistory,
    /// Erase the history file
    ClearHistory,
    /// Scroll the history view up
    ScrollUp,
    /// Scroll the history view down
    ScrollDown,
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                KeyCode::Char('l') => KeyAction::ClearHistory,
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Char(c) => Self::handle_char(c),
            KeyCode::Enter => KeyAction::Calc(Input::Equals),
            KeyCode::Backspace => KeyAction::Calc(Input::Backspace),
            KeyCode::Delete => KeyAction::Calc(Input::ClearEntry),
            KeyCode::Esc => KeyAction::Calc(Input::ClearAll),
            KeyCode::Up => KeyAction::ScrollUp,
            KeyCode::Down => KeyAction::ScrollDown,
            // Arrows and Tab must not move anything
            _ => KeyAction::None,
        }
    }

    fn handle_char(c: char) -> KeyAction {
        if let Some(d) = c.to_digit(10) {
            return KeyAction::Calc(Input::Digit(d as u8));
        }
        let input = match c {
            '.' | ',' => Input::DecimalPoint,
            '+' => Input::Operator(Operation::Add),
            '-' => Input::Operator(Operation::Subtract),
            '*' | 'x' => Input::Operator(Operation::Multiply),
            '/' => Input::Operator(Operation::Divide),
            '=' => Input::Equals,
            '%' => Input::Unary(UnaryFunction::Percent),
            's' => Input::Unary(UnaryFunction::Square),
            'r' => Input::Unary(UnaryFunction::SquareRoot),
            'i' => Input::Unary(UnaryFunction::Reciprocal),
            'n' => Input::Unary(UnaryFunction::Negate),
            'h' => return KeyAction::ToggleHistory,
            'q' => return KeyAction::Quit,
            _ => return KeyAction::None,
        };
        KeyAction::Calc(input)
    }
}

/// Key bindings shown in the help line
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("Enter", "="),
    ("Esc", "C"),
    ("Del", "CE"),
    ("s r i n", "x² √x 1/x ±"),
    ("h", "history"),
    ("q", "quit"),
];
