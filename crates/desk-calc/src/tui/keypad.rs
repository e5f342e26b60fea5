//! Keypad for the TUI calculator
//!
//! Each button carries the [`Input`] it sends, so a click goes straight to
//! the accumulator without looking buttons up by label.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::core::{Input, Operation, UnaryFunction};

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// The input this button sends
    pub input: Input,
    /// Whether the button is currently highlighted
    pub pressed: bool,
}

impl KeypadButton {
    /// Creates a released button
    #[must_use]
    pub const fn new(input: Input) -> Self {
        Self {
            input,
            pressed: false,
        }
    }

    /// Returns the text printed on the button
    #[must_use]
    pub fn label(&self) -> String {
        self.input.label()
    }

    fn style(&self) -> Style {
        if self.pressed {
            return Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
        }
        match self.input {
            Input::Digit(_) | Input::DecimalPoint => Style::default().fg(Color::White),
            Input::Operator(_) => Style::default().fg(Color::Yellow),
            Input::Equals => Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            Input::ClearAll | Input::ClearEntry | Input::Backspace => {
                Style::default().fg(Color::Red)
            }
            Input::Unary(_) => Style::default().fg(Color::Cyan),
        }
    }
}

/// The keypad layout - a 6x4 grid of buttons
/// ```text
/// [ % ] [ CE] [ C ] [ ⌫ ]
/// [1/x] [ x²] [ √x] [ ÷ ]
/// [ 7 ] [ 8 ] [ 9 ] [ × ]
/// [ 4 ] [ 5 ] [ 6 ] [ − ]
/// [ 1 ] [ 2 ] [ 3 ] [ + ]
/// [ ± ] [ 0 ] [ . ] [ = ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Buttons in row-major order
    buttons: Vec<KeypadButton>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard calculator keypad
    #[must_use]
    pub fn new() -> Self {
        let layout = [
            Input::Unary(UnaryFunction::Percent),
            Input::ClearEntry,
            Input::ClearAll,
            Input::Backspace,
            Input::Unary(UnaryFunction::Reciprocal),
            Input::Unary(UnaryFunction::Square),
            Input::Unary(UnaryFunction::SquareRoot),
            Input::Operator(Operation::Divide),
            Input::Digit(7),
            Input::Digit(8),
            Input::Digit(9),
            Input::Operator(Operation::Multiply),
            Input::Digit(4),
            Input::Digit(5),
            Input::Digit(6),
            Input::Operator(Operation::Subtract),
            Input::Digit(1),
            Input::Digit(2),
            Input::Digit(3),
            Input::Operator(Operation::Add),
            Input::Unary(UnaryFunction::Negate),
            Input::Digit(0),
            Input::DecimalPoint,
            Input::Equals,
        ];

        Self {
            buttons: layout.into_iter().map(KeypadButton::new).collect(),
            cols: 4,
            rows: 6,
        }
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Finds the button that sends `input`
    #[must_use]
    pub fn find_button(&self, input: Input) -> Option<usize> {
        self.buttons.iter().position(|b| b.input == input)
    }

    /// Releases all buttons
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.pressed = false;
        }
    }

    /// Highlights the button that sends `input`
    pub fn highlight(&mut self, input: Input) {
        self.release_all();
        if let Some(btn) = self
            .find_button(input)
            .and_then(|idx| self.buttons.get_mut(idx))
        {
            btn.pressed = true;
        }
    }

    /// Returns an iterator over all buttons
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Returns an iterator over buttons with their (row, col) positions
    pub fn buttons_with_positions(&self) -> impl Iterator<Item = ((usize, usize), &KeypadButton)> {
        self.buttons.iter().enumerate().map(move |(i, btn)| {
            let row = i / self.cols;
            let col = i % self.cols;
            ((row, col), btn)
        })
    }

    /// Converts a click position inside the bordered `area` to a button index
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }

        let rel_x = x - area.x;
        let rel_y = y - area.y;

        // Border is one cell on each side
        if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
            return None;
        }

        let btn_width = (area.width - 2) / self.cols as u16;
        let btn_height = (area.height - 2) / self.rows as u16;
        if btn_width == 0 || btn_height == 0 {
            return None;
        }

        let col = ((rel_x - 1) / btn_width) as usize;
        let row = ((rel_y - 1) / btn_height) as usize;

        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self { keypad }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        let (rows, cols) = self.keypad.dimensions();
        if inner.width < cols as u16 * 3 || inner.height < rows as u16 {
            return;
        }

        let btn_width = inner.width / cols as u16;
        let btn_height = inner.height / rows as u16;

        for ((row, col), btn) in self.keypad.buttons_with_positions() {
            let x = inner.x + col as u16 * btn_width;
            let y = inner.y + row as u16 * btn_height + btn_height / 2;
            let label = format!("[{:^3}]", btn.label());
            let width = label.chars().count() as u16;
            let label_x = x + btn_width.saturating_sub(width) / 2;
            buf.set_span(label_x, y, &Span::styled(label, btn.style()), btn_width);
        }
    }
}
