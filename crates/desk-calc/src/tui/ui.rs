//! TUI rendering

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::{CalculatorApp, View};
use super::input::HELP_SHORTCUTS;
use super::keypad::KeypadWidget;
use crate::handlers::EMPTY_HISTORY_MESSAGE;

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    frame.render_widget(CalculatorUI::new(app), frame.area());
}

/// Returns the area the keypad occupies inside `area`, for mouse hit testing
#[must_use]
pub fn keypad_area(area: Rect) -> Rect {
    CalculatorUI::layout(area)[1]
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    /// Display, keypad and status line, top to bottom
    fn layout(area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Display
                Constraint::Min(8),    // Keypad
                Constraint::Length(2), // Status + help
            ])
            .split(area)
            .to_vec()
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let acc = self.app.accumulator();
        let border_color = if acc.has_error() {
            Color::Red
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .title(" Calculator ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let mut value_style = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        if acc.has_error() {
            value_style = value_style.bg(Color::Red);
        }

        let lines = vec![
            Line::from(Span::styled(
                acc.expression().to_string(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            Line::from(Span::styled(acc.display().to_string(), value_style)),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Right)
            .block(block)
            .render(area, buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let status = match self.app.status() {
            Some(message) => Span::styled(message.to_string(), Style::default().fg(Color::Red)),
            None => Span::raw(""),
        };
        let help: Vec<Span> = HELP_SHORTCUTS
            .iter()
            .flat_map(|(key, desc)| {
                [
                    Span::styled(format!("{key} "), Style::default().fg(Color::Yellow)),
                    Span::styled(format!("{desc}  "), Style::default().fg(Color::DarkGray)),
                ]
            })
            .collect();
        Paragraph::new(vec![Line::from(status), Line::from(help)]).render(area, buf);
    }

    fn render_history(&self, area: Rect, buf: &mut Buffer) {
        let history = self.app.history();
        let items: Vec<ListItem> = if history.is_empty() {
            vec![ListItem::new(Span::styled(
                EMPTY_HISTORY_MESSAGE,
                Style::default().fg(Color::Gray),
            ))]
        } else {
            history
                .iter_newest_first()
                .skip(self.app.history_scroll())
                .map(|entry| ListItem::new(entry.to_line()))
                .collect()
        };

        List::new(items)
            .block(
                Block::default()
                    .title(format!(" Calculation History ({}) ", history.len()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Self::layout(area);
        match self.app.view() {
            View::Calculator => {
                self.render_display(chunks[0], buf);
                KeypadWidget::new(self.app.keypad()).render(chunks[1], buf);
            }
            View::History => {
                let list_area = Rect {
                    height: chunks[0].height + chunks[1].height,
                    ..chunks[0]
                };
                self.render_history(list_area, buf);
            }
        }
        self.render_status(chunks[2], buf);
    }
}
