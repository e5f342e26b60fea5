//! Terminal front end for the calculator

mod app;
mod input;
mod keypad;
mod ui;

pub use app::{CalculatorApp, View};
pub use input::{InputHandler, KeyAction, HELP_SHORTCUTS};
pub use keypad::{Keypad, KeypadButton, KeypadWidget};
pub use ui::{keypad_area, render, CalculatorUI};

use std::io;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tracing::info;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::handlers::open_history;

/// Runs the interactive calculator until the user quits
pub fn run(config: &AppConfig) -> AppResult<()> {
    let app = CalculatorApp::new(open_history(config));
    info!(path = %config.history_path.display(), "starting terminal UI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_app(&mut terminal, app);

    // Restore the terminal even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: CalculatorApp,
) -> AppResult<()> {
    let input_handler = InputHandler::new();

    while !app.should_quit() {
        terminal.draw(|f| render(&app, f))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                app.handle_action(input_handler.handle_key(key));
            }
            Event::Mouse(mouse)
                if mouse.kind == MouseEventKind::Down(MouseButton::Left)
                    && app.view() == View::Calculator =>
            {
                let size = terminal.size()?;
                let area = keypad_area(Rect::new(0, 0, size.width, size.height));
                if let Some(index) = app.keypad().hit_test(area, mouse.column, mouse.row) {
                    app.press_button(index);
                }
            }
            _ => {}
        }
    }

    Ok(())
}
