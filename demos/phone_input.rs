use std::cell::Cell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use phonefield::{PhoneField, PhoneFieldOptions, render_phone_field};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
};

const PREFIXES: [&str; 4] = ["+32", "+33", "+44", "+1"];

fn main() -> Result<()> {
    let mut field = PhoneField::with_options(
        PhoneFieldOptions::default()
            .with_prefix_placeholder("Prefix")
            .with_suffix_placeholder("Phone number")
            .with_help_text("Type the local number. Tab cycles the prefix, Esc quits."),
    );
    field.focus();

    let selected = Rc::new(Cell::new(0usize));
    let cursor = Rc::clone(&selected);
    field.set_prefix_handler(move || cursor.set((cursor.get() + 1) % PREFIXES.len()));

    let mut terminal = setup_terminal()?;
    let outcome = run(&mut terminal, &mut field, &selected);
    restore_terminal();
    outcome
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    field: &mut PhoneField,
    selected: &Cell<usize>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            // The widget needs three rows: floated labels, values, message.
            let area = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)])
                .split(frame.area())[0];
            render_phone_field(frame, area, field);
        })?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Esc => break,
                KeyCode::Tab => {
                    field.trigger_prefix_action();
                    field.set_prefix(PREFIXES[selected.get()]);
                }
                _ => {
                    field.handle_key(&key);
                }
            }
        }
    }

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(io::stdout(), EnterAlternateScreen).context("failed to enter alternate screen")?;
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        previous(panic_info);
    }));
    Terminal::new(CrosstermBackend::new(io::stdout())).context("failed to initialize terminal")
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
}
