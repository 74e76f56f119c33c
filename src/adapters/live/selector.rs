//! Live terminal menu for the `Selector` port.
//!
//! Arrow keys (or `j`/`k`) move the highlight, Enter picks, Esc, `q` or
//! Ctrl-C dismiss the menu.

use std::io::{self, Write};

use crossterm::cursor::{self, MoveToColumn, MoveUp};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};

use crate::ports::{PortError, Selector};

/// Interactive menu drawn on stdout.
pub struct TerminalSelector;

impl Selector for TerminalSelector {
    fn select(&self, title: &str, options: &[String]) -> Result<Option<usize>, PortError> {
        let mut out = io::stdout();
        writeln!(out, "{title}")?;
        if options.is_empty() {
            return Ok(None);
        }

        terminal::enable_raw_mode()?;
        let result = run_menu(&mut out, options);
        let restored = terminal::disable_raw_mode();
        execute!(out, cursor::Show)?;
        restored?;
        Ok(result?)
    }
}

fn run_menu(out: &mut impl Write, options: &[String]) -> io::Result<Option<usize>> {
    let height = u16::try_from(options.len()).unwrap_or(u16::MAX);
    let mut selected = 0;
    execute!(out, cursor::Hide)?;
    draw(out, options, selected)?;

    let choice = loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                selected = selected.checked_sub(1).unwrap_or(options.len() - 1);
            }
            KeyCode::Down | KeyCode::Char('j') => selected = (selected + 1) % options.len(),
            KeyCode::Enter => break Some(selected),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break None,
            KeyCode::Esc | KeyCode::Char('q') => break None,
            _ => continue,
        }
        queue!(out, MoveUp(height), MoveToColumn(0))?;
        draw(out, options, selected)?;
    };

    queue!(out, MoveUp(height), MoveToColumn(0), Clear(ClearType::FromCursorDown))?;
    out.flush()?;
    Ok(choice)
}

fn draw(out: &mut impl Write, options: &[String], selected: usize) -> io::Result<()> {
    for (index, option) in options.iter().enumerate() {
        queue!(out, Clear(ClearType::CurrentLine))?;
        if index == selected {
            queue!(out, Print("> "), PrintStyledContent(option.as_str().reverse()))?;
        } else {
            queue!(out, Print("  "), Print(option))?;
        }
        queue!(out, Print("\r\n"))?;
    }
    out.flush()
}
