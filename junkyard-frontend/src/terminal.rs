use std::io::{stderr, BufWriter, Stderr};

use crossterm::{
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};

use crate::error::AppError;

/// Owns the alternate screen on stderr, keeping stdout free for restore reports.
pub struct TerminalWrapper {
    inner: Option<Terminal<CrosstermBackend<BufWriter<Stderr>>>>,
}

impl TerminalWrapper {
    pub fn start() -> Result<Self, AppError> {
        stderr().execute(EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;

        let mut terminal = Terminal::new(CrosstermBackend::new(BufWriter::new(stderr())))?;
        terminal.clear()?;
        terminal.hide_cursor()?;

        Ok(Self {
            inner: Some(terminal),
        })
    }

    pub fn shutdown(&mut self) -> Result<(), AppError> {
        if let Some(mut terminal) = self.inner.take() {
            terminal.show_cursor()?;
        }

        terminal::disable_raw_mode()?;
        stderr().execute(LeaveAlternateScreen)?;

        Ok(())
    }

    pub fn size(&self) -> Result<Rect, AppError> {
        if self.inner.is_none() {
            return Err(AppError::TerminalNotInitialized);
        }

        let (width, height) = terminal::size()?;
        Ok(Rect::new(0, 0, width, height))
    }

    pub fn resize(&mut self, x: u16, y: u16) -> Result<(), AppError> {
        if let Some(terminal) = &mut self.inner {
            terminal.resize(Rect::new(0, 0, x, y))?;
        }

        Ok(())
    }

    pub fn draw(&mut self, layout: impl FnOnce(&mut Frame<'_>)) -> Result<(), AppError> {
        match &mut self.inner {
            Some(terminal) => {
                terminal.draw(layout)?;
                Ok(())
            }
            None => Err(AppError::TerminalNotInitialized),
        }
    }
}
