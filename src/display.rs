use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use std::io;

/// Display is used by the interpreter to blank the screen. It should
/// abstract the implementation details, so a variety of kinds of screen would
/// work; the interpreter never looks at pixels.
pub trait Display {
    /// wipe everything currently shown
    fn clear(&mut self) -> Result<(), io::Error>;
}

/// a terminal, cleared with crossterm escape sequences
pub struct TermDisplay<W: io::Write> {
    out: W,
}

impl TermDisplay<io::Stdout> {
    pub fn stdout() -> Self {
        TermDisplay::new(io::stdout())
    }
}

impl<W: io::Write> TermDisplay<W> {
    pub fn new(out: W) -> Self {
        TermDisplay { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: io::Write> Display for TermDisplay<W> {
    fn clear(&mut self) -> Result<(), io::Error> {
        execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }
}

/// useful for testing non-display routines; counts how often it was cleared
#[derive(Debug, Default)]
pub struct DummyDisplay {
    pub clears: usize,
}

impl DummyDisplay {
    pub fn new() -> DummyDisplay {
        DummyDisplay { clears: 0 }
    }
}

impl Display for DummyDisplay {
    fn clear(&mut self) -> Result<(), io::Error> {
        self.clears += 1;
        Ok(())
    }
}
