//! Interactive prompts
//!
//! [`Prompt`] is the seam between the branch switching flow and whatever
//! asks the user; [`TerminalPrompt`] draws inline in the terminal.

mod state;
mod terminal;

pub use state::{InputState, SelectState, Step};
pub use terminal::TerminalPrompt;

use anyhow::Result;
use ratatui::text::Line;

/// Asks the user to pick an option or type a value
pub trait Prompt {
    /// Let the user pick one of `options`, returning its plain text
    ///
    /// # Errors
    ///
    /// Returns an error if there is nothing to pick, the user cancels, or
    /// the terminal fails
    fn select(&mut self, message: &str, options: &[Line<'static>]) -> Result<String>;

    /// Ask for a line of text, pre-filled with `default`
    ///
    /// # Errors
    ///
    /// Returns an error if the user cancels or the terminal fails
    fn input(&mut self, message: &str, default: &str) -> Result<String>;
}
