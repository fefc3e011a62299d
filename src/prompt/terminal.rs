//! Inline terminal prompts drawn with ratatui

use super::{InputState, Prompt, SelectState, Step};
use anyhow::{Context, Result, bail};
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{
    Frame, Terminal, TerminalOptions, Viewport,
    backend::CrosstermBackend,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use std::io::{self, Stdout};

const DEFAULT_VISIBLE_OPTIONS: u16 = 10;

/// Prompts drawn in an inline viewport below the cursor
#[derive(Debug, Clone, Copy)]
pub struct TerminalPrompt {
    max_visible: u16,
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPrompt {
    /// Create a prompt showing up to ten options at a time
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_visible: DEFAULT_VISIBLE_OPTIONS,
        }
    }
}

/// Raw-mode terminal that is restored when dropped
struct Session {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Session {
    fn start(height: u16) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw terminal mode")?;
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Inline(height),
            },
        )
        .inspect_err(|_| {
            let _ = disable_raw_mode();
        })
        .context("Failed to set up terminal")?;
        Ok(Self { terminal })
    }

    fn draw(&mut self, render: impl FnOnce(&mut Frame<'_>)) -> Result<()> {
        self.terminal
            .draw(render)
            .context("Failed to draw prompt")?;
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = self.terminal.clear();
        let _ = self.terminal.show_cursor();
        let _ = disable_raw_mode();
    }
}

/// Block until a key is pressed and feed it to `handle`
fn next_step(mut handle: impl FnMut(event::KeyEvent) -> Step) -> Result<Step> {
    loop {
        if let Event::Key(key) = event::read().context("Failed to read terminal event")?
            && key.kind == KeyEventKind::Press
        {
            return Ok(handle(key));
        }
    }
}

fn question(message: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled("? ", Style::default().fg(Color::Green)),
        Span::styled(
            message.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])
}

fn answered(message: &str, answer: &str) {
    println!("? {message} {answer}");
}

fn render_select(
    frame: &mut Frame<'_>,
    message: &str,
    state: &SelectState,
    options: &[Line<'static>],
    max_visible: usize,
) {
    let filtered = state.filtered();
    let cursor = state.cursor();
    let scroll_offset = (cursor + 1).saturating_sub(max_visible);

    let mut header = question(message);
    header.spans.push(Span::styled(
        format!("  {}_", state.filter()),
        Style::default().fg(Color::DarkGray),
    ));
    let mut lines = vec![header];

    if filtered.is_empty() {
        lines.push(Line::from(Span::styled(
            "  no matching issues",
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (pos, idx) in filtered
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(max_visible)
    {
        let Some(option) = options.get(*idx) else {
            continue;
        };
        let is_selected = pos == cursor;
        let pointer = if is_selected { "> " } else { "  " };
        let mut spans = vec![Span::styled(pointer, Style::default().fg(Color::Cyan))];
        spans.extend(option.spans.iter().cloned());
        let mut line = Line::from(spans);
        if is_selected {
            line = line.style(Style::default().add_modifier(Modifier::REVERSED));
        }
        lines.push(line);
    }

    lines.push(Line::from(Span::styled(
        "↑/↓ to move, type to filter, Enter to choose, Esc to cancel",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines), frame.area());
}

fn render_input(frame: &mut Frame<'_>, message: &str, state: &InputState) {
    let mut line = question(message);
    line.spans.push(Span::raw(" "));
    line.spans.push(Span::styled(
        format!("{}_", state.value()),
        Style::default().fg(Color::Cyan),
    ));
    frame.render_widget(Paragraph::new(line), frame.area());
}

impl Prompt for TerminalPrompt {
    fn select(&mut self, message: &str, options: &[Line<'static>]) -> Result<String> {
        if options.is_empty() {
            bail!("Nothing to choose from");
        }

        let labels = options.iter().map(crate::choice::style::plain_text).collect();
        let mut state = SelectState::new(labels);
        let max_visible = usize::from(self.max_visible);
        let shown = u16::try_from(options.len().min(max_visible)).unwrap_or(self.max_visible);

        let step = {
            let mut session = Session::start(shown + 2)?;
            loop {
                session.draw(|frame| render_select(frame, message, &state, options, max_visible))?;
                match next_step(|key| state.handle_key(key))? {
                    Step::Continue => {}
                    step => break step,
                }
            }
        };

        if step == Step::Cancel {
            bail!("Selection cancelled");
        }
        let label = state
            .selected_label()
            .context("No option selected")?
            .to_string();
        answered(message, &label);
        Ok(label)
    }

    fn input(&mut self, message: &str, default: &str) -> Result<String> {
        let mut state = InputState::new(default);

        let step = {
            let mut session = Session::start(1)?;
            loop {
                session.draw(|frame| render_input(frame, message, &state))?;
                match next_step(|key| state.handle_key(key))? {
                    Step::Continue => {}
                    step => break step,
                }
            }
        };

        if step == Step::Cancel {
            bail!("Input cancelled");
        }
        answered(message, state.value());
        Ok(state.value().to_string())
    }
}
