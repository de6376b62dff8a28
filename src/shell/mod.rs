mod tui;

pub use tui::run_shell_tui;

use crate::interpreter::render::WELCOME_LINES;
use crate::interpreter::{CommandOutput, Session};

pub const SHELL_EXIT_COMMANDS: &[&str] = &["exit", "quit"];
pub const SHELL_CLEAR_COMMAND: &str = "clear";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    System,
    Prompt,
    Output,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollbackLine {
    pub kind: LineKind,
    pub text: String,
}

impl ScrollbackLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellAction {
    Nothing,
    Exit,
    Run(String),
}

/// Scrollback and session of one terminal shell, independent of rendering.
#[derive(Debug, Clone)]
pub struct ShellState {
    pub session: Session,
    pub scrollback: Vec<ScrollbackLine>,
    busy: bool,
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellState {
    pub fn new() -> Self {
        let mut scrollback = WELCOME_LINES
            .iter()
            .map(|line| ScrollbackLine::new(LineKind::System, *line))
            .collect::<Vec<_>>();
        scrollback.push(ScrollbackLine::new(LineKind::System, ""));
        Self {
            session: Session::new(),
            scrollback,
            busy: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn submit(&mut self, prompt: &str, line: &str) -> ShellAction {
        let line = line.trim();
        if SHELL_EXIT_COMMANDS.contains(&line) {
            return ShellAction::Exit;
        }
        if self.busy {
            self.scrollback.push(ScrollbackLine::new(
                LineKind::System,
                "still processing previous command",
            ));
            return ShellAction::Nothing;
        }

        self.scrollback.push(ScrollbackLine::new(
            LineKind::Prompt,
            format!("{prompt} {line}").trim_end().to_string(),
        ));
        if line.is_empty() {
            return ShellAction::Nothing;
        }
        if line == SHELL_CLEAR_COMMAND {
            self.scrollback.clear();
            return ShellAction::Nothing;
        }

        self.busy = true;
        ShellAction::Run(line.to_string())
    }

    pub fn complete(&mut self, session: Session, output: CommandOutput) {
        self.busy = false;
        self.session = session;
        let kind = if output.is_error() {
            LineKind::Error
        } else {
            LineKind::Output
        };
        if let Some(text) = output.rendered() {
            for line in text.lines() {
                self.scrollback.push(ScrollbackLine::new(kind, line));
            }
        }
    }
}
