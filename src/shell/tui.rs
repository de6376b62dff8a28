use super::{LineKind, ShellAction, ShellState};
use crate::interpreter::{CommandOutput, Interpreter, Session};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

const PROCESSING_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
const UI_POLL_INTERVAL: Duration = Duration::from_millis(60);
const SPINNER_TICK_INTERVAL: Duration = Duration::from_millis(120);
const CURSOR_BLINK_INTERVAL: Duration = Duration::from_millis(500);

struct CommandWorker {
    line: String,
    result_rx: Receiver<(Session, CommandOutput)>,
}

struct TuiState {
    shell: ShellState,
    input: String,
    worker: Option<CommandWorker>,
    spinner_index: usize,
    last_spinner_tick: Instant,
    cursor_visible: bool,
    last_cursor_tick: Instant,
}

impl TuiState {
    fn new() -> Self {
        Self {
            shell: ShellState::new(),
            input: String::new(),
            worker: None,
            spinner_index: 0,
            last_spinner_tick: Instant::now(),
            cursor_visible: true,
            last_cursor_tick: Instant::now(),
        }
    }

    fn spinner_frame(&self) -> &'static str {
        PROCESSING_FRAMES[self.spinner_index % PROCESSING_FRAMES.len()]
    }

    fn advance_spinner_if_needed(&mut self) {
        if self.worker.is_some() && self.last_spinner_tick.elapsed() >= SPINNER_TICK_INTERVAL {
            self.spinner_index = (self.spinner_index + 1) % PROCESSING_FRAMES.len();
            self.last_spinner_tick = Instant::now();
        }
    }

    fn advance_cursor_blink_if_needed(&mut self) {
        if self.last_cursor_tick.elapsed() >= CURSOR_BLINK_INTERVAL {
            self.cursor_visible = !self.cursor_visible;
            self.last_cursor_tick = Instant::now();
        }
    }

    fn cursor_suffix(&self) -> &'static str {
        if self.cursor_visible {
            "█"
        } else {
            " "
        }
    }

    fn status_line(&self) -> String {
        if let Some(worker) = &self.worker {
            return format!("running `{}` {}", worker.line, self.spinner_frame());
        }
        "type a command and press Enter; `exit` or Esc to quit".to_string()
    }
}

pub fn run_shell_tui(interpreter: Interpreter) -> Result<(), String> {
    let mut terminal = setup_terminal()?;
    let mut state = TuiState::new();

    let result = run_event_loop(&mut terminal, &interpreter, &mut state);
    teardown_terminal(&mut terminal)?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    interpreter: &Interpreter,
    state: &mut TuiState,
) -> Result<(), String> {
    loop {
        state.advance_spinner_if_needed();
        state.advance_cursor_blink_if_needed();
        check_worker_result(state)?;
        let prompt = interpreter.prompt(&state.shell.session);
        draw_shell_ui(terminal, &prompt, state)?;

        if !event::poll(UI_POLL_INTERVAL).map_err(|e| format!("failed to poll events: {e}"))? {
            continue;
        }

        let Event::Key(key) = event::read().map_err(|e| format!("failed to read event: {e}"))?
        else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            break;
        }

        match key.code {
            KeyCode::Esc => break,
            KeyCode::Enter => {
                let line = std::mem::take(&mut state.input);
                match state.shell.submit(&prompt, &line) {
                    ShellAction::Exit => break,
                    ShellAction::Nothing => {}
                    ShellAction::Run(line) => spawn_command(state, interpreter, line),
                }
            }
            KeyCode::Backspace => {
                state.input.pop();
            }
            KeyCode::Char(c) => {
                state.input.push(c);
            }
            _ => {}
        }
    }

    Ok(())
}

fn spawn_command(state: &mut TuiState, interpreter: &Interpreter, line: String) {
    let worker_interpreter = interpreter.clone();
    let worker_session = state.shell.session.clone();
    let worker_line = line.clone();
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = worker_interpreter.execute(&worker_session, &worker_line);
        let _ = tx.send(result);
    });

    state.worker = Some(CommandWorker {
        line,
        result_rx: rx,
    });
    state.spinner_index = 0;
    state.last_spinner_tick = Instant::now();
    state.cursor_visible = true;
    state.last_cursor_tick = Instant::now();
}

fn check_worker_result(state: &mut TuiState) -> Result<(), String> {
    let Some(worker) = state.worker.take() else {
        return Ok(());
    };

    match worker.result_rx.try_recv() {
        Ok((session, output)) => state.shell.complete(session, output),
        Err(mpsc::TryRecvError::Empty) => {
            state.worker = Some(worker);
        }
        Err(mpsc::TryRecvError::Disconnected) => {
            return Err(format!(
                "command worker for `{}` disconnected unexpectedly",
                worker.line
            ));
        }
    }

    Ok(())
}

fn scrollback_style(kind: LineKind) -> Style {
    match kind {
        LineKind::System => Style::default().fg(Color::Gray),
        LineKind::Prompt => Style::default().fg(Color::Cyan),
        LineKind::Output => Style::default().fg(Color::Green),
        LineKind::Error => Style::default().fg(Color::Red),
    }
}

fn draw_shell_ui(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    prompt: &str,
    state: &TuiState,
) -> Result<(), String> {
    terminal
        .draw(|frame| {
            let sections = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(8),
                    Constraint::Length(3),
                    Constraint::Length(3),
                ])
                .split(frame.area());

            let lines = state
                .shell
                .scrollback
                .iter()
                .map(|line| Line::styled(line.text.clone(), scrollback_style(line.kind)))
                .collect::<Vec<_>>();
            let visible_rows = sections[0].height.saturating_sub(2) as usize;
            let scroll = lines.len().saturating_sub(visible_rows) as u16;
            let scrollback_widget = Paragraph::new(lines)
                .block(Block::default().title("Retro Chat").borders(Borders::ALL))
                .scroll((scroll, 0))
                .wrap(Wrap { trim: false });
            frame.render_widget(scrollback_widget, sections[0]);

            let status_widget = Paragraph::new(state.status_line()).block(
                Block::default()
                    .title("Status")
                    .borders(Borders::ALL)
                    .border_style(if state.worker.is_some() {
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    }),
            );
            frame.render_widget(status_widget, sections[1]);

            let input_widget = Paragraph::new(Line::from(vec![
                Span::styled(prompt.to_string(), Style::default().fg(Color::Yellow)),
                Span::raw(format!(" {}{}", state.input, state.cursor_suffix())),
            ]))
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(input_widget, sections[2]);
        })
        .map_err(|e| format!("failed to render shell UI: {e}"))?;

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, String> {
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)
        .map_err(|e| format!("failed to enter alternate screen: {e}"))?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| format!("failed to initialize terminal: {e}"))
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<(), String> {
    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)
        .map_err(|e| format!("failed to leave alternate screen: {e}"))?;
    terminal
        .show_cursor()
        .map_err(|e| format!("failed to restore cursor: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{TuiState, CURSOR_BLINK_INTERVAL, PROCESSING_FRAMES};
    use std::time::Instant;

    #[test]
    fn spinner_frame_cycles_across_ascii_frames() {
        let mut state = TuiState::new();
        for (idx, frame) in PROCESSING_FRAMES.iter().enumerate() {
            state.spinner_index = idx;
            assert_eq!(state.spinner_frame(), *frame);
        }
    }

    #[test]
    fn cursor_blink_toggles_visibility_after_interval() {
        let mut state = TuiState::new();
        assert_eq!(state.cursor_suffix(), "█");

        state.last_cursor_tick = Instant::now() - CURSOR_BLINK_INTERVAL;
        state.advance_cursor_blink_if_needed();
        assert_eq!(state.cursor_suffix(), " ");
    }

    #[test]
    fn idle_status_line_explains_how_to_quit() {
        let state = TuiState::new();
        assert!(state.status_line().contains("exit"));
    }
}
