//! Terminal input.
//!
//! Reads happen on a worker thread, one per request from the command loop.
//! The worker and the signal listener both post [`Event`]s into one channel,
//! so the loop sees a termination signal either between commands or in place
//! of the answer to a pending prompt, never in the middle of a mutation.
//!
//! Editing a default on a terminal puts it in raw mode for the duration of the
//! read. A signal that arrives meanwhile ends the session while the worker is
//! still blocked in that read, so raw mode is never undone and the shell may
//! come back without echo (`reset` fixes it). [`Console::left_terminal_raw`]
//! reports that case so the caller can say so.

use console::Term;
use std::io::{self, IsTerminal, Write};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Line(String),
    Eof,
    /// Ctrl-C while the terminal was in raw mode
    Interrupted,
    /// SIGINT or SIGTERM
    Shutdown,
}

/// Why input stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cancel {
    Eof,
    Shutdown,
}

/// Line-editing abstraction used by the command handlers.
///
/// Both methods return `None` once input is cancelled (end of input or a
/// shutdown request); handlers must then return without changing anything.
pub trait Prompter {
    fn prompt(&mut self, label: &str) -> Option<String>;

    /// Ask for a value, starting from `default`. Accepting without edits
    /// yields `default`.
    fn prompt_with_default(&mut self, label: &str, default: &str) -> Option<String>;
}

enum Request {
    Line,
    Edit { default: String },
}

pub struct Console {
    requests: Sender<Request>,
    events: Receiver<Event>,
    interactive: bool,
    cancelled: Option<Cancel>,
    /// A terminal edit was in progress when input stopped
    editing: bool,
}

impl Console {
    /// Start the input worker. The returned sender lets other event sources
    /// (the signal listener) reach the command loop.
    pub fn start() -> (Self, Sender<Event>) {
        let (event_tx, event_rx) = mpsc::channel();
        let (request_tx, request_rx) = mpsc::channel();
        let interactive = io::stdin().is_terminal();

        let worker_events = event_tx.clone();
        thread::spawn(move || input_worker(request_rx, worker_events, interactive));

        let console = Self {
            requests: request_tx,
            events: event_rx,
            interactive,
            cancelled: None,
            editing: false,
        };
        (console, event_tx)
    }

    pub fn cancelled(&self) -> Option<Cancel> {
        self.cancelled
    }

    /// True when a shutdown interrupted an in-place terminal edit.
    pub fn left_terminal_raw(&self) -> bool {
        self.editing && self.cancelled == Some(Cancel::Shutdown)
    }

    /// Wait for the next command line.
    pub fn next_command(&mut self) -> Option<String> {
        if self.interactive {
            show_label("todo> ");
        }
        self.read(Request::Line)
    }

    fn read(&mut self, request: Request) -> Option<String> {
        if self.cancelled.is_some() {
            return None;
        }
        let editing = self.interactive && matches!(request, Request::Edit { .. });
        if self.requests.send(request).is_err() {
            self.cancelled = Some(Cancel::Eof);
            return None;
        }
        self.editing = editing;
        match self.events.recv() {
            Ok(Event::Line(line)) => {
                self.editing = false;
                Some(line)
            }
            Ok(Event::Eof) | Err(_) => {
                self.cancelled = Some(Cancel::Eof);
                None
            }
            Ok(Event::Interrupted) | Ok(Event::Shutdown) => {
                self.cancelled = Some(Cancel::Shutdown);
                None
            }
        }
    }
}

impl Prompter for Console {
    fn prompt(&mut self, label: &str) -> Option<String> {
        show_label(&format!("{}: ", label));
        self.read(Request::Line)
    }

    fn prompt_with_default(&mut self, label: &str, default: &str) -> Option<String> {
        if self.interactive {
            show_label(&format!("{}: ", label));
        } else {
            show_label(&format!("{} [{}]: ", label, default));
        }
        self.read(Request::Edit {
            default: default.to_string(),
        })
    }
}

fn show_label(label: &str) {
    let mut stdout = io::stdout();
    let _ = write!(stdout, "{}", label);
    let _ = stdout.flush();
}

fn input_worker(requests: Receiver<Request>, events: Sender<Event>, interactive: bool) {
    let term = Term::stdout();
    for request in requests {
        let event = match request {
            Request::Line => read_stdin_line(),
            // On a terminal the default is pre-filled and editable in place
            Request::Edit { default } if interactive => {
                match term.read_line_initial_text(&default) {
                    Ok(line) => Event::Line(line),
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => Event::Interrupted,
                    Err(e) => {
                        tracing::debug!(error = %e, "terminal read failed");
                        Event::Eof
                    }
                }
            }
            Request::Edit { default } => match read_stdin_line() {
                Event::Line(line) if line.trim().is_empty() => Event::Line(default),
                other => other,
            },
        };
        if events.send(event).is_err() {
            break;
        }
    }
}

fn read_stdin_line() -> Event {
    let mut buf = String::new();
    loop {
        match io::stdin().read_line(&mut buf) {
            Ok(0) => return Event::Eof,
            Ok(_) => return Event::Line(buf.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::debug!(error = %e, "stdin read failed");
                return Event::Eof;
            }
        }
    }
}
