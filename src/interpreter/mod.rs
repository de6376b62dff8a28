//! Terminal-style command interpreter over the chat service.
//!
//! A line is parsed into a [`Command`], dispatched against the caller's
//! [`Session`], and turned into a [`CommandOutput`]. Handler failures never
//! escape: each becomes one line of error text.

pub mod command;
pub mod dispatch;
pub mod output;
pub mod render;
pub mod session;

pub use command::{parse_command_line, ArgMode, Command, CommandDef, ParsedLine, Verb, COMMANDS};
pub use dispatch::{dispatch, Dispatched};
pub use output::CommandOutput;
pub use session::{CurrentPath, Session, ROOT_PATH};

use crate::chat::ChatService;
use crate::shared::logging::EventLog;
use serde_json::Value;

#[derive(Clone)]
pub struct Interpreter {
    service: ChatService,
    log: EventLog,
}

impl Interpreter {
    pub fn new(service: ChatService) -> Self {
        Self {
            service,
            log: EventLog::disabled(),
        }
    }

    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = log;
        self
    }

    pub fn service(&self) -> &ChatService {
        &self.service
    }

    pub fn principal(&self) -> Option<String> {
        self.service.caller().map(|identity| identity.principal)
    }

    pub fn prompt(&self, session: &Session) -> String {
        render::prompt(self.principal().as_deref(), session)
    }

    /// Runs one input line and returns the next session state with its output.
    pub fn execute(&self, session: &Session, line: &str) -> (Session, CommandOutput) {
        let command = match parse_command_line(line) {
            ParsedLine::Empty => return (session.clone(), CommandOutput::Empty),
            ParsedLine::Unknown(verb) => {
                self.log.info(
                    "command_not_found",
                    &[
                        ("verb", Value::from(verb.as_str())),
                        ("path", Value::from(session.path.as_str())),
                    ],
                );
                return (session.clone(), CommandOutput::CommandNotFound(verb));
            }
            ParsedLine::Command(command) => command,
        };

        let verb = command.verb();
        let result = dispatch(session, &self.service, &command);
        if result.is_failure() {
            let error = match (&result.failure, &result.output) {
                (Some(err), _) => err.to_string(),
                (None, output) => output.rendered().unwrap_or_default(),
            };
            self.log.error(
                "command_failed",
                &[
                    ("verb", Value::from(verb.as_str())),
                    ("path", Value::from(session.path.as_str())),
                    ("error", Value::from(error)),
                ],
            );
        } else {
            self.log.info(
                "command_executed",
                &[
                    ("verb", Value::from(verb.as_str())),
                    ("path", Value::from(session.path.as_str())),
                ],
            );
        }
        (result.session, result.output)
    }
}
