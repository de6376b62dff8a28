use super::command::{Command, Verb};
use super::output::CommandOutput;
use super::render;
use super::session::{CurrentPath, Session, ROOT_PATH};
use crate::chat::{ChatError, ChatService};

/// Result of one dispatched command. `failure` carries the handler error
/// behind an error line, for logging; usage errors have an error line and
/// no handler error.
#[derive(Debug)]
pub struct Dispatched {
    pub session: Session,
    pub output: CommandOutput,
    pub failure: Option<ChatError>,
}

impl Dispatched {
    fn ok(session: Session, output: CommandOutput) -> Self {
        Self {
            session,
            output,
            failure: None,
        }
    }

    fn rejected(session: Session, line: String) -> Self {
        Self {
            session,
            output: CommandOutput::Error(line),
            failure: None,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.failure.is_some() || self.output.is_error()
    }

    fn failed(session: Session, line: String, failure: ChatError) -> Self {
        Self {
            session,
            output: CommandOutput::Error(line),
            failure: Some(failure),
        }
    }
}

pub fn dispatch(session: &Session, service: &ChatService, command: &Command) -> Dispatched {
    match command {
        Command::Help => Dispatched::ok(session.clone(), CommandOutput::text(render::help_text())),
        Command::Pwd => Dispatched::ok(
            session.clone(),
            CommandOutput::text(session.path.as_str()),
        ),
        Command::Cd { dir } => change_directory(session, service, dir.as_deref()),
        Command::Ls => list(session, service),
        Command::History => history(session, service),
        Command::Msg { message } => send_message(session, service, message),
        Command::Touch { member } => add_member(session, service, member.as_deref()),
        Command::Mkdir { dir } => make_chat(session, service, dir.as_deref()),
        Command::Rmdir { dir } => remove_chat(session, service, dir.as_deref()),
    }
}

fn change_directory(session: &Session, service: &ChatService, dir: Option<&str>) -> Dispatched {
    let dir = match dir {
        None | Some("..") | Some(ROOT_PATH) => {
            return Dispatched::ok(session.at_root(), CommandOutput::Empty)
        }
        Some(dir) => dir.strip_prefix('/').unwrap_or(dir),
    };

    match service.list_chats() {
        Ok(chats) if chats.iter().any(|name| name == dir) => {
            Dispatched::ok(Session::in_chat(dir), CommandOutput::Empty)
        }
        Ok(_) => Dispatched::ok(session.clone(), CommandOutput::Empty),
        Err(err) => failure(session.clone(), Verb::Cd, err, generic),
    }
}

fn list(session: &Session, service: &ChatService) -> Dispatched {
    match &session.path {
        CurrentPath::Root => match service.list_chats() {
            Ok(chats) => Dispatched::ok(
                session.clone(),
                CommandOutput::text_or_empty(chats.join(" ")),
            ),
            Err(err) => failure(session.clone(), Verb::Ls, err, generic),
        },
        CurrentPath::InChat(name) => match service.get_chat(name) {
            Ok(chat) => Dispatched::ok(
                session.clone(),
                CommandOutput::text_or_empty(chat.members.join(" ")),
            ),
            Err(err) => stale_or_failure(session, Verb::Ls, name, err),
        },
    }
}

fn history(session: &Session, service: &ChatService) -> Dispatched {
    let Some(name) = session.path.chat_name() else {
        return Dispatched::ok(session.clone(), CommandOutput::Empty);
    };
    match service.get_chat(name) {
        Ok(chat) => Dispatched::ok(
            session.clone(),
            CommandOutput::text_or_empty(render::history_text(&chat.messages)),
        ),
        Err(err) => stale_or_failure(session, Verb::History, name, err),
    }
}

fn send_message(session: &Session, service: &ChatService, message: &str) -> Dispatched {
    let Some(name) = session.path.chat_name() else {
        return Dispatched::ok(session.clone(), CommandOutput::Empty);
    };
    if message.is_empty() {
        return Dispatched::rejected(session.clone(), render::missing_message());
    }
    match service.add_message_to_chat(name, message) {
        Ok(()) => Dispatched::ok(session.clone(), CommandOutput::Empty),
        Err(err) => failure(session.clone(), Verb::Msg, err, |_, _| {
            render::msg_failed(message, name)
        }),
    }
}

fn add_member(session: &Session, service: &ChatService, member: Option<&str>) -> Dispatched {
    let Some(name) = session.path.chat_name() else {
        return Dispatched::ok(session.clone(), CommandOutput::Empty);
    };
    let Some(member) = member else {
        return Dispatched::rejected(session.clone(), render::missing_operand(Verb::Touch));
    };
    match service.add_member_to_chat(name, member) {
        Ok(()) => Dispatched::ok(session.clone(), CommandOutput::Empty),
        Err(err) => failure(session.clone(), Verb::Touch, err, |_, _| {
            render::touch_failed(member, name)
        }),
    }
}

fn make_chat(session: &Session, service: &ChatService, dir: Option<&str>) -> Dispatched {
    let Some(dir) = dir else {
        return Dispatched::rejected(session.clone(), render::missing_operand(Verb::Mkdir));
    };
    match service.create_chat(dir) {
        Ok(_) => Dispatched::ok(session.clone(), CommandOutput::Empty),
        Err(err) => failure(session.clone(), Verb::Mkdir, err, |_, err| {
            render::mkdir_failed(dir, err)
        }),
    }
}

fn remove_chat(session: &Session, service: &ChatService, dir: Option<&str>) -> Dispatched {
    let Some(dir) = dir else {
        return Dispatched::rejected(session.clone(), render::missing_operand(Verb::Rmdir));
    };
    match service.delete_chat(dir) {
        Ok(()) => {
            let next = if session.path.chat_name() == Some(dir) {
                session.at_root()
            } else {
                session.clone()
            };
            Dispatched::ok(next, CommandOutput::Empty)
        }
        Err(err) => failure(session.clone(), Verb::Rmdir, err, |_, _| {
            render::rmdir_failed(dir)
        }),
    }
}

/// The current chat vanished or is no longer visible: report it and go back to root.
fn stale_or_failure(session: &Session, verb: Verb, name: &str, err: ChatError) -> Dispatched {
    if matches!(err, ChatError::NotFound) {
        let line = render::stale_chat(verb, name);
        return Dispatched::failed(session.at_root(), line, err);
    }
    failure(session.clone(), verb, err, generic)
}

fn failure(
    session: Session,
    verb: Verb,
    err: ChatError,
    specific: impl FnOnce(Verb, &ChatError) -> String,
) -> Dispatched {
    let line = render::common_failure(verb, &err).unwrap_or_else(|| specific(verb, &err));
    Dispatched::failed(session, line, err)
}

fn generic(verb: Verb, err: &ChatError) -> String {
    format!("{verb}: {err}")
}
