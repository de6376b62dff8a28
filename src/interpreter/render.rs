use super::command::{Verb, COMMANDS};
use super::session::Session;
use crate::chat::{ChatError, ChatMessage};

pub const WELCOME_LINES: [&str; 2] = [
    "Welcome to Retro Chat!",
    "Type 'help' to see available commands.",
];

/// `<principal>:<path>$`, with an empty principal when signed out.
pub fn prompt(principal: Option<&str>, session: &Session) -> String {
    format!("{}:{}$", principal.unwrap_or_default(), session.path)
}

pub fn help_text() -> String {
    COMMANDS
        .iter()
        .filter(|def| def.verb != Verb::Help)
        .map(|def| format!("{} - {}", def.signature, def.description))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn history_text(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|message| format!("{}: {}", message.sender, message.msg))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn mkdir_failed(dir: &str, err: &ChatError) -> String {
    let reason = match err {
        ChatError::InvalidName { .. } => "Invalid chat name",
        _ => "Chat exists",
    };
    format!("mkdir: cannot create directory \"{dir}\": {reason}")
}

pub fn rmdir_failed(dir: &str) -> String {
    format!("rmdir: failed to remove \"{dir}\": No such chat")
}

pub fn msg_failed(message: &str, path: &str) -> String {
    format!("msg <MESSAGE>: failed to add message \"{message}\" to chat {path}")
}

pub fn touch_failed(member: &str, path: &str) -> String {
    format!("touch <FILE>: failed to add member \"{member}\" to chat {path}")
}

pub fn stale_chat(verb: Verb, path: &str) -> String {
    format!("{verb}: cannot access \"{path}\": No such chat")
}

pub fn missing_operand(verb: Verb) -> String {
    format!("{verb}: missing operand")
}

pub fn missing_message() -> String {
    "msg: missing message".to_string()
}

/// Failures every verb renders the same way, or `None` for
/// command-specific ones.
pub fn common_failure(verb: Verb, err: &ChatError) -> Option<String> {
    match err {
        ChatError::Unauthorized => Some(format!("{verb}: Unauthorized")),
        ChatError::Store(source) => Some(format!("{verb}: {source}")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{help_text, prompt};
    use crate::interpreter::Session;

    #[test]
    fn help_lists_every_command_but_itself() {
        let help = help_text();
        let lines = help.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 8);
        assert_eq!(
            lines[0],
            "pwd - Prints the current working directory (which is the current chat)"
        );
        assert_eq!(lines[7], "rmdir <DIR> - Removes the chat <DIR>");
        assert!(!help.contains("help"));
    }

    #[test]
    fn prompt_shows_principal_and_path() {
        assert_eq!(
            prompt(Some("ada@example.com"), &Session::new()),
            "ada@example.com:/$"
        );
        assert_eq!(prompt(None, &Session::in_chat("team")), ":team$");
    }
}
