#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Help,
    Pwd,
    Cd,
    Ls,
    History,
    Msg,
    Touch,
    Mkdir,
    Rmdir,
}

/// How a verb consumes the rest of its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgMode {
    None,
    FirstToken,
    Remainder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDef {
    pub verb: Verb,
    pub signature: &'static str,
    pub description: &'static str,
    pub args: ArgMode,
}

pub static COMMANDS: &[CommandDef] = &[
    CommandDef {
        verb: Verb::Help,
        signature: "help",
        description: "",
        args: ArgMode::None,
    },
    CommandDef {
        verb: Verb::Pwd,
        signature: "pwd",
        description: "Prints the current working directory (which is the current chat)",
        args: ArgMode::None,
    },
    CommandDef {
        verb: Verb::Cd,
        signature: "cd <DIR>",
        description: "Changes the current working directory to <DIR> (which is a chat)",
        args: ArgMode::FirstToken,
    },
    CommandDef {
        verb: Verb::Ls,
        signature: "ls",
        description: "Lists the contents of the current directory (which is a list of chats)",
        args: ArgMode::None,
    },
    CommandDef {
        verb: Verb::History,
        signature: "history",
        description: "Lists the history of the current chat",
        args: ArgMode::None,
    },
    CommandDef {
        verb: Verb::Msg,
        signature: "msg <MESSAGE>",
        description: "Sends a message to the current chat",
        args: ArgMode::Remainder,
    },
    CommandDef {
        verb: Verb::Touch,
        signature: "touch <FILE>",
        description: "Adds a member to the current chat",
        args: ArgMode::FirstToken,
    },
    CommandDef {
        verb: Verb::Mkdir,
        signature: "mkdir <DIR>",
        description: "Creates a new chat with the name <DIR>",
        args: ArgMode::FirstToken,
    },
    CommandDef {
        verb: Verb::Rmdir,
        signature: "rmdir <DIR>",
        description: "Removes the chat <DIR>",
        args: ArgMode::FirstToken,
    },
];

impl Verb {
    /// Looks the verb up in [`COMMANDS`] by the bare verb of each signature.
    pub fn parse(raw: &str) -> Option<Self> {
        COMMANDS
            .iter()
            .find(|def| verb_of_signature(def.signature) == raw)
            .map(|def| def.verb)
    }

    pub fn as_str(self) -> &'static str {
        verb_of_signature(self.def().signature)
    }

    pub fn def(self) -> &'static CommandDef {
        COMMANDS
            .iter()
            .find(|def| def.verb == self)
            .unwrap_or(&COMMANDS[0])
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bare verb of a signature: `cd <DIR>` becomes `cd`.
pub fn verb_of_signature(signature: &str) -> &str {
    let end = signature.find('<').unwrap_or(signature.len());
    signature[..end].trim_end()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Pwd,
    Cd { dir: Option<String> },
    Ls,
    History,
    Msg { message: String },
    Touch { member: Option<String> },
    Mkdir { dir: Option<String> },
    Rmdir { dir: Option<String> },
}

impl Command {
    pub fn verb(&self) -> Verb {
        match self {
            Self::Help => Verb::Help,
            Self::Pwd => Verb::Pwd,
            Self::Cd { .. } => Verb::Cd,
            Self::Ls => Verb::Ls,
            Self::History => Verb::History,
            Self::Msg { .. } => Verb::Msg,
            Self::Touch { .. } => Verb::Touch,
            Self::Mkdir { .. } => Verb::Mkdir,
            Self::Rmdir { .. } => Verb::Rmdir,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Empty,
    Command(Command),
    Unknown(String),
}

pub fn parse_command_line(line: &str) -> ParsedLine {
    let line = line.trim();
    if line.is_empty() {
        return ParsedLine::Empty;
    }
    let (raw_verb, rest) = match line.find(char::is_whitespace) {
        Some(idx) => (&line[..idx], line[idx..].trim()),
        None => (line, ""),
    };
    let Some(verb) = Verb::parse(raw_verb) else {
        return ParsedLine::Unknown(raw_verb.to_string());
    };

    let arg = match verb.def().args {
        ArgMode::None => None,
        ArgMode::FirstToken => rest.split_whitespace().next().map(str::to_string),
        ArgMode::Remainder => Some(rest.to_string()),
    };

    let command = match verb {
        Verb::Help => Command::Help,
        Verb::Pwd => Command::Pwd,
        Verb::Cd => Command::Cd { dir: arg },
        Verb::Ls => Command::Ls,
        Verb::History => Command::History,
        Verb::Msg => Command::Msg {
            message: arg.unwrap_or_default(),
        },
        Verb::Touch => Command::Touch { member: arg },
        Verb::Mkdir => Command::Mkdir { dir: arg },
        Verb::Rmdir => Command::Rmdir { dir: arg },
    };
    ParsedLine::Command(command)
}
