#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Shell,
    Exec,
    Script,
    Whoami,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "shell" => CliVerb::Shell,
        "exec" => CliVerb::Exec,
        "script" => CliVerb::Script,
        "whoami" => CliVerb::Whoami,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  shell                                Open the interactive chat terminal (default)"
            .to_string(),
        "  exec <command line>                  Run one chat command from the root directory"
            .to_string(),
        "  script <path>                        Run each line of a file in one session".to_string(),
        "  whoami                               Show the signed-in principal".to_string(),
        "  help                                 Show this help".to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    let mut lines = cli_help_lines();
    lines.push(String::new());
    lines.push("Chat commands:".to_string());
    lines.extend(
        crate::interpreter::render::help_text()
            .lines()
            .map(|line| format!("  {line}")),
    );
    lines.join("\n")
}
