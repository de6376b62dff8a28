use crate::app::cli::{help_text, parse_cli_verb, CliVerb};

pub mod exec;
pub mod shell;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return shell::cmd_shell();
    }

    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Shell => shell::cmd_shell(),
        CliVerb::Exec => exec::cmd_exec(&args[1..]),
        CliVerb::Script => exec::cmd_script(&args[1..]),
        CliVerb::Whoami => exec::cmd_whoami(),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!("unknown command `{}`", args[0])),
    }
}
