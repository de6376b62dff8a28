use crate::app::command_support::{load_runtime, ChatRuntime};
use crate::interpreter::{Interpreter, Session};
use std::fs;
use std::path::Path;

pub fn cmd_exec(args: &[String]) -> Result<String, String> {
    if args.is_empty() {
        return Err("usage: exec <command line>".to_string());
    }
    let runtime = load_runtime()?;
    exec_line(&runtime.interpreter, &args.join(" "))
}

pub fn cmd_script(args: &[String]) -> Result<String, String> {
    if args.len() != 1 {
        return Err("usage: script <path>".to_string());
    }
    let runtime = load_runtime()?;
    run_script_file(&runtime, Path::new(&args[0]))
}

pub fn cmd_whoami() -> Result<String, String> {
    let runtime = load_runtime()?;
    Ok(whoami(&runtime.interpreter))
}

/// One command from the root directory. Error lines fail the command.
pub fn exec_line(interpreter: &Interpreter, line: &str) -> Result<String, String> {
    let (_, output) = interpreter.execute(&Session::new(), line);
    let text = output.rendered().unwrap_or_default();
    if output.is_error() {
        return Err(text);
    }
    Ok(text)
}

pub fn run_script_file(runtime: &ChatRuntime, path: &Path) -> Result<String, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    Ok(run_script(&runtime.interpreter, &raw))
}

/// Runs every line in one session, echoing each behind its prompt.
pub fn run_script(interpreter: &Interpreter, script: &str) -> String {
    let mut session = Session::new();
    let mut transcript = Vec::new();
    for line in script.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        transcript.push(format!("{} {line}", interpreter.prompt(&session)));
        let (next, output) = interpreter.execute(&session, line);
        if let Some(text) = output.rendered() {
            transcript.push(text);
        }
        session = next;
    }
    transcript.join("\n")
}

pub fn whoami(interpreter: &Interpreter) -> String {
    match interpreter.service().caller() {
        Some(identity) if identity.display_name != identity.principal => {
            format!("{} ({})", identity.principal, identity.display_name)
        }
        Some(identity) => identity.principal,
        None => "not signed in".to_string(),
    }
}
