use crate::app::command_support::load_runtime;
use crate::shell::run_shell_tui;
use serde_json::Value;

pub fn cmd_shell() -> Result<String, String> {
    let runtime = load_runtime()?;
    let principal = runtime.interpreter.principal();
    runtime.log.info(
        "shell_started",
        &[(
            "principal",
            principal.clone().map(Value::from).unwrap_or(Value::Null),
        )],
    );

    let result = run_shell_tui(runtime.interpreter);
    runtime
        .log
        .info("shell_ended", &[("ok", Value::from(result.is_ok()))]);
    result?;

    Ok(format!(
        "session ended for {}",
        principal.as_deref().unwrap_or("signed-out user")
    ))
}
