use retrochat::chat::{ChatPolicy, ChatService};
use retrochat::identity::StaticIdentity;
use retrochat::interpreter::{Interpreter, Session};
use retrochat::shared::logging::EventLog;
use retrochat::store::InMemoryChatStore;
use serde_json::Value;
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

fn read_events(path: &std::path::Path) -> Vec<Value> {
    fs::read_to_string(path)
        .expect("read log")
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect()
}

#[test]
fn event_log_appends_json_lines_with_level_and_fields() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("logs/retrochat.log");
    let log = EventLog::to_file(&path);

    log.info("chat_created", &[("chat", Value::from("team"))]);
    log.error("command_failed", &[("verb", Value::from("rmdir"))]);

    let events = read_events(&path);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["level"], "info");
    assert_eq!(events[0]["event"], "chat_created");
    assert_eq!(events[0]["chat"], "team");
    assert!(events[0]["timestamp"].is_i64());
    assert_eq!(events[1]["level"], "error");
}

#[test]
fn disabled_event_log_writes_nothing() {
    let log = EventLog::disabled();
    assert!(log.path().is_none());
    log.info("chat_created", &[]);
}

#[test]
fn interpreter_logs_mutations_and_failures() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("logs/retrochat.log");
    let log = EventLog::to_file(&path);
    let service = ChatService::new(
        Arc::new(InMemoryChatStore::new()),
        Arc::new(StaticIdentity::signed_in("ada@example.com")),
        ChatPolicy::default(),
    )
    .with_log(log.clone());
    let interpreter = Interpreter::new(service).with_log(log);

    let session = Session::new();
    let (session, _) = interpreter.execute(&session, "mkdir team");
    let _ = interpreter.execute(&session, "rmdir ghost");

    let events = read_events(&path);
    let names = events
        .iter()
        .map(|event| event["event"].as_str().unwrap_or_default().to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["chat_created", "command_executed", "command_failed"]);
    assert_eq!(events[2]["verb"], "rmdir");
    assert_eq!(events[2]["error"], "Chat does not exist");
}

#[test]
fn interpreter_logs_usage_errors_as_failures() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("logs/retrochat.log");
    let log = EventLog::to_file(&path);
    let service = ChatService::new(
        Arc::new(InMemoryChatStore::new()),
        Arc::new(StaticIdentity::signed_in("ada@example.com")),
        ChatPolicy::default(),
    );
    let interpreter = Interpreter::new(service).with_log(log);

    let (session, _) = interpreter.execute(&Session::new(), "mkdir");
    let _ = interpreter.execute(&session, "pwd");

    let events = read_events(&path);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["event"], "command_failed");
    assert_eq!(events[0]["verb"], "mkdir");
    assert_eq!(events[0]["error"], "mkdir: missing operand");
    assert_eq!(events[1]["event"], "command_executed");
}
