use std::io::Write as _;
use std::path::{Path, PathBuf};

use chatlog::{ChatlogConfig, Cli, Command, Outcome};
use chatlog_core::{Activity, ActivityLogConfig, DuplicatePolicy, Event, Message};
use chrono::DateTime;
use clap::Parser;
use tempfile::TempDir;

fn write_activities(dir: &Path, name: &str, activities: &[Activity]) -> PathBuf {
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(activities).expect("serialize activities");
    std::fs::write(&path, json).expect("write activities");
    path
}

fn sample(dir: &Path) -> PathBuf {
    let ts = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
    write_activities(
        dir,
        "chat.json",
        &[
            Message::new(5, "alice", "hello").at(ts).into(),
            Event::title_changed(2, "Book club").at(ts).into(),
            Message::new(9, "bob", "hi alice").at(ts).into(),
        ],
    )
}

fn run(command: Command) -> (Outcome, String) {
    run_with(command, ActivityLogConfig::default())
}

fn run_with(command: Command, config: ActivityLogConfig) -> (Outcome, String) {
    let mut out = Vec::new();
    let outcome = chatlog::run(&command, config, &mut out).expect("command should succeed");
    (outcome, String::from_utf8(out).expect("utf-8 output"))
}

#[test]
fn test_list_prints_in_index_order() {
    let dir = TempDir::new().unwrap();
    let file = sample(dir.path());

    let (outcome, output) = run(Command::List { file });
    let lines: Vec<_> = output.lines().collect();

    assert_eq!(outcome, Outcome::Done);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("#2 "));
    assert!(lines[1].starts_with("#5 "));
    assert!(lines[2].starts_with("#9 "));
    assert!(lines[2].ends_with("bob: hi alice"));
}

#[test]
fn test_lookup_found_and_missing() {
    let dir = TempDir::new().unwrap();
    let file = sample(dir.path());

    let (outcome, output) = run(Command::Lookup { file: file.clone(), index: 5 });
    assert_eq!(outcome, Outcome::Done);
    assert!(output.trim_end().ends_with("alice: hello"));

    let (outcome, output) = run(Command::Lookup { file, index: 4 });
    assert_eq!(outcome, Outcome::NotFound);
    assert_eq!(output, "no such activity: 4\n");
}

#[test]
fn test_kind() {
    let dir = TempDir::new().unwrap();
    let file = sample(dir.path());

    assert_eq!(run(Command::Kind { file: file.clone(), index: 2 }).1, "event\n");
    assert_eq!(run(Command::Kind { file: file.clone(), index: 9 }).1, "message\n");

    let (outcome, output) = run(Command::Kind { file, index: 99 });
    assert_eq!(outcome, Outcome::NotFound);
    assert_eq!(output, "no such activity: 99\n");
}

#[test]
fn test_merge() {
    let dir = TempDir::new().unwrap();
    let file = sample(dir.path());
    let other = write_activities(
        dir.path(),
        "more.json",
        &[
            Message::new(7, "carol", "late reply").into(),
            Event::member_left(1, "dave").into(),
        ],
    );

    let (outcome, output) = run(Command::Merge { file, other });
    let order: Vec<_> = output
        .lines()
        .map(|l| l.split_whitespace().next().unwrap().to_string())
        .collect();

    assert_eq!(outcome, Outcome::Done);
    assert_eq!(order, vec!["#1", "#2", "#5", "#7", "#9"]);
}

#[test]
fn test_merge_duplicate_follows_policy() {
    let dir = TempDir::new().unwrap();
    let file = sample(dir.path());
    let other = write_activities(dir.path(), "dup.json", &[Message::new(5, "eve", "again").into()]);

    let mut out = Vec::new();
    let command = Command::Merge { file: file.clone(), other: other.clone() };
    let err = chatlog::run(&command, ActivityLogConfig::default(), &mut out).unwrap_err();
    assert!(format!("{:#}", err).contains("duplicate activity index: 5"));

    let (_, output) = run_with(
        Command::Merge { file, other },
        ActivityLogConfig::allow_duplicates(),
    );
    assert_eq!(output.lines().count(), 4);
}

#[test]
fn test_invalid_activity_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let mut out = Vec::new();
    let result = chatlog::run(&Command::List { file: path }, ActivityLogConfig::default(), &mut out);
    assert!(result.is_err());
}

#[test]
fn test_config_file_and_overrides() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("chatlog.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        r#"
[log]
default_level = "info"

[activity_log]
duplicates = "allow"
"#
    )
    .unwrap();

    let config = ChatlogConfig::load(&path).unwrap();
    assert_eq!(config.log.default_level, "info");
    assert_eq!(config.activity_log.duplicates, DuplicatePolicy::Allow);

    let cli = Cli::try_parse_from([
        "chatlog",
        "--config",
        path.to_str().unwrap(),
        "--log-level",
        "debug",
        "list",
        "chat.json",
    ])
    .unwrap();
    let resolved = ChatlogConfig::resolve(&cli).unwrap();
    assert_eq!(resolved.log.default_level, "debug");
    assert_eq!(resolved.activity_log.duplicates, DuplicatePolicy::Allow);
}

#[test]
fn test_cli_parses_negative_index() {
    let cli = Cli::try_parse_from(["chatlog", "lookup", "chat.json", "-3", "--allow-duplicates"]).unwrap();

    assert!(cli.allow_duplicates);
    assert!(matches!(cli.command, Command::Lookup { index: -3, .. }));
    let resolved = ChatlogConfig::resolve(&cli).unwrap();
    assert_eq!(resolved.activity_log.duplicates, DuplicatePolicy::Allow);
}
