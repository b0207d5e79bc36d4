//! Scripted REPL conversations

use std::collections::VecDeque;

use truesight_foundation::Result;
use truesight_runtime::{Handled, LineEditor, ReadResult, Repl, Session};

use crate::engine;

struct Script {
    lines: VecDeque<String>,
    completions: Vec<String>,
}

impl Script {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| (*l).to_string()).collect(),
            completions: Vec::new(),
        }
    }
}

impl LineEditor for Script {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(self
            .lines
            .pop_front()
            .map_or(ReadResult::Eof, ReadResult::Line))
    }

    fn add_history(&mut self, _line: &str) {}

    fn set_completions(&mut self, words: Vec<String>) {
        self.completions = words;
    }
}

fn said(handled: Handled) -> String {
    match handled {
        Handled::Say(text) => text,
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn conversation_through_the_repl() {
    let session = Session::new(engine()).with_user(Some("player".to_string()));
    let mut repl = Repl::with_editor(Script::new(&[]), session).without_banner();

    assert_eq!(
        said(repl.handle("What is the cooldown of Glimpse?").unwrap()),
        "The cooldown of Glimpse is 60, 46, 32, 18 seconds. Any other ability?"
    );
    assert!(said(repl.handle(":token").unwrap()).contains(r#""context":"ability-detail""#));

    assert_eq!(
        said(repl.handle("What about Hex?").unwrap()),
        "The cooldown of Hex is 30, 24, 18, 12 seconds. Any others?"
    );

    assert_eq!(said(repl.handle(":reset").unwrap()), "Conversation reset.");
    assert_eq!(said(repl.handle(":token").unwrap()), "(none)");

    let stats = said(repl.handle(":stats").unwrap());
    assert!(stats.contains("turns: 2"));
    assert!(stats.contains("answered: 2"));
    assert_eq!(repl.session().stats().users.len(), 1);
}

#[test]
fn pasted_token_resumes_conversation() {
    let mut repl = Repl::with_editor(Script::new(&[]), Session::new(engine())).without_banner();
    let token = r#"{"version":1,"context":"counters","usage":1,"character":"Meepo"}"#;
    repl.handle(&format!(":token {token}")).unwrap();

    assert_eq!(
        said(repl.handle("What about Lion?").unwrap()),
        "Lifestealer and Queen of Pain are good against Lion. Any others?"
    );
}

#[test]
fn goodbye_clears_token_and_keeps_running() {
    let mut repl = Repl::with_editor(Script::new(&[]), Session::new(engine())).without_banner();
    repl.handle("Who counters Meepo?").unwrap();
    repl.handle("no").unwrap();
    assert_eq!(said(repl.handle("no").unwrap()), "Goodbye");
    assert_eq!(repl.session().token(), None);

    assert!(said(repl.handle("Who counters Lion?").unwrap()).starts_with("Lifestealer"));
}

#[test]
fn scripted_run_stops_at_quit() {
    let script = Script::new(&["Who counters Meepo?", "", ":quit", "Who counters Lion?"]);
    let mut repl = Repl::with_editor(script, Session::new(engine())).without_banner();
    repl.run().unwrap();
    assert_eq!(repl.session().turns(), 1);
}

#[test]
fn unknown_command_is_an_error() {
    let mut repl = Repl::with_editor(Script::new(&[]), Session::new(engine())).without_banner();
    assert!(repl.handle(":teleport").is_err());
    assert!(matches!(repl.handle("   ").unwrap(), Handled::Silent));
    assert!(matches!(repl.handle(":q").unwrap(), Handled::Quit));
}
