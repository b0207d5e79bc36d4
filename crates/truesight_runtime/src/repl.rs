//! The interactive REPL.
//!
//! Every line is either a question, sent to the engine with the current
//! token, or a meta-command starting with `:`.

use std::fmt::Write as _;
use std::io::{self, Write};

use truesight_foundation::{Error, ErrorKind, Result};

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::Session;

/// What the REPL should do after handling a line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Handled {
    /// Print this text and keep going.
    Say(String),
    /// Nothing to print.
    Silent,
    /// Leave the loop.
    Quit,
}

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    editor: E,
    session: Session,
    show_banner: bool,
    prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, session))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(mut editor: E, session: Session) -> Self {
        let mut completions = session.known_names();
        completions.extend(COMMANDS.iter().map(|(name, _)| (*name).to_string()));
        editor.set_completions(completions);
        Self {
            editor,
            session,
            show_banner: true,
            prompt: "truesight> ".to_string(),
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the REPL loop until EOF or `:quit`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
            println!("{}", self.session.greet().text());
        }

        loop {
            let line = match self.editor.read_line(&self.prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => continue,
                ReadResult::Eof => break,
            };
            if !line.trim().is_empty() {
                self.editor.add_history(&line);
            }

            match self.handle(&line) {
                Ok(Handled::Say(text)) => println!("{text}"),
                Ok(Handled::Silent) => {}
                Ok(Handled::Quit) => break,
                Err(e) => Self::print_error(&e),
            }
            let _ = io::stdout().flush();
        }

        Ok(())
    }

    /// Handles one line of input.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown or malformed meta-commands.
    pub fn handle(&mut self, line: &str) -> Result<Handled> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Handled::Silent);
        }
        if let Some(command) = line.strip_prefix(':') {
            return self.command(command);
        }

        let outcome = self.session.ask(line);
        Ok(Handled::Say(outcome.text()))
    }

    fn command(&mut self, command: &str) -> Result<Handled> {
        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map_or((command, ""), |(name, arg)| (name, arg.trim()));

        match name {
            "q" | "quit" | "exit" => Ok(Handled::Quit),
            "help" | "h" => Ok(Handled::Say(help_text())),
            "reset" => {
                self.session.reset();
                Ok(Handled::Say("Conversation reset.".to_string()))
            }
            "token" if arg.is_empty() => Ok(Handled::Say(
                self.session.token().unwrap_or("(none)").to_string(),
            )),
            "token" => {
                self.session.set_token(Some(arg.to_string()));
                Ok(Handled::Say("Token set.".to_string()))
            }
            "stats" => Ok(Handled::Say(self.stats_text())),
            other => Err(Error::new(ErrorKind::InvalidData(format!(
                "unknown command :{other} (try :help)"
            )))),
        }
    }

    fn stats_text(&self) -> String {
        let stats = self.session.stats();
        let mut out = format!(
            "turns: {}\nanswered: {}\nnot understood: {}\n",
            self.session.turns(),
            stats.answered,
            stats.failed
        );
        for (responder, count) in &stats.responders {
            let _ = writeln!(out, "  {responder}: {count}");
        }
        if !stats.feedback.is_empty() {
            let _ = writeln!(out, "feedback: {}", stats.feedback.len());
        }
        out.truncate(out.trim_end().len());
        out
    }

    fn print_error(error: &Error) {
        eprintln!("\x1b[31mError: {error}\x1b[0m");
    }

    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;35m");
        println!("  _____                      _       _     _   ");
        println!(" |_   _| __ _   _  ___  ___(_) __ _| |__ | |_ ");
        println!("   | || '__| | | |/ _ \\/ __| |/ _` | '_ \\| __|");
        println!("   | || |  | |_| |  __/\\__ \\ | (_| | | | | |_ ");
        println!("   |_||_|   \\__,_|\\___||___/_|\\__, |_| |_|\\__|");
        println!("                              |___/           ");
        println!("\x1b[0m");
        println!("Truesight v{}", env!("CARGO_PKG_VERSION"));
        println!("Ask a question, or type :help. Use Ctrl+D to exit.\n");

        let _ = io::stdout().flush();
    }
}

const COMMANDS: &[(&str, &str)] = &[
    (":token", "show the conversation token (or `:token <value>` to set it)"),
    (":reset", "forget the current conversation"),
    (":stats", "show usage counts for this session"),
    (":help", "show this help"),
    (":quit", "leave the REPL"),
];

fn help_text() -> String {
    let mut out = String::from("Commands:");
    for (name, description) in COMMANDS {
        let _ = write!(out, "\n  {name:<8} {description}");
    }
    out
}
