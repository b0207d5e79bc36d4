//! Truesight CLI entry point.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::info;
use truesight_dialogue::{Engine, LogReporter};
use truesight_runtime::config::parse_seed;
use truesight_runtime::{DataSource, Repl, RuntimeConfig, Session, init_logging, serialize};
use truesight_store::MemoryStore;

/// CLI options parsed from arguments.
#[derive(Default)]
struct CliOptions {
    data: Option<PathBuf>,
    snapshot: Option<PathBuf>,
    export_snapshot: Option<PathBuf>,
    ask: Option<String>,
    token: Option<String>,
    user: Option<String>,
    seed: Option<u64>,
    json_log: bool,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, Box<dyn std::error::Error>> {
    let mut options = CliOptions::default();
    let mut args = args.into_iter().skip(1);

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("{flag} requires a value"))
        };
        match arg.as_str() {
            "-h" | "--help" => options.show_help = true,
            "-V" | "--version" => options.show_version = true,
            "--json-log" => options.json_log = true,
            "--data" => options.data = Some(PathBuf::from(value("--data")?)),
            "--snapshot" => options.snapshot = Some(PathBuf::from(value("--snapshot")?)),
            "--export-snapshot" => {
                options.export_snapshot = Some(PathBuf::from(value("--export-snapshot")?));
            }
            "--ask" => options.ask = Some(value("--ask")?),
            "--token" => options.token = Some(value("--token")?),
            "--user" => options.user = Some(value("--user")?),
            "--seed" => options.seed = Some(parse_seed(&value("--seed")?)?),
            other => return Err(format!("unknown option: {other}").into()),
        }
    }

    Ok(options)
}

fn configure(options: &CliOptions) -> Result<RuntimeConfig, Box<dyn std::error::Error>> {
    let mut config = RuntimeConfig::from_env()?.with_json_log(options.json_log);
    if let Some(path) = &options.data {
        config = config.with_data(DataSource::Json(path.clone()));
    }
    if let Some(path) = &options.snapshot {
        config = config.with_data(DataSource::Snapshot(path.clone()));
    }
    if let Some(user) = &options.user {
        config = config.with_user(user.clone());
    }
    if let Some(seed) = options.seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_args(args)?;

    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.show_version {
        println!("truesight {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = configure(&options)?;
    init_logging(&config.log)?;

    let store = load(&config.data)?;
    if let Some(path) = &options.export_snapshot {
        serialize::save_snapshot(&store, path)?;
        info!(path = %path.display(), "snapshot written");
        return Ok(());
    }

    let engine = Engine::new(Arc::new(store)).with_config(config.engine.clone());

    // One-shot mode: answer, then print the token for the next call.
    if let Some(question) = &options.ask {
        let outcome = engine.respond(
            Some(question),
            options.token.as_deref(),
            config.user.as_deref(),
            &LogReporter,
        );
        println!("{}", outcome.text());
        if let Some(token) = outcome.token() {
            println!("token: {token}");
        }
        return Ok(());
    }

    let session = Session::new(engine)
        .with_user(config.user.clone())
        .with_token(options.token.clone());
    let mut repl = Repl::new(session)?;
    repl.run()?;
    println!("\nGoodbye!");
    Ok(())
}

fn load(source: &DataSource) -> Result<MemoryStore, Box<dyn std::error::Error>> {
    let store = source.load()?;
    info!(
        source = source.path().map_or_else(|| "bundled".to_string(), |p| p.display().to_string()),
        characters = store.character_count(),
        abilities = store.ability_count(),
        matchups = store.matchup_count(),
        "knowledge base loaded"
    );
    Ok(store)
}

fn print_help() {
    println!(
        "\x1b[1mTruesight\x1b[0m - Answers questions about heroes, abilities and matchups

\x1b[1mUSAGE:\x1b[0m
    truesight [OPTIONS]

\x1b[1mOPTIONS:\x1b[0m
    -h, --help                 Print help information
    -V, --version              Print version information
    --data PATH                Load the knowledge base from a JSON file
    --snapshot PATH            Load the knowledge base from a MessagePack snapshot
    --export-snapshot PATH     Write the loaded knowledge base as a snapshot and exit
    --ask QUESTION             Answer one question and exit
    --token TOKEN              Conversation token from a previous answer
    --user ID                  User identifier for usage reporting
    --seed N                   Seed for sample questions
    --json-log                 Log as JSON lines

\x1b[1mENVIRONMENT:\x1b[0m
    TRUESIGHT_DATA             Knowledge base file (.msgpack or .mpk for snapshots)
    TRUESIGHT_SEED             Seed for sample questions
    TRUESIGHT_USER             User identifier
    RUST_LOG                   Log filter (default: truesight=info)

\x1b[1mEXAMPLES:\x1b[0m
    truesight                                     Start the interactive REPL
    truesight --ask \"Who counters Meepo?\"         Answer one question
    truesight --data heroes.json --export-snapshot heroes.msgpack

\x1b[1mREPL COMMANDS:\x1b[0m
    :token [TOKEN]       Show or set the conversation token
    :reset               Forget the current conversation
    :stats               Show usage counts
    :help                Show commands
    :quit                Exit (or Ctrl+D)"
    );
}
