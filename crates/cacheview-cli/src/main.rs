mod scheduler;

use anyhow::Result;
use cacheview_client::{HttpApi, DEFAULT_BASE_URL};
use cacheview_core::{ContainerId, InputId, MemorySurface, PresenterConfig, ResultPresenter};
use clap::{Parser, Subcommand};
use scheduler::TokioScheduler;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use tokio::task::LocalSet;
use tracing_subscriber::EnvFilter;

type Presenter = ResultPresenter<MemorySurface, HttpApi, TokioScheduler>;

#[derive(Parser)]
#[command(name = "cacheview")]
#[command(about = "cacheview - see whether answers come from the cache or the database", long_about = None)]
struct Cli {
    /// Backend base URL
    #[arg(long, env = "CACHEVIEW_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the slow operation
    Operation {
        /// Operation parameter (empty sends "default")
        param: Option<String>,
    },

    /// Look up a user
    User {
        /// Numeric user id (empty requests user 1)
        id: Option<String>,
    },

    /// Flush the backend cache
    Clear,
}

#[derive(Debug, PartialEq)]
enum Command {
    Operation(String),
    User(String),
    Clear,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (cmd, rest) = trimmed
        .split_once(char::is_whitespace)
        .map(|(c, r)| (c, r.trim()))
        .unwrap_or((trimmed, ""));

    let command = match cmd.to_lowercase().as_str() {
        "operation" | "op" | "o" => Command::Operation(rest.to_string()),
        "user" | "u" => Command::User(rest.to_string()),
        "clear" | "c" => Command::Clear,
        "help" | "h" | "?" => Command::Help,
        "exit" | "quit" | "q" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    };
    Some(command)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!(base_url = %cli.base_url, "Using backend");

    let presenter = ResultPresenter::new(
        Rc::new(MemorySurface::new()),
        HttpApi::new(&cli.base_url),
        TokioScheduler,
        PresenterConfig::default(),
    );

    LocalSet::new()
        .run_until(async move {
            match cli.command {
                Some(Commands::Operation { param }) => {
                    run(&presenter, Command::Operation(param.unwrap_or_default())).await
                }
                Some(Commands::User { id }) => {
                    run(&presenter, Command::User(id.unwrap_or_default())).await
                }
                Some(Commands::Clear) => run(&presenter, Command::Clear).await,
                None => run_interactive(&presenter).await?,
            }
            Ok::<(), anyhow::Error>(())
        })
        .await
}

async fn run(presenter: &Presenter, command: Command) {
    let surface = presenter.surface();
    match command {
        Command::Operation(param) => {
            surface.set_input(InputId::Param, param);
            presenter.run_operation().await;
            print_panel(surface, ContainerId::OperationResult);
        }
        Command::User(id) => {
            surface.set_input(InputId::UserId, id);
            presenter.get_user().await;
            print_panel(surface, ContainerId::UserResult);
        }
        Command::Clear => {
            presenter.clear_cache().await;
            print_panel(surface, ContainerId::CacheStatus);
        }
        Command::Help => display_help(),
        Command::Quit => {}
        Command::Unknown(cmd) => {
            println!("Unknown command: {}. Type 'help' for available commands.", cmd);
        }
    }
}

async fn run_interactive(presenter: &Presenter) -> Result<()> {
    display_welcome();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        match parse_command(&line) {
            None => continue,
            Some(Command::Quit) => {
                println!("  Goodbye!");
                break;
            }
            Some(command) => run(presenter, command).await,
        }
    }

    Ok(())
}

fn print_panel(surface: &MemorySurface, container: ContainerId) {
    let panel = surface.panel(container);
    println!();
    println!("  [{}]", container.dom_id());
    if panel.is_empty() {
        println!("  (empty)");
    }
    for line in panel.to_string().lines() {
        println!("  {}", line);
    }
    println!();
}

fn display_welcome() {
    println!();
    println!("  cacheview");
    println!();
    println!("  Each answer is tagged with where it came from:");
    println!("  [source-cache] for cache hits, [source-db] for fresh lookups.");
    println!();
    println!("  operation, op [param]  # Run the slow operation (default param: \"default\")");
    println!("  user, u [id]           # Look up a user (default id: 1)");
    println!("  clear, c               # Flush the backend cache");
    println!("  help                   # Show all command options");
    println!("  exit, quit, q          # Leave");
    println!();
}

fn display_help() {
    println!();
    println!("Available Commands:");
    println!("  operation, op [param]  Run the slow operation; repeat it to see a cache hit");
    println!("  user, u [id]           Look up a user by numeric id");
    println!("  clear, c               Flush the backend cache and empty both result panels");
    println!("  help, h                Show this help message");
    println!("  exit, quit, q          Leave");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("   "), None);
        assert_eq!(parse_command("op"), Some(Command::Operation(String::new())));
        assert_eq!(
            parse_command("op  hello world \n"),
            Some(Command::Operation("hello world".into()))
        );
        assert_eq!(parse_command("USER 7"), Some(Command::User("7".into())));
        assert_eq!(parse_command("c"), Some(Command::Clear));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("nope"), Some(Command::Unknown("nope".into())));
    }
}
