//! `staffdesk`: terminal front end for the employee service.
//!
//! Each command is a navigation to one of the client routes and passes the
//! same guard the browser build uses. The token lives in a JSON session file
//! between runs.

mod commands;


use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::{Args, Parser, Subcommand};
use staffdesk_client::state::storage::FileStorage;
use staffdesk_client::{ApiClient, ApiError, ClientConfig, ConfigError, Navigator};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("sign in first: staffdesk login <employee-id>")]
    SignInRequired,
    #[error("no page at {0}")]
    NotFound(String),
    #[error("navigation to {0} was blocked")]
    Blocked(String),
    #[error("cursor {0:?} repeated; stopping pagination")]
    CursorLoop(String),
    #[error("no per-user data directory; pass --session-file")]
    NoDataDir,
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "staffdesk", about = "Employee and position management client")]
struct Cli {
    /// Backend origin. Falls back to `STAFFDESK_API_URL`, then the built-in default.
    #[arg(long, env = "STAFFDESK_API_URL")]
    api_url: Option<String>,

    /// Where the session token is kept between runs.
    #[arg(long, env = "STAFFDESK_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with an employee id and keep the returned token.
    Login { id: String },
    /// Forget the stored token.
    Logout,
    /// Show whether a token is stored.
    Status,
    /// Navigate to a route and print what it shows.
    Open { path: String },
    Employees(EmployeesCommand),
    Positions(PositionsCommand),
}

#[derive(Args, Debug)]
struct EmployeesCommand {
    #[command(subcommand)]
    command: EmployeesSubcommand,
}

#[derive(Subcommand, Debug)]
enum EmployeesSubcommand {
    List(ListArgs),
    Get {
        id: String,
    },
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        position_name: String,
        #[arg(long)]
        salary: i64,
    },
    Update {
        id: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        position_id: Uuid,
    },
    Delete {
        id: String,
    },
}

#[derive(Args, Debug)]
struct PositionsCommand {
    #[command(subcommand)]
    command: PositionsSubcommand,
}

#[derive(Subcommand, Debug)]
enum PositionsSubcommand {
    List(ListArgs),
    Get {
        id: String,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        salary: i64,
    },
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        salary: i64,
    },
    Delete {
        id: String,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct ListArgs {
    /// Resume from a cursor returned by a previous page.
    #[arg(long)]
    cursor: Option<String>,

    /// Follow cursors until the last page.
    #[arg(long, default_value_t = false)]
    all: bool,
}

/// Hard redirects cannot reload a terminal; tell the user to start over.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn hard_redirect(&self, path: &str) {
        tracing::debug!(path, "hard redirect");
        eprintln!("session expired or rejected; sign in again with `staffdesk login <employee-id>`");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(cli.api_url.as_deref())?;
    let session_file = match cli.session_file {
        Some(path) => path,
        None => default_session_file()?,
    };
    tracing::debug!(api = %config.api_base_url, session_file = %session_file.display(), "starting");

    let storage = Rc::new(FileStorage::new(session_file));
    let api = ApiClient::from_config(&config, storage, Rc::new(TerminalNavigator))?;

    match cli.command {
        Command::Login { id } => commands::login(&api, &id).await,
        Command::Logout => {
            commands::logout(&api);
            Ok(())
        }
        Command::Status => commands::status(&api),
        Command::Open { path } => commands::open(&api, &path).await,
        Command::Employees(employees) => commands::employees(&api, employees.command).await,
        Command::Positions(positions) => commands::positions(&api, positions.command).await,
    }
}

fn resolve_config(api_url: Option<&str>) -> Result<ClientConfig, CliError> {
    let config = ClientConfig::from_env()?;
    Ok(match api_url {
        Some(url) => config.with_api_base_url(url),
        None => config,
    })
}

/// `session.json` in the platform's per-user data directory.
fn default_session_file() -> Result<PathBuf, CliError> {
    let dirs = directories::ProjectDirs::from("", "", "staffdesk").ok_or(CliError::NoDataDir)?;
    Ok(dirs.data_local_dir().join(SESSION_FILE_NAME))
}
