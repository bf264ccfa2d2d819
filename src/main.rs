mod api;
mod cli;
mod config;
mod display;
mod error;
mod models;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pulselog", version)]
#[command(about = "Create and query time-logging pulses on monday.com boards", long_about = None)]
struct Cli {
    /// Show full error details and debug logs
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the configuration files needed by the other commands
    ///
    /// Writes a template user configuration file (empty api_access_token and
    /// logging_user_id) when none exists yet.
    Setup,
    /// Fetch the latest boards.toml configuration
    #[command(visible_alias = "u")]
    Update,
    /// List the logging user's items on a month's board
    #[command(visible_alias = "gbi")]
    GetBoardItems {
        /// Month as yyyy-mm (defaults to the current month)
        month: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Total the logging user's hours per group on a month's board
    #[command(visible_alias = "gbis")]
    GetBoardItemSummary {
        /// Month as yyyy-mm (defaults to the current month)
        month: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Create one log entry
    #[command(visible_alias = "co")]
    CreateOne {
        /// Day as yyyy-mm-dd
        date: String,

        /// Item description
        description: String,

        /// Hours worked, e.g. 1.5
        #[arg(allow_hyphen_values = true)]
        hours: String,
    },
    /// Print the pulse link for a pulse id
    #[command(visible_alias = "pl")]
    PulseLink {
        pulse_id: u64,
    },
    /// (Admin) print board information by id to populate boards.toml
    #[command(visible_alias = "agbid")]
    AdminGetBoardById {
        board_id: u64,

        /// Month key (yyyy-mm) for the generated stub
        #[arg(long)]
        month: Option<String>,
    },
}

fn init_tracing(debug: bool) {
    let level = if debug { "pulselog=debug,warn" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("PULSELOG_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let result = match &cli.command {
        Commands::Setup => cli::setup::run(),
        Commands::Update => cli::update::run(),
        Commands::GetBoardItems { month, json } => cli::items::run_list(month.as_deref(), *json),
        Commands::GetBoardItemSummary { month, json } => {
            cli::items::run_summary(month.as_deref(), *json)
        }
        Commands::CreateOne {
            date,
            description,
            hours,
        } => cli::create::run(date, description, hours),
        Commands::PulseLink { pulse_id } => cli::pulse::run(*pulse_id),
        Commands::AdminGetBoardById { board_id, month } => {
            cli::admin::run(*board_id, month.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e.render(cli.debug));
        std::process::exit(1);
    }
}
