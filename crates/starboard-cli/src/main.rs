use clap::{Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "starboard", version, about = "Star Board reward token CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new board with the setup wizard
    Setup {
        #[command(flatten)]
        args: commands::setup::SetupArgs,
    },
    /// Print the board
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add one star
    Add,
    /// Mark a star earned, or not earned again
    Toggle {
        /// Star number as shown by `show` (starting at 1)
        row: usize,
    },
    /// Delete a star
    Remove {
        /// Star number as shown by `show` (starting at 1)
        row: usize,
    },
    /// Clear the board and run the setup wizard again
    Clear {
        /// Do not ask for confirmation
        #[arg(long, short)]
        yes: bool,
        #[command(flatten)]
        setup: commands::setup::SetupArgs,
    },
    /// Interactive live board
    Session,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a shell completion script
    Completions {
        shell: Shell,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("STARBOARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Setup { args } => commands::setup::run(args),
        Commands::Show { json } => commands::board::show(json),
        Commands::Add => commands::board::add(),
        Commands::Toggle { row } => commands::board::toggle(row),
        Commands::Remove { row } => commands::board::remove(row),
        Commands::Clear { yes, setup } => commands::board::clear(yes, setup),
        Commands::Session => commands::session::run(),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
