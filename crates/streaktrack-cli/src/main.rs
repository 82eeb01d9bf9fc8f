use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "streaktrack-cli", version, about = "Streaktrack CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User management
    User {
        #[command(subcommand)]
        action: commands::user::UserAction,
    },
    /// Log or check today's comment
    Comment {
        #[command(subcommand)]
        action: commands::comment::CommentAction,
    },
    /// Streak status and badges
    Status {
        #[command(subcommand)]
        action: commands::status::StatusAction,
    },
    /// Top streak holders
    Leaderboard {
        /// Number of rows to show (defaults to the configured size)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::User { action } => commands::user::run(action),
        Commands::Comment { action } => commands::comment::run(action),
        Commands::Status { action } => commands::status::run(action),
        Commands::Leaderboard { limit } => commands::leaderboard::run(limit),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
