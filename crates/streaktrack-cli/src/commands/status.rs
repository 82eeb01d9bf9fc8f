use clap::Subcommand;
use streaktrack_core::{Config, StatusView, StoreError, StreakEngine, UserStore};

#[derive(Subcommand)]
pub enum StatusAction {
    /// Full status: streak, progress and badge checklist
    Show {
        /// User name
        name: String,
        /// Emit the status view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Badge checklist only
    Badges {
        /// User name
        name: String,
    },
}

fn build_view(name: &str) -> Result<StatusView, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let engine = StreakEngine::with_window(config.window);
    let store = UserStore::open()?;
    let record = store
        .fetch_user(name)?
        .ok_or_else(|| StoreError::UnknownUser(name.to_string()))?;
    let eligibility = engine.evaluate(&record, chrono::Utc::now());
    Ok(StatusView::build(
        &record,
        eligibility,
        config.window,
        &config.tiers,
    ))
}

fn print_badges(view: &StatusView) {
    println!("Badges:");
    for badge in &view.badges {
        if badge.unlocked {
            println!("  [x] {} ({} days) -- unlocked", badge.label, badge.threshold);
        } else {
            println!(
                "  [ ] {} ({} days) -- {} day(s) to go",
                badge.label,
                badge.threshold,
                badge.days_to_go.unwrap_or(badge.threshold)
            );
        }
    }
}

pub fn run(action: StatusAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StatusAction::Show { name, json } => {
            let view = build_view(&name)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
                return Ok(());
            }

            println!(
                "{}: streak {} day(s), total logged {}",
                view.name, view.streak, view.total_days
            );
            println!("{}", view.message);
            println!("Tier: {}", view.tier.label);
            match &view.progress_line {
                Some(line) => println!("Progress: {line}"),
                None => println!("All badges unlocked!"),
            }
            print_badges(&view);
        }
        StatusAction::Badges { name } => {
            let view = build_view(&name)?;
            print_badges(&view);
        }
    }
    Ok(())
}
