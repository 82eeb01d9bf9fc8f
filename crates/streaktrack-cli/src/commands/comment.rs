use clap::Subcommand;
use streaktrack_core::view::eligibility_message;
use streaktrack_core::{Config, StoreError, StreakEngine, UserStore};

#[derive(Subcommand)]
pub enum CommentAction {
    /// Log today's comment
    Log {
        /// User name
        name: String,
    },
    /// Check whether logging is currently allowed, without logging
    Check {
        /// User name
        name: String,
    },
}

pub fn run(action: CommentAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let engine = StreakEngine::with_window(config.window);
    let store = UserStore::open()?;

    match action {
        CommentAction::Log { name } => {
            let record = store
                .fetch_user(&name)?
                .ok_or_else(|| StoreError::UnknownUser(name.clone()))?;
            let now = chrono::Utc::now();
            let eligibility = engine.evaluate(&record, now);

            // A rejected attempt is a domain outcome, not an error: say so
            // and exit cleanly, leaving the record untouched.
            if !eligibility.allows_logging() {
                println!("{}", eligibility_message(eligibility, config.window));
                return Ok(());
            }

            let updated = engine.log_comment(&record, now);
            store.update_user(&updated, record.last_commented)?;

            println!("Comment logged!");
            println!(
                "Current streak: {} day(s), total logged: {}",
                updated.streak, updated.total_days
            );
            let tier = config.tiers.tier_for(updated.streak);
            match tier.next {
                Some(next) => println!(
                    "Tier: {} -- {}/{} days to {}",
                    tier.label, updated.streak, next.threshold, next.label
                ),
                None => println!("Tier: {} -- all badges unlocked!", tier.label),
            }
        }
        CommentAction::Check { name } => {
            let record = store
                .fetch_user(&name)?
                .ok_or_else(|| StoreError::UnknownUser(name.clone()))?;
            let eligibility = engine.evaluate(&record, chrono::Utc::now());
            println!("{}", eligibility_message(eligibility, config.window));
        }
    }
    Ok(())
}
