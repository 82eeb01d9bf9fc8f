use clap::Subcommand;
use streaktrack_core::{
    CommentEligibility, Config, StreakEngine, UserRecord, UserStore,
};

#[derive(Subcommand)]
pub enum UserAction {
    /// Log in, creating the user on first sight
    Login {
        /// User name
        name: String,
    },
    /// List all known user names
    List,
}

pub fn run(action: UserAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = UserStore::open()?;

    match action {
        UserAction::Login { name } => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err("user name is empty".into());
            }

            let record = match store.fetch_user(&name)? {
                Some(record) => {
                    println!("Welcome back, {name}!");
                    record
                }
                None => {
                    let record = UserRecord::new(&name);
                    store.create_user(&record)?;
                    println!("Registered new user: {name}");
                    record
                }
            };

            // Login warns about a stale streak but never mutates; only a
            // logged comment moves the record.
            let config = Config::load()?;
            let engine = StreakEngine::with_window(config.window);
            if let CommentEligibility::Resettable { elapsed_hours } =
                engine.evaluate(&record, chrono::Utc::now())
            {
                println!(
                    "Streak broken! {elapsed_hours:.1}h since your last comment (limit {:.0}h).",
                    config.window.break_hours
                );
            }
            println!(
                "Current streak: {} day(s), total logged: {}",
                record.streak, record.total_days
            );
        }
        UserAction::List => {
            for name in store.user_names()? {
                println!("{name}");
            }
        }
    }
    Ok(())
}
