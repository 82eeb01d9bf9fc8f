use streaktrack_core::{Config, UserStore};

pub fn run(limit: Option<usize>) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = UserStore::open()?;
    let entries = store.leaderboard(limit.unwrap_or(config.leaderboard.size))?;

    if entries.is_empty() {
        println!("No users yet.");
        return Ok(());
    }

    let name_width = entries
        .iter()
        .map(|e| e.name.len())
        .max()
        .unwrap_or(4)
        .max("name".len());

    println!("{:<4} {:<name_width$} {:>6} {:>10}", "rank", "name", "streak", "total days");
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "{:<4} {:<name_width$} {:>6} {:>10}",
            i + 1,
            entry.name,
            entry.streak,
            entry.total_days
        );
    }
    Ok(())
}
