pub mod comment;
pub mod config;
pub mod leaderboard;
pub mod status;
pub mod user;
