pub mod entry;
pub mod leaderboard;
