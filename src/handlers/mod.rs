pub mod checkins;
pub mod entries;
pub mod health;
pub mod leaderboard;
pub mod overview;
