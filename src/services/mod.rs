pub mod aggregate;
pub mod score;
pub mod store;
