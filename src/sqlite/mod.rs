//! SQLite driver layer.
//!
//! A thin synchronous wrapper over rusqlite: one connection, typed values in,
//! typed rows out.

pub mod connection;
pub mod types;

#[cfg(test)]
mod tests;

pub use connection::SqliteConnection;
pub use types::Value;
