//! Infrastructure layer - database connection.

mod db;

pub use db::Database;
pub(crate) use db::ping;
