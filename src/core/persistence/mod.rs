pub mod db;
pub mod schema;
pub mod transactions;
pub mod users;
