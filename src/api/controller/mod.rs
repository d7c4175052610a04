pub mod insight;
pub mod system;
pub mod transaction;
pub mod user;
