pub mod insight;
pub mod session;
pub mod system;
pub mod transaction;
pub mod user;
