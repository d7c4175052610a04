//! API route declarations (e.g., /api/*)

pub mod insight_routes;
pub mod system_routes;
pub mod transaction_routes;
pub mod user_routes;
