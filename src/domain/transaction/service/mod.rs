pub mod transaction_service;
