pub mod transaction_create_request;
pub mod transaction_patch_request;
pub mod transaction_summary;
