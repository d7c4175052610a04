pub mod login_request;
pub mod register_user_request;
pub mod user_response;
