pub mod insight_request;
pub mod insight_response;
