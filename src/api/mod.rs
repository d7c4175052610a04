pub mod controller;
pub mod dto;
pub mod extractor;
pub mod routes;
pub mod util;
