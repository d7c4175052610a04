pub mod insight_service;
