pub mod user_api_repository_trait;
pub mod user_db_adapter_trait;
pub mod user_entity;
pub mod user_pg_adapter;
pub mod user_repository;
