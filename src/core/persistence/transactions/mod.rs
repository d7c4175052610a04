pub mod transaction_api_repository_trait;
pub mod transaction_db_adapter_trait;
pub mod transaction_entity;
pub mod transaction_filter;
pub mod transaction_kind;
pub mod transaction_pg_adapter;
pub mod transaction_repository;
