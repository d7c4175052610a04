pub mod chat_completions_client;
pub mod llm_client_trait;
pub mod llm_provider;
