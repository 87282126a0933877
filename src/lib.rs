pub mod api;
pub mod config;
pub mod data_models;
pub mod error;
pub mod extractor;
pub mod llm_client;
pub mod orchestrator;
pub mod retriever;
pub mod search_client;
