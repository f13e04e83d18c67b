pub mod api_key;
pub mod app;
pub mod catalog;
pub mod llm;
pub mod paths;
pub mod transcript;
pub mod util;
