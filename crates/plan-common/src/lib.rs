pub mod backend;
pub mod category;
pub mod error;
pub mod export;
pub mod openai;
pub mod planner;
pub mod profile;
pub mod prompt;
pub mod request;
