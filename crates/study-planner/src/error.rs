use plan_common::openai::OpenAiClientError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Client(#[from] OpenAiClientError),
}
