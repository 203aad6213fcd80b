use plan_common::openai::OpenAiClientConfig;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// JSON API over HTTP.
    Http,
    /// MCP JSON-RPC over stdin/stdout.
    Stdio,
}

impl Transport {
    fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Transport::Http),
            "stdio" | "mcp" => Ok(Transport::Stdio),
            other => Err(AppError::Config(format!(
                "PLANNER_TRANSPORT must be \"http\" or \"stdio\", got {other:?}"
            ))),
        }
    }
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub transport: Transport,
    /// Socket address for the HTTP transport.
    pub listen_addr: String,
    pub llm: OpenAiClientConfig,
}

impl Config {
    /// Required:
    /// - `TOGETHER_API_KEY`
    ///
    /// Optional:
    /// - `PLANNER_TRANSPORT` (`http` or `stdio`, default: `http`)
    /// - `PLANNER_LISTEN_ADDR` (default: "127.0.0.1:3000")
    /// - `PLANNER_LLM_*` (see [`OpenAiClientConfig::from_env`])
    pub fn from_env() -> Result<Self, AppError> {
        let transport = match std::env::var("PLANNER_TRANSPORT") {
            Ok(v) => Transport::parse(&v)?,
            Err(_) => Transport::Http,
        };

        let listen_addr =
            std::env::var("PLANNER_LISTEN_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

        Ok(Self {
            transport,
            listen_addr,
            llm: OpenAiClientConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_names() {
        assert_eq!(Transport::parse("http").unwrap(), Transport::Http);
        assert_eq!(Transport::parse(" STDIO ").unwrap(), Transport::Stdio);
        assert_eq!(Transport::parse("mcp").unwrap(), Transport::Stdio);
        assert!(matches!(Transport::parse("grpc"), Err(AppError::Config(_))));
    }
}
