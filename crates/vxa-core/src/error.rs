use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    #[error("API error: {0}")]
    Api(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Tool error: {tool} - {message}")]
    Tool { tool: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::RateLimit(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    pub fn stream(message: impl Into<String>) -> Self {
        Self::Stream(message.into())
    }

    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::http(502, "Bad gateway");
        assert!(err.to_string().contains("502"));
        assert!(err.to_string().contains("Bad gateway"));

        let err = Error::api("Rate limited");
        assert_eq!(err.to_string(), "API error: Rate limited");
    }

    #[test]
    fn test_error_kinds_distinguishable() {
        assert!(matches!(Error::http(404, ""), Error::Http { .. }));
        assert!(matches!(Error::api("x"), Error::Api(_)));
        assert!(matches!(Error::validation("x"), Error::Validation(_)));
        assert!(matches!(
            Error::tool("get_topic_bundle", "bad args"),
            Error::Tool { .. }
        ));
    }
}
