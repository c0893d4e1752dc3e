use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Assistant back-ends offered by the console's API selector.
///
/// These are labels only; no requests are ever made.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiProvider {
    #[default]
    OpenAi,
    Anthropic,
    Gemini,
}

impl ApiProvider {
    pub const ALL: [ApiProvider; 3] = [
        ApiProvider::OpenAi,
        ApiProvider::Anthropic,
        ApiProvider::Gemini,
    ];

    /// The provider after this one in selector order, wrapping around.
    pub fn next(&self) -> Self {
        match self {
            ApiProvider::OpenAi => ApiProvider::Anthropic,
            ApiProvider::Anthropic => ApiProvider::Gemini,
            ApiProvider::Gemini => ApiProvider::OpenAi,
        }
    }
}

impl FromStr for ApiProvider {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ApiProvider::OpenAi),
            "anthropic" => Ok(ApiProvider::Anthropic),
            "gemini" => Ok(ApiProvider::Gemini),
            _ => Err(ValidationError::UnknownApi(s.to_string())),
        }
    }
}

impl Display for ApiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiProvider::OpenAi => write!(f, "OpenAI"),
            ApiProvider::Anthropic => write!(f, "Anthropic"),
            ApiProvider::Gemini => write!(f, "Gemini"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!("OpenAI".parse::<ApiProvider>(), Ok(ApiProvider::OpenAi));
        assert_eq!("gemini".parse::<ApiProvider>(), Ok(ApiProvider::Gemini));
        assert!("mistral".parse::<ApiProvider>().is_err());
        assert_eq!(ApiProvider::Anthropic.to_string(), "Anthropic");
    }

    #[test]
    fn test_next_cycles_through_all_providers() {
        let mut provider = ApiProvider::default();
        for expected in ApiProvider::ALL.iter().skip(1) {
            provider = provider.next();
            assert_eq!(provider, *expected);
        }
        assert_eq!(provider.next(), ApiProvider::OpenAi);
    }
}
