use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::logger::LoggerError;

/// Validated `EnvFilter` expression, e.g. `"info"` or `"radi_core=debug,warn"`.
///
/// Stored as the raw string so it can round-trip through config; turned into an
/// [`EnvFilter`] when the subscriber is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct LoggerLevel(String);

impl LoggerLevel {
    pub fn new(s: impl Into<String>) -> Result<Self, LoggerError> {
        Self::try_from(s.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the filter.
    ///
    /// Construction validates the expression, so the `info` fallback is only reached by a value
    /// built around that check; it is reported rather than applied silently.
    pub fn to_env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(self.as_str()).unwrap_or_else(|e| {
            warn!(filter = self.as_str(), error = %e, "invalid log filter; falling back to info");
            EnvFilter::new("info")
        })
    }
}

impl Default for LoggerLevel {
    fn default() -> Self {
        Self("info".to_string())
    }
}

impl FromStr for LoggerLevel {
    type Err = LoggerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for LoggerLevel {
    type Error = LoggerError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.trim().is_empty() {
            return Err(LoggerError::InvalidLevel("empty filter".to_string()));
        }
        match EnvFilter::try_new(&s) {
            Ok(_) => Ok(LoggerLevel(s)),
            Err(e) => Err(LoggerError::InvalidLevel(format!("{s}: {e}"))),
        }
    }
}

impl From<LoggerLevel> for String {
    fn from(l: LoggerLevel) -> Self {
        l.0
    }
}

impl fmt::Display for LoggerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_levels() {
        for lvl in ["info", "warn", "trace", "radi_core=debug,radi_exec=trace,info"] {
            let parsed = lvl.parse::<LoggerLevel>();
            assert!(parsed.is_ok(), "expected valid level for {lvl}, got {parsed:?}");
        }
    }

    #[test]
    fn rejects_invalid_levels() {
        for lvl in ["", "radi_core=lol", "other=trace,another=wat"] {
            assert!(
                LoggerLevel::from_str(lvl).is_err(),
                "expected error for {lvl:?}"
            );
        }
    }

    #[test]
    fn default_is_info() {
        assert_eq!(LoggerLevel::default().as_str(), "info");
        let _filter = LoggerLevel::default().to_env_filter();
    }

    #[test]
    fn unvalidated_expression_falls_back_to_info() {
        let lvl = LoggerLevel("radi_core=wat".to_string());
        assert_eq!(
            lvl.to_env_filter().to_string(),
            EnvFilter::new("info").to_string()
        );
    }

    #[test]
    fn serde_roundtrip_keeps_expression() {
        let original: LoggerLevel = "radi_core=trace,info".parse().unwrap();
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, r#""radi_core=trace,info""#);

        let restored: LoggerLevel = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
        assert!(serde_json::from_str::<LoggerLevel>(r#""x=wat""#).is_err());
    }
}
