//! Output mode selection.

use std::fmt;
use std::str::FromStr;

/// How a result is written out.
///
/// `Text` uses the result's own text form; the other modes serialize the
/// result's data (see [`serialize_structured`](crate::serialize_structured)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// The rendered text form.
    #[default]
    Text,
    Json,
    Yaml,
    Xml,
    /// Flattened into rows.
    Csv,
}

impl OutputMode {
    /// Returns true for the serialized modes.
    pub fn is_structured(&self) -> bool {
        !matches!(self, OutputMode::Text)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Text => "text",
            OutputMode::Json => "json",
            OutputMode::Yaml => "yaml",
            OutputMode::Xml => "xml",
            OutputMode::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An `--output` value that names no mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown output mode '{0}' (expected text, json, yaml, xml or csv)")]
pub struct UnknownOutputMode(pub String);

impl FromStr for OutputMode {
    type Err = UnknownOutputMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(OutputMode::Text),
            "json" => Ok(OutputMode::Json),
            "yaml" | "yml" => Ok(OutputMode::Yaml),
            "xml" => Ok(OutputMode::Xml),
            "csv" => Ok(OutputMode::Csv),
            _ => Err(UnknownOutputMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_text() {
        assert_eq!(OutputMode::default(), OutputMode::Text);
        assert!(!OutputMode::Text.is_structured());
        assert!(OutputMode::Json.is_structured());
        assert!(OutputMode::Csv.is_structured());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("JSON".parse::<OutputMode>(), Ok(OutputMode::Json));
        assert_eq!("yml".parse::<OutputMode>(), Ok(OutputMode::Yaml));
        assert_eq!(
            "toml".parse::<OutputMode>(),
            Err(UnknownOutputMode("toml".into()))
        );
    }

    #[test]
    fn test_display_round_trips() {
        for mode in [
            OutputMode::Text,
            OutputMode::Json,
            OutputMode::Yaml,
            OutputMode::Xml,
            OutputMode::Csv,
        ] {
            assert_eq!(mode.to_string().parse::<OutputMode>(), Ok(mode));
        }
    }
}
