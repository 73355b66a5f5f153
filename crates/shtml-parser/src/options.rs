//! Parser options.
//!
//! The option set is closed: three booleans controlling how tolerant the
//! tag parser is. Textual configuration (`key=value` pairs, as taken by the
//! CLI) is validated against exactly these keys before any parsing starts.

use std::str::FromStr;

/// Tolerance switches for tag and attribute syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Accept and ignore a `/` right before a tag's `>`.
    pub xml_perversion: bool,
    /// Accept `name='value'`.
    pub single_quotes: bool,
    /// Accept `name=value` where the value is alphabetic only.
    pub missing_quotes: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            xml_perversion: true,
            single_quotes: true,
            missing_quotes: false,
        }
    }
}

/// Option configuration error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("invalid value '{value}' for option '{key}', expected true or false")]
    InvalidValue { key: String, value: String },
}

impl Options {
    /// Names accepted by [`Options::set`].
    pub const KEYS: [&'static str; 3] = ["xml_perversion", "single_quotes", "missing_quotes"];

    /// Set one option by name.
    pub fn set(&mut self, key: &str, value: bool) -> Result<(), OptionsError> {
        match key {
            "xml_perversion" => self.xml_perversion = value,
            "single_quotes" => self.single_quotes = value,
            "missing_quotes" => self.missing_quotes = value,
            _ => return Err(OptionsError::UnknownOption(key.to_string())),
        }
        Ok(())
    }

    /// Build options from the defaults plus `(key, value)` overrides.
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = (K, bool)>,
        K: AsRef<str>,
    {
        let mut options = Options::default();
        for (key, value) in pairs {
            options.set(key.as_ref(), value)?;
        }
        Ok(options)
    }
}

/// One `key` or `key=value` override, as written on a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionOverride {
    pub key: String,
    pub value: bool,
}

impl FromStr for OptionOverride {
    type Err = OptionsError;

    /// A bare key means `true`. The key is checked here so that a typo is
    /// reported before any document is read.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = match s.split_once('=') {
            Some((key, raw)) => {
                let value = match raw.trim() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    _ => {
                        return Err(OptionsError::InvalidValue {
                            key: key.trim().to_string(),
                            value: raw.to_string(),
                        })
                    }
                };
                (key.trim(), value)
            }
            None => (s.trim(), true),
        };

        if !Options::KEYS.contains(&key) {
            return Err(OptionsError::UnknownOption(key.to_string()));
        }
        Ok(OptionOverride {
            key: key.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let opts = Options::default();
        assert!(opts.xml_perversion);
        assert!(opts.single_quotes);
        assert!(!opts.missing_quotes);
    }

    #[test]
    fn test_set_known_keys() {
        let opts = Options::from_pairs([
            ("xml_perversion", false),
            ("single_quotes", false),
            ("missing_quotes", true),
        ])
        .unwrap();
        assert_eq!(
            opts,
            Options {
                xml_perversion: false,
                single_quotes: false,
                missing_quotes: true,
            }
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Options::from_pairs([("single_quotes", false), ("smart_quotes", true)])
            .unwrap_err();
        assert_eq!(err, OptionsError::UnknownOption("smart_quotes".into()));
    }

    #[test]
    fn test_override_from_str() {
        assert_eq!(
            "missing_quotes".parse::<OptionOverride>().unwrap(),
            OptionOverride {
                key: "missing_quotes".into(),
                value: true
            }
        );
        assert_eq!(
            "single_quotes=off".parse::<OptionOverride>().unwrap().value,
            false
        );
    }

    #[test]
    fn test_override_errors() {
        assert_eq!(
            "quirks=true".parse::<OptionOverride>().unwrap_err(),
            OptionsError::UnknownOption("quirks".into())
        );
        assert!(matches!(
            "xml_perversion=maybe".parse::<OptionOverride>(),
            Err(OptionsError::InvalidValue { .. })
        ));
    }
}
