use std::str::FromStr;

use crate::notice::NoticeTiming;

const META_PREFIX: &str = "activity-board:";

/// Page-level settings, read once from `<meta name="activity-board:...">` tags.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// Prefix for every API URL. Empty means same origin.
    pub api_base: String,
    pub timing: NoticeTiming,
    pub log_level: log::Level,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            timing: NoticeTiming::default(),
            log_level: log::Level::Info,
        }
    }
}

impl BoardConfig {
    pub fn from_document() -> Self {
        let document = web_sys::window().and_then(|w| w.document());
        Self::from_lookup(|key| {
            let selector = format!("meta[name=\"{META_PREFIX}{key}\"]");
            document
                .as_ref()?
                .query_selector(&selector)
                .ok()
                .flatten()?
                .get_attribute("content")
        })
    }

    /// Build from a key lookup; unknown or unparsable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_base: lookup("api-base")
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.api_base),
            timing: NoticeTiming {
                signup_ms: parsed(&lookup, "signup-notice-ms")
                    .unwrap_or(defaults.timing.signup_ms),
                unregister_ms: parsed(&lookup, "unregister-notice-ms")
                    .unwrap_or(defaults.timing.unregister_ms),
            },
            log_level: parsed(&lookup, "log-level").unwrap_or(defaults.log_level),
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_meta_tags() {
        let config = BoardConfig::from_lookup(|_| None);
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.timing.signup_ms, 5000);
        assert_eq!(config.timing.unregister_ms, 4000);
    }

    #[test]
    fn reads_overrides() {
        let config = BoardConfig::from_lookup(lookup_from(&[
            ("api-base", " https://school.example "),
            ("signup-notice-ms", "2500"),
            ("log-level", "debug"),
        ]));
        assert_eq!(config.api_base, "https://school.example");
        assert_eq!(config.timing.signup_ms, 2500);
        assert_eq!(config.timing.unregister_ms, 4000);
        assert_eq!(config.log_level, log::Level::Debug);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let config = BoardConfig::from_lookup(lookup_from(&[
            ("unregister-notice-ms", "soon"),
            ("log-level", "loud"),
        ]));
        assert_eq!(config.timing.unregister_ms, 4000);
        assert_eq!(config.log_level, log::Level::Info);
    }
}
