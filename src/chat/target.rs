use std::collections::HashMap;

use url::Url;

use crate::error::{NotifierError, Result};

/// Environment variable holding the default robot webhook; `<PREFIX>_<GROUP>`
/// holds the webhook for a group.
pub const TARGET_ENV_PREFIX: &str = "WEBHOOK_URL";

/// Robot webhook URL. The query usually carries the robot key, so it is
/// never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct TargetUrl(Url);

impl TargetUrl {
    pub fn parse(raw: &str) -> Result<Self> {
        Url::parse(raw)
            .map(Self)
            .map_err(|e| NotifierError::Config(format!("Invalid webhook URL: {e}")))
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl std::fmt::Debug for TargetUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let url = &self.0;
        write!(
            f,
            "{}://{}{}",
            url.scheme(),
            url.host_str().unwrap_or_default(),
            url.port().map(|port| format!(":{port}")).unwrap_or_default()
        )?;
        write!(f, "{}", url.path())?;
        if url.query().is_some() {
            write!(f, "?<redacted>")?;
        }
        Ok(())
    }
}

/// Where notifications go, keyed by the optional group path segment.
#[derive(Debug, Default)]
pub struct Targets {
    default: Option<TargetUrl>,
    groups: HashMap<String, TargetUrl>,
}

impl Targets {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Builds the routing table from `(name, value)` pairs. Unrelated names and
    /// empty values are skipped.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut targets = Self::default();
        let group_prefix = format!("{TARGET_ENV_PREFIX}_");

        for (name, value) in vars {
            if value.trim().is_empty() {
                continue;
            }
            if name == TARGET_ENV_PREFIX {
                targets.default = Some(TargetUrl::parse(value.trim())?);
            } else if let Some(group) = name.strip_prefix(&group_prefix) {
                if group.is_empty() {
                    continue;
                }
                targets
                    .groups
                    .insert(group.to_string(), TargetUrl::parse(value.trim())?);
            }
        }

        Ok(targets)
    }

    /// Group names are matched upper-cased, as environment variable names are.
    pub fn resolve(&self, group: Option<&str>) -> Option<&TargetUrl> {
        match group {
            Some(group) => self.groups.get(&group.to_uppercase()),
            None => self.default.as_ref(),
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len() + usize::from(self.default.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_default_and_group_targets() {
        let targets = Targets::from_vars(vars(&[
            ("WEBHOOK_URL", "https://chat.example.com/send?key=default"),
            ("WEBHOOK_URL_BACKEND", "https://chat.example.com/send?key=backend"),
            ("PATH", "/usr/bin"),
        ]))
        .unwrap();

        assert_eq!(targets.len(), 2);
        assert_eq!(
            targets.resolve(None).unwrap().as_url().query(),
            Some("key=default")
        );
        assert_eq!(
            targets.resolve(Some("backend")).unwrap().as_url().query(),
            Some("key=backend")
        );
        assert_eq!(
            targets.resolve(Some("Backend")),
            targets.resolve(Some("BACKEND"))
        );
    }

    #[test]
    fn test_unconfigured_group_resolves_to_none() {
        let targets = Targets::from_vars(vars(&[(
            "WEBHOOK_URL",
            "https://chat.example.com/send?key=default",
        )]))
        .unwrap();

        assert!(targets.resolve(Some("frontend")).is_none());
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let targets =
            Targets::from_vars(vars(&[("WEBHOOK_URL", "  "), ("WEBHOOK_URL_", "x")])).unwrap();

        assert!(targets.is_empty());
        assert!(targets.resolve(None).is_none());
    }

    #[test]
    fn test_invalid_url_is_a_config_error() {
        let err = Targets::from_vars(vars(&[("WEBHOOK_URL_OPS", "not a url")])).unwrap_err();

        assert!(matches!(err, NotifierError::Config(_)));
    }

    #[test]
    fn test_debug_redacts_key() {
        let target =
            TargetUrl::parse("https://chat.example.com/cgi-bin/webhook/send?key=secret-key")
                .unwrap();
        let debug_output = format!("{target:?}");

        assert_eq!(
            debug_output,
            "https://chat.example.com/cgi-bin/webhook/send?<redacted>"
        );
        assert!(!debug_output.contains("secret-key"));
    }

    #[test]
    fn test_debug_without_query() {
        let target = TargetUrl::parse("http://127.0.0.1/hook").unwrap();

        assert_eq!(format!("{target:?}"), "http://127.0.0.1/hook");
    }

    #[test]
    fn test_targets_debug_redacts_all_keys() {
        let targets = Targets::from_vars(vars(&[
            ("WEBHOOK_URL", "https://chat.example.com/send?key=one"),
            ("WEBHOOK_URL_QA", "https://chat.example.com/send?key=two"),
        ]))
        .unwrap();
        let debug_output = format!("{targets:?}");

        assert!(!debug_output.contains("key=one"));
        assert!(!debug_output.contains("key=two"));
        assert!(debug_output.contains("QA"));
    }
}
