use clap::ValueEnum;

/// Chat platforms whose robot webhooks accept the markdown message format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    /// WeCom (WeChat Work) group robot.
    Wecom,
}

impl Platform {
    pub fn name(self) -> &'static str {
        match self {
            Self::Wecom => "wecom",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_parses_from_cli_value() {
        assert_eq!(Platform::from_str("wecom", true), Ok(Platform::Wecom));
        assert_eq!(Platform::from_str("WeCom", true), Ok(Platform::Wecom));
        assert!(Platform::from_str("slack", true).is_err());
    }

    #[test]
    fn test_platform_display() {
        assert_eq!(Platform::Wecom.to_string(), "wecom");
    }
}
