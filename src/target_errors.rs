use thiserror::Error;

#[derive(Error, Debug)]
pub enum TargetError {
    #[error("Invalid number format: {0}")]
    Format(String),

    #[error("Value out-of-bounds: {value} (expected {bounds})")]
    Range { value: f64, bounds: &'static str },

    #[error("Invalid character entered: '{0}'")]
    InvalidCharacter(char),

    #[error("SIMBAD service error: {0}")]
    Service(String),

    #[error("Unexpected catalogue response: {0}")]
    ProtocolViolation(String),

    #[error("HTTP reqwest error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unable to decode the catalogue JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid lookup configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("No async runtime available to run the search: {0}")]
    RuntimeUnavailable(#[from] tokio::runtime::TryCurrentError),

    #[error("Sky viewer is not ready yet")]
    ViewerNotReady,

    #[error("Name cannot be blank")]
    EmptyName,

    #[error("A target called '{0}' already exists")]
    DuplicateName(String),
}

impl TargetError {
    /// Whether this error should be reported through a notification rather than
    /// an inline field message.
    pub fn is_service_level(&self) -> bool {
        matches!(
            self,
            TargetError::Service(_)
                | TargetError::ProtocolViolation(_)
                | TargetError::Http(_)
                | TargetError::Json(_)
        )
    }
}

impl PartialEq for TargetError {
    fn eq(&self, other: &Self) -> bool {
        use TargetError::*;
        match (self, other) {
            (Format(a), Format(b)) => a == b,
            (
                Range {
                    value: va,
                    bounds: ba,
                },
                Range {
                    value: vb,
                    bounds: bb,
                },
            ) => va == vb && ba == bb,
            (InvalidCharacter(a), InvalidCharacter(b)) => a == b,
            (Service(a), Service(b)) => a == b,
            (ProtocolViolation(a), ProtocolViolation(b)) => a == b,
            (DuplicateName(a), DuplicateName(b)) => a == b,

            // not comparable, same variant is enough
            (Http(_), Http(_)) => true,
            (Json(_), Json(_)) => true,
            (Config(_), Config(_)) => true,
            (RuntimeUnavailable(_), RuntimeUnavailable(_)) => true,

            (ViewerNotReady, ViewerNotReady) => true,
            (EmptyName, EmptyName) => true,

            _ => false,
        }
    }
}

#[cfg(test)]
mod target_errors_test {
    use super::*;

    #[test]
    fn test_service_level_split() {
        assert!(TargetError::Service("timed out".into()).is_service_level());
        assert!(TargetError::ProtocolViolation("2 rows".into()).is_service_level());
        assert!(!TargetError::Format("ab".into()).is_service_level());
        assert!(!TargetError::Range {
            value: 361.0,
            bounds: "[0, 360)",
        }
        .is_service_level());
        assert!(!TargetError::ViewerNotReady.is_service_level());
    }
}
