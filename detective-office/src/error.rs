use thiserror::Error;

/// How a fault is handled once it has been observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultPolicy {
    /// Show a blocking notice; nothing else runs.
    Block,
    /// Use a fallback and carry on.
    Substitute,
    /// Drop the feature for this session.
    Degrade,
    /// Show the recovery screen and wait for a manual retry.
    Recover,
}

#[derive(Debug, Error)]
pub enum OfficeError {
    #[error("graphics capability unavailable: {0}")]
    UnsupportedPlatform(String),

    #[error("asset `{path}` failed to load: {reason}")]
    AssetLoad { path: String, reason: String },

    #[error("playback failed on {channel}: {reason}")]
    Playback { channel: String, reason: String },

    #[error("renderer fault: {0}")]
    RenderFault(String),

    #[error("content table is invalid: {0}")]
    Content(#[from] serde_json::Error),

    #[error("content id `{0}` appears more than once")]
    DuplicateContent(String),

    #[error("unknown {kind} `{value}`")]
    UnknownName { kind: &'static str, value: String },
}

impl OfficeError {
    pub fn policy(&self) -> FaultPolicy {
        match self {
            Self::UnsupportedPlatform(_) => FaultPolicy::Block,
            Self::AssetLoad { .. } | Self::Content(_) | Self::DuplicateContent(_) => {
                FaultPolicy::Substitute
            }
            Self::Playback { .. } | Self::UnknownName { .. } => FaultPolicy::Degrade,
            Self::RenderFault(_) => FaultPolicy::Recover,
        }
    }

    pub fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownName {
            kind,
            value: value.into(),
        }
    }
}

pub type OfficeResult<T> = Result<T, OfficeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_failures_fall_back() {
        let err = OfficeError::AssetLoad {
            path: "textures/wood.jpg".into(),
            reason: "404".into(),
        };
        assert_eq!(err.policy(), FaultPolicy::Substitute);
        assert_eq!(
            err.to_string(),
            "asset `textures/wood.jpg` failed to load: 404"
        );
    }

    #[test]
    fn render_fault_needs_manual_recovery() {
        let err = OfficeError::RenderFault("no adapter".into());
        assert_eq!(err.policy(), FaultPolicy::Recover);
    }

    #[test]
    fn bad_content_converts_from_serde() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: OfficeError = parse.unwrap_err().into();
        assert_eq!(err.policy(), FaultPolicy::Substitute);
    }
}
