pub type CueforgeResult<T> = Result<T, CueforgeError>;

#[derive(thiserror::Error, Debug)]
pub enum CueforgeError {
    #[error("missing required field: {0}")]
    MissingRequiredField(String),

    #[error("layout error: {0}")]
    Layout(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CueforgeError {
    pub fn missing_field(name: impl Into<String>) -> Self {
        Self::MissingRequiredField(name.into())
    }

    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Non-fatal irregularities found while resolving an event definition.
///
/// Warnings never stop compilation: the affected value is either used as-is
/// (`UnknownAddressPrefix`) or replaced by a documented default
/// (`MissingHubConfig`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationWarning {
    UnknownAddressPrefix { cue_id: String, address: String },
    MissingHubConfig,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownAddressPrefix { cue_id, address } => write!(
                f,
                "cue {cue_id}: hub_action address '{address}' does not match any known hub prefix"
            ),
            Self::MissingHubConfig => write!(
                f,
                "cues have hub_actions but no network.hub config defined; using default 127.0.0.1:9000"
            ),
        }
    }
}
