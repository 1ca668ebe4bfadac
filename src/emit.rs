//! Artifact selection and output writing.
//!
//! The orchestrator is a stateless pass-through: every compiler runs
//! independently against the same read-only [`EventDefinition`], and no
//! compiler output feeds another. Consistency across artifacts comes solely
//! from all compilers reading identical model fields.

use std::path::{Path, PathBuf};

use crate::{checklist, error::CueforgeResult, model::EventDefinition, panel, qlab, touchdesigner};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
/// The four artifact kinds, selectable from the CLI via `--only`.
pub enum ArtifactKind {
    /// Button-panel page layout (panel-controller import JSON).
    Panel,
    /// Cue-runner build script.
    CueScript,
    /// Realtime-graphics setup script.
    GraphicsScript,
    /// Operational Markdown checklist.
    Checklist,
}

impl ArtifactKind {
    /// All four kinds, in emission order.
    pub const ALL: [Self; 4] = [
        Self::Panel,
        Self::CueScript,
        Self::GraphicsScript,
        Self::Checklist,
    ];

    /// Human-readable artifact label for run summaries.
    pub fn label(self) -> &'static str {
        match self {
            Self::Panel => "Companion JSON",
            Self::CueScript => "QLab Script",
            Self::GraphicsScript => "TouchDesigner Script",
            Self::Checklist => "Setup Checklist",
        }
    }

    /// Output file name, prefixed by the event type.
    pub fn file_name(self, event_type: &str) -> String {
        match self {
            Self::Panel => format!("{event_type}_companion.json"),
            Self::CueScript => format!("{event_type}_qlab_cues.py"),
            Self::GraphicsScript => format!("{event_type}_touchdesigner_setup.py"),
            Self::Checklist => format!("{event_type}_checklist.md"),
        }
    }

    /// Runs this kind's compiler against the model.
    pub fn compile(self, event: &EventDefinition, generated_on: &str) -> CueforgeResult<String> {
        match self {
            Self::Panel => {
                let config = panel::compile(event)?;
                serde_json::to_string_pretty(&config)
                    .map_err(|e| crate::error::CueforgeError::serde(e.to_string()))
            }
            Self::CueScript => Ok(qlab::compile(event)),
            Self::GraphicsScript => Ok(touchdesigner::compile(event)),
            Self::Checklist => Ok(checklist::compile(event, generated_on)),
        }
    }
}

/// Compiles and writes the selected artifacts into `out_dir`, returning the
/// written paths in emission order. The directory must already exist.
pub fn write_artifacts(
    event: &EventDefinition,
    out_dir: &Path,
    kinds: &[ArtifactKind],
    generated_on: &str,
) -> CueforgeResult<Vec<(ArtifactKind, PathBuf)>> {
    let mut written = Vec::new();
    for kind in ArtifactKind::ALL {
        if !kinds.contains(&kind) {
            continue;
        }
        let path = out_dir.join(kind.file_name(&event.event_type));
        let body = kind.compile(event, generated_on)?;
        std::fs::write(&path, body)?;
        tracing::debug!(kind = kind.label(), path = %path.display(), "wrote artifact");
        written.push((kind, path));
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_carry_the_event_type() {
        assert_eq!(
            ArtifactKind::Panel.file_name("recital"),
            "recital_companion.json"
        );
        assert_eq!(
            ArtifactKind::CueScript.file_name("recital"),
            "recital_qlab_cues.py"
        );
        assert_eq!(
            ArtifactKind::GraphicsScript.file_name("recital"),
            "recital_touchdesigner_setup.py"
        );
        assert_eq!(
            ArtifactKind::Checklist.file_name("recital"),
            "recital_checklist.md"
        );
    }
}
