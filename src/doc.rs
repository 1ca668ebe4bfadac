//! Raw input document as it appears on disk.
//!
//! Every field is optional here; the validator resolves this layer into the
//! immutable [`crate::EventDefinition`] exactly once, applying the documented
//! defaults. Unknown keys are ignored so templates can carry operator notes.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct RawEvent {
    pub event_type: Option<String>,
    pub event_name: Option<String>,
    pub venue: Option<String>,
    #[serde(default)]
    pub performers: RawPerformers,
    #[serde(default)]
    pub metadata: RawMetadata,
    #[serde(default)]
    pub network: RawNetwork,
    #[serde(default)]
    pub audio: RawAudio,
    #[serde(default)]
    pub video: RawVideo,
    #[serde(default)]
    pub lighting: RawLighting,
    pub cues: Option<Vec<RawCue>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawPerformers {
    pub count: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawMetadata {
    pub version: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawNetwork {
    pub hub: Option<RawEndpoint>,
    pub qlab: Option<RawEndpoint>,
    pub companion: Option<RawEndpoint>,
    pub touchdesigner: Option<RawEndpoint>,
    pub lighting_console: Option<RawEndpoint>,
}

/// One endpoint block with every recognized key enumerated. Each collaborator
/// reads the subset it understands; the rest stay `None`.
#[derive(Debug, Default, Deserialize)]
pub struct RawEndpoint {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub passcode: Option<String>,
    pub protocol: Option<String>,
    pub osc_listen_port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawAudio {
    #[serde(default)]
    pub microphones: Vec<RawMicrophone>,
    #[serde(default)]
    pub recording: RawRecording,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawMicrophone {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub model: Option<String>,
    pub input_channel: Option<u32>,
    pub performer: Option<String>,
    pub gain_db: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawVideo {
    #[serde(default)]
    pub cameras: Vec<RawCamera>,
    #[serde(default)]
    pub recording: RawRecording,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawCamera {
    pub id: Option<String>,
    pub position: Option<String>,
    pub shot: Option<String>,
    pub resolution: Option<String>,
}

/// Shared recording block; audio reads `sample_rate`, video reads `bitrate`.
#[derive(Debug, Default, Deserialize)]
pub struct RawRecording {
    pub enabled: Option<bool>,
    pub format: Option<String>,
    pub sample_rate: Option<u32>,
    pub bitrate: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawLighting {
    pub controller: Option<String>,
    pub universe: Option<u32>,
    #[serde(default)]
    pub presets: Vec<RawLightingPreset>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawLightingPreset {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawCue {
    pub number: Option<CueLabel>,
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub timing: Option<String>,
    #[serde(default)]
    pub hub_actions: Vec<RawHubAction>,
}

/// Cue numbers are display labels: templates write them as YAML integers
/// (`number: 1`) or strings (`number: "1.5"`, `number: "A"`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CueLabel {
    Int(i64),
    Float(f64),
    Text(String),
}

impl CueLabel {
    pub fn to_label(&self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Float(x) => x.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RawHubAction {
    pub address: Option<String>,
    pub args: Option<Vec<serde_yaml::Value>>,
}
