//! Resolves a raw template document into a validated [`EventDefinition`].
//!
//! Only two absences are fatal: `event_type` and `cues`. Everything else
//! falls back to the documented defaults in [`crate::model`], and structural
//! irregularities surface as [`ValidationWarning`]s that the caller may
//! display but that never stop compilation.

use std::path::Path;

use crate::{
    doc::{RawCue, RawEvent, RawHubAction},
    error::{CueforgeError, CueforgeResult, ValidationWarning},
    model::{
        AudioInventory, AudioRecording, Camera, ConsoleEndpoint, Cue, CuePhase, EventDefinition,
        Endpoint, GraphicsEndpoint, HubAction, KNOWN_PREFIXES, LightingPreset, LightingSetup,
        Microphone, NetworkConfig, OscArg, QlabEndpoint, VideoInventory, VideoRecording,
    },
};

/// Parses and resolves a YAML event template.
///
/// Returns the resolved model plus any non-fatal warnings, which are also
/// emitted as `tracing` warn events.
pub fn load_event(yaml: &str) -> CueforgeResult<(EventDefinition, Vec<ValidationWarning>)> {
    let raw: RawEvent =
        serde_yaml::from_str(yaml).map_err(|e| CueforgeError::serde(e.to_string()))?;
    resolve(raw)
}

/// [`load_event`] for a template file on disk.
pub fn load_event_file(
    path: impl AsRef<Path>,
) -> CueforgeResult<(EventDefinition, Vec<ValidationWarning>)> {
    let text = std::fs::read_to_string(path)?;
    load_event(&text)
}

fn resolve(raw: RawEvent) -> CueforgeResult<(EventDefinition, Vec<ValidationWarning>)> {
    let event_type = raw
        .event_type
        .ok_or_else(|| CueforgeError::missing_field("event_type"))?;
    let raw_cues = raw
        .cues
        .ok_or_else(|| CueforgeError::missing_field("cues"))?;

    let mut warnings = Vec::new();

    let hub_configured = raw.network.hub.is_some();
    let network = resolve_network(raw.network);

    let cues: Vec<Cue> = raw_cues
        .into_iter()
        .enumerate()
        .map(|(i, c)| resolve_cue(i, c, &mut warnings))
        .collect();

    if cues.iter().any(|c| !c.hub_actions.is_empty()) && !hub_configured {
        warnings.push(ValidationWarning::MissingHubConfig);
    }

    for w in &warnings {
        tracing::warn!("{w}");
    }

    let event = EventDefinition {
        event_type,
        event_name: raw.event_name.unwrap_or_else(|| "Untitled Event".to_string()),
        venue: raw.venue.unwrap_or_else(|| "TBD".to_string()),
        performer_count: raw.performers.count.unwrap_or(0),
        template_version: raw.metadata.version.unwrap_or_else(|| "1.0".to_string()),
        network,
        audio: AudioInventory {
            microphones: raw
                .audio
                .microphones
                .into_iter()
                .enumerate()
                .map(|(i, m)| Microphone {
                    id: m.id.unwrap_or_else(|| format!("mic{}", i + 1)),
                    kind: m.kind.unwrap_or_else(|| "unknown".to_string()),
                    model: m.model.unwrap_or_else(|| "TBD".to_string()),
                    input_channel: m.input_channel.unwrap_or(i as u32 + 1),
                    performer: m.performer.unwrap_or_else(|| "TBD".to_string()),
                    gain_db: m.gain_db.unwrap_or(-12.0),
                })
                .collect(),
            recording: AudioRecording {
                enabled: raw.audio.recording.enabled.unwrap_or(false),
                format: raw
                    .audio
                    .recording
                    .format
                    .unwrap_or_else(|| AudioRecording::default().format),
                sample_rate: raw
                    .audio
                    .recording
                    .sample_rate
                    .unwrap_or_else(|| AudioRecording::default().sample_rate),
            },
        },
        video: VideoInventory {
            cameras: raw
                .video
                .cameras
                .into_iter()
                .enumerate()
                .map(|(i, c)| Camera {
                    id: c.id.unwrap_or_else(|| format!("cam{}", i + 1)),
                    position: c.position.unwrap_or_else(|| "TBD".to_string()),
                    shot: c.shot.unwrap_or_else(|| "TBD".to_string()),
                    resolution: c.resolution.unwrap_or_else(|| "1080p".to_string()),
                })
                .collect(),
            recording: VideoRecording {
                enabled: raw.video.recording.enabled.unwrap_or(false),
                format: raw
                    .video
                    .recording
                    .format
                    .unwrap_or_else(|| VideoRecording::default().format),
                bitrate: raw
                    .video
                    .recording
                    .bitrate
                    .unwrap_or_else(|| VideoRecording::default().bitrate),
            },
        },
        lighting: LightingSetup {
            controller: raw.lighting.controller.unwrap_or_else(|| "TBD".to_string()),
            universe: raw.lighting.universe.unwrap_or(1),
            presets: raw
                .lighting
                .presets
                .into_iter()
                .enumerate()
                .map(|(i, p)| LightingPreset {
                    name: p.name.unwrap_or_else(|| format!("Preset {}", i + 1)),
                    description: p.description,
                })
                .collect(),
        },
        cues,
    };

    Ok((event, warnings))
}

fn resolve_network(raw: crate::doc::RawNetwork) -> NetworkConfig {
    let defaults = NetworkConfig::default();

    let hub = raw
        .hub
        .map(|e| Endpoint {
            host: e.host.unwrap_or_else(|| defaults.hub.host.clone()),
            port: e.port.unwrap_or(defaults.hub.port),
        })
        .unwrap_or_else(|| defaults.hub.clone());

    let qlab = raw
        .qlab
        .map(|e| QlabEndpoint {
            host: e.host.unwrap_or_else(|| defaults.qlab.host.clone()),
            port: e.port.unwrap_or(defaults.qlab.port),
            passcode: e.passcode.unwrap_or_else(|| defaults.qlab.passcode.clone()),
        })
        .unwrap_or_else(|| defaults.qlab.clone());

    let companion = raw
        .companion
        .map(|e| Endpoint {
            host: e.host.unwrap_or_else(|| defaults.companion.host.clone()),
            port: e.port.unwrap_or(defaults.companion.port),
        })
        .unwrap_or_else(|| defaults.companion.clone());

    let touchdesigner = raw
        .touchdesigner
        .map(|e| GraphicsEndpoint {
            osc_listen_port: e
                .osc_listen_port
                .unwrap_or(defaults.touchdesigner.osc_listen_port),
        })
        .unwrap_or_else(|| defaults.touchdesigner.clone());

    let lighting_console = raw
        .lighting_console
        .map(|e| ConsoleEndpoint {
            host: e.host,
            port: e.port,
            protocol: e
                .protocol
                .unwrap_or_else(|| defaults.lighting_console.protocol.clone()),
        })
        .unwrap_or_else(|| defaults.lighting_console.clone());

    NetworkConfig {
        hub,
        qlab,
        companion,
        touchdesigner,
        lighting_console,
    }
}

fn resolve_cue(index: usize, raw: RawCue, warnings: &mut Vec<ValidationWarning>) -> Cue {
    let number = raw
        .number
        .map(|n| n.to_label())
        .unwrap_or_else(|| "???".to_string());
    let id = raw.id.unwrap_or_else(|| format!("cue{}", index + 1));
    let timing_label = raw.timing.unwrap_or_else(|| "show".to_string());
    let phase = CuePhase::from_label(&timing_label);

    let hub_actions: Vec<HubAction> = raw
        .hub_actions
        .into_iter()
        .map(|a| resolve_hub_action(&id, a, warnings))
        .collect();

    Cue {
        number,
        id,
        name: raw.name.unwrap_or_else(|| "Untitled".to_string()),
        kind: raw.kind.unwrap_or_else(|| "system".to_string()),
        phase,
        timing_label,
        hub_actions,
    }
}

fn resolve_hub_action(
    cue_id: &str,
    raw: RawHubAction,
    warnings: &mut Vec<ValidationWarning>,
) -> HubAction {
    let address = raw.address.unwrap_or_default();
    if !KNOWN_PREFIXES.iter().any(|p| address.starts_with(p)) {
        warnings.push(ValidationWarning::UnknownAddressPrefix {
            cue_id: cue_id.to_string(),
            address: address.clone(),
        });
    }
    HubAction {
        address,
        args: raw
            .args
            .unwrap_or_default()
            .iter()
            .map(OscArg::from_yaml)
            .collect(),
    }
}
