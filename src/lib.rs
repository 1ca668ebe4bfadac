//! Cueforge compiles one canonical event template into the device-specific
//! artifacts a live-event production consumes.
//!
//! # Pipeline overview
//!
//! 1. **Load**: YAML template -> [`doc::RawEvent`] (thin parse, every field
//!    optional)
//! 2. **Validate**: [`validate::load_event`] resolves defaults once and
//!    returns an immutable [`EventDefinition`] plus non-fatal warnings
//! 3. **Compile**: four independent, stateless compilers each read the same
//!    model — panel layout ([`panel`]), cue-runner script ([`qlab`]),
//!    graphics setup ([`touchdesigner`]), operational checklist
//!    ([`checklist`])
//! 4. **Emit**: [`emit::write_artifacts`] writes the selected outputs
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: compiling twice from identical input
//!   yields byte-identical artifacts; the checklist date is an explicit
//!   parameter, not a clock read.
//! - **No compiler-to-compiler coupling**: no output feeds another;
//!   cross-artifact agreement on addresses and endpoints comes only from
//!   reading identical model fields.
//! - **No live network I/O**: the emitted scripts talk to the cue-runner and
//!   graphics app; this crate never does.

#![forbid(unsafe_code)]

pub mod checklist;
pub mod doc;
pub mod emit;
pub mod error;
pub mod model;
pub mod panel;
pub mod qlab;
pub mod style;
pub mod touchdesigner;
pub mod validate;

pub use emit::{ArtifactKind, write_artifacts};
pub use error::{CueforgeError, CueforgeResult, ValidationWarning};
pub use model::{
    AudioInventory, AudioRecording, Camera, ConsoleEndpoint, Cue, CuePhase, Endpoint,
    EventDefinition, GraphicsEndpoint, HubAction, KNOWN_PREFIXES, LightingPreset, LightingSetup,
    Microphone, NetworkConfig, OscArg, QlabEndpoint, VideoInventory, VideoRecording,
};
pub use panel::{PanelConfig, PanelPage};
pub use style::{ButtonStyle, StyleSpec};
pub use validate::{load_event, load_event_file};
