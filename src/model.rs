//! The resolved, immutable event model.
//!
//! An [`EventDefinition`] is built once by [`crate::validate::load_event`] and
//! handed to every compiler as a shared read-only reference. All fallback
//! defaults live here as `Default` impls so the compilers never re-derive
//! them; the four artifacts agree because they all read these fields.

use serde::Serialize;

/// Routing prefixes the production hub knows how to fan out.
pub const KNOWN_PREFIXES: [&str; 7] = [
    "/avantis", "/lights", "/obs", "/cam", "/td", "/fade", "/system",
];

#[derive(Clone, Debug)]
/// A complete production: metadata, device inventories, network endpoints and
/// the ordered cue list. Load-once, read-only for the rest of the run.
pub struct EventDefinition {
    /// Short identifier used in artifact file names, e.g. `standard_recital`.
    pub event_type: String,
    pub event_name: String,
    pub venue: String,
    pub performer_count: u32,
    /// Template version string, shown in the checklist header.
    pub template_version: String,
    pub network: NetworkConfig,
    pub audio: AudioInventory,
    pub video: VideoInventory,
    pub lighting: LightingSetup,
    /// Cues in declared order. Display order is preserved everywhere; only
    /// the cue-sequencing compiler re-sorts (by number, ascending).
    pub cues: Vec<Cue>,
}

impl EventDefinition {
    /// True if any cue carries at least one hub action.
    pub fn has_hub_actions(&self) -> bool {
        self.cues.iter().any(|c| !c.hub_actions.is_empty())
    }
}

#[derive(Clone, Debug)]
/// One endpoint per collaborating application. Every endpoint has a
/// documented default used when the template omits its block.
pub struct NetworkConfig {
    pub hub: Endpoint,
    pub qlab: QlabEndpoint,
    pub companion: Endpoint,
    pub touchdesigner: GraphicsEndpoint,
    pub lighting_console: ConsoleEndpoint,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            hub: Endpoint::default_hub(),
            qlab: QlabEndpoint::default(),
            companion: Endpoint::default_companion(),
            touchdesigner: GraphicsEndpoint::default(),
            lighting_console: ConsoleEndpoint::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    /// Default hub endpoint, also substituted on a `MissingHubConfig`
    /// warning.
    pub fn default_hub() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 9000,
        }
    }

    pub fn default_companion() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QlabEndpoint {
    pub host: String,
    pub port: u16,
    /// Remote-control passcode the cue script presents on connect.
    pub passcode: String,
}

impl Default for QlabEndpoint {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 53000,
            passcode: "1234".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphicsEndpoint {
    /// Port the realtime-graphics app listens on for hub OSC traffic.
    pub osc_listen_port: u16,
}

impl Default for GraphicsEndpoint {
    fn default() -> Self {
        Self {
            osc_listen_port: 12_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Lighting console endpoint. Host/port stay unset when the template omits
/// them; the checklist prints `TBD` rather than inventing an address.
pub struct ConsoleEndpoint {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub protocol: String,
}

impl Default for ConsoleEndpoint {
    fn default() -> Self {
        Self {
            host: None,
            port: None,
            protocol: "OSC".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AudioInventory {
    pub microphones: Vec<Microphone>,
    pub recording: AudioRecording,
}

#[derive(Clone, Debug)]
pub struct Microphone {
    pub id: String,
    pub kind: String,
    pub model: String,
    /// Mixer input channel, 1-based. Defaults to the list position.
    pub input_channel: u32,
    pub performer: String,
    pub gain_db: f64,
}

impl Microphone {
    /// Mute parameter address on the mixer, shared by the panel's mute and
    /// unmute buttons (values 1 and 0 respectively).
    pub fn mute_address(&self) -> String {
        format!("/avantis/ch/{}/mix/mute", self.input_channel)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AudioRecording {
    pub enabled: bool,
    pub format: String,
    pub sample_rate: u32,
}

impl Default for AudioRecording {
    fn default() -> Self {
        Self {
            enabled: false,
            format: "wav".to_string(),
            sample_rate: 48_000,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct VideoInventory {
    pub cameras: Vec<Camera>,
    pub recording: VideoRecording,
}

#[derive(Clone, Debug)]
pub struct Camera {
    pub id: String,
    pub position: String,
    pub shot: String,
    pub resolution: String,
}

impl Camera {
    /// Scene name shared by the panel's camera buttons and the graphics
    /// app's OSC handlers: the substring `cam` becomes `Camera`, so `cam1`
    /// maps to `Camera1`. Both compilers must call this, never re-derive.
    pub fn scene_name(&self) -> String {
        self.id.replace("cam", "Camera")
    }

    /// Address that switches the program output to this camera's scene.
    pub fn scene_address(&self) -> String {
        format!("/obs/scene/{}", self.scene_name())
    }

    /// Address that recalls the camera's stored framing preset.
    pub fn preset_recall_address(&self) -> String {
        format!("/{}/preset/recall/1", self.id)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VideoRecording {
    pub enabled: bool,
    pub format: String,
    pub bitrate: String,
}

impl Default for VideoRecording {
    fn default() -> Self {
        Self {
            enabled: false,
            format: "h264".to_string(),
            bitrate: "20Mbps".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LightingSetup {
    pub controller: String,
    pub universe: u32,
    /// Console presets; a preset's 1-based list position is its exec number.
    pub presets: Vec<LightingPreset>,
}

impl Default for LightingSetup {
    fn default() -> Self {
        Self {
            controller: "TBD".to_string(),
            universe: 1,
            presets: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct LightingPreset {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Cue {
    /// Display label, not guaranteed unique and not necessarily numeric.
    pub number: String,
    pub id: String,
    pub name: String,
    /// Raw category label; resolved to a palette entry at the panel layer
    /// (unrecognized labels fall back to the blank style).
    pub kind: String,
    pub phase: CuePhase,
    /// Verbatim timing string, preserved for checklist display.
    pub timing_label: String,
    pub hub_actions: Vec<HubAction>,
}

impl Cue {
    /// Placeholder trigger address used when a cue declares no hub actions.
    pub fn placeholder_address(&self) -> String {
        format!("/cue/{}/start", self.number)
    }

    /// Sort key for the cue-sequencing compiler: numeric labels sort
    /// numerically and come first; anything else keeps declared order after
    /// them (the sort must be stable for the tie cases).
    pub fn number_sort_key(&self) -> (u8, f64) {
        match self.number.parse::<f64>() {
            Ok(n) if n.is_finite() => (0, n),
            _ => (1, 0.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Show phase a cue belongs to. Any timing string other than `pre-show` or
/// `post-show` counts as show-time.
pub enum CuePhase {
    PreShow,
    Show,
    PostShow,
}

impl CuePhase {
    pub fn from_label(label: &str) -> Self {
        match label {
            "pre-show" => Self::PreShow,
            "post-show" => Self::PostShow,
            _ => Self::Show,
        }
    }

    /// Cue-runner trigger semantics: pre/post-show sequences run batched
    /// with auto-continue, show-time cues wait for the operator.
    pub fn auto_continue(self) -> bool {
        !matches!(self, Self::Show)
    }
}

#[derive(Clone, Debug)]
pub struct HubAction {
    /// OSC-style address. Should start with one of [`KNOWN_PREFIXES`];
    /// anything else is a warning at validation time, used as-is after.
    pub address: String,
    pub args: Vec<OscArg>,
}

#[derive(Clone, Debug, PartialEq)]
/// A typed OSC argument, resolved once from the raw document scalar.
pub enum OscArg {
    Float(f64),
    Int(i64),
    Str(String),
}

impl OscArg {
    /// Resolves a raw YAML scalar. Floats are checked before integers, so
    /// `1.0` stays a float and `1` an integer; booleans carry as 0/1 the way
    /// the hub's integer parameters expect them.
    pub fn from_yaml(value: &serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::Bool(b) => Self::Int(i64::from(*b)),
            serde_yaml::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(0.0)),
            },
            serde_yaml::Value::String(s) => Self::Str(s.clone()),
            other => Self::Str(
                serde_yaml::to_string(other)
                    .map(|s| s.trim_end().to_string())
                    .unwrap_or_default(),
            ),
        }
    }

    /// Argument rendered as an OSC message token. Floats keep a decimal
    /// point so the receiver parses the intended type.
    pub fn message_token(&self) -> String {
        match self {
            Self::Float(v) if v.fract() == 0.0 => format!("{v:.1}"),
            Self::Float(v) => format!("{v}"),
            Self::Int(v) => format!("{v}"),
            Self::Str(s) => format!("\"{s}\""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_name_substitutes_camera_prefix() {
        let cam = Camera {
            id: "cam2".to_string(),
            position: "stage left".to_string(),
            shot: "wide".to_string(),
            resolution: "1080p".to_string(),
        };
        assert_eq!(cam.scene_name(), "Camera2");
        assert_eq!(cam.scene_address(), "/obs/scene/Camera2");
        assert_eq!(cam.preset_recall_address(), "/cam2/preset/recall/1");
    }

    #[test]
    fn phase_from_label_defaults_to_show() {
        assert_eq!(CuePhase::from_label("pre-show"), CuePhase::PreShow);
        assert_eq!(CuePhase::from_label("post-show"), CuePhase::PostShow);
        assert_eq!(CuePhase::from_label("show"), CuePhase::Show);
        assert_eq!(CuePhase::from_label("manual"), CuePhase::Show);
        assert!(CuePhase::PreShow.auto_continue());
        assert!(!CuePhase::Show.auto_continue());
    }

    #[test]
    fn osc_arg_resolves_floats_before_ints() {
        let float: serde_yaml::Value = serde_yaml::from_str("1.0").unwrap();
        let int: serde_yaml::Value = serde_yaml::from_str("1").unwrap();
        let text: serde_yaml::Value = serde_yaml::from_str("\"fade\"").unwrap();
        let flag: serde_yaml::Value = serde_yaml::from_str("true").unwrap();
        assert_eq!(OscArg::from_yaml(&float), OscArg::Float(1.0));
        assert_eq!(OscArg::from_yaml(&int), OscArg::Int(1));
        assert_eq!(OscArg::from_yaml(&text), OscArg::Str("fade".to_string()));
        assert_eq!(OscArg::from_yaml(&flag), OscArg::Int(1));
    }

    #[test]
    fn message_tokens_keep_type_information() {
        assert_eq!(OscArg::Float(1.0).message_token(), "1.0");
        assert_eq!(OscArg::Float(0.25).message_token(), "0.25");
        assert_eq!(OscArg::Int(1).message_token(), "1");
        assert_eq!(
            OscArg::Str("house".to_string()).message_token(),
            "\"house\""
        );
    }

    #[test]
    fn numeric_cue_labels_sort_before_text() {
        let cue = |n: &str| Cue {
            number: n.to_string(),
            id: "q".to_string(),
            name: "x".to_string(),
            kind: "system".to_string(),
            phase: CuePhase::Show,
            timing_label: "show".to_string(),
            hub_actions: Vec::new(),
        };
        assert!(cue("2").number_sort_key() < cue("10").number_sort_key());
        assert!(cue("10").number_sort_key() < cue("A").number_sort_key());
    }
}
