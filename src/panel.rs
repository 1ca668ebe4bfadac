//! Panel layout compiler.
//!
//! Produces the page-export document the panel-controller imports: named
//! pages of fixed-size button grids plus one OSC connection descriptor bound
//! to the hub endpoint. Placement goes through a bounded [`Grid`], so an
//! out-of-bounds or colliding write is a [`CueforgeError::Layout`] instead of
//! a silently overwritten coordinate.
//!
//! The show-control page reserves row 0 for headers and master transport,
//! then lays cue buttons into timing buckets. Buckets share a single
//! monotonically advancing row cursor: a bucket starts at the later of its
//! nominal row (pre-show 1, show 2, post-show 3) and the first untouched
//! row, so an overflowing bucket pushes the next one down rather than
//! overwriting it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    error::{CueforgeError, CueforgeResult},
    model::{Cue, CuePhase, EventDefinition, HubAction, OscArg},
    style::ButtonStyle,
};

/// Stream Deck XL style grid.
pub const GRID_COLS: usize = 8;
pub const GRID_ROWS: usize = 4;

/// Lighting presets are capped to the grid width minus the header column.
pub const PRESET_CAP: usize = GRID_COLS - 1;

/// Export format version understood by the panel-controller's importer.
const EXPORT_VERSION: &str = "4.2.0";

#[derive(Clone, Debug, Serialize)]
/// Root of the panel artifact.
pub struct PanelConfig {
    pub version: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub event_type: String,
    pub event_name: String,
    /// Pages keyed `page_1`, `page_2`, ... in stable order.
    pub pages: BTreeMap<String, PanelPage>,
    pub connections: Vec<OscConnection>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PanelPage {
    pub name: String,
    #[serde(rename = "gridSize")]
    pub grid_size: GridSize,
    /// Buttons keyed by `"row,col"`.
    pub buttons: BTreeMap<String, Button>,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct GridSize {
    pub columns: usize,
    pub rows: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct Button {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub enabled: bool,
    pub style: ButtonFace,
    pub steps: BTreeMap<String, ButtonStep>,
    pub feedbacks: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ButtonFace {
    pub text: String,
    pub size: String,
    pub color: u32,
    pub bgcolor: u32,
    pub alignment: &'static str,
    pub show_topbar: bool,
    #[serde(rename = "textExpression")]
    pub text_expression: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct ButtonStep {
    pub down: Vec<PanelAction>,
    pub up: Vec<PanelAction>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PanelAction {
    #[serde(rename = "actionId")]
    pub action_id: String,
    pub options: ActionOptions,
}

#[derive(Clone, Debug, Serialize)]
pub struct ActionOptions {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl PanelAction {
    fn no_args(path: impl Into<String>) -> Self {
        Self {
            action_id: "osc:send_no_args".to_string(),
            options: ActionOptions {
                path: path.into(),
                value: None,
            },
        }
    }

    fn with_value(action_id: &str, path: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            action_id: action_id.to_string(),
            options: ActionOptions {
                path: path.into(),
                value: Some(value),
            },
        }
    }

    /// One panel action per hub action; the variant follows the first
    /// declared argument's resolved type.
    pub fn from_hub_action(action: &HubAction) -> Self {
        match action.args.first() {
            Some(OscArg::Float(v)) => {
                Self::with_value("osc:send_float", &action.address, serde_json::json!(v))
            }
            Some(OscArg::Int(v)) => {
                Self::with_value("osc:send_integer", &action.address, serde_json::json!(v))
            }
            Some(OscArg::Str(s)) => {
                Self::with_value("osc:send_string", &action.address, serde_json::json!(s))
            }
            None => Self::no_args(&action.address),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct OscConnection {
    pub id: String,
    pub module: String,
    pub label: String,
    pub config: ConnectionConfig,
}

#[derive(Clone, Debug, Serialize)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub send_enabled: bool,
}

/// Bounded two-dimensional button grid. Writes outside the bounds or onto an
/// occupied slot are layout errors.
pub struct Grid {
    cols: usize,
    rows: usize,
    slots: Vec<Option<Button>>,
}

impl Grid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            slots: vec![None; cols * rows],
        }
    }

    pub fn place(&mut self, row: usize, col: usize, button: Button) -> CueforgeResult<()> {
        if row >= self.rows || col >= self.cols {
            return Err(CueforgeError::layout(format!(
                "coordinate {row},{col} is outside the {}x{} grid",
                self.cols, self.rows
            )));
        }
        let slot = &mut self.slots[row * self.cols + col];
        if slot.is_some() {
            return Err(CueforgeError::layout(format!(
                "coordinate {row},{col} is already occupied"
            )));
        }
        *slot = Some(button);
        Ok(())
    }

    fn into_page(self, name: &str) -> PanelPage {
        let cols = self.cols;
        let buttons = self
            .slots
            .into_iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                slot.map(|button| (format!("{},{}", i / cols, i % cols), button))
            })
            .collect();
        PanelPage {
            name: name.to_string(),
            grid_size: GridSize {
                columns: self.cols,
                rows: self.rows,
            },
            buttons,
        }
    }
}

/// Compiles the full panel artifact for an event.
pub fn compile(event: &EventDefinition) -> CueforgeResult<PanelConfig> {
    let mut pages = BTreeMap::new();
    pages.insert(
        "page_1".to_string(),
        show_control_page(event)?.into_page("Show Control"),
    );
    pages.insert(
        "page_2".to_string(),
        direct_control_page(event)?.into_page("A/V Control"),
    );

    Ok(PanelConfig {
        version: EXPORT_VERSION.to_string(),
        kind: "page_export".to_string(),
        event_type: event.event_type.clone(),
        event_name: event.event_name.clone(),
        pages,
        connections: vec![hub_connection(event)],
    })
}

fn show_control_page(event: &EventDefinition) -> CueforgeResult<Grid> {
    let mut grid = Grid::new(GRID_COLS, GRID_ROWS);

    grid.place(
        0,
        0,
        make_button(
            format!("{}\nCONTROL", event.event_name),
            ButtonStyle::Header,
            14,
            Vec::new(),
        ),
    )?;
    grid.place(0, 1, header_button("PRE-SHOW", 14))?;
    grid.place(0, 2, go_button())?;
    grid.place(0, 3, stop_button())?;
    grid.place(0, 4, header_button("SHOW", 14))?;
    grid.place(0, 6, header_button("POST-SHOW", 14))?;

    let buckets: [(usize, Vec<&Cue>); 3] = [
        (1, phase_bucket(event, CuePhase::PreShow)),
        (2, phase_bucket(event, CuePhase::Show)),
        (3, phase_bucket(event, CuePhase::PostShow)),
    ];

    // First row no cue button has touched yet.
    let mut next_free_row = 1;
    for (nominal_row, bucket) in buckets {
        if bucket.is_empty() {
            continue;
        }
        let mut row = nominal_row.max(next_free_row);
        let mut col = 0;
        for cue in bucket {
            if col >= GRID_COLS {
                col = 0;
                row += 1;
            }
            grid.place(row, col, cue_button(cue))?;
            col += 1;
        }
        next_free_row = row + 1;
    }

    Ok(grid)
}

fn phase_bucket(event: &EventDefinition, phase: CuePhase) -> Vec<&Cue> {
    event.cues.iter().filter(|c| c.phase == phase).collect()
}

fn direct_control_page(event: &EventDefinition) -> CueforgeResult<Grid> {
    let mut grid = Grid::new(GRID_COLS, GRID_ROWS);

    grid.place(0, 0, header_button("A/V\nCONTROL", 14))?;

    // Row 1: camera switchers. Each button chains a scene switch and a
    // framing-preset recall. Cameras past the grid width are dropped, same
    // capacity policy as the unmute buttons below.
    grid.place(1, 0, header_button("CAMERAS", 12))?;
    for (i, cam) in event.video.cameras.iter().take(GRID_COLS - 1).enumerate() {
        grid.place(
            1,
            i + 1,
            make_button(
                format!("{}\n{}", cam.id.to_uppercase(), cam.shot),
                ButtonStyle::Video,
                14,
                vec![
                    PanelAction::no_args(cam.scene_address()),
                    PanelAction::no_args(cam.preset_recall_address()),
                ],
            ),
        )?;
    }

    // Row 2: microphone mutes, with unmute buttons in the columns after the
    // full mute set. Unmutes that no longer fit the grid width are silently
    // dropped (documented capacity constraint, not an error).
    grid.place(2, 0, header_button("AUDIO", 12))?;
    let mics = &event.audio.microphones;
    for (i, mic) in mics.iter().take(GRID_COLS - 1).enumerate() {
        grid.place(
            2,
            i + 1,
            make_button(
                format!("{}\nMUTE", mic.id.to_uppercase()),
                ButtonStyle::Audio,
                14,
                vec![PanelAction::with_value(
                    "osc:send_integer",
                    mic.mute_address(),
                    serde_json::json!(1),
                )],
            ),
        )?;
        let unmute_col = i + 1 + mics.len();
        if unmute_col < GRID_COLS {
            grid.place(
                2,
                unmute_col,
                make_button(
                    format!("{}\nUNMUTE", mic.id.to_uppercase()),
                    ButtonStyle::Go,
                    14,
                    vec![PanelAction::with_value(
                        "osc:send_integer",
                        mic.mute_address(),
                        serde_json::json!(0),
                    )],
                ),
            )?;
        }
    }

    // Row 3: lighting presets, capped at the grid width minus the header.
    grid.place(3, 0, header_button("LIGHTING", 12))?;
    for (i, preset) in event.lighting.presets.iter().take(PRESET_CAP).enumerate() {
        let exec = i + 1;
        let display = if preset.name.chars().count() > 10 {
            preset.name.replace(' ', "\n")
        } else {
            preset.name.clone()
        };
        grid.place(
            3,
            i + 1,
            make_button(
                display,
                ButtonStyle::Lighting,
                11,
                vec![PanelAction::no_args(format!("/lights/exec/{exec}"))],
            ),
        )?;
    }

    Ok(grid)
}

fn cue_button(cue: &Cue) -> Button {
    let display: String = cue.name.chars().take(16).collect();
    let actions = if cue.hub_actions.is_empty() {
        vec![PanelAction::no_args(cue.placeholder_address())]
    } else {
        cue.hub_actions
            .iter()
            .map(PanelAction::from_hub_action)
            .collect()
    };
    make_button(
        format!("Q{}\n{}", cue.number, display),
        ButtonStyle::from_label(&cue.kind),
        12,
        actions,
    )
}

fn go_button() -> Button {
    // Master transport talks to the cue-runner directly, so no hub action.
    make_button("GO\n(QLab)", ButtonStyle::Go, 14, Vec::new())
}

fn stop_button() -> Button {
    make_button("STOP\n(QLab)", ButtonStyle::Stop, 14, Vec::new())
}

fn header_button(text: &str, size: u32) -> Button {
    make_button(text, ButtonStyle::Header, size, Vec::new())
}

fn make_button(
    text: impl Into<String>,
    style: ButtonStyle,
    size: u32,
    actions: Vec<PanelAction>,
) -> Button {
    let spec = style.spec();
    let mut steps = BTreeMap::new();
    if !actions.is_empty() {
        steps.insert(
            "step0".to_string(),
            ButtonStep {
                down: actions,
                up: Vec::new(),
            },
        );
    }
    Button {
        kind: "button",
        enabled: true,
        style: ButtonFace {
            text: text.into(),
            size: format!("{size}px"),
            color: spec.text,
            bgcolor: spec.bg,
            alignment: "center",
            show_topbar: !style.is_header(),
            text_expression: false,
        },
        steps,
        feedbacks: Vec::new(),
    }
}

fn hub_connection(event: &EventDefinition) -> OscConnection {
    OscConnection {
        id: "osc_hub".to_string(),
        module: "generic-osc".to_string(),
        label: "Production Hub".to_string(),
        config: ConnectionConfig {
            host: event.network.hub.host.clone(),
            port: event.network.hub.port,
            send_enabled: true,
        },
    }
}
