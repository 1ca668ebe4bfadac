//! Cross-artifact properties: the four compilers never communicate, so the
//! only way these assertions hold is that they all read the same model
//! fields.

use cueforge::{ArtifactKind, load_event};

const FIXTURE: &str = include_str!("data/standard_recital.yaml");
const DATE: &str = "2026-08-24";

fn artifacts() -> [(ArtifactKind, String); 4] {
    let (event, _) = load_event(FIXTURE).unwrap();
    ArtifactKind::ALL.map(|kind| (kind, kind.compile(&event, DATE).unwrap()))
}

#[test]
fn compiling_twice_is_byte_identical() {
    let first = artifacts();
    let second = artifacts();
    for ((kind, a), (_, b)) in first.iter().zip(second.iter()) {
        assert_eq!(a, b, "{} differs between runs", kind.label());
    }
}

#[test]
fn hub_endpoint_agrees_across_artifacts() {
    let (event, _) = load_event(FIXTURE).unwrap();

    let panel = cueforge::panel::compile(&event).unwrap();
    assert_eq!(panel.connections[0].config.host, "10.0.1.10");
    assert_eq!(panel.connections[0].config.port, 9000);

    let cue_script = ArtifactKind::CueScript.compile(&event, DATE).unwrap();
    assert!(cue_script.contains("HUB_HOST = \"10.0.1.10\""));
    assert!(cue_script.contains("HUB_PORT = 9000"));

    let checklist = ArtifactKind::Checklist.compile(&event, DATE).unwrap();
    assert!(checklist.contains("Production Hub running at `10.0.1.10:9000`"));
}

#[test]
fn graphics_listen_port_agrees_with_checklist() {
    let (event, _) = load_event(FIXTURE).unwrap();
    let graphics = ArtifactKind::GraphicsScript.compile(&event, DATE).unwrap();
    let checklist = ArtifactKind::Checklist.compile(&event, DATE).unwrap();
    assert!(graphics.contains("OSC_LISTEN_PORT = 12000"));
    assert!(checklist.contains("TouchDesigner OSC listening on port `12000`"));
}

#[test]
fn camera_scene_addresses_agree_between_panel_and_graphics() {
    let (event, _) = load_event(FIXTURE).unwrap();

    let panel = cueforge::panel::compile(&event).unwrap();
    let cam_button = &panel.pages["page_2"].buttons["1,1"];
    let scene_path = &cam_button.steps["step0"].down[0].options.path;
    assert_eq!(scene_path, "/obs/scene/Camera1");

    let graphics = ArtifactKind::GraphicsScript.compile(&event, DATE).unwrap();
    assert!(graphics.contains("\"/obs/scene/Camera1\": 0,"));
}

#[test]
fn every_artifact_kind_compiles_for_the_fixture() {
    for (kind, body) in artifacts() {
        assert!(!body.is_empty(), "{} produced empty output", kind.label());
    }
}
