//! The reference scenario: three cues across the three show phases plus one
//! microphone, checked across the panel and checklist artifacts.

use cueforge::{ArtifactKind, load_event};

const TEMPLATE: &str = r#"
event_type: smoke
event_name: Smoke Test
network:
  hub:
    host: 127.0.0.1
    port: 9000
audio:
  microphones:
    - id: vocal
      input_channel: 1
cues:
  - number: 1
    name: Preset
    type: lighting
    timing: pre-show
  - number: 2
    name: Start
    type: system
    timing: show
  - number: 3
    name: Restore
    type: lighting
    timing: post-show
"#;

#[test]
fn cue_buttons_land_in_phase_rows() {
    let (event, warnings) = load_event(TEMPLATE).unwrap();
    assert!(warnings.is_empty());

    let panel = cueforge::panel::compile(&event).unwrap();
    let page = &panel.pages["page_1"];
    assert!(page.buttons["1,0"].style.text.starts_with("Q1"));
    assert!(page.buttons["2,0"].style.text.starts_with("Q2"));
    assert!(page.buttons["3,0"].style.text.starts_with("Q3"));
}

#[test]
fn checklist_lists_the_cues_in_numeric_order() {
    let (event, _) = load_event(TEMPLATE).unwrap();
    let text = ArtifactKind::Checklist.compile(&event, "2026-08-24").unwrap();
    let q1 = text.find("- [ ] **Q1**").unwrap();
    let q2 = text.find("- [ ] **Q2**").unwrap();
    let q3 = text.find("- [ ] **Q3**").unwrap();
    assert!(q1 < q2 && q2 < q3);
}

#[test]
fn mute_and_unmute_target_channel_one() {
    let (event, _) = load_event(TEMPLATE).unwrap();
    let panel = cueforge::panel::compile(&event).unwrap();
    let page = &panel.pages["page_2"];

    let mute = &page.buttons["2,1"].steps["step0"].down[0];
    assert_eq!(mute.options.path, "/avantis/ch/1/mix/mute");
    assert_eq!(mute.options.value, Some(serde_json::json!(1)));

    let unmute = &page.buttons["2,2"].steps["step0"].down[0];
    assert_eq!(unmute.options.path, "/avantis/ch/1/mix/mute");
    assert_eq!(unmute.options.value, Some(serde_json::json!(0)));
}
