//! Realtime-graphics setup compiler.
//!
//! Emits a standalone Python script for the graphics app's scripting API:
//! one video-device input per camera in declared order, an OSC listener on
//! the configured port, and a handler table that maps the exact addresses
//! the panel and cue script fire to scene switches. Scene names come from
//! [`crate::model::Camera::scene_name`], the same rule the panel's camera
//! buttons use.

use std::fmt::Write as _;

use crate::model::EventDefinition;

/// Renders the graphics-app setup script.
pub fn compile(event: &EventDefinition) -> String {
    let port = event.network.touchdesigner.osc_listen_port;
    let cameras = &event.video.cameras;

    let mut out = String::new();
    let _ = write!(
        out,
        r#"# TouchDesigner setup for {event_name}
#
# Run from the textport. Builds the camera inputs, the program switch and
# the OSC listener that reacts to hub scene-change traffic.

OSC_LISTEN_PORT = {port}

# (camera id, scene name, switch input index)
CAMERA_INPUTS = [
"#,
        event_name = event.event_name,
    );
    for (i, cam) in cameras.iter().enumerate() {
        let _ = writeln!(
            out,
            "    ({}, {}, {}),",
            py_str(&cam.id),
            py_str(&cam.scene_name()),
            i
        );
    }
    out.push_str("]\n\n# OSC address -> switch input index\nSCENE_SWITCH = {\n");
    for (i, cam) in cameras.iter().enumerate() {
        let _ = writeln!(out, "    {}: {},", py_str(&cam.scene_address()), i);
    }
    out.push_str("}\n\n# Video-cue hub address -> cue id\nCUE_HANDLERS = {\n");
    for (address, cue_id) in video_cue_handlers(event) {
        let _ = writeln!(out, "    {}: {},", py_str(&address), py_str(&cue_id));
    }
    out.push_str("}\n");

    out.push_str(
        r#"

def setup():
    root = op('/project1')

    for name in ['camera_switch', 'hub_osc_in', 'hub_osc_callbacks']:
        existing = root.op(name)
        if existing is not None:
            existing.destroy()

    for cam_id, scene, index in CAMERA_INPUTS:
        existing = root.op('in_' + cam_id)
        if existing is not None:
            existing.destroy()
        top = root.create(videodeviceinTOP, 'in_' + cam_id)
        top.par.device = index
        top.nodeX = -400
        top.nodeY = -index * 120

    switch = root.create(switchTOP, 'camera_switch')
    switch.nodeX = -200
    for cam_id, scene, index in CAMERA_INPUTS:
        switch.inputConnectors[index].connect(root.op('in_' + cam_id))

    osc = root.create(oscinDAT, 'hub_osc_in')
    osc.par.port = OSC_LISTEN_PORT
    osc.par.callbacks = 'hub_osc_callbacks'

    callbacks = root.create(textDAT, 'hub_osc_callbacks')
    callbacks.text = CALLBACKS_BODY

    print('Setup complete: %d camera input(s), OSC on port %d'
          % (len(CAMERA_INPUTS), OSC_LISTEN_PORT))


CALLBACKS_BODY = '''
SCENE_SWITCH = %r
CUE_HANDLERS = %r


def onReceiveOSC(dat, rowIndex, message, bytesData, timeStamp, address, args, peer):
    index = SCENE_SWITCH.get(address)
    if index is not None:
        op('/project1/camera_switch').par.index = index
        return
    cue_id = CUE_HANDLERS.get(address)
    if cue_id is not None:
        # Cue-driven scene logic keyed by cue id.
        op('/project1').store('active_cue', cue_id)
    return
''' % (SCENE_SWITCH, CUE_HANDLERS)


if __name__ == '__main__':
    setup()
"#,
    );
    out
}

/// One handler per distinct hub address fired by a video-type cue, in first
/// appearance order, keyed to the cue that fires it.
fn video_cue_handlers(event: &EventDefinition) -> Vec<(String, String)> {
    let mut handlers: Vec<(String, String)> = Vec::new();
    for cue in event.cues.iter().filter(|c| c.kind == "video") {
        for action in &cue.hub_actions {
            if handlers.iter().any(|(a, _)| a == &action.address) {
                continue;
            }
            handlers.push((action.address.clone(), cue.id.clone()));
        }
    }
    handlers
}

fn py_str(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AudioInventory, Camera, Cue, CuePhase, HubAction, LightingSetup, NetworkConfig,
        VideoInventory,
    };

    fn camera(id: &str) -> Camera {
        Camera {
            id: id.to_string(),
            position: "front".to_string(),
            shot: "wide".to_string(),
            resolution: "1080p".to_string(),
        }
    }

    fn event() -> EventDefinition {
        EventDefinition {
            event_type: "recital".to_string(),
            event_name: "Spring Recital".to_string(),
            venue: "Main Hall".to_string(),
            performer_count: 3,
            template_version: "1.0".to_string(),
            network: NetworkConfig::default(),
            audio: AudioInventory::default(),
            video: VideoInventory {
                cameras: vec![camera("cam1"), camera("cam2")],
                ..VideoInventory::default()
            },
            lighting: LightingSetup::default(),
            cues: Vec::new(),
        }
    }

    #[test]
    fn declares_inputs_in_camera_order() {
        let script = compile(&event());
        let first = script.find("(\"cam1\", \"Camera1\", 0)").unwrap();
        let second = script.find("(\"cam2\", \"Camera2\", 1)").unwrap();
        assert!(first < second);
    }

    #[test]
    fn listener_binds_the_configured_port() {
        let mut ev = event();
        ev.network.touchdesigner.osc_listen_port = 12345;
        let script = compile(&ev);
        assert!(script.contains("OSC_LISTEN_PORT = 12345"));
    }

    #[test]
    fn scene_handlers_match_panel_camera_addresses() {
        let script = compile(&event());
        assert!(script.contains("\"/obs/scene/Camera1\": 0,"));
        assert!(script.contains("\"/obs/scene/Camera2\": 1,"));
    }

    #[test]
    fn video_cue_addresses_register_once_per_distinct_address() {
        let mut ev = event();
        let action = |addr: &str| HubAction {
            address: addr.to_string(),
            args: Vec::new(),
        };
        ev.cues = vec![
            Cue {
                number: "5".to_string(),
                id: "q5".to_string(),
                name: "Roll in".to_string(),
                kind: "video".to_string(),
                phase: CuePhase::Show,
                timing_label: "show".to_string(),
                hub_actions: vec![action("/td/scene/opener"), action("/td/scene/opener")],
            },
            Cue {
                number: "6".to_string(),
                id: "q6".to_string(),
                name: "Blackout".to_string(),
                kind: "lighting".to_string(),
                phase: CuePhase::Show,
                timing_label: "show".to_string(),
                hub_actions: vec![action("/lights/exec/9")],
            },
        ];
        let script = compile(&ev);
        assert_eq!(script.matches("\"/td/scene/opener\": \"q5\",").count(), 1);
        // Non-video cues do not register graphics handlers.
        assert!(!script.contains("/lights/exec/9"));
    }
}
