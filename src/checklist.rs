//! Checklist compiler.
//!
//! Renders the operational Markdown checklist: a fixed sequence of sections
//! filled from the same resolved model fields the other compilers read, so
//! the quoted hosts, ports and cue sequence can never disagree with the
//! generated scripts. The `generated_on` date is a parameter so compilation
//! stays a pure function of its inputs.

use std::fmt::Write as _;

use crate::{emit::ArtifactKind, model::EventDefinition};

/// Renders the complete checklist.
pub fn compile(event: &EventDefinition, generated_on: &str) -> String {
    let sections = [
        header(event, generated_on),
        hardware_setup(event),
        network_setup(event),
        software_config(event),
        sound_check(event),
        video_check(event),
        lighting_check(event),
        show_time(event),
        post_show(),
        emergency_procedures(),
    ];
    sections.join("\n")
}

fn header(event: &EventDefinition, generated_on: &str) -> String {
    format!(
        r#"# Setup Checklist: {event_name}

| Field | Value |
|-------|-------|
| Event Type | `{event_type}` |
| Venue | {venue} |
| Performers | {performers} |
| Generated | {generated_on} |
| Template Version | {version} |

---

"#,
        event_name = event.event_name,
        event_type = event.event_type,
        venue = event.venue,
        performers = event.performer_count,
        version = event.template_version,
    )
}

fn hardware_setup(event: &EventDefinition) -> String {
    let mut lines = String::from("## 1. Hardware Setup\n\n### Audio\n\n");

    for mic in &event.audio.microphones {
        let _ = writeln!(lines, "- [ ] **{}** ({}): {}", mic.id, mic.kind, mic.model);
        let _ = writeln!(lines, "  - Assigned to: {}", mic.performer);
        let _ = writeln!(lines, "  - Input channel: {}", mic.input_channel);
        let _ = writeln!(lines, "  - Battery check: fresh batteries installed");
    }
    if event.audio.recording.enabled {
        let _ = writeln!(
            lines,
            "- [ ] Audio recording configured ({}, {}Hz)",
            event.audio.recording.format, event.audio.recording.sample_rate
        );
    }

    lines.push_str("\n### Video\n\n");
    for cam in &event.video.cameras {
        let _ = writeln!(lines, "- [ ] **{}** positioned at {}", cam.id, cam.position);
        let _ = writeln!(lines, "  - Shot type: {}", cam.shot);
        let _ = writeln!(lines, "  - Resolution: {}", cam.resolution);
        let _ = writeln!(lines, "  - Focus and framing verified");
    }
    if event.video.recording.enabled {
        let _ = writeln!(
            lines,
            "- [ ] Video recording configured ({}, {})",
            event.video.recording.format, event.video.recording.bitrate
        );
    }

    lines
}

fn network_setup(event: &EventDefinition) -> String {
    let net = &event.network;
    let console_host = net.lighting_console.host.as_deref().unwrap_or("TBD");
    let console_port = net
        .lighting_console
        .port
        .map(|p| p.to_string())
        .unwrap_or_else(|| "TBD".to_string());

    format!(
        r#"## 2. Network Configuration

- [ ] All devices on same network / VLAN
- [ ] Production Hub running at `{hub_host}:{hub_port}`
- [ ] Hub dashboard accessible at `http://{hub_host}:8080/`
- [ ] All hub drivers connected (check `/health` endpoint)
- [ ] QLab machine reachable at `{qlab_host}:{qlab_port}`
- [ ] Companion reachable at `{companion_host}:{companion_port}`
- [ ] TouchDesigner OSC listening on port `{td_port}`
- [ ] Lighting console at `{console_host}:{console_port}` ({console_protocol})
- [ ] Firewall rules allow OSC traffic (UDP) between all devices
- [ ] Network switch / router powered and verified

"#,
        hub_host = net.hub.host,
        hub_port = net.hub.port,
        qlab_host = net.qlab.host,
        qlab_port = net.qlab.port,
        companion_host = net.companion.host,
        companion_port = net.companion.port,
        td_port = net.touchdesigner.osc_listen_port,
        console_protocol = net.lighting_console.protocol,
    )
}

fn software_config(event: &EventDefinition) -> String {
    let net = &event.network;
    format!(
        r#"## 3. Software Configuration

### Production Hub
- [ ] Hub process running (`npm start` or systemd service)
- [ ] All device drivers connected (check dashboard at `:8080`)
- [ ] Hub OSC port `{hub_port}` receiving traffic
- [ ] Systems check passing (`/system/check`)

### QLab
- [ ] QLab workspace open
- [ ] OSC passcode set to `{passcode}`
- [ ] Cue list built (run `{qlab_script}`)
- [ ] Network cues targeting hub verified (check destination host/port)
- [ ] All cues verified in cue list

### Companion
- [ ] Companion running and accessible via web UI
- [ ] Page configuration imported (`{panel_file}`)
- [ ] OSC connection to Production Hub verified (test a cue button)
- [ ] Stream Deck / control surface connected and showing buttons

### TouchDesigner
- [ ] TouchDesigner project open
- [ ] Setup script executed (`{td_script}`)
- [ ] Camera inputs recognized and showing video
- [ ] OSC input receiving from hub on port `{td_port}`
- [ ] Video switch responding to cue triggers

"#,
        hub_port = net.hub.port,
        passcode = net.qlab.passcode,
        qlab_script = ArtifactKind::CueScript.file_name(&event.event_type),
        panel_file = ArtifactKind::Panel.file_name(&event.event_type),
        td_script = ArtifactKind::GraphicsScript.file_name(&event.event_type),
        td_port = net.touchdesigner.osc_listen_port,
    )
}

fn sound_check(event: &EventDefinition) -> String {
    let mut lines = String::from("## 4. Sound Check\n\n");

    for mic in &event.audio.microphones {
        let _ = writeln!(lines, "- [ ] **{}** ({})", mic.id, mic.performer);
        let _ = writeln!(lines, "  - Channel {} signal present", mic.input_channel);
        let _ = writeln!(lines, "  - Gain at {}dB, adjust to taste", mic.gain_db);
        let _ = writeln!(lines, "  - No feedback at performance levels");
        let _ = writeln!(lines, "  - Monitor mix set for performer");
    }

    lines.push_str("- [ ] Main mix balanced\n");
    lines.push_str("- [ ] Recording levels verified (peaks below -6dB)\n");
    lines.push_str("- [ ] Mute/unmute cues tested from Companion\n");
    lines
}

fn video_check(event: &EventDefinition) -> String {
    let mut lines = String::from("## 5. Video Check\n\n");

    for cam in &event.video.cameras {
        let _ = writeln!(lines, "- [ ] **{}** ({} shot)", cam.id, cam.shot);
        let _ = writeln!(lines, "  - Image quality verified");
        let _ = writeln!(lines, "  - White balance set");
        let _ = writeln!(lines, "  - Focus locked");
    }

    lines.push_str("- [ ] Video switch tested (all camera cuts clean)\n");
    lines.push_str("- [ ] Recording test: start/stop verified\n");
    lines.push_str("- [ ] Output feed confirmed on program monitor\n");
    lines
}

fn lighting_check(event: &EventDefinition) -> String {
    let mut lines = format!(
        "## 6. Lighting Check\n\n- [ ] Lighting console: {}\n- [ ] Universe: {}\n\n",
        event.lighting.controller, event.lighting.universe
    );

    for preset in &event.lighting.presets {
        let _ = writeln!(lines, "- [ ] Preset **{}** verified", preset.name);
        if let Some(desc) = &preset.description {
            let _ = writeln!(lines, "  - {desc}");
        }
    }

    lines.push_str("- [ ] All lighting cues fire correctly from QLab/Companion\n");
    lines.push_str("- [ ] Fade times feel appropriate\n");
    lines
}

fn show_time(event: &EventDefinition) -> String {
    let mut lines = String::from(
        r#"## 7. Show Time Checklist

### 15 Minutes Before
- [ ] All systems powered and stable
- [ ] Recording media has sufficient space
- [ ] Companion page on Show Control
- [ ] QLab playhead on first cue

### 5 Minutes Before
- [ ] House to half (cue ready)
- [ ] Performers miked and in position
- [ ] Stage manager confirms ready

### Cue Sequence

"#,
    );

    for cue in &event.cues {
        let _ = writeln!(
            lines,
            "- [ ] **Q{}** {} [{}] @ {}",
            cue.number, cue.name, cue.kind, cue.timing_label
        );
    }

    lines
}

fn post_show() -> String {
    String::from(
        r#"## 8. Post-Show

- [ ] Recording stopped and files verified
- [ ] All recordings backed up to secondary media
- [ ] Microphones powered down, batteries removed
- [ ] Cameras powered down
- [ ] Lighting returned to house preset
- [ ] QLab workspace saved
- [ ] Companion configuration saved
- [ ] Network equipment powered down (if applicable)
- [ ] Venue walkthrough - all gear accounted for

"#,
    )
}

fn emergency_procedures() -> String {
    String::from(
        r#"## 9. Emergency Procedures

- [ ] Know location of circuit breaker panel
- [ ] Backup audio path identified (direct mic to speaker)
- [ ] Manual camera override procedure known
- [ ] Lighting console manual override accessible
- [ ] Contact info for:
  - [ ] Venue technical contact: _______________
  - [ ] Audio engineer: _______________
  - [ ] Video operator: _______________
  - [ ] Lighting operator: _______________

---
*Generated by cueforge*
"#,
    )
}
