//! Cue-sequencing compiler.
//!
//! Emits a standalone Python script that drives the cue-runner's OSC API to
//! build one cue per model cue, sorted by cue number ascending. Every
//! network message a cue fires targets the same hub endpoint the panel's
//! connection descriptor binds, and the workspace passcode comes from the
//! same resolved network config the checklist prints.
//!
//! Timing mapping: pre-show and post-show cues are created with
//! auto-continue (they run as batched sequences), show-time cues are
//! manual-trigger. A cue's first hub action lives on the cue itself; any
//! further actions become auto-continue follow-on cues numbered
//! `{number}.2`, `{number}.3`, ... so each model cue still fires as one
//! operator action. A cue with no hub actions gets the same
//! `/cue/{number}/start` placeholder the panel uses.

use std::fmt::Write as _;

use crate::model::{Cue, EventDefinition, HubAction};

/// Renders the cue-runner build script.
pub fn compile(event: &EventDefinition) -> String {
    let qlab = &event.network.qlab;
    let hub = &event.network.hub;

    let mut cues: Vec<&Cue> = event.cues.iter().collect();
    cues.sort_by(|a, b| {
        a.number_sort_key()
            .partial_cmp(&b.number_sort_key())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut out = String::new();
    let _ = write!(
        out,
        r#"#!/usr/bin/env python3
"""QLab cue list builder for {event_name}.

Run with the target workspace open. Creates one network cue per show cue,
all pointed at the production hub. Requires python-osc:

    pip install python-osc
"""

import time

from pythonosc.udp_client import SimpleUDPClient

QLAB_HOST = {qlab_host}
QLAB_PORT = {qlab_port}
QLAB_PASSCODE = {passcode}

HUB_HOST = {hub_host}
HUB_PORT = {hub_port}

client = SimpleUDPClient(QLAB_HOST, QLAB_PORT)


def send(address, *args):
    client.send_message(address, list(args))
    time.sleep(0.02)


def network_cue(number, name, message, auto_continue):
    send("/new", "network")
    send("/cue/selected/number", number)
    send("/cue/selected/name", name)
    send("/cue/selected/patch", 1)
    send("/cue/selected/customString", message)
    send("/cue/selected/continueMode", 2 if auto_continue else 0)


def build():
    send("/connect", QLAB_PASSCODE)

    # Network patch 1 -> production hub
    send("/settings/network/patch/1/name", "Production Hub")
    send("/settings/network/patch/1/address", HUB_HOST)
    send("/settings/network/patch/1/port", HUB_PORT)

"#,
        event_name = event.event_name,
        qlab_host = py_str(&qlab.host),
        qlab_port = qlab.port,
        passcode = py_str(&qlab.passcode),
        hub_host = py_str(&hub.host),
        hub_port = hub.port,
    );

    let mut created = 0usize;
    for cue in &cues {
        let _ = writeln!(
            out,
            "    # Q{} {} [{}] @ {}",
            cue.number, cue.name, cue.kind, cue.timing_label
        );
        if cue.hub_actions.is_empty() {
            let _ = writeln!(
                out,
                "    network_cue({}, {}, {}, {})",
                py_str(&cue.number),
                py_str(&cue.name),
                py_str(&cue.placeholder_address()),
                py_bool(cue.phase.auto_continue()),
            );
            created += 1;
        } else {
            for (i, action) in cue.hub_actions.iter().enumerate() {
                let number = if i == 0 {
                    cue.number.clone()
                } else {
                    format!("{}.{}", cue.number, i + 1)
                };
                // Follow-on actions always auto-continue so the whole cue
                // fires from one trigger.
                let auto = if i + 1 < cue.hub_actions.len() {
                    true
                } else {
                    cue.phase.auto_continue()
                };
                let _ = writeln!(
                    out,
                    "    network_cue({}, {}, {}, {})",
                    py_str(&number),
                    py_str(&cue.name),
                    py_str(&osc_message(action)),
                    py_bool(auto),
                );
                created += 1;
            }
        }
        out.push('\n');
    }

    let _ = write!(
        out,
        r#"
if __name__ == "__main__":
    build()
    print("Created {created} cue(s) in QLab at %s:%d" % (QLAB_HOST, QLAB_PORT))
"#,
    );
    out
}

/// A hub action as the cue-runner's custom OSC message string:
/// address followed by space-separated typed argument tokens.
fn osc_message(action: &HubAction) -> String {
    let mut msg = action.address.clone();
    for arg in &action.args {
        msg.push(' ');
        msg.push_str(&arg.message_token());
    }
    msg
}

fn py_str(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn py_bool(b: bool) -> &'static str {
    if b { "True" } else { "False" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AudioInventory, Cue, CuePhase, LightingSetup, NetworkConfig, OscArg, VideoInventory,
    };

    fn cue(number: &str, timing: &str, actions: Vec<HubAction>) -> Cue {
        Cue {
            number: number.to_string(),
            id: format!("q{number}"),
            name: format!("Cue {number}"),
            kind: "lighting".to_string(),
            phase: CuePhase::from_label(timing),
            timing_label: timing.to_string(),
            hub_actions: actions,
        }
    }

    fn event(cues: Vec<Cue>) -> EventDefinition {
        EventDefinition {
            event_type: "recital".to_string(),
            event_name: "Spring Recital".to_string(),
            venue: "Main Hall".to_string(),
            performer_count: 3,
            template_version: "1.0".to_string(),
            network: NetworkConfig::default(),
            audio: AudioInventory::default(),
            video: VideoInventory::default(),
            lighting: LightingSetup::default(),
            cues,
        }
    }

    #[test]
    fn cues_are_ordered_by_number_ascending() {
        let script = compile(&event(vec![
            cue("10", "show", Vec::new()),
            cue("2", "show", Vec::new()),
        ]));
        let first = script.find("network_cue(\"2\"").unwrap();
        let second = script.find("network_cue(\"10\"").unwrap();
        assert!(first < second);
    }

    #[test]
    fn script_embeds_passcode_and_hub_endpoint() {
        let mut ev = event(Vec::new());
        ev.network.qlab.passcode = "9876".to_string();
        ev.network.hub.host = "10.0.1.2".to_string();
        ev.network.hub.port = 9100;
        let script = compile(&ev);
        assert!(script.contains("QLAB_PASSCODE = \"9876\""));
        assert!(script.contains("HUB_HOST = \"10.0.1.2\""));
        assert!(script.contains("HUB_PORT = 9100"));
    }

    #[test]
    fn timing_maps_to_continue_mode() {
        let script = compile(&event(vec![
            cue("1", "pre-show", Vec::new()),
            cue("2", "show", Vec::new()),
        ]));
        assert!(script.contains("network_cue(\"1\", \"Cue 1\", \"/cue/1/start\", True)"));
        assert!(script.contains("network_cue(\"2\", \"Cue 2\", \"/cue/2/start\", False)"));
    }

    #[test]
    fn extra_hub_actions_become_follow_on_cues() {
        let actions = vec![
            HubAction {
                address: "/lights/exec/1".to_string(),
                args: Vec::new(),
            },
            HubAction {
                address: "/fade/house".to_string(),
                args: vec![OscArg::Float(0.5)],
            },
        ];
        let script = compile(&event(vec![cue("3", "show", actions)]));
        // The first action auto-continues into the follow-on; the last one
        // takes the cue's own timing.
        assert!(script.contains("network_cue(\"3\", \"Cue 3\", \"/lights/exec/1\", True)"));
        assert!(script.contains("network_cue(\"3.2\", \"Cue 3\", \"/fade/house 0.5\", False)"));
    }

    #[test]
    fn message_tokens_carry_arg_types() {
        let actions = vec![HubAction {
            address: "/avantis/ch/1/mix/mute".to_string(),
            args: vec![OscArg::Int(1)],
        }];
        let script = compile(&event(vec![cue("4", "show", actions)]));
        assert!(script.contains("\"/avantis/ch/1/mix/mute 1\""));
    }
}
