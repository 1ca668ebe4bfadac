use std::path::PathBuf;

#[test]
fn cli_writes_all_four_artifacts() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let template = dir.join("smoke.yaml");
    std::fs::write(
        &template,
        "event_type: smoke\nevent_name: Smoke Test\ncues:\n  - number: 1\n    name: Go\n    type: system\n",
    )
    .unwrap();

    let out_dir = dir.join("out");
    let _ = std::fs::remove_dir_all(&out_dir);

    let status = std::process::Command::new(env!("CARGO_BIN_EXE_cueforge"))
        .arg(&template)
        .args(["--output-dir"])
        .arg(&out_dir)
        .status()
        .unwrap();
    assert!(status.success());

    for name in [
        "smoke_companion.json",
        "smoke_qlab_cues.py",
        "smoke_touchdesigner_setup.py",
        "smoke_checklist.md",
    ] {
        assert!(out_dir.join(name).is_file(), "missing {name}");
    }
}

#[test]
fn cli_only_selector_restricts_outputs() {
    let dir = PathBuf::from("target").join("cli_smoke_only");
    std::fs::create_dir_all(&dir).unwrap();

    let template = dir.join("smoke.yaml");
    std::fs::write(
        &template,
        "event_type: smoke\ncues:\n  - number: 1\n",
    )
    .unwrap();

    let out_dir = dir.join("out");
    let _ = std::fs::remove_dir_all(&out_dir);

    let status = std::process::Command::new(env!("CARGO_BIN_EXE_cueforge"))
        .arg(&template)
        .args(["--output-dir"])
        .arg(&out_dir)
        .args(["--only", "checklist", "panel"])
        .status()
        .unwrap();
    assert!(status.success());

    assert!(out_dir.join("smoke_checklist.md").is_file());
    assert!(out_dir.join("smoke_companion.json").is_file());
    assert!(!out_dir.join("smoke_qlab_cues.py").exists());
}

#[test]
fn cli_fails_on_missing_required_field() {
    let dir = PathBuf::from("target").join("cli_smoke_fatal");
    std::fs::create_dir_all(&dir).unwrap();

    let template = dir.join("bad.yaml");
    std::fs::write(&template, "event_name: No Type Or Cues\n").unwrap();

    let status = std::process::Command::new(env!("CARGO_BIN_EXE_cueforge"))
        .arg(&template)
        .args(["--output-dir"])
        .arg(dir.join("out"))
        .status()
        .unwrap();
    assert!(!status.success());
}
