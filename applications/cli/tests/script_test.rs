//! End-to-end script runs: config file -> parsed script -> session reports

use pulse_cli::{parse_script, CliConfig, Report, Runner};
use pulse_playback::{PlayerState, RepeatMode};
use std::io::Write;

fn load(contents: &str) -> CliConfig {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    CliConfig::load(Some(file.path())).unwrap()
}

fn run(config: &CliConfig, script: &str) -> (Runner, Vec<serde_json::Value>) {
    let mut runner = Runner::new(config);
    let reports = parse_script(script)
        .unwrap()
        .into_iter()
        .map(|command| serde_json::to_value(runner.execute(command)).unwrap())
        .collect();
    (runner, reports)
}

#[test]
fn playlist_script_walks_tracks() {
    let config = load(
        r#"
[simulation]
track_duration_secs = 30.0

[[playlist]]
title = "Kartini"
artist = "Epic Majestic Orchestral"
source = "/kartini.wav"

[[playlist]]
title = "Blue"
artist = "Yung Kai"
source = "/blue.wav"

[[playlist]]
title = "Tanah Airku"
artist = "My Spring Lullaby"
source = "/tanah-airku.wav"
"#,
    );

    let (runner, reports) = run(&config, "play; advance 31; next; next");

    assert_eq!(reports.len(), 4);
    assert_eq!(reports[0]["session"]["state"], "playing");
    assert_eq!(reports[1]["session"]["current_index"], 1);
    assert_eq!(reports[2]["session"]["current_index"], 2);

    // Last track with repeat off: parked at the end, paused
    let session = runner.controller().session();
    assert_eq!(session.current_index(), 2);
    assert_eq!(session.state(), PlayerState::Paused);
    assert_eq!(session.position_secs(), 30.0);
}

#[test]
fn single_track_repeat_toggles_on_and_off() {
    let config = load(
        r#"
[player]
shuffle_available = false
repeat_style = "toggle"

[[playlist]]
title = "Kartini"
artist = "Epic Majestic Orchestral"
source = "/kartini.wav"
"#,
    );

    let (runner, reports) = run(&config, "repeat; shuffle; status");

    assert_eq!(reports[0]["session"]["repeat_mode"], "all");
    assert_eq!(reports[1]["session"]["is_shuffle"], false);
    assert_eq!(runner.controller().session().repeat_mode(), RepeatMode::All);
}

#[test]
fn volume_and_mute_report_events() {
    let config = load("[player]\nvolume = 50\n");

    let (runner, reports) = run(&config, "mute; mute; volume 0; hints");

    assert_eq!(reports[0]["session"]["volume"]["level"], 0);
    assert_eq!(reports[1]["session"]["volume"]["level"], 50);
    assert_eq!(
        reports[2]["events"][0]["VolumeChanged"]["is_muted"],
        true
    );
    assert_eq!(reports[3]["kind"], "hints");
    assert_eq!(reports[3]["hints"]["mute"], "Unmute");
    assert!(runner.controller().session().is_muted());
}

#[test]
fn blocked_autoplay_leaves_player_paused() {
    let config = load("[simulation]\nautoplay_blocked = true\n");

    let mut runner = Runner::new(&config);
    match runner.execute("select 2".parse().unwrap()) {
        Report::Session { session, .. } => {
            assert_eq!(session.current_index(), 2);
            assert_eq!(session.state(), PlayerState::Paused);
        }
        Report::Hints { .. } => panic!("expected a session report"),
    }
}
