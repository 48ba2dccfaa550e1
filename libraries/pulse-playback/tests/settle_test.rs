//! Delayed play/pause settling
//!
//! Players configured with a settle delay stay in `Loading` for the full
//! delay after the device acknowledges, and a newer request replaces any
//! pending settle.

use pulse_playback::{
    ControllerConfig, ManualClock, PlaybackController, PlaybackEvent, PlayerState,
    SimulatedDevice, Track,
};
use std::time::Duration;

// ===== Helpers =====

fn setup() -> (PlaybackController<SimulatedDevice>, ManualClock) {
    let clock = ManualClock::new();
    let playlist = vec![
        Track::new(
            "Kartini",
            "Epic Majestic Orchestral",
            "/Kartini - Archipelago Series - Epic Majestic Orchestral.wav",
        ),
        Track::new(
            "Indonesia Pusaka",
            "My Spring Lullaby",
            "/Indonesia Pusaka - My Spring Lullaby.wav",
        ),
    ];

    let mut controller =
        PlaybackController::new(ControllerConfig::full(), playlist).with_clock(clock.clone());
    controller.attach(SimulatedDevice::new());
    controller.pump_events();

    (controller, clock)
}

fn wait(controller: &mut PlaybackController<SimulatedDevice>, clock: &ManualClock, ms: u64) {
    clock.advance(Duration::from_millis(ms));
    controller.pump_events();
}

// ===== Tests =====

#[test]
fn play_settles_after_delay() {
    let (mut controller, clock) = setup();

    controller.toggle();
    controller.pump_events();
    assert_eq!(controller.state(), PlayerState::Loading);
    assert_eq!(controller.pending_settle(), Some(PlayerState::Playing));

    wait(&mut controller, &clock, 499);
    assert_eq!(controller.state(), PlayerState::Loading);

    wait(&mut controller, &clock, 1);
    assert_eq!(controller.state(), PlayerState::Playing);
    assert_eq!(controller.pending_settle(), None);
}

#[test]
fn pause_settles_after_delay() {
    let (mut controller, clock) = setup();
    controller.toggle();
    controller.pump_events();
    wait(&mut controller, &clock, 500);
    assert_eq!(controller.state(), PlayerState::Playing);

    controller.toggle();
    controller.pump_events();
    assert_eq!(controller.state(), PlayerState::Loading);
    assert!(controller.device().unwrap().is_paused());

    wait(&mut controller, &clock, 500);
    assert_eq!(controller.state(), PlayerState::Paused);
}

#[test]
fn newer_toggle_replaces_pending_settle() {
    let (mut controller, clock) = setup();

    controller.toggle();
    controller.pump_events();
    wait(&mut controller, &clock, 300);

    // Still loading, so this is another play request
    controller.toggle();
    controller.pump_events();

    // The first settle would have fired by now
    wait(&mut controller, &clock, 300);
    assert_eq!(controller.state(), PlayerState::Loading);

    wait(&mut controller, &clock, 200);
    assert_eq!(controller.state(), PlayerState::Playing);

    let state_changes: Vec<_> = controller
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, PlaybackEvent::StateChanged { .. }))
        .collect();
    assert_eq!(
        state_changes.last(),
        Some(&PlaybackEvent::StateChanged {
            state: PlayerState::Playing
        })
    );
}

#[test]
fn skip_inside_settle_window_keeps_playing() {
    let (mut controller, clock) = setup();

    controller.toggle();
    controller.pump_events();
    assert_eq!(controller.pending_settle(), Some(PlayerState::Playing));

    controller.skip_forward();
    controller.pump_events();
    wait(&mut controller, &clock, 600);

    assert_eq!(controller.session().current_index(), 1);
    assert_eq!(controller.state(), PlayerState::Playing);
    assert!(!controller.device().unwrap().is_paused());
}

#[test]
fn skip_inside_pause_window_settles_paused() {
    let (mut controller, clock) = setup();
    controller.toggle();
    controller.pump_events();
    wait(&mut controller, &clock, 500);

    controller.toggle();
    controller.pump_events();
    assert_eq!(controller.pending_settle(), Some(PlayerState::Paused));

    controller.skip_forward();
    assert_eq!(controller.state(), PlayerState::Paused);
    assert_eq!(controller.pending_settle(), None);

    wait(&mut controller, &clock, 600);
    assert_eq!(controller.state(), PlayerState::Paused);
    assert!(controller.device().unwrap().is_paused());
}

#[test]
fn detach_cancels_pending_settle() {
    let (mut controller, _clock) = setup();

    controller.toggle();
    controller.pump_events();
    assert!(controller.pending_settle().is_some());

    controller.detach();
    assert_eq!(controller.pending_settle(), None);
}

#[test]
fn end_of_playlist_pauses_without_delay() {
    let (mut controller, clock) = setup();
    controller.select_track(1);
    controller.pump_events();
    wait(&mut controller, &clock, 500);
    assert_eq!(controller.state(), PlayerState::Playing);

    controller.device_mut().unwrap().advance(1_000.0);
    controller.pump_events();

    assert_eq!(controller.state(), PlayerState::Paused);
    assert_eq!(controller.pending_settle(), None);
}
