//! End-to-end round tests driven through the public game loop.

use quadrant::config::{AppConfig, MismatchPolicy};
use quadrant::game::{GameLoop, Quadrant, RoundPhase};
use quadrant::input::{Buttons, ScriptedInput};
use quadrant::render::{CommandRecorder, PlayFieldConfig};
use quadrant::traits::{MockTimeProvider, RawInputEvent};

const FRAME_US: u64 = 100_000;

type TestLoop = GameLoop<ScriptedInput, MockTimeProvider>;

fn config() -> AppConfig {
    let mut config = AppConfig::default();
    config.play.seed = Some(42);
    config
}

fn new_loop(config: &AppConfig) -> TestLoop {
    GameLoop::new(config, ScriptedInput::new(), MockTimeProvider::new()).unwrap()
}

/// Run one frame, then move the wall clock forward.
fn step(gl: &mut TestLoop, recorder: &mut CommandRecorder) -> bool {
    let running = gl.iterate(recorder);
    gl.time().advance_us(FRAME_US);
    running
}

fn tap(gl: &mut TestLoop, recorder: &mut CommandRecorder, buttons: Buttons) {
    gl.input_mut().push_tap(buttons);
    step(gl, recorder);
    step(gl, recorder);
}

/// Press START from the menu and sit through the whole display phase.
/// Returns the logical times at which the displayed element changed.
fn watch_sequence(gl: &mut TestLoop, recorder: &mut CommandRecorder) -> Vec<u64> {
    // The release is consumed by the first display frame.
    gl.input_mut().push_tap(Buttons::START);
    step(gl, recorder);
    assert_eq!(gl.game().phase(), RoundPhase::DisplaySequence);

    let mut changes = Vec::new();
    let mut cursor = gl.game().state().cursor();
    let started = gl.game().now_us();
    for _ in 0..10_000 {
        if gl.game().phase() != RoundPhase::DisplaySequence {
            break;
        }
        step(gl, recorder);
        let now_cursor = gl.game().state().cursor();
        if now_cursor != cursor {
            changes.push(gl.game().now_us() - started);
            cursor = now_cursor;
        }
    }
    assert_eq!(gl.game().phase(), RoundPhase::AwaitInput);
    changes
}

fn reproduce(gl: &mut TestLoop, recorder: &mut CommandRecorder) {
    let sequence: Vec<Quadrant> = gl.game().round().sequence().as_slice().to_vec();
    for quadrant in sequence {
        tap(gl, recorder, Buttons::for_quadrant(quadrant));
    }
}

fn wrong_button(expected: Quadrant) -> Buttons {
    match expected {
        Quadrant::Up => Buttons::DOWN,
        _ => Buttons::UP,
    }
}

#[test]
fn test_level_one_round_is_won() {
    let config = config();
    let mut gl = new_loop(&config);
    let mut recorder = CommandRecorder::new(800, 640);

    let changes = watch_sequence(&mut gl, &mut recorder);
    assert_eq!(gl.game().round().sequence().len(), 4);
    // Each of the four elements is shown for two seconds.
    assert_eq!(changes, vec![2_000_000, 4_000_000, 6_000_000, 8_000_000]);

    reproduce(&mut gl, &mut recorder);
    assert_eq!(gl.game().phase(), RoundPhase::Win);
    assert!(
        recorder
            .status_history()
            .iter()
            .any(|s| s.starts_with("Level 1 cleared"))
    );
}

#[test]
fn test_win_is_entered_once() {
    let config = config();
    let mut gl = new_loop(&config);
    let mut recorder = CommandRecorder::new(800, 640);

    watch_sequence(&mut gl, &mut recorder);
    reproduce(&mut gl, &mut recorder);
    assert_eq!(gl.game().phase(), RoundPhase::Win);

    let won_frames = recorder
        .status_history()
        .iter()
        .filter(|s| s.starts_with("Level 1 cleared"))
        .count();
    for buttons in [Buttons::UP, Buttons::LEFT, Buttons::DOWN] {
        tap(&mut gl, &mut recorder, buttons);
        assert_eq!(gl.game().phase(), RoundPhase::Win);
    }
    let after = recorder
        .status_history()
        .iter()
        .filter(|s| s.starts_with("Level 1 cleared"))
        .count();
    assert_eq!(won_frames, after);
}

#[test]
fn test_quit_from_every_phase() {
    // Strict matching so a wrong tap can reach GAME_OVER.
    let mut config = config();
    config.play.mismatch_policy = MismatchPolicy::GameOver;
    let phases = [
        RoundPhase::MainMenu,
        RoundPhase::DisplaySequence,
        RoundPhase::AwaitInput,
        RoundPhase::Win,
        RoundPhase::GameOver,
    ];

    for target in phases {
        let mut gl = new_loop(&config);
        let mut recorder = CommandRecorder::new(800, 640);
        match target {
            RoundPhase::MainMenu => {}
            RoundPhase::DisplaySequence => {
                gl.input_mut()
                    .push_frame(vec![RawInputEvent::Pressed(Buttons::START)]);
                step(&mut gl, &mut recorder);
            }
            RoundPhase::AwaitInput => {
                watch_sequence(&mut gl, &mut recorder);
            }
            RoundPhase::Win => {
                watch_sequence(&mut gl, &mut recorder);
                reproduce(&mut gl, &mut recorder);
            }
            RoundPhase::GameOver => {
                watch_sequence(&mut gl, &mut recorder);
                let first = gl.game().round().sequence().get(0).unwrap();
                tap(&mut gl, &mut recorder, wrong_button(first));
            }
        }
        assert_eq!(gl.game().phase(), target);

        gl.input_mut()
            .push_frame(vec![RawInputEvent::Pressed(Buttons::QUIT)]);
        assert!(!step(&mut gl, &mut recorder), "quit ignored in {target}");
        assert!(!gl.game().is_running());
    }
}

#[test]
fn test_window_close_stops_loop() {
    let mut gl = new_loop(&config());
    let mut recorder = CommandRecorder::new(800, 640);
    gl.input_mut().push_frame(vec![RawInputEvent::CloseRequested]);
    assert!(!step(&mut gl, &mut recorder));
}

#[test]
fn test_strict_policy_wrong_press_ends_round() {
    let mut config = config();
    config.play.mismatch_policy = MismatchPolicy::GameOver;
    let mut gl = new_loop(&config);
    let mut recorder = CommandRecorder::new(800, 640);

    watch_sequence(&mut gl, &mut recorder);
    let first = gl.game().round().sequence().get(0).unwrap();
    tap(&mut gl, &mut recorder, wrong_button(first));
    assert_eq!(gl.game().phase(), RoundPhase::GameOver);

    // START goes back to the menu at the starting level.
    tap(&mut gl, &mut recorder, Buttons::START);
    assert_eq!(gl.game().phase(), RoundPhase::MainMenu);
    assert_eq!(gl.game().round().level(), 1);
}

#[test]
fn test_default_policy_ignores_wrong_press() {
    let config = config();
    let mut gl = new_loop(&config);
    let mut recorder = CommandRecorder::new(800, 640);

    watch_sequence(&mut gl, &mut recorder);
    let first = gl.game().round().sequence().get(0).unwrap();
    tap(&mut gl, &mut recorder, wrong_button(first));
    assert_eq!(gl.game().phase(), RoundPhase::AwaitInput);
    assert_eq!(gl.game().state().cursor(), Some(0));

    reproduce(&mut gl, &mut recorder);
    assert_eq!(gl.game().phase(), RoundPhase::Win);
}

#[test]
fn test_input_window_expiry_ends_round() {
    let mut config = config();
    config.play.input_window_ms = Some(1_000);
    let mut gl = new_loop(&config);
    let mut recorder = CommandRecorder::new(800, 640);

    watch_sequence(&mut gl, &mut recorder);
    for _ in 0..9 {
        step(&mut gl, &mut recorder);
    }
    assert_eq!(gl.game().phase(), RoundPhase::AwaitInput);
    for _ in 0..2 {
        step(&mut gl, &mut recorder);
    }
    assert_eq!(gl.game().phase(), RoundPhase::GameOver);
}

#[test]
fn test_win_then_start_plays_next_level() {
    let config = config();
    let mut gl = new_loop(&config);
    let mut recorder = CommandRecorder::new(800, 640);

    watch_sequence(&mut gl, &mut recorder);
    reproduce(&mut gl, &mut recorder);
    assert_eq!(gl.game().phase(), RoundPhase::Win);

    gl.input_mut()
        .push_frame(vec![RawInputEvent::Pressed(Buttons::START)]);
    step(&mut gl, &mut recorder);
    assert_eq!(gl.game().phase(), RoundPhase::DisplaySequence);
    assert_eq!(gl.game().round().level(), 2);
    assert_eq!(gl.game().round().sequence().len(), 8);
}

#[test]
fn test_long_stall_is_clamped() {
    let config = config();
    let mut gl = new_loop(&config);
    let mut recorder = CommandRecorder::new(800, 640);

    gl.input_mut()
        .push_frame(vec![RawInputEvent::Pressed(Buttons::START)]);
    step(&mut gl, &mut recorder);
    let before = gl.game().now_us();

    // A five second stall only advances the logical clock by 250 ms.
    gl.time().advance_us(5_000_000);
    step(&mut gl, &mut recorder);
    assert_eq!(gl.game().now_us() - before, 250_000);
    assert_eq!(gl.game().state().cursor(), Some(0));
}

#[test]
fn test_undersized_arena_still_completes_frames() {
    let mut config = config();
    config.render = PlayFieldConfig {
        scratch_vertex_capacity: 50,
        ..Default::default()
    };
    let mut gl = new_loop(&config);
    let mut recorder = CommandRecorder::new(800, 640);

    watch_sequence(&mut gl, &mut recorder);
    assert!(recorder.frame_count() > 1);
    assert!(gl.game().is_running());
    assert_eq!(gl.play_field().arena().high_water(), 42);
}
