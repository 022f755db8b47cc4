use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use automata_sim_lib::{
    automaton::{
        definition::{DfaDefinition, TransitionDef},
        trace::Trace,
    },
    config::PlaybackConfig,
    playback::{PlaybackController, PlaybackPhase},
};

fn trace() -> Trace {
    // q0 -0-> q0 -1-> q_accept
    let dfa = DfaDefinition {
        states: vec!["q0".to_string(), "q_accept".to_string()],
        alphabet: vec!['0', '1'],
        start_state: "q0".to_string(),
        end_states: vec!["q_accept".to_string()],
        transitions: vec![
            TransitionDef::new("q0", "0", "q0"),
            TransitionDef::new("q0", "1", "q_accept"),
        ],
    }
    .compile()
    .unwrap();

    dfa.run("01").trace
}

fn controller(interval: Duration) -> (PlaybackController, Arc<Mutex<Vec<Option<String>>>>) {
    let mut controller =
        PlaybackController::new(&PlaybackConfig::default().with_tick_interval(interval));

    let emitted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&emitted);
    controller.on_state_change(move |state| {
        sink.lock().unwrap().push(state.map(|s| s.to_string()));
    });

    (controller, emitted)
}

fn wait_for_finish(controller: &PlaybackController) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while controller.phase() != PlaybackPhase::Finished {
        assert!(Instant::now() < deadline, "playback did not finish in time");
        std::thread::sleep(Duration::from_millis(2));
    }
}

#[test]
fn test_start_arms_and_emits_the_first_state() {
    let (mut controller, emitted) = controller(Duration::from_millis(10));
    assert_eq!(controller.phase(), PlaybackPhase::Idle);
    assert_eq!(controller.current_state(), None);

    controller.start(trace());

    assert_eq!(controller.phase(), PlaybackPhase::Armed);
    assert_eq!(controller.cursor(), 0);
    assert_eq!(controller.current_state().as_deref(), Some("q0"));
    assert_eq!(&*emitted.lock().unwrap(), &[Some("q0".to_string())]);
}

#[test]
fn test_play_runs_to_the_end() {
    let (mut controller, emitted) = controller(Duration::from_millis(5));

    controller.start(trace());
    controller.play();
    wait_for_finish(&controller);

    assert_eq!(controller.cursor(), 2);
    assert_eq!(controller.current_state().as_deref(), Some("q_accept"));
    assert_eq!(
        &*emitted.lock().unwrap(),
        &[
            Some("q0".to_string()),
            Some("q0".to_string()),
            Some("q_accept".to_string()),
        ]
    );
}

#[test]
fn test_stepping_clamps_at_both_ends() {
    let (mut controller, emitted) = controller(Duration::from_millis(10));
    controller.start(trace());

    controller.step_backward();
    assert_eq!(controller.cursor(), 0);

    controller.step_forward();
    controller.step_forward();
    controller.step_forward();
    controller.step_forward();
    assert_eq!(controller.cursor(), 2);
    assert_eq!(controller.phase(), PlaybackPhase::Armed);

    controller.step_backward();
    assert_eq!(controller.cursor(), 1);

    // Every step emits, even the clamped ones.
    assert_eq!(
        &*emitted.lock().unwrap(),
        &[
            Some("q0".to_string()),
            Some("q0".to_string()),
            Some("q0".to_string()),
            Some("q_accept".to_string()),
            Some("q_accept".to_string()),
            Some("q_accept".to_string()),
            Some("q0".to_string()),
        ]
    );
}

#[test]
fn test_steps_are_ignored_while_playing_or_finished() {
    let (mut controller, _) = controller(Duration::from_millis(5));
    controller.start(trace());
    controller.play();

    // Steps race against the ticker here, but they must never move the
    // cursor past the end of the trace.
    controller.step_forward();
    assert!(controller.cursor() <= 2);

    wait_for_finish(&controller);
    controller.step_forward();
    controller.step_backward();
    assert_eq!(controller.cursor(), 2);
}

#[test]
fn test_pause_keeps_the_cursor_and_allows_stepping() {
    let (mut controller, _) = controller(Duration::from_secs(60));
    controller.start(trace());
    controller.play();
    assert_eq!(controller.phase(), PlaybackPhase::Playing);

    controller.pause();
    assert_eq!(controller.phase(), PlaybackPhase::Paused);
    // Nothing ticked within 60s, the cursor is still at the start.
    assert_eq!(controller.cursor(), 0);

    controller.step_forward();
    assert_eq!(controller.cursor(), 1);
}

#[test]
fn test_stop_unloads_and_emits_none() {
    let (mut controller, emitted) = controller(Duration::from_millis(10));
    controller.start(trace());
    controller.step_forward();

    controller.stop();

    assert_eq!(controller.phase(), PlaybackPhase::Idle);
    assert_eq!(controller.cursor(), 0);
    assert_eq!(controller.current_state(), None);
    assert_eq!(emitted.lock().unwrap().last(), Some(&None));
}

#[test]
fn test_stop_when_idle_is_a_no_op() {
    let (mut controller, emitted) = controller(Duration::from_millis(10));

    controller.stop();
    assert!(emitted.lock().unwrap().is_empty());
}

#[test]
fn test_restart_replaces_the_active_trace() {
    let (mut controller, emitted) = controller(Duration::from_millis(10));
    controller.start(trace());
    controller.step_forward();

    controller.start(trace());

    assert_eq!(controller.phase(), PlaybackPhase::Armed);
    assert_eq!(controller.cursor(), 0);
    // The old session ends with a None emission before the new first state.
    assert_eq!(
        &*emitted.lock().unwrap(),
        &[
            Some("q0".to_string()),
            Some("q0".to_string()),
            None,
            Some("q0".to_string()),
        ]
    );
}

#[test]
fn test_play_is_ignored_when_idle() {
    let (mut controller, emitted) = controller(Duration::from_millis(5));

    controller.play();
    std::thread::sleep(Duration::from_millis(30));

    assert_eq!(controller.phase(), PlaybackPhase::Idle);
    assert!(emitted.lock().unwrap().is_empty());
}
