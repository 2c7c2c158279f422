mod common;

use std::time::Duration;

use common::{DeviceCall, ICON_TIME, find_from, long_snake, runner, variant};
use led_snake::device::{Icon, tunes};
use led_snake::game::{Command, Direction, GameConfig, GameEngine, Position, Variant};
use led_snake::modes::{GameRunner, Phase};
use tokio::time::{sleep, timeout};

const DEATH_BPM: u32 = 144;
const ANTHEM_BPM: u32 = 120;

#[tokio::test(start_paused = true)]
async fn test_greeting_only_once_across_rounds() {
    let journal = common::Journal::default();
    let (_commands, receiver) = tokio::sync::mpsc::unbounded_channel();
    let mut runner = GameRunner::new(
        GameEngine::seeded(GameConfig::default(), 3),
        common::RecordingDisplay(journal.clone()),
        common::RecordingSpeaker(journal.clone()),
        receiver,
    )
    .unwrap();

    // The starting snake runs into the right wall on its third move, so
    // 25 seconds cover several deaths
    let _ = timeout(Duration::from_secs(25), runner.run()).await;

    let script = journal.script();
    assert_eq!(script[0], DeviceCall::Text("Hi Zhi!".to_string()));
    let texts = script
        .iter()
        .filter(|call| matches!(call, DeviceCall::Text(_)))
        .count();
    assert_eq!(texts, 1);
    assert!(journal.count(&DeviceCall::Icon(Icon::Skull)) >= 2);
}

#[tokio::test(start_paused = true)]
async fn test_first_board_is_drawn() {
    let (mut runner, _commands, journal) = runner(variant(Variant::Victory));
    runner.state_mut().food = Position::new(4, 4);

    let _ = timeout(Duration::from_millis(100), runner.run()).await;

    let calls = journal.calls();
    assert_eq!(calls[0], DeviceCall::Clear);
    assert!(calls.contains(&DeviceCall::Plot {
        x: 2,
        y: 2,
        brightness: 255
    }));
    assert!(calls.contains(&DeviceCall::Plot {
        x: 0,
        y: 2,
        brightness: 90
    }));
    assert!(calls.contains(&DeviceCall::Plot {
        x: 4,
        y: 4,
        brightness: 120
    }));
}

#[tokio::test(start_paused = true)]
async fn test_turn_applies_before_next_tick() {
    let (mut runner, commands, _journal) = runner(variant(Variant::Victory));
    runner.state_mut().food = Position::new(0, 0);
    commands.send(Command::TurnLeft).unwrap();

    // One tick at 700 ms
    let _ = timeout(Duration::from_millis(800), runner.run()).await;

    let state = runner.state();
    assert_eq!(state.snake.direction, Direction::Up);
    assert_eq!(state.snake.head(), Position::new(2, 1));
    assert_eq!(state.snake.len(), 3);
    assert!(state.food_blink);
}

#[tokio::test(start_paused = true)]
async fn test_death_sequence() {
    let (mut runner, _commands, journal) = runner(variant(Variant::Victory));
    let status = runner.subscribe();

    // Death on the third tick (~2.1 s), then skull, melody and a pause.
    // Stops before the second round can reach a wall.
    let _ = timeout(Duration::from_millis(6300), runner.run()).await;

    let script = journal.script();
    let skull = find_from(&script, 0, &DeviceCall::Icon(Icon::Skull)).unwrap();
    assert_eq!(script[skull - 1], DeviceCall::StopAll);
    assert_eq!(
        script[skull + 1],
        DeviceCall::Melody {
            bpm: DEATH_BPM,
            background: false
        }
    );
    // Cleared after the pause, then cleared again by the new round's board
    assert_eq!(script[skull + 2], DeviceCall::Clear);
    assert_eq!(script[skull + 3], DeviceCall::Clear);

    assert_eq!(journal.count(&DeviceCall::Icon(Icon::Skull)), 1);
    assert_eq!(status.borrow().round, 2);
    assert_eq!(status.borrow().phase, Phase::Playing);
    assert!(runner.state().is_alive);
    assert_eq!(runner.state().growth, 0);
}

#[tokio::test(start_paused = true)]
async fn test_logo_starts_a_new_round() {
    let (mut runner, commands, journal) = runner(variant(Variant::Victory));
    let status = runner.subscribe();
    runner.state_mut().food = Position::new(0, 0);
    runner.state_mut().snake.direction = Direction::Down;

    let script = async {
        sleep(Duration::from_millis(1000)).await;
        commands.send(Command::Reset).unwrap();
    };
    let (_, _) = tokio::join!(timeout(Duration::from_millis(1200), runner.run()), script);

    assert_eq!(status.borrow().round, 2);
    assert_eq!(journal.count(&DeviceCall::Icon(Icon::Skull)), 0);
    let state = runner.state();
    assert_eq!(state.snake.direction, Direction::Right);
    assert_eq!(state.snake.head(), Position::new(2, 2));
    assert_eq!(state.tick_ms, 700);
}

#[tokio::test(start_paused = true)]
async fn test_collect_tone_only_in_victory() {
    for (variant, chirps) in [(Variant::Victory, 1), (Variant::Anthem, 0)] {
        let (mut runner, _commands, journal) = runner(common::variant(variant));
        runner.state_mut().food = Position::new(3, 2);

        let _ = timeout(Duration::from_millis(750), runner.run()).await;

        let tone = DeviceCall::Tone {
            frequency_hz: tunes::COLLECT_TONE_HZ,
            duration: Duration::from_millis(125),
        };
        assert_eq!(journal.count(&tone), chirps, "{variant:?}");
        assert_eq!(runner.state().snake.len(), 4);
        assert_eq!(runner.state().tick_ms, 560);
    }
}

#[tokio::test(start_paused = true)]
async fn test_win_sequence() {
    let (mut runner, _commands, journal) = runner(variant(Variant::Victory));
    let status = runner.subscribe();
    let state = runner.state_mut();
    state.snake = long_snake(8);
    state.growth = 1;
    state.food = Position::new(0, 4);

    // Win on the first tick, then text, face and a pause
    let _ = timeout(Duration::from_secs(3), runner.run()).await;

    let script = journal.script();
    let anthem = DeviceCall::Melody {
        bpm: ANTHEM_BPM,
        background: true,
    };
    let start = find_from(&script, 0, &anthem).unwrap();
    assert_eq!(script[start - 1], DeviceCall::StopAll);
    assert_eq!(
        script[start + 1],
        DeviceCall::Text(GameConfig::default().win_text)
    );
    assert_eq!(script[start + 2], DeviceCall::Icon(Icon::Happy));
    assert_eq!(script[start + 3], DeviceCall::Clear);
    assert_eq!(script[start + 4], DeviceCall::StopAll);

    assert_eq!(journal.count(&anthem), 1);
    assert_eq!(journal.count(&DeviceCall::Icon(Icon::Skull)), 0);
    assert_eq!(status.borrow().round, 2);
    assert!(!runner.state().has_won);
    assert_eq!(runner.state().snake.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_anthem_starts_once_per_round() {
    let (mut runner, _commands, journal) = runner(variant(Variant::Anthem));
    let state = runner.state_mut();
    state.snake = long_snake(9);
    state.growth = 3;
    state.food = Position::new(0, 4);

    // Grows 9 -> 12 over three ticks, hits the bottom wall on the fourth
    let _ = timeout(Duration::from_millis(2500), runner.run()).await;

    let anthem = DeviceCall::Melody {
        bpm: ANTHEM_BPM,
        background: true,
    };
    assert_eq!(journal.count(&anthem), 1);
    assert_eq!(journal.count(&DeviceCall::StopAll), 0);
    assert_eq!(runner.state().snake.len(), 12);
    assert!(runner.state().anthem_started);

    // The death cuts the anthem off and the next round re-arms it
    let _ = timeout(Duration::from_secs(5), runner.run()).await;

    let script = journal.script();
    let start = find_from(&script, 0, &anthem).unwrap();
    let stop = find_from(&script, start, &DeviceCall::StopAll).unwrap();
    assert_eq!(script[stop + 1], DeviceCall::Icon(Icon::Skull));
    assert!(!runner.state().anthem_started);
}

#[tokio::test(start_paused = true)]
async fn test_input_during_ending_is_dropped() {
    let (mut runner, commands, _journal) = runner(variant(Variant::Victory));
    runner.state_mut().food = Position::new(0, 0);

    let script = async {
        // The snake dies at 2.1 s; press buttons while the skull is up
        sleep(Duration::from_millis(2100) + ICON_TIME / 2).await;
        commands.send(Command::TurnLeft).unwrap();
        commands.send(Command::TurnLeft).unwrap();
    };
    let (_, _) = tokio::join!(timeout(Duration::from_secs(6), runner.run()), script);

    // Fresh round still heading right
    assert_eq!(runner.state().snake.direction, Direction::Right);
}

#[tokio::test(start_paused = true)]
async fn test_runner_stops_when_input_closes() {
    let (mut runner, commands, _journal) = runner(variant(Variant::Anthem));
    drop(commands);

    let result = timeout(Duration::from_secs(1), runner.run()).await;

    assert!(matches!(result, Ok(Ok(()))));
}
