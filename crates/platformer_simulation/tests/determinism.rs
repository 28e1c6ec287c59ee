//! Тесты детерминизма
//!
//! Проверяем что симуляция с одинаковым seed и одинаковым вводом
//! даёт идентичные результаты (patrol AI берёт случайность из DeterministicRng)

use bevy::prelude::*;
use platformer_simulation::{
    create_headless_app, world_snapshot, GameProgress, PatrolAI, PlayerInput,
};

/// Скриптованный ввод: бег вправо с прыжками, пауза, бег влево
fn scripted_input(tick: usize, input: &mut PlayerInput) {
    match tick % 240 {
        0..=119 => input.set_horizontal(1.0),
        120..=149 => input.set_horizontal(0.0),
        _ => input.set_horizontal(-1.0),
    }
    if tick % 50 == 0 {
        input.press_jump();
    }
}

/// Запускает симуляцию и возвращает snapshot мира
fn run_simulation(seed: u64, tick_count: usize) -> (Vec<u8>, Vec<u8>, (u32, u32, usize, u32)) {
    let mut app = create_headless_app(seed);

    for tick in 0..tick_count {
        {
            let mut input = app.world_mut().resource_mut::<PlayerInput>();
            scripted_input(tick, &mut input);
        }
        app.update();
    }

    let progress = app.world().resource::<GameProgress>();
    let summary = (
        progress.total_point,
        progress.stage_point,
        progress.stage_index,
        progress.health,
    );

    (
        world_snapshot::<Transform>(app.world_mut()),
        world_snapshot::<PatrolAI>(app.world_mut()),
        summary,
    )
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;
    const TICK_COUNT: usize = 900;

    // Первый прогон
    let run1 = run_simulation(SEED, TICK_COUNT);

    // Второй прогон с тем же seed
    let run2 = run_simulation(SEED, TICK_COUNT);

    assert_eq!(
        run1, run2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;
    const TICK_COUNT: usize = 600;

    // Запускаем 3 раза: все должны быть идентичны
    let runs: Vec<_> = (0..3).map(|_| run_simulation(SEED, TICK_COUNT)).collect();

    for (i, run) in runs.iter().enumerate().skip(1) {
        assert_eq!(runs[0], *run, "Прогон {} дал результат отличный от прогона 0", i);
    }
}

#[test]
fn test_patrol_state_is_recorded() {
    let (_, patrol, _) = run_simulation(7, 400);
    // Три врага демо уровня присутствуют в snapshot
    assert!(!patrol.is_empty());
}
