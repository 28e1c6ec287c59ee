//! Headless симуляция платформера
//!
//! Запускает Bevy App без рендера: игрок бежит вправо и прыгает,
//! раз в 100 тиков печатается прогресс.
//!
//! Опционально: `platformer_simulation <config.ron> [level.ron]`

use std::path::Path;
use platformer_simulation::{
    create_headless_app_with, logger, GameProgress, HudState, LevelLayout, PlatformerConfig,
    PlayerInput,
};

fn main() {
    let seed = 42;
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match args.first() {
        Some(path) => match PlatformerConfig::load(Path::new(path)) {
            Ok(config) => config,
            Err(e) => {
                logger::log_error(&format!("Failed to load config '{}': {}", path, e));
                std::process::exit(1);
            }
        },
        None => PlatformerConfig::default(),
    };

    let layout = match args.get(1) {
        Some(path) => match LevelLayout::load(Path::new(path)) {
            Ok(layout) => layout,
            Err(e) => {
                logger::log_error(&format!("Failed to load level '{}': {}", path, e));
                std::process::exit(1);
            }
        },
        None => LevelLayout::demo(),
    };

    println!("Starting platformer headless simulation (seed: {})", seed);

    let mut app = create_headless_app_with(seed, config, layout);

    // Запускаем 1000 тиков симуляции
    for tick in 0..1000 {
        {
            let mut input = app.world_mut().resource_mut::<PlayerInput>();
            input.set_horizontal(1.0);
            if tick % 45 == 0 {
                input.press_jump();
            }
        }

        app.update();

        if tick % 100 == 0 {
            let progress = app.world().resource::<GameProgress>();
            let hud = app.world().resource::<HudState>();
            println!(
                "Tick {}: {} | {} | health {}",
                tick, hud.stage_text, hud.point_text, progress.health
            );
        }
    }

    println!("Simulation complete!");
}
