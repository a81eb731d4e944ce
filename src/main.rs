//! Retro Pong entry point
//!
//! Native builds run a headless demo match (both paddles on autoplay)
//! through the real loop driver and log what happens. Usage:
//!
//! ```text
//! retro-pong [settings.json] [seconds]
//! ```

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use retro_pong::input::{InputBus, KeyEvent};
    use retro_pong::platform::{SystemClock, init_logging};
    use retro_pong::render::CommandBuffer;
    use retro_pong::sim::{GameEvent, GameRng, Match};
    use retro_pong::{Engine, Prompt, Settings};
    use std::time::Duration;

    /// No one to ask: every dialog is logged and accepted
    struct Unattended;

    impl Prompt for Unattended {
        fn confirm(&mut self, message: &str) -> bool {
            log::info!("{message} yes");
            true
        }

        fn alert(&mut self, message: &str) {
            log::info!("{message}");
        }
    }

    if let Err(e) = init_logging() {
        eprintln!("Logger already initialised: {e}");
    }
    log::info!("Retro Pong (native, headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{path}: {e}");
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    let seconds: f64 = match args.next().map(|s| s.parse()) {
        Some(Ok(seconds)) => seconds,
        Some(Err(e)) => {
            log::error!("Invalid duration: {e}");
            std::process::exit(1);
        }
        None => 30.0,
    };

    let rng = GameRng::from_entropy();
    log::info!("Seed: {}", rng.seed());
    let (fps, stats) = (settings.fps, settings.stats);
    let game = match Match::new(settings, Box::new(rng)) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Invalid settings: {e}");
            std::process::exit(1);
        }
    };

    let mut engine = Engine::new(game, SystemClock::new(), fps, stats);
    let mut surface = CommandBuffer::new();
    let mut prompt = Unattended;
    let bus = InputBus::new();
    engine.listen(&bus);
    engine.start();

    // Same key a browser player would press for a demo match
    bus.dispatch(&KeyEvent::press("Digit0"));
    bus.dispatch(&KeyEvent::release("Digit0"));
    engine.pump_input(&mut prompt);

    let max_frames = (seconds.max(0.0) * fps as f64).ceil() as u64;
    let frame_time = Duration::from_secs_f64(engine.interval() / 1000.0);
    for _ in 0..max_frames {
        std::thread::sleep(frame_time);
        engine.pump_input(&mut prompt);
        surface.reset();
        engine.frame(&mut surface);

        for event in engine.game_mut().drain_events() {
            match event {
                GameEvent::Sound(sound) => log::debug!("Sound: {sound:?}"),
                GameEvent::Winner(player) => log::info!("Winner: {player:?}"),
            }
        }
        if !engine.game().is_playing() {
            break;
        }
    }
    engine.unlisten();
    engine.stop();

    let stats = engine.stats();
    log::info!("Last frame: {:.0} fps, {} draw calls", stats.fps, surface.commands.len());
    match serde_json::to_string_pretty(&engine.game().snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Snapshot failed: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser hosts drive the library directly
}
