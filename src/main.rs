/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use config::GameConfig;
use sim::session::Session;
use sim::words;
use ui::input::InputState;
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(15);

fn main() {
    env_logger::init();

    let config = GameConfig::load();

    // Word packs are required. Report problems on plain stderr and quit
    // before the terminal enters raw mode.
    let packs = match words::scan_packs(&config.words_dir) {
        Ok(packs) => packs,
        Err(e) => {
            eprintln!("Could not load word packs: {e}");
            eprintln!(
                "Expected {}/*.txt files: first line is the category, \
                 every following line one word or phrase.",
                config.words_dir.display()
            );
            std::process::exit(1);
        }
    };

    let mut session = Session::new(packs);

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = game_loop(&mut session, &mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing Gallows!");
    println!("Final tally: {} won, {} lost", session.wins, session.losses);
}

fn game_loop(
    session: &mut Session,
    renderer: &mut Renderer,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(config.tick_rate_ms);

    loop {
        kb.drain_events();

        if kb.ctrl_c_pressed() || kb.was_pressed(KeyCode::Esc) {
            break;
        }

        if kb.was_pressed(KeyCode::F(2)) {
            session.new_round();
        } else {
            for letter in kb.pressed_letters() {
                session.guess(letter);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            session.tick();
            last_tick = Instant::now();
        }

        renderer.render(session)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}
