mod tick_events;
mod ui;

use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy::build_info;
use flappy::config::{config_path, Settings};
use flappy::constants::*;
use flappy::game::{process_tick, FlappyGame};
use flappy::high_score::{data_dir, FileScoreStore, MemoryScoreStore, ScoreStore};
use flappy::input::InputLatch;
use flappy::scene::build_scene;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tick_events::log_tick_events;
use ui::render_flappy;

const USAGE: &str = "Usage: flappy [options]

Options:
  --seed <n>                 Use a fixed seed for pipe placement
  --high-score-file <path>   Read and write the high score at <path>
  --no-save                  Keep the high score in memory only
  --reset-high-score         Set the saved high score to 0 and exit
  --version                  Show version information
  --help                     Show this help message

Controls: Enter starts/restarts, Space flaps, Esc or q quits.";

#[derive(Debug, Default, PartialEq, Eq)]
struct CliOptions {
    seed: Option<u64>,
    high_score_file: Option<PathBuf>,
    no_save: bool,
    reset_high_score: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum CliCommand {
    Run(CliOptions),
    Version,
    Help,
}

fn parse_args(args: &[String]) -> Result<CliCommand, String> {
    let mut options = CliOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                let seed = value
                    .parse()
                    .map_err(|_| format!("Invalid seed: {}", value))?;
                options.seed = Some(seed);
            }
            "--high-score-file" => {
                let value = iter.next().ok_or("--high-score-file needs a path")?;
                options.high_score_file = Some(PathBuf::from(value));
            }
            "--no-save" => options.no_save = true,
            "--reset-high-score" => options.reset_high_score = true,
            other => return Err(format!("Unknown command: {}", other)),
        }
    }

    Ok(CliCommand::Run(options))
}

/// Starts logging to `path`. Logging stays off if the file can't be opened.
fn init_logging(path: &Path) {
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        Err(e) => eprintln!("Warning: logging disabled ({}: {})", path.display(), e),
    }
}

fn open_score_store(options: &CliOptions, settings: &Settings) -> Box<dyn ScoreStore> {
    if options.no_save {
        return Box::new(MemoryScoreStore::new());
    }

    let explicit = options
        .high_score_file
        .clone()
        .or_else(|| settings.high_score_file.clone());
    if let Some(path) = explicit {
        log::info!("High score file: {}", path.display());
        return Box::new(FileScoreStore::with_path(path));
    }

    match FileScoreStore::new() {
        Ok(store) => {
            log::info!("High score file: {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            log::warn!("No data directory ({}), using ./{}", e, HIGH_SCORE_FILENAME);
            Box::new(FileScoreStore::with_path(HIGH_SCORE_FILENAME))
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(CliCommand::Run(options)) => options,
        Ok(CliCommand::Version) => {
            println!(
                "flappy {} ({})",
                build_info::BUILD_DATE,
                build_info::BUILD_COMMIT
            );
            std::process::exit(0);
        }
        Ok(CliCommand::Help) => {
            println!("Flappy Bird - Terminal Arcade Game\n");
            println!("{}", USAGE);
            std::process::exit(0);
        }
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'flappy --help' for usage.");
            std::process::exit(1);
        }
    };

    // Settings are read before logging starts, so report problems afterwards
    let settings_path = config_path();
    let (settings, settings_error) = match settings_path.as_deref().map(Settings::load_from) {
        Some(Ok(settings)) => (settings, None),
        Some(Err(e)) => (Settings::default(), Some(e)),
        None => (Settings::default(), None),
    };

    let log_path = settings
        .log_file
        .clone()
        .or_else(|| data_dir().ok().map(|dir| dir.join(LOG_FILENAME)));
    if let Some(path) = &log_path {
        init_logging(path);
    }

    log::info!(
        "flappy {} ({}) starting",
        build_info::BUILD_DATE,
        build_info::BUILD_COMMIT
    );
    if let (Some(path), Some(e)) = (&settings_path, settings_error) {
        log::warn!("Ignoring settings in {}: {}", path.display(), e);
    }

    let store = open_score_store(&options, &settings);

    if options.reset_high_score {
        match store.save(0) {
            Ok(()) => {
                println!("High score reset.");
                std::process::exit(0);
            }
            Err(e) => {
                eprintln!("Could not reset high score: {}", e);
                std::process::exit(1);
            }
        }
    }

    let mut rng = match options.seed {
        Some(seed) => {
            log::info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let mut game = FlappyGame::new(store.load());

    if let Err(e) = run(&mut game, &mut rng, store.as_ref(), &settings) {
        log::error!("Fatal: {}", e);
        eprintln!("flappy: {}", e);
        std::process::exit(1);
    }

    log::info!("Exiting with best score {}", game.high_score);
}

/// Sets up the terminal, runs the game loop and always restores the terminal.
fn run(
    game: &mut FlappyGame,
    rng: &mut StdRng,
    store: &dyn ScoreStore,
    settings: &Settings,
) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = stdout.execute(EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e);
    }

    // Lets held keys show up as repeats instead of fresh presses
    let enhanced = supports_keyboard_enhancement().unwrap_or(false)
        && stdout
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

    let result = Terminal::new(CrosstermBackend::new(stdout))
        .and_then(|mut terminal| game_loop(&mut terminal, game, rng, store, settings));

    let mut stdout = io::stdout();
    if enhanced {
        let _ = stdout.execute(PopKeyboardEnhancementFlags);
    }
    let _ = stdout.execute(LeaveAlternateScreen);
    disable_raw_mode()?;

    result
}

fn game_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    game: &mut FlappyGame,
    rng: &mut StdRng,
    store: &dyn ScoreStore,
    settings: &Settings,
) -> io::Result<()> {
    let tick_interval = settings.tick_interval();
    let mut latch = InputLatch::new();
    let mut last_tick = Instant::now();

    draw(terminal, game)?;

    loop {
        let timeout = tick_interval.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                latch.handle_key(key_event);
            }
        }

        if latch.quit_requested() {
            log::info!("Quit requested");
            return Ok(());
        }

        // Update then draw, once per tick
        if last_tick.elapsed() >= tick_interval {
            last_tick = Instant::now();
            let events = process_tick(game, latch.take(), rng, store);
            log_tick_events(game, &events);
            draw(terminal, game)?;
        }
    }
}

fn draw(terminal: &mut Terminal<CrosstermBackend<Stdout>>, game: &FlappyGame) -> io::Result<()> {
    let scene = build_scene(game);
    terminal.draw(|frame| {
        let area = frame.size();
        render_flappy(frame, area, &scene);
    })?;
    Ok(())
}
