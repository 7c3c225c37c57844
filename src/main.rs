use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tallgrass::build_info;
use tallgrass::core::audio::SoundEvent;
use tallgrass::core::config::{GameConfig, DEFAULT_CONFIG_FILE};
use tallgrass::core::constants::MAX_FRAME_DELTA_SECONDS;
use tallgrass::core::input::Key;
use tallgrass::game::Game;
use tallgrass::ui::{fit_canvas, TerminalRenderer};
use tracing_subscriber::EnvFilter;

struct Args {
    config: PathBuf,
    seed: Option<u64>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        config: PathBuf::from(DEFAULT_CONFIG_FILE),
        seed: None,
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                match args.get(i) {
                    Some(path) => parsed.config = PathBuf::from(path),
                    None => usage_error("--config requires a path"),
                }
            }
            "--seed" => {
                i += 1;
                match args.get(i).and_then(|s| s.parse().ok()) {
                    Some(seed) => parsed.seed = Some(seed),
                    None => usage_error("--seed requires a number"),
                }
            }
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => usage_error(&format!("Unknown argument: {}", other)),
        }
        i += 1;
    }
    parsed
}

fn print_usage() {
    println!(
        "Tallgrass - terminal creature battler\n\
         \n\
         Usage: tallgrass [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --config, -c PATH  Config file (default: {})\n\
         \x20 --seed N           RNG seed for a reproducible session\n\
         \x20 --version, -v      Show version information\n\
         \x20 --help, -h         Show this help\n\
         \n\
         Keys: arrows/WASD move, Enter/Space confirm, Esc party, P heal, q quit",
        DEFAULT_CONFIG_FILE
    );
}

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("Run 'tallgrass --help' for usage.");
    std::process::exit(1);
}

/// The terminal belongs to the UI, so logs go to a file.
fn init_logging(config: &GameConfig) -> io::Result<()> {
    let file = File::create(&config.log_file)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn describe(event: &SoundEvent) -> String {
    match event {
        SoundEvent::Play(sound) => format!("♪ {}", sound),
        SoundEvent::Stop(sound) => format!("■ {}", sound),
        SoundEvent::Pause(sound) => format!("‖ {}", sound),
    }
}

fn main() -> io::Result<()> {
    let args = parse_args();

    let mut config = match GameConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Could not load {}: {}", args.config.display(), e);
            std::process::exit(1);
        }
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    init_logging(&config)?;

    let rng: Box<dyn RngCore> = match config.seed {
        Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        None => Box::new(ChaCha8Rng::from_entropy()),
    };
    let frame = Duration::from_millis(config.frame_ms);
    let mut game = match Game::from_config(config, rng) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Could not start: {}", e);
            std::process::exit(1);
        }
    };
    game.start();
    tracing::info!("{}", build_info::version_line());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut game, frame);

    // Restore terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, game: &mut Game, frame: Duration) -> io::Result<()> {
    let mut last = Instant::now();
    let mut status = String::new();

    loop {
        terminal.draw(|f| {
            let area = f.size();
            let status_height = area.height.min(1);
            let canvas_area = Rect::new(area.x, area.y, area.width, area.height - status_height);
            let status_area = Rect::new(area.x, area.bottom() - status_height, area.width, status_height);
            {
                let mut renderer = TerminalRenderer::new(f.buffer_mut(), fit_canvas(canvas_area));
                game.render(&mut renderer);
            }
            f.render_widget(Paragraph::new(status.as_str()), status_area);
        })?;

        // Collect input until the frame is due
        let deadline = last + frame;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                if matches!(key_event.code, KeyCode::Char('q') | KeyCode::Char('Q')) {
                    tracing::info!("quit");
                    return Ok(());
                }
                if let Some(key) = Key::from_key_code(key_event.code) {
                    game.ctx.input.press(key);
                }
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f64().min(MAX_FRAME_DELTA_SECONDS);
        last = now;
        game.frame(dt);

        let events = game.ctx.audio.drain_events();
        if !events.is_empty() {
            status = events.iter().map(describe).collect::<Vec<_>>().join("  ");
        }
    }
}
