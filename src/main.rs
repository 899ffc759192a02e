mod shared;
mod tui;
mod audio_api;
mod audio;
mod config;
mod loader;
mod middle;
mod pipeline;
mod render;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use anyhow::Context;
use crossterm::terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use config::Config;
use loader::registry::SampleRegistry;
use middle::Middle;
use render::Canvas;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let root: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    let config = config::load_config(&root)?;
    init_logging(&config.log_path(&root));
    log::info!("plaidbeat starting in {} with {config:?}", root.display());

    // Sound is optional: without a device every trigger just goes nowhere.
    let audio = match audio::start_audio() {
        Ok(handle) => Some(handle),
        Err(e) => {
            log::warn!("no audio output, running silent: {e:#}");
            None
        }
    };
    let loaded = load_samples(&config, &root, audio.as_ref());

    let rng = match config.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let mut middle = Middle::new(rng, loaded, Instant::now());
    let mut canvas = Canvas::square(config.canvas_size);

    terminal::enable_raw_mode().context("enabling raw mode")?;
    let _guard = RawModeGuard; // restores the terminal when dropped
    crossterm::execute!(std::io::stdout(), terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(std::io::stdout());
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    let frame_interval = Duration::from_millis(config.frame_ms);

    loop {
        if middle.take_redraw() {
            render::render(&mut canvas, middle.pattern(), middle.current_beat());
        }
        let ds = middle.display_state();
        term.draw(|frame| {
            let area = frame.area();
            tui::view::render(frame, area, &canvas, ds);
        })?;

        let timeout = middle.next_deadline(Instant::now(), frame_interval);
        for event in tui::input::poll_input(timeout)? {
            if middle.handle_input(event, Instant::now()) {
                log::info!("quitting");
                return Ok(());
            }
        }

        let cmds = middle.tick(Instant::now());
        if let Some(audio) = &audio {
            for cmd in cmds {
                audio.send(cmd);
            }
        }
    }
}

// Decode the drum samples at the device rate and hand them to the engine.
// Returns which slots are usable; with no audio device none are.
fn load_samples(config: &Config, root: &Path, audio: Option<&audio::AudioHandle>) -> [bool; shared::NUM_SAMPLES] {
    let Some(audio) = audio else {
        return [false; shared::NUM_SAMPLES];
    };
    let registry = SampleRegistry::load(&config.sample_dir(root), audio.sample_rate());
    let loaded = registry.loaded();
    for cmd in registry.into_commands() {
        audio.send(cmd);
    }
    loaded
}

// The TUI owns the terminal, so log lines go to a file instead. If the file
// can't be opened logging is switched off; stderr would scribble over the UI.
fn init_logging(path: &Path) {
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);
    match log_file(path) {
        Some(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder
                .target(env_logger::Target::Pipe(Box::new(std::io::sink())))
                .filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

// Runs before raw mode is entered, so the warning still reaches a normal terminal.
fn log_file(path: &Path) -> Option<File> {
    match File::create(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("plaidbeat: can't open log file {}: {e}; logging disabled", path.display());
            None
        }
    }
}

struct RawModeGuard;
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stdout(), terminal::LeaveAlternateScreen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwritable_log_path_disables_logging() {
        let path = std::env::temp_dir().join("plaidbeat-no-such-dir").join("deeper").join("p.log");
        assert!(log_file(&path).is_none());
    }

    #[test]
    fn log_file_is_created() {
        let path = std::env::temp_dir().join(format!("plaidbeat-log-{}.log", std::process::id()));
        assert!(log_file(&path).is_some());
        assert!(path.exists());
        let _ = std::fs::remove_file(path);
    }
}
