use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::Rng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Instant,
};
use wordchain::{
    app_dirs::AppDirs,
    chains::ChainDeck,
    config::{Config, ConfigStore, FileConfigStore},
    game::{Game, KeyAction},
    logging,
    record::{FileRecordStore, RecordStore},
    runtime::{Events, GameEvent, FRAME_INTERVAL},
};

/// word chain guessing game for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Guess every word linking the first and last word of a chain before the clock \
                  runs out. Wrong guesses reveal a letter and cost time."
)]
pub struct Cli {
    /// seconds on the clock for every chain
    #[clap(short = 's', long)]
    secs: Option<u32>,

    /// seconds lost on every wrong guess
    #[clap(short = 'p', long)]
    penalty: Option<u32>,

    /// config file to use instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,

    /// best time file to use instead of the default location
    #[clap(long)]
    record: Option<PathBuf>,
}

impl Cli {
    /// Loads the config file and applies command line overrides on top
    fn resolve_config(&self) -> Config {
        let store = match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        };
        let mut config = store.load();
        if let Some(secs) = self.secs {
            config.round_secs = secs;
        }
        if let Some(penalty) = self.penalty {
            config.penalty_secs = penalty;
        }
        config
    }

    fn record_store(&self) -> FileRecordStore {
        match &self.record {
            Some(path) => FileRecordStore::with_path(path),
            None => FileRecordStore::new(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Err(err) = logging::init(&AppDirs::log_path()) {
        eprintln!("wordchain: logging disabled: {err}");
    }

    let store = cli.record_store();
    tracing::info!(record = %store.path().display(), "loading best time");
    let mut game = Game::new(cli.resolve_config(), ChainDeck::builtin()?, store);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = Events::terminal(FRAME_INTERVAL);
    let result = run(&mut terminal, &mut game, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(%err, "game loop failed");
    }
    result
}

fn run<B, S, R>(
    terminal: &mut Terminal<B>,
    game: &mut Game<S, R>,
    events: &Events,
) -> Result<(), Box<dyn Error>>
where
    B: Backend,
    S: RecordStore,
    R: Rng,
{
    let size = terminal.size()?;
    game.resize(size.width, size.height);
    terminal.draw(|f| f.render_widget(&*game, f.area()))?;

    loop {
        match events.next() {
            GameEvent::Tick => {}
            GameEvent::Closed => {
                tracing::warn!("input closed, leaving the game");
                break;
            }
            GameEvent::Resize(width, height) => game.resize(width, height),
            GameEvent::Key(key) => {
                if game.handle_key(key, Instant::now()) == KeyAction::Quit {
                    break;
                }
            }
        }
        // key presses can starve timeouts, so countdown and animations advance on every event
        game.on_frame(Instant::now());
        terminal.draw(|f| f.render_widget(&*game, f.area()))?;
    }

    Ok(())
}
