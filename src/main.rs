use anyhow::Context;
use check_typing::{
    app::App,
    config::{Config, ConfigStore, FileConfigStore},
    corpus::{Corpora, PhraseSource, RandomPhrases},
    round::Round,
    runtime::{ChannelEvents, Runner, SystemClock, POLL_RATE},
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    fs::File,
    io::{self, stdin},
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// timed typing-speed trainer for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type the phrase shown, hit Enter, repeat. The countdown starts on your first keystroke; phrases get shorter as time runs out and your words per minute and accuracy are shown at the end."
)]
pub struct Cli {
    /// number of seconds per round
    #[clap(short = 's', long)]
    seconds: Option<u32>,

    /// draw long sentences while more than this many seconds remain
    #[clap(long)]
    long_tier: Option<u32>,

    /// draw short sentences while more than this many seconds remain
    #[clap(long)]
    short_tier: Option<u32>,

    /// draw two-word phrases while more than this many seconds remain, single words after
    #[clap(long)]
    two_word_tier: Option<u32>,

    /// seed phrase selection for a reproducible session
    #[clap(long)]
    seed: Option<u64>,

    /// write diagnostics to this file (filter with RUST_LOG)
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// save the effective settings to the config file
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// Overlay command line values on the stored config
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(secs) = self.seconds {
            cfg.duration_secs = secs;
        }
        if let Some(secs) = self.long_tier {
            cfg.tiers.long_sentence = secs;
        }
        if let Some(secs) = self.short_tier {
            cfg.tiers.short_sentence = secs;
        }
        if let Some(secs) = self.two_word_tier {
            cfg.tiers.two_words = secs;
        }
        cfg
    }
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("unable to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn build_app(cli: &Cli, store: &impl ConfigStore) -> anyhow::Result<App> {
    let cfg = cli.apply(store.load());
    let round_config = cfg.round_config().context("invalid round settings")?;

    if cli.save_config {
        store.save(&cfg).context("unable to save config")?;
    }

    let corpora = Corpora::embedded().context("unable to load phrase corpora")?;
    let phrases: Box<dyn PhraseSource> = match cli.seed {
        Some(seed) => Box::new(RandomPhrases::seeded(corpora, seed)),
        None => Box::new(RandomPhrases::new(corpora)),
    };

    info!(
        duration = round_config.duration_secs,
        seeded = cli.seed.is_some(),
        "starting"
    );
    Ok(App::new(Round::new(round_config, phrases)))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let mut app = build_app(&cli, &FileConfigStore::new())?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let mut runner = Runner::new(ChannelEvents::terminal(), SystemClock, POLL_RATE);

    terminal.draw(|f| ui(app, f))?;

    loop {
        app.handle(runner.step());

        if app.should_quit {
            break;
        }
        terminal.draw(|f| ui(app, f))?;
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
