mod input;
mod render;

use std::fs::File;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use longcat::config::{
    DEFAULT_COLS, DEFAULT_DENSITY, DEFAULT_DENSITY_INCREMENT, DEFAULT_ROWS, DEFAULT_WIN_THRESHOLD,
};
use longcat::motion::DEFAULT_SPEED;
use longcat::{GameConfig, Motion, MoveOutcome, Session};

use input::Command;
use render::Renderer;

const DEFAULT_RENDER_FPS: u64 = 144;

#[derive(Debug, Parser)]
#[command(name = "longcat", version, about = "Slide the cat until it boxes itself in")]
struct Cli {
    #[arg(long, env = "LONGCAT_ROWS", default_value_t = DEFAULT_ROWS)]
    rows: usize,
    #[arg(long, env = "LONGCAT_COLS", default_value_t = DEFAULT_COLS)]
    cols: usize,
    /// Obstacle density of the first round, in [0, 1).
    #[arg(long, env = "LONGCAT_DENSITY", default_value_t = DEFAULT_DENSITY)]
    density: f64,
    /// Added to the density after each round.
    #[arg(long, env = "LONGCAT_INCREMENT", default_value_t = DEFAULT_DENSITY_INCREMENT)]
    increment: f64,
    /// Fill percentage needed to win.
    #[arg(long, env = "LONGCAT_THRESHOLD", default_value_t = DEFAULT_WIN_THRESHOLD)]
    threshold: f64,
    #[arg(long, env = "LONGCAT_SEED")]
    seed: Option<u64>,
    #[arg(long, env = "LONGCAT_FPS", default_value_t = DEFAULT_RENDER_FPS)]
    fps: u64,
    /// Sub-cell units the cat travels per frame (a cell is 90 units).
    #[arg(long, env = "LONGCAT_SPEED", default_value_t = DEFAULT_SPEED)]
    speed: u32,
    /// Write tracing output here; filtered by LONGCAT_LOG.
    #[arg(long, env = "LONGCAT_LOG_FILE")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            rows: self.rows,
            cols: self.cols,
            density: self.density,
            density_increment: self.increment,
            win_threshold: self.threshold,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(cli.game_config(), rng).context("invalid configuration")?;

    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("enabling raw mode")?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout, &mut session, &cli);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env("LONGCAT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(stdout: &mut Stdout, session: &mut Session<StdRng>, cli: &Cli) -> Result<()> {
    let mut round = session.start_round()?;
    let mut motion: Option<Motion> = None;
    let mut renderer = Renderer::new(round.current_grid());
    let frame_time = Duration::from_micros(1_000_000 / cli.fps.max(1));

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match input::command_for(key) {
                Some(Command::Quit) => return Ok(()),
                Some(Command::Move(dir)) if motion.is_none() => {
                    if let MoveOutcome::Accepted { from, path, .. } = round.request_move(dir) {
                        motion = Some(Motion::new(from, &path, cli.speed));
                    }
                }
                _ => {}
            }
        }

        if let Some(m) = motion.as_mut() {
            m.advance();
        }
        render::render(stdout, &mut renderer, &round, motion.as_ref(), session)?;
        if motion.as_ref().is_some_and(Motion::is_done) {
            motion = None;
        }

        if motion.is_none() {
            if let Some(result) = round.result() {
                render::render_round_over(stdout, &renderer, &result)?;
                if !input::wait_for_restart()? {
                    return Ok(());
                }
                session.finish_round(result);
                round = session.start_round()?;
                renderer = Renderer::new(round.current_grid());
                continue;
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}
