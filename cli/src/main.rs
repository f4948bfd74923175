use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use infinisweep_core::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Uncover a rectangle of an endless minefield and print it
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file with `density` and `storage`, flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Probability in [0, 1] that an eligible cell becomes a mine
    #[arg(short, long)]
    density: Option<f64>,

    /// Store cells in a map instead of a fixed extent
    #[arg(long, conflicts_with = "extent")]
    unbounded: bool,

    /// Half width of the bounded extent around the origin
    #[arg(long)]
    extent: Option<Coord>,

    /// Columns to uncover, starting at x = 0
    #[arg(long, default_value_t = 30)]
    width: Coord,

    /// Rows to uncover, starting at y = 0
    #[arg(long, default_value_t = 16)]
    height: Coord,

    /// Show mines and wrong flags instead of what a player would see
    #[arg(long)]
    reveal: bool,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Could not read config {}", path.display()))?;
                toml::from_str(&text)
                    .with_context(|| format!("Could not parse config {}", path.display()))?
            }
            None => GameConfig::default(),
        };

        if let Some(density) = self.density {
            config.density = Density::new(density).context("Invalid --density")?;
        }
        if self.unbounded {
            config.storage = Storage::Unbounded;
        } else if let Some(half_width) = self.extent {
            let extent = Extent::square(half_width).context("Invalid --extent")?;
            config.storage = Storage::Bounded(extent);
        }

        Ok(config)
    }
}

fn render<S: CellStore, R: UniformSource>(
    game: &Game<S, R>,
    width: Coord,
    height: Coord,
    reveal: bool,
) -> String {
    let mut out = String::new();
    for y in 0..height {
        for x in 0..width {
            let tile = game.tile_at((x, y));
            let tile = if reveal { tile } else { tile.masked() };
            out.push(' ');
            out.push(tile.glyph());
        }
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "uncovered: {} detonated: {}",
        game.uncovered_count(),
        game.detonated_count()
    );
    out
}

fn run(args: &Args) -> Result<String> {
    let config = args.game_config()?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("seed: {}", seed);
    log::debug!("config: {:?}", config);

    let mut game = Game::from_config(&config, SmallRng::seed_from_u64(seed))
        .context("Could not create game")?;

    for y in 0..args.height {
        for x in 0..args.width {
            game.uncover((x, y));
        }
    }

    Ok(render(&game, args.width, args.height, args.reveal))
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .parse_default_env()
        .init();

    let out = run(&args)?;
    std::io::stdout()
        .lock()
        .write_all(out.as_bytes())
        .context("Could not write to stdout")?;
    Ok(())
}
