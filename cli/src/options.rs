use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use rand::prelude::*;
use turnsweep_core::{AiDifficulty, CellCount, Coord, Coord2, Density, GameConfig, GameOptions};

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum AiArg {
    None,
    Easy,
    Medium,
    Hard,
    Solver,
}

impl From<AiArg> for AiDifficulty {
    fn from(value: AiArg) -> Self {
        match value {
            AiArg::None => Self::None,
            AiArg::Easy => Self::Easy,
            AiArg::Medium => Self::Medium,
            AiArg::Hard => Self::Hard,
            AiArg::Solver => Self::Solver,
        }
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum DensityArg {
    Clustered,
    Spread,
}

impl From<DensityArg> for Density {
    fn from(value: DensityArg) -> Self {
        match value {
            DensityArg::Clustered => Self::Clustered,
            DensityArg::Spread => Self::Spread,
        }
    }
}

/// Options shared by every command that starts a game.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub(crate) struct GameArgs {
    /// TOML file with game options, flags given on the command line win
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board size, either a side length or ROWSxCOLS
    #[arg(short, long, value_parser = parse_size)]
    size: Option<Coord2>,

    /// Number of mines
    #[arg(short, long)]
    mines: Option<CellCount>,

    /// AI opponent
    #[arg(short, long, value_enum)]
    ai: Option<AiArg>,

    /// How far apart mines are kept
    #[arg(short, long, value_enum)]
    density: Option<DensityArg>,

    /// Number of hints available
    #[arg(long)]
    hints: Option<u8>,

    /// Force a seed instead of random
    #[arg(long)]
    seed: Option<u64>,
}

impl GameArgs {
    /// Layers the command-line flags over the config file (if any) and the defaults.
    pub(crate) fn resolve(&self) -> Result<GameOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                toml::from_str::<GameOptions>(&text)
                    .with_context(|| format!("parsing config file {}", path.display()))?
            }
            None => GameOptions::default(),
        };

        let size = self.size.unwrap_or(options.config.size);
        let mines = self.mines.unwrap_or(options.config.mines);
        options.config = GameConfig::checked(size, mines)
            .with_context(|| format!("invalid board: {}x{} with {} mines", size.0, size.1, mines))?;

        if let Some(ai) = self.ai {
            options.ai_difficulty = ai.into();
        }
        if let Some(density) = self.density {
            options.density = density.into();
        }
        if let Some(hints) = self.hints {
            options.hints = hints;
        }

        log::debug!("game options: {:?}", options);
        Ok(options)
    }

    pub(crate) fn rng(&self) -> SmallRng {
        let seed = self.seed.unwrap_or_else(|| SmallRng::from_os_rng().random());
        log::info!("seed: {}", seed);
        SmallRng::seed_from_u64(seed)
    }
}

pub(crate) fn parse_size(value: &str) -> Result<Coord2, String> {
    let parse = |side: &str| {
        side.trim()
            .parse::<Coord>()
            .map_err(|err| format!("invalid board side {side:?}: {err}"))
    };

    match value.split_once(['x', 'X']) {
        Some((rows, cols)) => Ok((parse(rows)?, parse(cols)?)),
        None => parse(value).map(|side| (side, side)),
    }
}

pub(crate) fn parse_coords(value: &str) -> Result<Coord2, String> {
    let (row, col) = value
        .split_once([',', ' '])
        .ok_or_else(|| format!("expected ROW,COL, got {value:?}"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<Coord>()
            .map_err(|err| format!("invalid coordinate {part:?}: {err}"))
    };
    Ok((parse(row)?, parse(col)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_parse_square_and_rectangular() {
        assert_eq!(parse_size("9"), Ok((9, 9)));
        assert_eq!(parse_size("16x30"), Ok((16, 30)));
        assert!(parse_size("16x").is_err());
        assert!(parse_size("300").is_err());
    }

    #[test]
    fn coords_parse() {
        assert_eq!(parse_coords("3,4"), Ok((3, 4)));
        assert_eq!(parse_coords("3 4"), Ok((3, 4)));
        assert!(parse_coords("3").is_err());
    }

    #[test]
    fn flags_override_defaults() {
        let args = GameArgs {
            size: Some((16, 30)),
            mines: Some(99),
            ai: Some(AiArg::Medium),
            density: Some(DensityArg::Clustered),
            hints: Some(0),
            ..Default::default()
        };

        let options = args.resolve().unwrap();

        assert_eq!(options.config, GameConfig::new((16, 30), 99));
        assert_eq!(options.ai_difficulty, AiDifficulty::Medium);
        assert_eq!(options.density, Density::Clustered);
        assert_eq!(options.hints, 0);
    }

    #[test]
    fn too_many_mines_is_rejected() {
        let args = GameArgs {
            size: Some((3, 3)),
            mines: Some(10),
            ..Default::default()
        };

        assert!(args.resolve().is_err());
    }

    #[test]
    fn config_file_is_layered_under_flags() {
        let path = std::env::temp_dir().join(format!("turnsweep-options-{}.toml", std::process::id()));
        fs::write(
            &path,
            "ai_difficulty = \"hard\"\nhints = 1\n\n[config]\nsize = [12, 12]\nmines = 20\n",
        )
        .unwrap();
        let args = GameArgs {
            config: Some(path.clone()),
            mines: Some(30),
            ..Default::default()
        };

        let options = args.resolve();
        fs::remove_file(&path).unwrap();
        let options = options.unwrap();

        assert_eq!(options.config, GameConfig::new((12, 12), 30));
        assert_eq!(options.ai_difficulty, AiDifficulty::Hard);
        assert_eq!(options.hints, 1);
        assert_eq!(options.density, Density::Spread);
    }
}
