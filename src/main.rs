#![forbid(unsafe_code)]

mod clock;
mod logger;
mod options;
mod ui;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use msweeper_field::{Difficulty, Field};

fn parse_size(s: &str) -> Result<(usize, usize), &'static str> {
    let (width_part, height_part) = s.split_once('x').ok_or("bounds should be delimited with 'x'")?;
    let size: (usize, usize) = width_part.parse().ok().zip(height_part.parse().ok()).ok_or("invalid number")?;
    if size.0 == 0 || size.1 == 0 {
        return Err("the board needs at least one row and one column");
    }
    Ok(size)
}

fn parse_level(s: &str) -> Result<LevelFilter, &'static str> {
    s.parse().map_err(|_| "expected one of off, error, warn, info, debug, trace")
}

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    #[clap(long, short, default_value = "easy", value_enum, help = "Board size and mine count preset.")]
    difficulty: Difficulty,
    #[clap(long, short, help = "Board dimensions, overriding the preset.", value_parser = parse_size)]
    bounds: Option<(usize, usize)>,
    #[clap(long, short, help = "Number of mines, overriding the preset.", value_parser)]
    mines: Option<usize>,
    #[clap(long, short, default_value = "classic", value_enum, env = "MSWEEPER_THEME")]
    theme: options::ThemeChoice,
    #[clap(long, short, default_value = "ascii", value_enum)]
    iconset: options::IconSetChoice,
    #[clap(long, help = "Append a log of the game to this file.", env = "MSWEEPER_LOG", value_parser)]
    log: Option<std::path::PathBuf>,
    #[clap(long, default_value = "info", value_parser = parse_level)]
    log_level: LevelFilter,
}

impl Args {
    /// Width, height and mine count after applying overrides to the preset.
    fn dimensions(&self) -> (usize, usize, usize) {
        let (width, height, mines) = self.difficulty.dimensions();
        let (width, height) = self.bounds.unwrap_or((width, height));
        (width, height, self.mines.unwrap_or(mines))
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (width, height, mines) = args.dimensions();
    let field = match Field::new(width, height, mines) {
        Ok(field) => field,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        },
    };

    if let Some(path) = &args.log {
        logger::init(path, args.log_level)?;
    }
    log::info!("starting a {}x{} game with {} mines", width, height, mines);

    ui::game_loop(field, args.theme.theme(), args.iconset.iconset()).context("terminal error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        assert_eq!(parse_size("30x16"), Ok((30, 16)));
        assert!(parse_size("30").is_err());
        assert!(parse_size("ax3").is_err());
        assert!(parse_size("0x3").is_err());
    }

    #[test]
    fn overrides_apply_to_preset() {
        let args = Args::parse_from(["msweeper", "-d", "expert"]);
        assert_eq!(args.dimensions(), (30, 16, 99));
        let args = Args::parse_from(["msweeper", "-d", "expert", "-b", "8x8"]);
        assert_eq!(args.dimensions(), (8, 8, 99));
        let args = Args::parse_from(["msweeper", "-b", "8x8", "-m", "5"]);
        assert_eq!(args.dimensions(), (8, 8, 5));
    }

    #[test]
    fn oversized_bounds_are_rejected() {
        let args = Args::parse_from(["msweeper", "-b", "100000x100000"]);
        let (width, height, mines) = args.dimensions();
        assert!(matches!(Field::new(width, height, mines), Err(msweeper_field::FieldError::TooLarge { .. })));
    }

    #[test]
    fn log_levels() {
        assert_eq!(parse_level("debug"), Ok(LevelFilter::Debug));
        assert!(parse_level("loud").is_err());
    }
}
