use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "glyphset",
    version,
    about = "Render a labeled glyph image corpus from a directory of fonts"
)]
struct Cli {
    /// Directory containing .ttf font files.
    #[arg(long, default_value = "fonts")]
    fonts_dir: PathBuf,

    /// Dataset root; one subdirectory per font is created inside.
    #[arg(long, default_value = "digits_dataset")]
    out_dir: PathBuf,

    /// Characters to render, one image per character.
    #[arg(long, default_value = "0123456789")]
    chars: String,

    /// Canvas side length in pixels.
    #[arg(long, default_value_t = glyphset::DEFAULT_PIC_DIM)]
    pic_dim: u32,

    /// Use pic-dim as the font size directly instead of auto-fitting.
    #[arg(long)]
    no_auto_fit: bool,

    /// Stop rule for the auto-fit font size search.
    #[arg(long, value_enum, default_value_t = FitStrategyChoice::Overshoot)]
    fit_strategy: FitStrategyChoice,

    /// Draw the measured bounding box outline (visual verification only).
    #[arg(long)]
    debug_box: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FitStrategyChoice {
    /// First font size whose ink box reaches the fit threshold (legacy).
    Overshoot,
    /// Largest font size that stays strictly under the threshold.
    LargestThatFits,
}

impl From<FitStrategyChoice> for glyphset::FitStrategy {
    fn from(value: FitStrategyChoice) -> Self {
        match value {
            FitStrategyChoice::Overshoot => glyphset::FitStrategy::Overshoot,
            FitStrategyChoice::LargestThatFits => glyphset::FitStrategy::LargestThatFits,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = glyphset::CorpusConfig {
        fonts_dir: cli.fonts_dir,
        out_dir: cli.out_dir,
        texts: cli.chars.chars().map(|c| c.to_string()).collect(),
        pic_dim: cli.pic_dim,
        auto_fit: !cli.no_auto_fit,
        fit_strategy: cli.fit_strategy.into(),
        debug_box: cli.debug_box,
    };

    let summary = glyphset::generate_corpus(&cfg)?;
    eprintln!(
        "wrote {} images for {} fonts under {}",
        summary.images,
        summary.fonts,
        cfg.out_dir.display()
    );
    Ok(())
}
