use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    foundation::error::{GlyphsetError, GlyphsetResult},
    raster::font::LoadedFont,
    raster::glyph::{DEFAULT_FIT_RATIO, DEFAULT_PIC_DIM, FitStrategy, GlyphSpec, render_glyph},
};

/// Settings for a base-corpus generation run over a directory of fonts.
#[derive(Clone, Debug)]
pub struct CorpusConfig {
    /// Directory scanned for `.ttf` font files.
    pub fonts_dir: PathBuf,
    /// Dataset root; one subdirectory per font stem is created inside.
    pub out_dir: PathBuf,
    /// Texts to render, one `<text>.png` per font.
    pub texts: Vec<String>,
    /// Canvas side length in pixels.
    pub pic_dim: u32,
    /// Whether to auto-fit the font size to the canvas.
    pub auto_fit: bool,
    /// Stop rule for the auto-fit search.
    pub fit_strategy: FitStrategy,
    /// Draw measured-box outlines (visual verification only).
    pub debug_box: bool,
}

impl CorpusConfig {
    /// Config rendering the ten ASCII digits with default fit settings.
    pub fn digits(fonts_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            fonts_dir: fonts_dir.into(),
            out_dir: out_dir.into(),
            texts: digit_texts(),
            pic_dim: DEFAULT_PIC_DIM,
            auto_fit: true,
            fit_strategy: FitStrategy::default(),
            debug_box: false,
        }
    }
}

/// The digit labels `"0"` through `"9"`.
pub fn digit_texts() -> Vec<String> {
    (0..10u32).map(|d| d.to_string()).collect()
}

/// Counts reported by a finished corpus run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CorpusSummary {
    /// Fonts processed.
    pub fonts: usize,
    /// Images written.
    pub images: usize,
}

/// Render one base glyph image per (font, text) pair under the dataset root.
///
/// Fonts are processed in sorted path order for deterministic output. The run
/// is one-shot batch work: the first resource or geometry error aborts it,
/// nothing is retried, and there is no partial-output recovery.
pub fn generate_corpus(cfg: &CorpusConfig) -> GlyphsetResult<CorpusSummary> {
    if cfg.texts.is_empty() {
        return Err(GlyphsetError::validation("corpus text list must be non-empty"));
    }

    let font_paths = list_font_files(&cfg.fonts_dir)?;
    if font_paths.is_empty() {
        tracing::warn!(dir = %cfg.fonts_dir.display(), "no .ttf fonts found, nothing to generate");
        return Ok(CorpusSummary::default());
    }

    let mut summary = CorpusSummary::default();
    for font_path in &font_paths {
        let font = LoadedFont::from_file(font_path)?;
        let stem = font_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                GlyphsetError::validation(format!(
                    "font file '{}' has no usable stem",
                    font_path.display()
                ))
            })?;

        let font_out = cfg.out_dir.join(stem);
        fs::create_dir_all(&font_out)
            .with_context(|| format!("create output dir '{}'", font_out.display()))?;

        for text in &cfg.texts {
            let spec = GlyphSpec {
                text: text.clone(),
                pic_dim: cfg.pic_dim,
                fit_ratio: DEFAULT_FIT_RATIO,
                auto_fit: cfg.auto_fit,
                fit_strategy: cfg.fit_strategy,
                debug_box: cfg.debug_box,
            };
            render_glyph(&font, &spec, &font_out.join(format!("{text}.png")))?;
            summary.images += 1;
        }

        summary.fonts += 1;
        tracing::info!(font = font.name(), glyphs = cfg.texts.len(), "rendered glyph set");
    }

    Ok(summary)
}

fn list_font_files(dir: &Path) -> GlyphsetResult<Vec<PathBuf>> {
    let rd = fs::read_dir(dir).with_context(|| format!("read fonts dir '{}'", dir.display()))?;

    let mut out = Vec::new();
    for entry in rd {
        let entry = entry.with_context(|| format!("read entry in '{}'", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        if !ext.eq_ignore_ascii_case("ttf") {
            continue;
        }
        out.push(path);
    }
    out.sort();
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/corpus/driver.rs"]
mod tests;
