//! The periodic generation job: compose a batch of quotes and render them to disk.

use std::{fs::File, io::BufWriter, path::Path};

use anyhow::Context;
use rayon::prelude::*;

use crate::{
    foundation::{
        error::{QuoteCardError, QuoteCardResult},
        rng::Rng64,
    },
    quote::{Category, QuoteRecord, generate_original_quote},
    render::{ImageFormat, QuoteRenderer},
};

/// Number of quotes the hourly job produces.
pub const HOURLY_BATCH_SIZE: usize = 30;

/// Compose `count` watermarked standard-quality quotes with uniformly random categories.
pub fn generate_batch(count: usize, affiliate_tag: &str, rng: &mut Rng64) -> Vec<QuoteRecord> {
    (0..count)
        .map(|_| {
            let category = rng.choose(&Category::ALL).copied().unwrap_or_default();
            let text = generate_original_quote(category, rng);
            QuoteRecord::new(text, category, None, false, affiliate_tag)
        })
        .collect()
}

/// One rendered record in a batch manifest.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct BatchEntry {
    /// File name relative to the batch directory.
    pub file: String,
    /// Encoding of the file.
    pub format: ImageFormat,
    /// Whether the SVG fallback produced the file.
    pub used_fallback: bool,
    /// The rendered record.
    pub record: QuoteRecord,
}

/// Summary written as `manifest.json` next to the rendered files.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct BatchManifest {
    /// Seed the per-record render streams derive from.
    pub seed: u64,
    /// Entries in record order.
    pub entries: Vec<BatchEntry>,
}

impl BatchManifest {
    /// Number of entries that fell back to SVG.
    pub fn fallbacks(&self) -> usize {
        self.entries.iter().filter(|e| e.used_fallback).count()
    }
}

/// Render `records` in parallel into `out_dir` and write `manifest.json`.
///
/// Record `i` renders with `Rng64::for_index(seed, i)`, so output does not depend on thread
/// scheduling.
pub fn render_batch(
    renderer: &QuoteRenderer,
    records: &[QuoteRecord],
    seed: u64,
    out_dir: &Path,
) -> QuoteCardResult<BatchManifest> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create batch dir '{}'", out_dir.display()))?;

    let entries = records
        .par_iter()
        .enumerate()
        .map(|(i, record)| -> QuoteCardResult<BatchEntry> {
            let mut rng = Rng64::for_index(seed, i as u64);
            let report = renderer.render_report(&record.render_request(), &mut rng);
            let file = format!("quote-{i:04}.{}", report.image.format.extension());
            let path = out_dir.join(&file);
            std::fs::write(&path, &report.image.bytes)
                .with_context(|| format!("write '{}'", path.display()))?;
            Ok(BatchEntry {
                file,
                format: report.image.format,
                used_fallback: report.used_fallback(),
                record: record.clone(),
            })
        })
        .collect::<QuoteCardResult<Vec<_>>>()?;

    let manifest = BatchManifest { seed, entries };
    let manifest_path = out_dir.join("manifest.json");
    let f = File::create(&manifest_path)
        .with_context(|| format!("create '{}'", manifest_path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(f), &manifest)
        .map_err(|e| QuoteCardError::serde(format!("write manifest: {e}")))?;

    tracing::info!(
        count = manifest.entries.len(),
        fallbacks = manifest.fallbacks(),
        dir = %out_dir.display(),
        "batch rendered"
    );
    Ok(manifest)
}
