use std::path::PathBuf;

use quotecard::{
    BatchManifest, FontConfig, ImageFormat, QuoteRenderer, RenderConfig, Rng64, generate_batch,
    render_batch,
};

fn temp_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "quotecard_{tag}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn batch_writes_files_and_manifest() {
    let dir = temp_dir("batch");
    let renderer = QuoteRenderer::new(RenderConfig {
        fonts: FontConfig {
            bold: vec![],
            light: vec![],
        },
        ..RenderConfig::default()
    });
    let records = generate_batch(6, "tag-20", &mut Rng64::new(8));
    let manifest = render_batch(&renderer, &records, 8, &dir).unwrap();

    assert_eq!(manifest.entries.len(), 6);
    assert_eq!(manifest.fallbacks(), 6);
    for (i, entry) in manifest.entries.iter().enumerate() {
        assert_eq!(entry.file, format!("quote-{i:04}.svg"));
        assert_eq!(entry.format, ImageFormat::Svg);
        assert_eq!(entry.record, records[i]);
        let svg = std::fs::read_to_string(dir.join(&entry.file)).unwrap();
        assert!(svg.contains("ViralQuoteMachine.com"));
    }

    let on_disk: BatchManifest =
        serde_json::from_str(&std::fs::read_to_string(dir.join("manifest.json")).unwrap()).unwrap();
    assert_eq!(on_disk.seed, 8);
    assert_eq!(on_disk.entries.len(), 6);

    let _ = std::fs::remove_dir_all(&dir);
}
