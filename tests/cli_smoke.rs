use std::path::PathBuf;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_quotecard")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "quotecard.exe"
            } else {
                "quotecard"
            });
            p
        })
}

#[test]
fn cli_render_writes_svg_when_fonts_missing() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let cfg_path = dir.join("config.json");
    std::fs::write(
        &cfg_path,
        r#"{"render": {"fonts": {"bold": ["/definitely/missing/b.ttf"], "light": ["/definitely/missing/l.ttf"]}}}"#,
    )
    .unwrap();
    let out_path = dir.join("card.png");
    let svg_path = dir.join("card.svg");
    let _ = std::fs::remove_file(&svg_path);

    let output = std::process::Command::new(exe())
        .arg("--config")
        .arg(&cfg_path)
        .args(["render", "--text", "Dream big. Own your story.", "--author", "Anon"])
        .args(["--seed", "1", "--out"])
        .arg(&out_path)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(svg_path.exists());
    let svg = std::fs::read_to_string(&svg_path).unwrap();
    assert!(svg.contains("— Anon"));
}

#[test]
fn cli_generate_prints_record_json() {
    let output = std::process::Command::new(exe())
        .args(["generate", "--category", "fitness", "--seed", "4", "--premium"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["category"], "fitness");
    assert_eq!(v["watermark"], false);
    assert_eq!(v["quality"], "high");
    assert!(v["text"].as_str().unwrap().ends_with("Sweat is an investment."));
}
