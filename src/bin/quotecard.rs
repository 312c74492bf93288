use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "quotecard", version)]
struct Cli {
    /// JSON configuration file (fonts, palette, watermark, affiliate tag).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one quote card.
    Render(RenderArgs),
    /// Generate and render a batch of quotes, as the hourly job does.
    Batch(BatchArgs),
    /// Print a generated quote record as JSON.
    Generate(GenerateArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Quote text.
    #[arg(long)]
    text: String,

    /// Author shown under the quote.
    #[arg(long)]
    author: Option<String>,

    /// Omit the watermark.
    #[arg(long)]
    no_watermark: bool,

    /// Quality tier.
    #[arg(long, value_enum, default_value_t = QualityChoice::Standard)]
    quality: QualityChoice,

    /// Seed for the background palette choice (random when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Output path; the extension is replaced by the produced format's.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Number of quotes.
    #[arg(long, default_value_t = quotecard::HOURLY_BATCH_SIZE)]
    count: usize,

    /// Seed for composition and rendering (random when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Directory receiving the images and manifest.json.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Category name; unknown names fall back to motivational.
    #[arg(long)]
    category: Option<String>,

    /// Use this text instead of composing one.
    #[arg(long)]
    text: Option<String>,

    /// Author.
    #[arg(long)]
    author: Option<String>,

    /// Premium quote (no watermark, high quality).
    #[arg(long)]
    premium: bool,

    /// Seed for composition (random when omitted).
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum QualityChoice {
    Standard,
    High,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Render(args) => cmd_render(args, &config),
        Command::Batch(args) => cmd_batch(args, &config),
        Command::Generate(args) => cmd_generate(args, &config),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<quotecard::QuoteCardConfig> {
    match path {
        Some(p) => Ok(quotecard::QuoteCardConfig::from_json_file(p)?),
        None => Ok(quotecard::QuoteCardConfig::default()),
    }
}

fn make_rng(seed: Option<u64>) -> quotecard::Rng64 {
    seed.map(quotecard::Rng64::new)
        .unwrap_or_else(quotecard::Rng64::from_time)
}

fn cmd_render(args: RenderArgs, config: &quotecard::QuoteCardConfig) -> anyhow::Result<()> {
    let quality = match args.quality {
        QualityChoice::Standard => quotecard::Quality::Standard,
        QualityChoice::High => quotecard::Quality::High,
    };
    let mut request = quotecard::RenderRequest::new(args.text)
        .watermark(!args.no_watermark)
        .quality(quality);
    if let Some(author) = args.author {
        request = request.author(author);
    }

    let renderer = quotecard::QuoteRenderer::new(config.render.clone());
    let report = renderer.render_report(&request, &mut make_rng(args.seed));
    if let Some(err) = &report.raster_error {
        eprintln!("raster unavailable ({err}); wrote svg instead");
    }

    let out = args.out.with_extension(report.image.format.extension());
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&out, &report.image.bytes)
        .with_context(|| format!("write '{}'", out.display()))?;

    println!("{}", out.display());
    Ok(())
}

fn cmd_batch(args: BatchArgs, config: &quotecard::QuoteCardConfig) -> anyhow::Result<()> {
    let seed = args.seed.unwrap_or_else(|| quotecard::Rng64::from_time().next_u64());
    let records =
        quotecard::generate_batch(args.count, &config.affiliate_tag, &mut quotecard::Rng64::new(seed));
    let renderer = quotecard::QuoteRenderer::new(config.render.clone());
    let manifest = quotecard::render_batch(&renderer, &records, seed, &args.out_dir)?;

    eprintln!(
        "wrote {} quotes to {} ({} svg fallbacks)",
        manifest.entries.len(),
        args.out_dir.display(),
        manifest.fallbacks()
    );
    Ok(())
}

fn cmd_generate(args: GenerateArgs, config: &quotecard::QuoteCardConfig) -> anyhow::Result<()> {
    let req = quotecard::GenerateRequest {
        text: args.text,
        category: args.category,
        author: args.author,
        premium: args.premium,
    };
    let record =
        quotecard::QuoteRecord::from_request(&req, &config.affiliate_tag, &mut make_rng(args.seed));
    println!(
        "{}",
        serde_json::to_string_pretty(&record).context("serialize quote record")?
    );
    Ok(())
}
