use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use anchorboard::{
    BoardConfig, Locale, PageTemplate, RenderOutcome, Verification, pipeline, verify_bytes,
};

#[derive(Parser, Debug)]
#[command(name = "anchorboard", version)]
struct Cli {
    /// JSON config file. Flags override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Date locale for card timestamps (es-ES, en-US, iso).
    #[arg(long, global = true)]
    locale: Option<Locale>,

    /// Fixed UTC offset, in minutes, used when formatting timestamps.
    #[arg(long, global = true, allow_negative_numbers = true)]
    utc_offset_minutes: Option<i32>,

    /// Increase log verbosity (-v, -vv, -vvv). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the anchors into an HTML page.
    Render(RenderArgs),
    /// Print the transaction cards fragment to stdout.
    Cards(SourceArgs),
    /// Check a document against its anchored SHA-256.
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Path or http(s) URL of anchors.json.
    #[arg(long)]
    source: Option<String>,

    /// Base directory for a relative source path.
    #[arg(long)]
    base_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    src: SourceArgs,

    /// HTML page to inject into. Defaults to the built-in dashboard.
    #[arg(long)]
    template: Option<PathBuf>,

    /// Output HTML path.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    #[command(flatten)]
    src: SourceArgs,

    /// Document to hash.
    #[arg(long)]
    file: PathBuf,

    /// Only compare against this expediente's anchor.
    #[arg(long)]
    expediente: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut cfg = match &cli.config {
        Some(path) => BoardConfig::load(path).await?,
        None => BoardConfig::default(),
    };
    if let Some(locale) = cli.locale {
        cfg.locale = locale;
    }
    if let Some(offset) = cli.utc_offset_minutes {
        cfg.utc_offset_minutes = offset;
    }

    match cli.cmd {
        Command::Render(args) => cmd_render(cfg, args).await,
        Command::Cards(args) => cmd_cards(cfg, args).await,
        Command::Verify(args) => cmd_verify(cfg, args).await,
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn apply_source(cfg: &mut BoardConfig, args: SourceArgs) {
    if let Some(source) = args.source {
        cfg.source = source;
    }
    if let Some(base_dir) = args.base_dir {
        cfg.base_dir = Some(base_dir);
    }
}

async fn cmd_render(mut cfg: BoardConfig, args: RenderArgs) -> anyhow::Result<()> {
    apply_source(&mut cfg, args.src);
    if let Some(out) = args.out {
        cfg.out = out;
    }
    let settings = cfg.render_settings()?;

    let template = match &args.template {
        Some(path) => PageTemplate::Custom(
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("read template '{}'", path.display()))?,
        ),
        None => PageTemplate::Dashboard {
            network_label: cfg.network_label.clone(),
        },
    };

    let rendered = pipeline::render_page(&cfg.anchor_source(), template, &settings)
        .await
        .context("render page")?;

    write_output(&cfg.out, &rendered.html).await?;
    match rendered.outcome {
        RenderOutcome::Cards(n) => eprintln!("wrote {} ({n} transactions)", cfg.out.display()),
        RenderOutcome::NoData => eprintln!("wrote {} (no transactions)", cfg.out.display()),
        RenderOutcome::LoadFailed => eprintln!(
            "wrote {} (anchors could not be loaded from {})",
            cfg.out.display(),
            cfg.anchor_source()
        ),
    }
    Ok(())
}

async fn write_output(path: &Path, html: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    tokio::fs::write(path, html)
        .await
        .with_context(|| format!("write html '{}'", path.display()))
}

async fn cmd_cards(mut cfg: BoardConfig, args: SourceArgs) -> anyhow::Result<()> {
    apply_source(&mut cfg, args);
    let settings = cfg.render_settings()?;
    let source = cfg.anchor_source();

    let (html, count) = pipeline::render_cards_fragment(&source, &settings)
        .await
        .with_context(|| format!("load anchors from '{source}'"))?;
    tracing::info!(count, "cards rendered");
    println!("{html}");
    Ok(())
}

async fn cmd_verify(mut cfg: BoardConfig, args: VerifyArgs) -> anyhow::Result<()> {
    apply_source(&mut cfg, args.src);
    cfg.validate()?;
    let source = cfg.anchor_source();

    let doc = pipeline::load_document(&source)
        .await
        .with_context(|| format!("load anchors from '{source}'"))?;
    let bytes = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("read document '{}'", args.file.display()))?;

    match verify_bytes(&doc, &bytes, args.expediente.as_deref()) {
        Verification::Match { anchor, digest } => {
            println!("verified: {}", args.file.display());
            println!("  expediente: {}", anchor.expediente_id);
            println!("  sha256:     {digest}");
            println!("  txid:       {}", anchor.txid);
            println!("  network:    {}", anchor.network);
            Ok(())
        }
        Verification::Mismatch { expected, digest } => {
            anyhow::bail!("hash mismatch: anchored {expected}, document {digest}")
        }
        Verification::UnknownExpediente { expediente_id } => {
            anyhow::bail!("no anchor for expediente '{expediente_id}'")
        }
        Verification::NotAnchored { digest } => {
            anyhow::bail!("document {digest} is not anchored")
        }
    }
}
