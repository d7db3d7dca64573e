use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "clearseas", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the registered brand manifest as JSON.
    Dump(DumpArgs),
    /// Pick one asset for a slot.
    Select(SelectArgs),
    /// Print the asset lists a site code resolves to.
    Resolve(ResolveArgs),
    /// Check that manifest entries exist on disk and carry consistent site tags.
    Audit(AuditArgs),
    /// Check local asset references in every HTML file under a directory.
    Scan(ScanArgs),
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// Extra manifest JSON merged over the built-in one.
    #[arg(long)]
    manifest: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SelectArgs {
    /// Collection to pick from.
    #[arg(long, default_value = "images")]
    kind: clearseas::AssetKind,

    /// Extra manifest JSON merged over the built-in one.
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Rotation seed.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    seed: i64,

    /// Offset added to the seed.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    offset: i64,

    /// Palette the slot asks for.
    #[arg(long)]
    palette: Option<String>,

    /// Explicit visiting order, comma separated (values wrap into range).
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    order: Vec<i64>,

    /// Go straight to the rotation head when no palette matches.
    #[arg(long)]
    no_prefer_neutral: bool,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Site code (defaults to `default`).
    site: Option<String>,

    /// Extra site manifest JSON merged over the built-in one.
    #[arg(long)]
    sites: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct AuditArgs {
    /// Directory asset paths are relative to.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Extra site manifest JSON merged over the built-in one.
    #[arg(long)]
    sites: Option<PathBuf>,

    /// Extra brand manifest JSON merged over the built-in one.
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Print the findings as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct ScanArgs {
    /// Site root to scan.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Json)]
    format: ReportFormat,

    /// Write the report here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportFormat {
    Json,
    Markdown,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Dump(args) => cmd_dump(args),
        Command::Select(args) => cmd_select(args),
        Command::Resolve(args) => cmd_resolve(args),
        Command::Audit(args) => cmd_audit(args),
        Command::Scan(args) => cmd_scan(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_store(manifest: Option<&Path>) -> anyhow::Result<clearseas::ManifestStore> {
    let store = clearseas::ManifestStore::with_builtin();
    if let Some(path) = manifest {
        let extra = clearseas::BrandManifest::from_path(path)
            .with_context(|| format!("load manifest '{}'", path.display()))?;
        clearseas::register_brand_assets(Some(&store), Some(extra));
    }
    Ok(store)
}

fn load_sites(sites: Option<&Path>) -> anyhow::Result<clearseas::SiteRegistry> {
    let mut registry = clearseas::SiteRegistry::builtin();
    if let Some(path) = sites {
        registry
            .merge_path(path)
            .with_context(|| format!("load site manifest '{}'", path.display()))?;
    }
    Ok(registry)
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let store = load_store(args.manifest.as_deref())?;
    println!("{}", store.snapshot().to_json_pretty()?);
    Ok(())
}

fn cmd_select(args: SelectArgs) -> anyhow::Result<()> {
    let store = load_store(args.manifest.as_deref())?;
    let assets = store.assets(args.kind);
    let params = clearseas::SelectionParams {
        order: (!args.order.is_empty()).then_some(args.order),
        seed: args.seed,
        offset: args.offset,
        palette: args.palette,
        prefer_neutral: !args.no_prefer_neutral,
    };

    let picked =
        clearseas::select_asset(&clearseas::SelectionRequest::with_params(&assets, &params));
    println!(
        "{}",
        serde_json::to_string_pretty(&picked).context("encode selection JSON")?
    );
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let registry = load_sites(args.sites.as_deref())?;
    let resolved = registry.resolve(args.site.as_deref().unwrap_or(clearseas::DEFAULT_SITE_KEY));
    println!(
        "{}",
        serde_json::to_string_pretty(&resolved).context("encode resolved assets JSON")?
    );
    Ok(())
}

fn cmd_audit(args: AuditArgs) -> anyhow::Result<()> {
    let registry = load_sites(args.sites.as_deref())?;
    let store = load_store(args.manifest.as_deref())?;

    let mut report = clearseas::audit_site_registry(&registry, &args.root)?;
    report.extend(clearseas::audit_brand_manifest(&store.snapshot(), &args.root)?);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("encode audit JSON")?
        );
    } else if report.is_clean() {
        print!("{}", report.render_text());
    } else {
        eprint!("{}", report.render_text());
    }

    if !report.is_ok() {
        anyhow::bail!(
            "{} asset file(s) listed in the manifests are missing",
            report.missing_files.len()
        );
    }
    Ok(())
}

fn cmd_scan(args: ScanArgs) -> anyhow::Result<()> {
    let scanner = clearseas::HtmlScanner::new(&args.root)?;
    let reports = scanner.scan()?;

    let rendered = match args.format {
        ReportFormat::Json => {
            serde_json::to_string_pretty(&reports).context("encode scan JSON")? + "\n"
        }
        ReportFormat::Markdown => clearseas::render_markdown(&reports),
    };

    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, rendered)
                .with_context(|| format!("write report '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
