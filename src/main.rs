use chrono::Datelike;
use clap::{Parser, Subcommand};
use paintfolio::{config, generate, inject, output, process, scan};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    if env!("ON_RELEASE_TAG") == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "paintfolio")]
#[command(about = "Static site generator for bilingual painting portfolios")]
#[command(long_about = "\
Static site generator for bilingual painting portfolios

Paintings are listed once per language, in the same order. Slugs and image
filenames come from the default-language titles, so every language shares
the same images and page identities.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── site/
  │   ├── en.yaml                  # site: { tagline, description }
  │   └── zh.yaml
  ├── paintings/
  │   ├── en.yaml                  # paintings: [ { title, description, alt, ... } ]
  │   └── zh.yaml                  # same order, translated text
  ├── about/
  │   ├── en.md
  │   └── zh.md
  ├── locales/
  │   └── zh.json                  # UI string overrides (optional)
  └── images/
      └── night-hours.jpeg         # \"Night Hours\" → night-hours.jpeg

Output routes:
  /painting/night-hours            default language
  /zh/painting/night-hours         other languages

Run 'paintfolio gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Root of the content tree (config.toml, paintings/, images/, ...)
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Where stage manifests and processed JPEGs are kept between runs
    #[arg(long, default_value = ".paintfolio-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read config and per-language content into temp/manifest.json
    Scan,
    /// Resize every painting image and cut its gallery tile
    Process,
    /// Render every page in every language into the output directory
    Generate,
    /// Write EXIF provenance into the generated JPEGs
    Inject,
    /// Run the full pipeline: scan → process → generate → inject
    Build,
    /// Load and validate content, print what was found, write nothing
    Check,
    /// Print a commented config.toml holding every default
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let scan_manifest_path = cli.temp_dir.join("manifest.json");
    let processed_dir = cli.temp_dir.join("processed");
    let processed_manifest_path = processed_dir.join("manifest.json");
    let year = chrono::Local::now().year();

    match cli.command {
        Command::Scan => {
            run_scan(&cli.source, &cli.temp_dir, &scan_manifest_path)?;
        }
        Command::Process => {
            let manifest: scan::Manifest =
                serde_json::from_str(&std::fs::read_to_string(&scan_manifest_path)?)?;
            init_thread_pool(&manifest.config.processing);
            run_process(&scan_manifest_path, &cli.source, &processed_dir)?;
        }
        Command::Generate => {
            let pages =
                generate::generate(&processed_manifest_path, &processed_dir, &cli.output, year)?;
            output::print_generate_output(&pages);
        }
        Command::Inject => {
            let report = inject::inject(&processed_manifest_path, &cli.output, year)?;
            output::print_inject_output(&report);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = run_scan(&cli.source, &cli.temp_dir, &scan_manifest_path)?;

            println!("==> Stage 2: Processing images");
            init_thread_pool(&manifest.config.processing);
            run_process(&scan_manifest_path, &cli.source, &processed_dir)?;

            println!("==> Stage 3: Generating HTML → {}", cli.output.display());
            let pages =
                generate::generate(&processed_manifest_path, &processed_dir, &cli.output, year)?;
            output::print_generate_output(&pages);

            println!("==> Stage 4: Injecting image metadata");
            let report = inject::inject(&processed_manifest_path, &cli.output, year)?;
            output::print_inject_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> {} is ready to build", cli.source.display());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Scan `source` and write the manifest into the temp directory.
fn run_scan(
    source: &Path,
    temp_dir: &Path,
    manifest_path: &Path,
) -> Result<scan::Manifest, Box<dyn std::error::Error>> {
    let manifest = scan::scan(source)?;
    std::fs::create_dir_all(temp_dir)?;
    std::fs::write(manifest_path, serde_json::to_string_pretty(&manifest)?)?;
    output::print_scan_output(&manifest, source);
    Ok(manifest)
}

/// Process images, printing progress as it arrives, and write the output manifest.
fn run_process(
    manifest_path: &Path,
    source: &Path,
    processed_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_process_event(&event) {
                println!("{}", line);
            }
        }
    });
    let result = process::process(manifest_path, source, processed_dir, Some(tx));
    // The sender is dropped with `process`, so the printer drains and exits
    if printer.join().is_err() {
        tracing::warn!("progress printer panicked");
    }
    let manifest = result?;
    std::fs::write(
        processed_dir.join("manifest.json"),
        serde_json::to_string_pretty(&manifest)?,
    )?;
    Ok(())
}

/// Size the global rayon pool. `processing.max_processes` can only lower the
/// core count.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
