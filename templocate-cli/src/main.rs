use clap::Parser;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use templocate::{find_template_in_image, FindOptions, LocateConfig, MatchResult, StepViewer};
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Locate a template inside an image (ZNCC)")]
struct Cli {
    /// Image to search in.
    image: Option<PathBuf>,
    /// Template to search for.
    template: Option<PathBuf>,
    /// Write the annotated image to this path.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Show the input, template and result images, waiting for Enter after each.
    #[arg(long)]
    show_steps: bool,
    /// Minimum confidence for a match, in [-1, 1].
    #[arg(long)]
    threshold: Option<f32>,
    /// Scan rows in parallel (needs the `rayon` feature).
    #[arg(long)]
    parallel: bool,
    /// Optional JSON configuration file; command-line values take precedence.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable debug-level tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct LocateConfigJson {
    threshold: f32,
    min_var_i: f32,
    parallel: bool,
}

impl Default for LocateConfigJson {
    fn default() -> Self {
        let cfg = LocateConfig::default();
        Self {
            threshold: cfg.threshold,
            min_var_i: cfg.min_var_i,
            parallel: cfg.parallel,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    image_path: Option<PathBuf>,
    template_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    show_steps: bool,
    locate: LocateConfigJson,
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    confidence: f32,
}

impl From<MatchResult> for MatchRecord {
    fn from(value: MatchResult) -> Self {
        Self {
            x: value.x,
            y: value.y,
            width: value.width,
            height: value.height,
            confidence: value.confidence,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    found: bool,
    best: Option<MatchRecord>,
}

/// Writes each step to a temporary PNG, waits for Enter, then removes it.
struct ConsoleViewer<R> {
    dir: PathBuf,
    step: usize,
    input: R,
}

impl ConsoleViewer<io::StdinLock<'static>> {
    fn new() -> Self {
        Self::with_input(std::env::temp_dir(), io::stdin().lock())
    }
}

impl<R: BufRead> ConsoleViewer<R> {
    fn with_input(dir: PathBuf, input: R) -> Self {
        Self {
            dir,
            step: 0,
            input,
        }
    }
}

impl<R: BufRead> StepViewer for ConsoleViewer<R> {
    fn show(&mut self, title: &str, image: &DynamicImage) {
        self.step += 1;
        let slug = title.to_lowercase().replace(' ', "-");
        let path = self.dir.join(format!(
            "templocate-{}-step{}-{slug}.png",
            std::process::id(),
            self.step
        ));
        match image.save(&path) {
            Ok(()) => tracing::info!("{title}: {}", path.display()),
            Err(err) => {
                tracing::warn!("could not write {title} preview: {err}");
                return;
            }
        }

        eprint!("press Enter to continue...");
        let _ = io::stderr().flush();
        let mut line = String::new();
        if let Err(err) = self.input.read_line(&mut line) {
            tracing::warn!("could not read from stdin: {err}");
        }
        if let Err(err) = fs::remove_file(&path) {
            tracing::warn!("could not remove {}: {err}", path.display());
        }
    }
}

/// Merges command-line values over the config file.
///
/// Paths and the threshold come from the command line when given; the
/// boolean switches are on when either source enables them.
fn resolve(
    cli: Cli,
    config: Config,
) -> Result<(PathBuf, PathBuf, FindOptions), Box<dyn std::error::Error>> {
    let image_path = cli
        .image
        .or(config.image_path)
        .ok_or("an image path must be given on the command line or in the config")?;
    let template_path = cli
        .template
        .or(config.template_path)
        .ok_or("a template path must be given on the command line or in the config")?;
    let threshold = cli.threshold.unwrap_or(config.locate.threshold);
    if !threshold.is_finite() || !(-1.0..=1.0).contains(&threshold) {
        return Err("threshold must lie in [-1, 1]".into());
    }

    let options = FindOptions {
        output_path: cli.output.or(config.output_path),
        show_steps: cli.show_steps || config.show_steps,
        config: LocateConfig {
            threshold,
            min_var_i: config.locate.min_var_i,
            parallel: cli.parallel || config.locate.parallel,
        },
    };
    Ok((image_path, template_path, options))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let directive = if cli.trace {
        "templocate=debug"
    } else {
        "templocate=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config: Config = match &cli.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    let (image_path, template_path, options) = resolve(cli, config)?;

    let mut viewer = ConsoleViewer::new();
    let best = find_template_in_image(&image_path, &template_path, &options, &mut viewer);
    match &best {
        Some(m) => tracing::info!(
            "found template at position (x={}, y={}) with size (w={}, h={})",
            m.x,
            m.y,
            m.width,
            m.height
        ),
        None => tracing::info!("template not found in the image"),
    }

    let output = Output {
        found: best.is_some(),
        best: best.map(MatchRecord::from),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
