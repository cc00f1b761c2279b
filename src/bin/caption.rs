use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use caption_rs::assets::list_backgrounds;
use caption_rs::fonts::{FALLBACK_FAMILY, ensure_fallback_registered};
use caption_rs::generate::generate;
use caption_rs::layout::{EstimateMeasurer, FontMeasurer, StyleSpec, fit};
use caption_rs::{ApiResponse, CaptionRequest, FontCatalog, Settings};

#[derive(Parser, Debug)]
#[command(
    name = "caption",
    version,
    about = "Render auto-fit captions onto background photos"
)]
struct Cli {
    #[command(flatten)]
    dirs: DirArgs,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct DirArgs {
    /// Directory of .ttf/.otf/.ttc files; each is usable by its file name.
    #[arg(long, global = true, env = "CAPTION_FONT_DIR", default_value = "Font")]
    font_dir: PathBuf,
    /// Directory of .png/.jpg/.jpeg backgrounds.
    #[arg(
        long,
        global = true,
        env = "CAPTION_BACKGROUNDS_DIR",
        default_value = "background_images"
    )]
    backgrounds_dir: PathBuf,
    /// Directory rendered images are written to (created if missing).
    #[arg(
        long,
        global = true,
        env = "CAPTION_OUTPUT_DIR",
        default_value = "output_images"
    )]
    output_dir: PathBuf,
    /// Font file used as the `sans-serif` fallback.
    #[arg(long, global = true, env = "CAPTION_FALLBACK_FONT")]
    fallback_font: Option<PathBuf>,
}

impl DirArgs {
    fn settings(&self) -> Settings {
        Settings {
            font_dir: self.font_dir.clone(),
            background_dir: self.backgrounds_dir.clone(),
            output_dir: self.output_dir.clone(),
            fallback_font: self.fallback_font.clone(),
            ..Settings::default()
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available fonts as a JSON array.
    Fonts,
    /// List available backgrounds as a JSON array.
    Backgrounds,
    /// Fit text into the caption zone and print the layout, without drawing.
    Layout(LayoutArgs),
    /// Render a caption and print the JSON reply.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// Caption text. A real newline or the two characters `\n` start a new
    /// paragraph, so a literal backslash followed by `n` cannot be written.
    #[arg(short, long)]
    text: String,
    /// Font file name (defaults to the first font found).
    #[arg(long)]
    font: Option<String>,
    /// Largest size tried (default 100).
    #[arg(long, default_value_t = 100)]
    font_size: u32,
    #[arg(long, default_value_t = false)]
    bold: bool,
    /// Measure with a fixed 0.6em-per-char estimate instead of a font.
    #[arg(long, default_value_t = false)]
    estimate: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Read the request body from a JSON file (other flags are ignored).
    #[arg(long)]
    request: Option<PathBuf>,
    /// Caption text; empty leaves the background unchanged. A real newline
    /// or the two characters `\n` start a new paragraph, so a literal
    /// backslash followed by `n` cannot be written (use `--request` for that).
    #[arg(short, long)]
    text: Option<String>,
    /// Background file name inside the backgrounds directory.
    #[arg(short, long)]
    bg: Option<String>,
    /// Font file name (defaults to the first font found).
    #[arg(long)]
    font: Option<String>,
    /// Largest size tried (default 100).
    #[arg(long, default_value_t = 100)]
    font_size: u32,
    /// Text color as #rrggbb.
    #[arg(long, default_value = "#ffffff")]
    color: String,
    /// Draw a black outline around the text.
    #[arg(long, default_value_t = false)]
    outline: bool,
    /// Outline width in pixels.
    #[arg(long, default_value_t = 2)]
    outline_width: u32,
    #[arg(long, default_value_t = false)]
    bold: bool,
}

impl GenerateArgs {
    fn into_request(self) -> Result<CaptionRequest> {
        if let Some(path) = self.request {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            return serde_json::from_str(&raw)
                .with_context(|| format!("parsing request {}", path.display()));
        }
        Ok(CaptionRequest {
            text: self.text.as_deref().map(paragraph_breaks),
            bg_image: self.bg,
            font_file: self.font,
            font_size: self.font_size,
            text_color: self.color,
            use_outline: self.outline,
            outline_width: self.outline_width,
            use_bold: self.bold,
        })
    }
}

/// Shells make real newlines awkward to type, so `\n` in flag text means one.
fn paragraph_breaks(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();
    let settings = cli.dirs.settings();
    match cli.cmd {
        Command::Fonts => {
            let catalog = FontCatalog::load(&settings.font_dir)?;
            println!("{}", serde_json::to_string(catalog.families())?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Backgrounds => {
            let names = list_backgrounds(&settings.background_dir)?;
            println!("{}", serde_json::to_string(&names)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Layout(args) => cmd_layout(&settings, args),
        Command::Generate(args) => cmd_generate(&settings, args),
    }
}

fn cmd_layout(settings: &Settings, args: LayoutArgs) -> Result<ExitCode> {
    let text = paragraph_breaks(&args.text);
    let budget = settings.fit_budget(args.font_size);
    let layout = if args.estimate {
        let style = StyleSpec::new(FALLBACK_FAMILY, args.font_size, args.bold);
        match fit(&text, &budget, &EstimateMeasurer::default(), &style) {
            Ok(layout) => layout,
            Err(never) => match never {},
        }
    } else {
        let catalog = FontCatalog::load(&settings.font_dir)?;
        let family = catalog.resolve(args.font.as_deref());
        if family == FALLBACK_FAMILY {
            ensure_fallback_registered(settings.fallback_font.as_deref());
        }
        let style = StyleSpec::new(family, args.font_size, args.bold);
        fit(&text, &budget, &FontMeasurer, &style)?
    };
    if layout.overflows(&budget) {
        eprintln!(
            "Text overflows the {}px caption zone at the minimum size",
            budget.max_height_px
        );
    }
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(ExitCode::SUCCESS)
}

fn cmd_generate(settings: &Settings, args: GenerateArgs) -> Result<ExitCode> {
    let request = args.into_request()?;
    let catalog = FontCatalog::load(&settings.font_dir)?;
    let (reply, code) = match generate(settings, &catalog, &request) {
        Ok(out) => {
            eprintln!("Wrote caption image to {}", out.path.display());
            (out.response(), ExitCode::SUCCESS)
        }
        Err(e) => {
            let code = if e.is_client_error() { 2 } else { 1 };
            (ApiResponse::failure(&e), ExitCode::from(code))
        }
    };
    println!("{}", serde_json::to_string(&reply)?);
    Ok(code)
}
