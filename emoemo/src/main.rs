use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use emoemo_rs::canvas::FontConfig;
use emoemo_rs::export::{save_png, write_png};
use emoemo_rs::presets::{color_preset, resolve_font_family, COLOR_PRESETS, FONT_PRESETS};
use emoemo_rs::{EmojiRenderer, EmojiSettings, FitMode, RenderConfig, RenderOutcome, Rendered, Rgb};
use std::path::PathBuf;

/// emoemo: Render short text into square emoji images
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    /// Print debug logging (RUST_LOG still applies)
    #[clap(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render text to a PNG file
    Render {
        #[clap(flatten)]
        input: RenderArgs,

        /// Path to the PNG file to create
        #[clap(short, long, conflicts_with = "out_dir")]
        output: Option<PathBuf>,

        /// Directory to write `<text>.png` into
        #[clap(long)]
        out_dir: Option<PathBuf>,
    },

    /// Render at a device pixel ratio, as a high-density display would show it
    Preview {
        #[clap(flatten)]
        input: RenderArgs,

        /// Device pixel ratio of the backing raster
        #[clap(long, default_value = "2")]
        pixel_ratio: f32,

        /// Path to the PNG file to create
        #[clap(short, long)]
        output: PathBuf,
    },

    /// Render the text once per font preset
    Variants {
        #[clap(flatten)]
        input: RenderArgs,

        /// Directory to write `<preset id>.png` files into
        #[clap(long)]
        out_dir: PathBuf,
    },

    /// List font and color presets
    Presets {
        /// Print presets as JSON
        #[clap(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Text to render. A literal `\n` starts a new line
    #[clap(short, long)]
    text: Option<String>,

    /// Font preset id or label, or a CSS font family list
    #[clap(short, long)]
    font: Option<String>,

    /// Text color: preset id or label, or #rgb / #rrggbb
    #[clap(short, long)]
    color: Option<String>,

    /// Background color: preset id or label, or #rgb / #rrggbb
    #[clap(short, long)]
    background: Option<String>,

    /// Fit mode. One of per-line, block, height-first, fit-both
    #[clap(short, long)]
    mode: Option<String>,

    /// Canvas width in pixels
    #[clap(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[clap(long)]
    height: Option<u32>,

    /// Draw a grey hint when the text is blank
    #[clap(long)]
    placeholder: bool,

    /// JSON file with text, text_color, background_color and font_family
    #[clap(long)]
    settings: Option<PathBuf>,

    /// JSON file with render config values
    #[clap(long)]
    config: Option<PathBuf>,

    /// Additional directory to scan for font files
    #[clap(long)]
    font_dir: Vec<PathBuf>,

    /// Do not load system fonts
    #[clap(long)]
    no_system_fonts: bool,
}

impl RenderArgs {
    fn settings(&self) -> Result<EmojiSettings> {
        let mut settings = match &self.settings {
            Some(path) => EmojiSettings::from_json_file(path)
                .with_context(|| format!("Failed to read settings file: {}", path.display()))?,
            None => EmojiSettings::default(),
        };
        if let Some(text) = &self.text {
            settings.style.text = unescape_newlines(text);
        }
        if let Some(font) = &self.font {
            settings.font_family = resolve_font_family(font);
        }
        if let Some(color) = &self.color {
            settings.style.text_color = parse_color(color)?;
        }
        if let Some(background) = &self.background {
            settings.style.background_color = parse_color(background)?;
        }
        Ok(settings)
    }

    fn config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::from_json_file(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?,
            None => RenderConfig::default(),
        };
        if let Some(mode) = &self.mode {
            config.mode = mode.parse::<FitMode>()?;
        }
        if let Some(width) = self.width {
            config.canvas_width = width;
        }
        if let Some(height) = self.height {
            config.canvas_height = height;
        }
        if self.placeholder {
            config.placeholder = true;
        }
        Ok(config)
    }

    fn renderer(&self) -> Result<EmojiRenderer> {
        let font_config = FontConfig {
            load_system_fonts: !self.no_system_fonts,
            font_dirs: self.font_dir.clone(),
            ..FontConfig::default()
        };
        let renderer = EmojiRenderer::with_font_config(&font_config, self.config()?)?;
        Ok(renderer)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Render {
            input,
            output,
            out_dir,
        } => {
            let settings = input.settings()?;
            let renderer = input.renderer()?;
            let rendered = renderer.render(&renderer.request(&settings))?;
            report(&rendered);

            let path = match output {
                Some(path) => {
                    write_png(&rendered.canvas, &path)?;
                    path
                }
                None => {
                    let dir = out_dir.unwrap_or_else(|| PathBuf::from("."));
                    save_png(&rendered.canvas, &dir, &settings.style.text)?
                }
            };
            println!("{}", path.display());
        }

        Commands::Preview {
            input,
            pixel_ratio,
            output,
        } => {
            if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
                bail!("Invalid pixel ratio: {pixel_ratio}");
            }
            let settings = input.settings()?;
            let renderer = input.renderer()?;
            let rendered = renderer.render_for_display(&renderer.request(&settings), pixel_ratio)?;
            report(&rendered);
            write_png(&rendered.canvas, &output)?;
            println!("{}", output.display());
        }

        Commands::Variants { input, out_dir } => {
            let settings = input.settings()?;
            let renderer = input.renderer()?;
            for variant in renderer.render_variants(&settings, &FONT_PRESETS)? {
                let path = out_dir.join(format!("{}.png", variant.preset.id));
                write_png(&variant.rendered.canvas, &path).with_context(|| {
                    format!("Failed to write variant {}", variant.preset.id)
                })?;
                println!("{}", path.display());
            }
        }

        Commands::Presets { json } => print_presets(json)?,
    }

    Ok(())
}

/// Initialize logging based on verbosity flag.
fn init_logger(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Turn the two-character sequence `\n` into a line break.
fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

fn parse_color(value: &str) -> Result<Rgb> {
    if let Some(preset) = color_preset(value) {
        return Ok(preset.color);
    }
    value
        .parse::<Rgb>()
        .with_context(|| format!("Expected a color preset or hex color, got {value:?}"))
}

fn report(rendered: &Rendered) {
    match &rendered.outcome {
        RenderOutcome::NoInk => eprintln!("warning: the text produced no visible pixels"),
        outcome => log::info!(target: "emoemo", "{:?}", outcome),
    }
}

fn print_presets(json: bool) -> Result<()> {
    if json {
        let fonts: Vec<_> = FONT_PRESETS
            .iter()
            .map(|p| serde_json::json!({"id": p.id, "label": p.label, "family": p.family}))
            .collect();
        let colors: Vec<_> = COLOR_PRESETS
            .iter()
            .map(|p| serde_json::json!({"id": p.id, "label": p.label, "color": p.color.to_string()}))
            .collect();
        let value = serde_json::json!({"fonts": fonts, "colors": colors});
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Fonts:");
    for preset in FONT_PRESETS.iter() {
        println!("  {:<12} {:<8} {}", preset.id, preset.label, preset.family);
    }
    println!("Colors:");
    for preset in COLOR_PRESETS.iter() {
        println!("  {:<12} {:<8} {}", preset.id, preset.label, preset.color);
    }
    Ok(())
}
