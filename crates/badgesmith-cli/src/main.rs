use badgesmith::render::BadgeRenderer;
use badgesmith::render::raster::{self, RasterError, RasterOptions};
use badgesmith::{BadgeConfig, Icon, THEMES};
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Badge(badgesmith::Error),
    Raster(RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Badge(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<badgesmith::Error> for CliError {
    fn from(value: badgesmith::Error) -> Self {
        Self::Badge(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Render,
    Layout,
    Themes,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
    Pdf,
}

impl RenderFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Pdf => "pdf",
        }
    }
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    label: Option<String>,
    value: Option<String>,
    theme: Option<String>,
    icon: Option<String>,
    no_icon: bool,
    config: Option<String>,
    render_format: RenderFormat,
    render_scale: Option<f32>,
    background: Option<String>,
    pretty: bool,
    json: bool,
    out: Option<String>,
}

fn usage() -> &'static str {
    "badgesmith-cli\n\
\n\
USAGE:\n\
  badgesmith-cli [render] [--label <text>] [--value <text>] [--theme <name>] [--icon <path>|--no-icon] [--format svg|png|jpg|pdf] [--scale <n>] [--background <css-color>] [--config <path>] [--out <path>]\n\
  badgesmith-cli layout [--label <text>] [--value <text>] [--theme <name>] [--config <path>] [--pretty]\n\
  badgesmith-cli themes [--json [--pretty]]\n\
\n\
NOTES:\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG/JPG/PDF output defaults to ./badge.<ext>; use --out - to write bytes to stdout.\n\
  - Unknown themes fall back to 'default'. themes prints name, background and text\n\
    tab-separated, or a JSON array with --json.\n\
  - layout never reads the icon file; only the icon box geometry is reported.\n\
  - --config reads a JSON file; BADGESMITH_LABEL, BADGESMITH_VALUE, BADGESMITH_THEME and\n\
    BADGESMITH_ICON override it, and flags override both.\n\
  - Set RUST_LOG=debug to trace config and icon resolution on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        let mut next_value = || it.next().cloned().ok_or(CliError::Usage(usage()));
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" => args.command = Command::Render,
            "layout" => args.command = Command::Layout,
            "themes" => args.command = Command::Themes,
            "--label" => args.label = Some(next_value()?),
            "--value" => args.value = Some(next_value()?),
            "--theme" => args.theme = Some(next_value()?),
            "--icon" => args.icon = Some(next_value()?),
            "--no-icon" => args.no_icon = true,
            "--config" => args.config = Some(next_value()?),
            "--pretty" => args.pretty = true,
            "--json" => args.json = true,
            "--format" => {
                args.render_format = next_value()?
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let scale = next_value()?
                    .parse::<f32>()
                    .map_err(|_| CliError::Usage(usage()))?;
                if !(scale.is_finite() && scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.render_scale = Some(scale);
            }
            "--background" => {
                let bg = next_value()?;
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--out" => args.out = Some(next_value()?),
            _ => return Err(CliError::Usage(usage())),
        }
    }

    if args.icon.is_some() && args.no_icon {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

/// Merges config file, environment and flags, flags winning.
fn load_config(args: &Args) -> Result<BadgeConfig, CliError> {
    let cfg = match args.config.as_deref() {
        Some(path) => BadgeConfig::from_path(path)?,
        None => BadgeConfig::default(),
    };
    let mut cfg = cfg.with_env();
    if let Some(label) = &args.label {
        cfg.label = Some(label.clone());
    }
    if let Some(value) = &args.value {
        cfg.value = Some(value.clone());
    }
    if let Some(theme) = &args.theme {
        cfg.theme = Some(theme.clone());
    }
    if let Some(icon) = &args.icon {
        cfg.icon = Some(icon.into());
    }
    if args.no_icon {
        cfg.icon = None;
    }
    if let Some(scale) = args.render_scale {
        cfg.scale = Some(scale);
    }
    if let Some(bg) = &args.background {
        cfg.background = Some(bg.clone());
    }
    debug!(?cfg, "resolved badge config");
    Ok(cfg)
}

/// Theme and geometry only; used where the icon payload is never emitted.
fn layout_renderer(cfg: &BadgeConfig) -> BadgeRenderer {
    BadgeRenderer::new()
        .with_theme(cfg.theme())
        .with_geometry(cfg.geometry.clone())
        .with_icon(Icon::empty())
}

fn build_renderer(cfg: &BadgeConfig, no_icon: bool) -> Result<BadgeRenderer, CliError> {
    let renderer = BadgeRenderer::from_config(cfg)?;
    Ok(if no_icon {
        renderer.with_icon(Icon::empty())
    } else {
        renderer
    })
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn write_bytes(bytes: &[u8], out: Option<&str>, format: RenderFormat) -> Result<(), CliError> {
    let out = out
        .map(str::to_string)
        .unwrap_or_else(|| format!("badge.{}", format.extension()));
    if out == "-" {
        std::io::stdout().lock().write_all(bytes)?;
    } else {
        std::fs::write(&out, bytes)?;
        info!(path = %out, bytes = bytes.len(), "wrote badge");
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Themes => {
            if args.json {
                return write_json(&THEMES, args.pretty);
            }
            for t in THEMES.iter() {
                println!("{}\t{}\t{}", t.name, t.background, t.text);
            }
            Ok(())
        }
        Command::Layout => {
            let cfg = load_config(&args)?;
            let layout = layout_renderer(&cfg).layout(cfg.label(), cfg.value());
            write_json(&layout, args.pretty)
        }
        Command::Render => {
            let cfg = load_config(&args)?;
            let renderer = build_renderer(&cfg, args.no_icon)?;
            let request = renderer.request(cfg.label(), cfg.value());
            let raster_options = RasterOptions::from_config(&cfg);

            match args.render_format {
                RenderFormat::Svg => {
                    let svg = badgesmith::render::render_badge_svg(&request, &renderer.layout);
                    write_text(&svg, args.out.as_deref())?;
                }
                RenderFormat::Png => {
                    let bytes = raster::render_png_sync(&request, &renderer.layout, &raster_options)?;
                    write_bytes(&bytes, args.out.as_deref(), args.render_format)?;
                }
                RenderFormat::Jpeg => {
                    let bytes =
                        raster::render_jpeg_sync(&request, &renderer.layout, &raster_options)?;
                    write_bytes(&bytes, args.out.as_deref(), args.render_format)?;
                }
                RenderFormat::Pdf => {
                    let bytes = raster::render_pdf_sync(&request, &renderer.layout, &raster_options)?;
                    write_bytes(&bytes, args.out.as_deref(), args.render_format)?;
                }
            }
            Ok(())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
