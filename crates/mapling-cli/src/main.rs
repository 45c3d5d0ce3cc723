use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;

use mapling::render::raster::{RasterError, RasterOptions, svg_to_jpeg, svg_to_png};
use mapling::render::{GenerateOptions, artifact, layout_render_model, render_mindmap_svg};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Render(mapling::render::HeadlessError),
    Raster(RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Render(err) => write!(f, "{err}"),
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

impl From<mapling::render::HeadlessError> for CliError {
    fn from(value: mapling::render::HeadlessError) -> Self {
        Self::Render(value)
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

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Parse,
    Layout,
    Render,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    max_width: Option<usize>,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    out: Option<String>,
    out_dir: Option<String>,
}

fn usage() -> &'static str {
    "mapling-cli\n\
\n\
USAGE:\n\
  mapling-cli [parse] [--pretty] [<path>|-]\n\
  mapling-cli layout [--pretty] [--max-width <chars>] [<path>|-]\n\
  mapling-cli render [--format svg|png|jpg] [--scale <n>] [--background <css-color>] [--max-width <chars>] [--out <path>] [--out-dir <dir>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input (raw model output) is read from stdin.\n\
  - parse prints the canonical tree as JSON; layout prints the render model.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG/JPG output goes to --out, or to a generated name under --out-dir (default '.').\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        render_scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1).peekable();
    match it.peek().map(|s| s.as_str()) {
        Some("parse") => {
            args.command = Command::Parse;
            it.next();
        }
        Some("layout") => {
            args.command = Command::Layout;
            it.next();
        }
        Some("render") => {
            args.command = Command::Render;
            it.next();
        }
        _ => {}
    }

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--pretty" => args.pretty = true,
            "--max-width" => {
                let value = it.next().ok_or(CliError::Usage(usage()))?;
                let width: usize = value.parse().map_err(|_| CliError::Usage(usage()))?;
                if width == 0 {
                    return Err(CliError::Usage(usage()));
                }
                args.max_width = Some(width);
            }
            "--format" => {
                let value = it.next().ok_or(CliError::Usage(usage()))?;
                args.render_format = value.parse().map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let value = it.next().ok_or(CliError::Usage(usage()))?;
                let scale: f32 = value.parse().map_err(|_| CliError::Usage(usage()))?;
                if !(scale.is_finite() && scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                args.render_scale = scale;
            }
            "--background" => {
                args.background = Some(it.next().ok_or(CliError::Usage(usage()))?.clone());
            }
            "--out" => {
                args.out = Some(it.next().ok_or(CliError::Usage(usage()))?.clone());
            }
            "--out-dir" => {
                args.out_dir = Some(it.next().ok_or(CliError::Usage(usage()))?.clone());
            }
            _ if args.input.is_none() => args.input = Some(arg.clone()),
            _ => return Err(CliError::Usage(usage())),
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn generate_options(args: &Args) -> GenerateOptions {
    let mut options = GenerateOptions::default();
    if let Some(width) = args.max_width {
        options.wrap_width = width;
    }
    options
}

fn to_json(value: &impl serde::Serialize, pretty: bool) -> Result<String, CliError> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

fn run(args: &Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;

    match args.command {
        Command::Parse => {
            let tree = mapling::build_diagram(&text);
            println!("{}", to_json(&tree, args.pretty)?);
        }
        Command::Layout => {
            let tree = mapling::build_diagram(&text);
            let model = layout_render_model(&tree, &generate_options(args))?;
            println!("{}", to_json(&model, args.pretty)?);
        }
        Command::Render => {
            let svg = render_mindmap_svg(&text, &generate_options(args))?;
            let raster = RasterOptions {
                scale: args.render_scale,
                background: args.background.clone(),
                jpeg_quality: 90,
            };
            match args.render_format {
                RenderFormat::Svg => match &args.out {
                    Some(path) => std::fs::write(path, svg.as_bytes())?,
                    None => println!("{svg}"),
                },
                RenderFormat::Png => {
                    let bytes = svg_to_png(&svg, &raster)?;
                    write_binary(args, "png", &bytes)?;
                }
                RenderFormat::Jpeg => {
                    let bytes = svg_to_jpeg(&svg, &raster)?;
                    write_binary(args, "jpg", &bytes)?;
                }
            }
        }
    }

    Ok(())
}

fn write_binary(args: &Args, ext: &str, bytes: &[u8]) -> Result<(), CliError> {
    let path = match &args.out {
        Some(path) => {
            std::fs::write(path, bytes)?;
            PathBuf::from(path)
        }
        None => {
            let dir = PathBuf::from(args.out_dir.as_deref().unwrap_or("."));
            artifact::write_artifact(&dir, "mindmap", ext, bytes)?
        }
    };
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn main() {
    let argv: Vec<String> = std::env::args().collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
