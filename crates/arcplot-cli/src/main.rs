mod gallery;

use arcplot::{ImageFormat, SaveOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Graph(arcplot::graphlib::Error),
    Layout(arcplot::layout::Error),
    Render(arcplot::Error),
    Save(arcplot::SaveError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Graph(err) => write!(f, "graph error: {err}"),
            CliError::Layout(err) => write!(f, "layout error: {err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Save(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<arcplot::graphlib::Error> for CliError {
    fn from(value: arcplot::graphlib::Error) -> Self {
        Self::Graph(value)
    }
}

impl From<arcplot::layout::Error> for CliError {
    fn from(value: arcplot::layout::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<arcplot::Error> for CliError {
    fn from(value: arcplot::Error) -> Self {
        Self::Render(value)
    }
}

impl From<arcplot::SaveError> for CliError {
    fn from(value: arcplot::SaveError) -> Self {
        Self::Save(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Gallery,
}

#[derive(Debug)]
struct Args {
    command: Command,
    out_dir: PathBuf,
    format: ImageFormat,
    seed: u64,
    scale: f32,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            command: Command::Gallery,
            out_dir: PathBuf::from("images"),
            format: ImageFormat::Png,
            seed: 42,
            scale: 1.0,
        }
    }
}

fn usage() -> &'static str {
    "arcplot-cli\n\
\n\
USAGE:\n\
  arcplot-cli [gallery] [--out-dir <dir>] [--format svg|png|jpg|pdf] [--seed <n>] [--scale <n>]\n\
\n\
NOTES:\n\
  - gallery writes five figures into <dir> (default: ./images), creating it if needed.\n\
  - --seed controls the random graph of the last figure (default: 42).\n\
  - --scale multiplies the raster resolution of PNG/JPG output (default: 1).\n\
  - Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "gallery" => args.command = Command::Gallery,
            "--out-dir" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out_dir = PathBuf::from(dir);
            }
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .trim()
                    .parse::<ImageFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--seed" => {
                let Some(seed) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.seed = seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.scale.is_finite() && args.scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            _ => return Err(CliError::Usage(usage())),
        }
    }

    Ok(args)
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Gallery => {
            std::fs::create_dir_all(&args.out_dir)?;
            let mut options = SaveOptions::default();
            options.raster.scale = args.scale;

            for fig in gallery::figures(args.seed)? {
                let path = args
                    .out_dir
                    .join(format!("{}.{}", fig.name, args.format.extension()));
                options.svg = fig.svg;
                arcplot::save(&fig.canvas, &path, &options)?;
                println!("{}", path.display());
            }
            Ok(())
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

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

    tracing::debug!(?args, "arguments parsed");
    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
