use std::{
    fs::{self, File},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use anyhow::{Context as _, bail};
use bmpblend::{PixelGrid, Unstoppable};
use clap::Parser;
use log::{Level, info};

/// Blend two equally-sized 24-bit BMP files.
///
/// Each channel of the output moves from the darker of the two inputs
/// (opacity 0) to the lighter (opacity 1).
#[derive(Parser, Debug)]
#[command(name = "bmpblend", version)]
struct Cli {
    /// Background BMP.
    background: PathBuf,

    /// Foreground BMP (same dimensions as the background).
    foreground: PathBuf,

    /// Output BMP path.
    #[arg(short, long, default_value = "output.bmp")]
    out: PathBuf,

    /// Opacity from 0 to 1.
    #[arg(long, default_value_t = 0.5, conflicts_with = "alpha")]
    opacity: f32,

    /// Opacity as an 8-bit value (0-255), instead of --opacity.
    #[arg(long)]
    alpha: Option<u8>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// `--alpha` when given, otherwise `--opacity` truncated to 0-255.
    fn blend_alpha(&self) -> u8 {
        self.alpha
            .unwrap_or_else(|| bmpblend::alpha_from_opacity(self.opacity))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logger(cli.verbose)?;

    let alpha = cli.blend_alpha();

    let background = read_bmp(&cli.background)?;
    let foreground = read_bmp(&cli.foreground)?;

    info!(
        "blending {}x{} images at alpha {alpha}",
        background.width(),
        background.height()
    );
    let blended = bmpblend::combine(&background, &foreground, alpha).with_context(|| {
        format!(
            "blend '{}' with '{}'",
            cli.background.display(),
            cli.foreground.display()
        )
    })?;

    write_bmp_atomic(&cli.out, &blended)?;
    info!("wrote {}", cli.out.display());
    Ok(())
}

fn setup_logger(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };
    simple_logger::init_with_level(level).context("install logger")
}

fn read_bmp(path: &Path) -> anyhow::Result<PixelGrid> {
    let f = File::open(path).with_context(|| format!("open '{}'", path.display()))?;
    bmpblend::decode_reader(BufReader::new(f), None, Unstoppable)
        .with_context(|| format!("decode '{}'", path.display()))
}

/// Encode next to `path` and rename into place, so a failed write never
/// leaves a partial file at `path`.
fn write_bmp_atomic(path: &Path, grid: &PixelGrid) -> anyhow::Result<()> {
    let tmp = temp_path(path)?;

    let result = (|| {
        let f = File::create(&tmp).with_context(|| format!("create '{}'", tmp.display()))?;
        bmpblend::encode_writer(grid, BufWriter::new(f), Unstoppable)
            .with_context(|| format!("encode '{}'", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("rename '{}' to '{}'", tmp.display(), path.display()))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

/// `<dir>/<name>.tmp` beside `path`.
fn temp_path(path: &Path) -> anyhow::Result<PathBuf> {
    let Some(name) = path.file_name() else {
        bail!("output path '{}' has no file name", path.display());
    };
    let mut tmp_name = name.to_os_string();
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}
