//! Command-line interface for building mosaics and generating test libraries

use crate::color::ColorClassBounds;
use crate::io::configuration::{
    DEFAULT_CLASS_COUNT, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_PALETTE_LEVELS,
    DEFAULT_PALETTE_TILE_SIZE, DEFAULT_SEED, DEFAULT_SPREAD_PERCENTILE, DEFAULT_TARGET_HEIGHT,
    DEFAULT_TARGET_WIDTH, OUTPUT_SUFFIX,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{encode_image, write_solid_color_library};
use crate::io::progress::ProgressManager;
use crate::mosaic::pipeline::{MosaicRequest, build_mosaic_from_file};
use clap::{Args, Parser, Subcommand};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "photomosaic")]
#[command(
    author,
    version,
    about = "Rebuild an image as a mosaic of photos from a tile library"
)]
/// Command-line arguments for the mosaic tool
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Only report warnings and errors; hide progress bars
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log request details and derived sizes
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,
}

/// Available operations
#[derive(Subcommand)]
pub enum Command {
    /// Build a mosaic from a source image and a directory of tiles
    Build(BuildArgs),
    /// Write a library of solid-color tiles for testing
    Palette(PaletteArgs),
}

/// Arguments for `build`
#[derive(Args)]
pub struct BuildArgs {
    /// Image to reproduce
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Directory of candidate tile images
    #[arg(value_name = "TILES")]
    pub tiles: PathBuf,

    /// Output path (defaults to <SOURCE stem>_mosaic.<ext> beside the source)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Mosaic width in tiles
    #[arg(long, default_value_t = DEFAULT_GRID_WIDTH)]
    pub grid_width: u32,

    /// Mosaic height in tiles
    #[arg(long, default_value_t = DEFAULT_GRID_HEIGHT)]
    pub grid_height: u32,

    /// Target output width in pixels
    #[arg(short = 'W', long, default_value_t = DEFAULT_TARGET_WIDTH)]
    pub width: u32,

    /// Target output height in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_TARGET_HEIGHT)]
    pub height: u32,

    /// Allow the same tile to fill several cells
    #[arg(short, long)]
    pub reuse: bool,

    /// Random seed for the cell visitation order
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Color class intervals per channel
    #[arg(short, long, default_value_t = DEFAULT_CLASS_COUNT)]
    pub classes: usize,

    /// Keep tiles whose color spread is at or below this percentile
    #[arg(short, long, default_value_t = DEFAULT_SPREAD_PERCENTILE)]
    pub percentile: f64,
}

impl BuildArgs {
    /// Translate the arguments into a validated mosaic request
    ///
    /// # Errors
    ///
    /// Returns an error if the class count, geometry or percentile is invalid
    pub fn to_request(&self) -> Result<MosaicRequest> {
        let request = MosaicRequest::new(
            &self.tiles,
            self.grid_width,
            self.grid_height,
            self.width,
            self.height,
        )
        .with_reuse(self.reuse)
        .with_seed(self.seed)
        .with_bounds(ColorClassBounds::uniform(self.classes)?)
        .with_spread_percentile(self.percentile);
        request.validate()?;
        Ok(request)
    }

    /// Where the finished mosaic is written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.source))
    }
}

/// Arguments for `palette`
#[derive(Args)]
pub struct PaletteArgs {
    /// Directory to write tiles into
    #[arg(value_name = "DIR")]
    pub directory: PathBuf,

    /// Channel levels to combine (comma separated)
    #[arg(short, long, value_delimiter = ',', default_values_t = DEFAULT_PALETTE_LEVELS)]
    pub levels: Vec<u8>,

    /// Tile width in pixels
    #[arg(long, default_value_t = DEFAULT_PALETTE_TILE_SIZE)]
    pub tile_width: u32,

    /// Tile height in pixels
    #[arg(long, default_value_t = DEFAULT_PALETTE_TILE_SIZE)]
    pub tile_height: u32,
}

impl Cli {
    /// Log level implied by `--quiet` and `--verbose`
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Warn
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Install the terminal logger; later calls are ignored
pub fn init_logging(level: LevelFilter) {
    // A logger may already be installed when embedded in another program
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

/// Runs the selected command with progress tracking
pub struct MosaicApp {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl MosaicApp {
    /// Create a new app with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Run the selected command
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments are invalid, the source image cannot
    /// be decoded, the tile directory cannot be read, or output cannot be written
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Command::Build(args) => self.build(args),
            Command::Palette(args) => Self::palette(args),
        }
    }

    fn build(&self, args: &BuildArgs) -> Result<()> {
        let start_time = Instant::now();
        let request = args.to_request()?;
        let output_path = args.output_path();

        let outcome = build_mosaic_from_file(&args.source, &request, self.progress_manager.as_ref());
        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }
        let outcome = outcome?;

        for warning in &outcome.warnings {
            log::warn!("{warning}");
        }

        encode_image(outcome.mosaic.image(), &output_path)?;
        log::info!(
            "Wrote {}x{} mosaic to {} in {:.1?}",
            outcome.mosaic.image().width(),
            outcome.mosaic.image().height(),
            output_path.display(),
            start_time.elapsed()
        );
        Ok(())
    }

    fn palette(args: &PaletteArgs) -> Result<()> {
        if args.levels.is_empty() {
            return Err(invalid_parameter(
                "levels",
                &"",
                &"at least one channel level is required",
            ));
        }
        if args.tile_width == 0 || args.tile_height == 0 {
            return Err(invalid_parameter(
                "tile_dimensions",
                &format!("{}x{}", args.tile_width, args.tile_height),
                &"tiles must be at least one pixel in each direction",
            ));
        }

        let written = write_solid_color_library(
            &args.directory,
            &args.levels,
            args.tile_width,
            args.tile_height,
        )?;
        log::info!(
            "Wrote {} solid-color tiles to {}",
            written.len(),
            args.directory.display()
        );
        Ok(())
    }
}

/// `<stem>_mosaic.<ext>` next to the source; `png` when the source has no extension
pub fn default_output_path(source: &Path) -> PathBuf {
    let stem = source.file_stem().unwrap_or_default();
    let extension = source
        .extension()
        .map_or_else(|| "png".into(), |ext| ext.to_string_lossy());
    let output_name = format!("{}{}.{}", stem.to_string_lossy(), OUTPUT_SUFFIX, extension);

    if let Some(parent) = source.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}
