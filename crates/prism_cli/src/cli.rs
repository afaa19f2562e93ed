use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use prism_renderer::{RenderConfig, UVec2};

/// Log levels selectable on the command line
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "prism")]
#[command(about = "A Whitted-style ray tracer with progressive rendering")]
pub struct Args {
    /// Scene file to render
    pub scene: PathBuf,

    #[arg(short, long, default_value = "render.png", help = "Output PNG path")]
    pub output: PathBuf,

    #[arg(long, default_value = "640", help = "Image width in pixels")]
    pub width: u32,

    #[arg(long, default_value = "480", help = "Image height in pixels")]
    pub height: u32,

    /// JSON render configuration; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short = 'd', long, help = "Maximum recursion depth")]
    pub max_depth: Option<u32>,

    #[arg(short = 'g', long, help = "Rays per glossy reflection")]
    pub glossy_samples: Option<u32>,

    #[arg(short = 's', long, help = "Samples per pixel axis")]
    pub pixel_samples: Option<u32>,

    #[arg(long, help = "Jitter pixel samples within sub-cells")]
    pub jitter: bool,

    #[arg(long, help = "Samples per emissive triangle")]
    pub area_light_samples: Option<u32>,

    /// Pixel traced with verbose debug logging
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    pub debug_pixel: Option<Vec<u32>>,

    /// Trace only this pixel, log its ray tree and exit
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    pub inspect: Option<Vec<u32>>,

    #[arg(long, help = "Render all rows in parallel instead of progressively")]
    pub parallel: bool,

    /// Directory for partial images written at each progress refresh
    #[arg(long)]
    pub snapshots: Option<PathBuf>,

    #[arg(long, help = "Print the scene as read, in scene file format")]
    pub dump_scene: bool,

    #[arg(long, help = "Print the effective render configuration as JSON")]
    pub print_config: bool,

    #[arg(long, default_value = "0", help = "Random seed")]
    pub seed: u64,

    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub log_level: LogLevel,
}

fn pixel(values: &Option<Vec<u32>>) -> Option<UVec2> {
    match values.as_deref() {
        Some(&[x, y]) => Some(UVec2::new(x, y)),
        _ => None,
    }
}

impl Args {
    /// Apply command line overrides on top of `config`.
    pub fn apply_overrides(&self, config: &mut RenderConfig) {
        if let Some(depth) = self.max_depth {
            config.max_depth = depth;
        }
        if let Some(samples) = self.glossy_samples {
            config.glossy_samples = samples;
        }
        if let Some(samples) = self.pixel_samples {
            config.pixel_samples = samples;
        }
        if let Some(samples) = self.area_light_samples {
            config.area_light_samples = samples;
        }
        if self.jitter {
            config.jitter = true;
        }
        if let Some(p) = pixel(&self.debug_pixel) {
            config.debug_pixel = Some(p);
        }
    }

    pub fn inspect_pixel(&self) -> Option<UVec2> {
        pixel(&self.inspect)
    }
}
