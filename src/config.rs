use std::path::PathBuf;

use clap::Parser;

use crate::data::model::QueryRect;

// ---------------------------------------------------------------------------
// Run configuration
// ---------------------------------------------------------------------------

/// Everything one query run needs: where to read, where to write, what to
/// look for.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub rect: QueryRect,
}

/// Command-line arguments of `bbox-query`.
#[derive(Parser, Debug)]
#[command(name = "bbox-query", version)]
#[command(about = "Write every point strictly inside a bounding box to a CSV file")]
#[command(allow_negative_numbers = true)]
pub struct Args {
    /// Minimum X of the bounding box (exclusive)
    #[arg(value_name = "MIN_X")]
    pub x_min: f64,

    /// Maximum X of the bounding box (exclusive)
    #[arg(value_name = "MAX_X")]
    pub x_max: f64,

    /// Minimum Y of the bounding box (exclusive)
    #[arg(value_name = "MIN_Y")]
    pub y_min: f64,

    /// Maximum Y of the bounding box (exclusive)
    #[arg(value_name = "MAX_Y")]
    pub y_max: f64,

    /// Input dataset, one `x,y,value` record per line
    #[arg(short, long, default_value = "sample_data.csv")]
    pub input: PathBuf,

    /// Output file, recreated on every run
    #[arg(short, long, default_value = "output_sample_data.csv")]
    pub output: PathBuf,
}

impl From<Args> for QueryConfig {
    fn from(args: Args) -> Self {
        QueryConfig {
            input: args.input,
            output: args.output,
            rect: QueryRect::new(args.x_min, args.x_max, args.y_min, args.y_max),
        }
    }
}
