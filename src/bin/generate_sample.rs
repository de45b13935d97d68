use std::path::PathBuf;

use anyhow::{Context, Result};
use bbox_query::PointValue;
use clap::Parser;
use log::info;

/// Write a synthetic `x,y,value` dataset for bbox-query.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Number of records to write
    #[arg(short, long, default_value_t = 1_000_000)]
    count: usize,

    /// PRNG seed; the same seed always yields the same file
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Coordinates are drawn from [-range, range)
    #[arg(short, long, default_value_t = 1000.0)]
    range: f64,

    /// Destination file
    #[arg(short, long, default_value = "sample_data.csv")]
    output: PathBuf,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[lo, hi)`, rounded to two decimals like the query output.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let v = lo + (hi - lo) * self.next_f64();
        (v * 100.0).round() / 100.0
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = SimpleRng::new(args.seed);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    for _ in 0..args.count {
        let point = PointValue {
            x: rng.uniform(-args.range, args.range),
            y: rng.uniform(-args.range, args.range),
            value: rng.uniform(0.0, 100.0),
        };
        writer.serialize(point).context("writing record")?;
    }
    writer.flush().context("flushing output")?;

    info!("seed {} range ±{}", args.seed, args.range);
    println!("Wrote {} records to {}", args.count, args.output.display());
    Ok(())
}
