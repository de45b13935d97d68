use std::process;

use anyhow::Context;
use bbox_query::config::{Args, QueryConfig};
use clap::Parser;
use log::warn;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // --help / --version
            if !err.use_stderr() {
                err.exit();
            }
            println!("{}", err.render());
            process::exit(1);
        }
    };
    let config = QueryConfig::from(args);

    let summary = bbox_query::run(&config)
        .with_context(|| format!("query over {} failed", config.input.display()))?;
    if summary.failed_writes > 0 {
        warn!(
            "{} of {} matching records could not be written to {}",
            summary.failed_writes,
            summary.matched,
            config.output.display()
        );
    }

    println!("Query complete");
    Ok(())
}
