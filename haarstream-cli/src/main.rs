mod cli;

use haarstream::pipeline::{self, Summary};
use haarstream::HaarError;
use log::LevelFilter;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::process::ExitCode;

use crate::cli::Args;

/// Map `-v` occurrences to a level; `RUST_LOG` overrides it when set.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> Result<Summary, HaarError> {
    let format = args.output_format();
    let output = BufWriter::new(io::stdout().lock());
    match &args.input {
        Some(path) => {
            log::info!("reading samples from {}", path.display());
            let file = File::open(path).map_err(|err| {
                log::error!("cannot open {}: {}", path.display(), err);
                HaarError::from(err)
            })?;
            pipeline::run(BufReader::new(file), output, &format)
        }
        None => {
            log::info!("reading samples from standard input");
            pipeline::run(io::stdin().lock(), output, &format)
        }
    }
}

fn report(err: &HaarError) -> ExitCode {
    eprintln!("{}", err.diagnostic());
    ExitCode::from(err.code())
}

fn main() -> ExitCode {
    let args = match cli::parse_from(std::env::args_os()) {
        Ok(args) => args,
        Err(err) => return report(&err),
    };
    init_logging(args.verbose);

    match run(&args) {
        Ok(summary) => {
            log::info!(
                "{} samples, {} levels, {} coefficients",
                summary.samples,
                summary.levels,
                summary.coefficients
            );
            ExitCode::SUCCESS
        }
        Err(err) => report(&err),
    }
}
