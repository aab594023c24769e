use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use haarstream::sink::{OutputFormat, DEFAULT_PRECISION, MAX_PRECISION};
use haarstream::HaarError;
use std::ffi::OsString;
use std::path::PathBuf;

/// Multi-level Haar wavelet transform of whitespace-separated samples.
///
/// Prints every detail coefficient, finest level first, then the final
/// average. The number of samples must be a power of two.
#[derive(Parser, Debug)]
#[command(name = "haar-transform", author, version, about)]
pub struct Args {
    /// Read samples from this file instead of standard input
    pub input: Option<PathBuf>,

    /// Digits after the decimal point in the output
    #[arg(long, default_value_t = DEFAULT_PRECISION, value_parser = parse_precision)]
    pub precision: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat {
            precision: self.precision,
        }
    }
}

fn parse_precision(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a non-negative integer", s))?;
    if value > MAX_PRECISION {
        return Err(format!("precision must be at most {}", MAX_PRECISION));
    }
    Ok(value)
}

/// Parse `argv`. Help and version requests print and exit 0; anything else
/// clap rejects becomes [`HaarError::InvalidArguments`].
pub fn parse_from<I, T>(argv: I) -> Result<Args, HaarError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(argv).or_else(|err| match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ => Err(HaarError::InvalidArguments {
            message: first_line(&err.to_string()),
        }),
    })
}

fn first_line(rendered: &str) -> String {
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}
