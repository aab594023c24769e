use clap::{Parser, Subcommand};
#[cfg(not(test))]
use xtask::*;

#[derive(Parser)]
#[command(author, version, about = "Development tasks for haarstream")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Build,
    Test,
    #[command(name = "test-no-std")]
    TestNoStd,
    Clippy,
    Fmt,
    Analyze,
    Bench,
    Transform {
        /// Path to a file of whitespace-separated samples
        input: String,
    },
}

#[cfg(not(test))]
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = detect_config();

    let status = match cli.command {
        Commands::Build => build_command(&cfg).status(),
        Commands::Test => test_command(&cfg).status(),
        Commands::TestNoStd => test_no_std_command().status(),
        Commands::Clippy => clippy_command().status(),
        Commands::Fmt => fmt_command().status(),
        Commands::Analyze => {
            let fmt = fmt_command().status()?;
            if !fmt.success() {
                Ok(fmt)
            } else {
                clippy_command().status()
            }
        }
        Commands::Bench => bench_command().status(),
        Commands::Transform { input } => transform_command(&cfg, &input).status(),
    }?;

    std::process::exit(status.code().unwrap_or(1));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_transform_command() {
        let cli = Cli::parse_from(["xtask", "transform", "samples.txt"]);
        match cli.command {
            Commands::Transform { input } => assert_eq!(input, "samples.txt"),
            _ => panic!("parsed wrong command"),
        }
    }

    #[test]
    fn parse_test_no_std_command() {
        let cli = Cli::parse_from(["xtask", "test-no-std"]);
        assert!(matches!(cli.command, Commands::TestNoStd));
    }
}
