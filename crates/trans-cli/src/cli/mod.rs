mod commands;
mod helpers;
mod render;

use clap::Parser;
use trans_core::domain::TransError;
use tracing_subscriber::EnvFilter;

pub fn run_from_env() -> i32 {
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let trans_error = error.as_trans_error();
            eprintln!("{}", trans_error.diagnostic_line());
            if let Some(summary_line) = trans_error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            trans_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("plot-trans".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();

    match Cli::try_parse_from(&full_args) {
        Ok(cli) => {
            init_logging(cli.verbose);
            commands::run_plot_command(cli.plot)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "plot-trans",
    version,
    about = "Overlay collision strengths from several calculations, one figure per transition"
)]
struct Cli {
    #[command(flatten)]
    plot: commands::PlotArgs,

    /// Log at debug level (overrides RUST_LOG)
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // A subscriber may already be installed when `run` is called more than once.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Pipeline(TransError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<TransError> for CliError {
    fn from(error: TransError) -> Self {
        Self::Pipeline(error)
    }
}

impl CliError {
    fn as_trans_error(&self) -> TransError {
        match self {
            Self::Usage(message) => TransError::format("INPUT.CLI_USAGE", message.trim_end()),
            Self::Pipeline(error) => error.clone(),
            Self::Internal(error) => TransError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CliError, run};
    use trans_core::domain::{TransError, TransErrorCategory};

    #[test]
    fn help_exits_cleanly() {
        let code = run(["--help"]).expect("help should not be an error");
        assert_eq!(code, 0);
    }

    #[test]
    fn missing_levels_is_a_usage_error() {
        let error = run(Vec::<String>::new()).expect_err("levels are required");
        assert!(matches!(error, CliError::Usage(_)));
        assert_eq!(error.as_trans_error().exit_code(), 2);
    }

    #[test]
    fn unknown_quantity_is_rejected_by_the_parser() {
        let error = run(["2", "3", "-t", "sigma"]).expect_err("only om and ups are valid");
        assert!(matches!(error, CliError::Usage(_)));
    }

    #[test]
    fn pipeline_errors_keep_their_category() {
        let error = CliError::from(TransError::parse("PARSE.TABLE_ROW", "bad row"));
        let mapped = error.as_trans_error();
        assert_eq!(mapped.category(), TransErrorCategory::ParseError);
        assert_eq!(mapped.placeholder(), "PARSE.TABLE_ROW");
    }

    #[test]
    fn internal_errors_map_to_io_category() {
        let error = CliError::from(anyhow::anyhow!("disk full"));
        let mapped = error.as_trans_error();
        assert_eq!(mapped.category(), TransErrorCategory::IoSystemError);
        assert!(mapped.message().contains("disk full"));
    }
}
