pub mod cli;
pub mod error;
pub mod format;
pub mod io;
pub mod schema;

use clap::Parser as _;
use lsifcheck_core::{SchemaChecker, ValidationConfig, Validator};

use cli::Cli;
use error::CliError;
use io::LineReader;
use schema::JsonSchemaChecker;

fn main() {
    #[cfg(unix)]
    install_sigpipe_default();

    let cli = Cli::parse();

    if let Err(error) = run(&cli) {
        eprintln!("{}", error.message());
        std::process::exit(error.exit_code());
    }
}

/// Runs the full validation pipeline for the parsed arguments.
///
/// Phase 1 streams the dump through [`Validator::validate_line`]; the graph
/// phase runs only when the whole dump was ingested (neither
/// `--stop-on-error` nor a reader failure cut phase 1 short). The error
/// report goes to stderr; the clean-run summary goes to stdout.
///
/// # Errors
///
/// - [`CliError::Invalid`] (exit 1) — validation found errors; the report
///   has already been printed.
/// - [`CliError::Reader`] (exit 1) — the reader failed mid-stream; the
///   partial report and warning have already been printed.
/// - open/schema failures (exit 2) — validation never started.
fn run(cli: &Cli) -> Result<(), CliError> {
    let checker = if cli.disable_jsonschema {
        None
    } else {
        Some(JsonSchemaChecker::from_embedded()?)
    };
    let config = ValidationConfig {
        disable_schema: cli.disable_jsonschema,
        stop_on_error: cli.stop_on_error,
    };
    let mut validator = Validator::new(
        checker.as_ref().map(|checker| checker as &dyn SchemaChecker),
        config,
    );

    let mut reader = LineReader::open(&cli.file, cli.buffer_capacity)?;

    let mut complete = true;
    let mut reader_failure: Option<CliError> = None;
    loop {
        match reader.next_line() {
            Ok(Some(line)) => {
                let ok = validator.validate_line(&line);
                if !ok && cli.stop_on_error {
                    complete = false;
                    break;
                }
            }
            Ok(None) => break,
            Err(read_error) => {
                reader_failure = Some(CliError::Reader {
                    line: reader.current_line(),
                    detail: read_error.to_string(),
                });
                complete = false;
                break;
            }
        }
    }

    // The graph invariants are only meaningful over the whole dump; after a
    // partial phase 1 they are untested, and the warning says so.
    if complete {
        validator.validate_graph();
    }

    {
        let stderr = std::io::stderr();
        let mut err_out = stderr.lock();
        format::write_report(&mut err_out, validator.errors()).map_err(stderr_error)?;
        if !complete {
            format::write_partial_warning(&mut err_out).map_err(stderr_error)?;
        }
    }

    if let Some(failure) = reader_failure {
        return Err(failure);
    }

    if validator.has_errors() {
        return Err(CliError::Invalid {
            errors: validator.errors().len(),
        });
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    format::write_summary(&mut out, validator.stats()).map_err(|error| CliError::Io {
        source: "stdout".to_owned(),
        detail: error.to_string(),
    })?;

    Ok(())
}

fn stderr_error(error: std::io::Error) -> CliError {
    CliError::Io {
        source: "stderr".to_owned(),
        detail: error.to_string(),
    }
}

/// Resets `SIGPIPE` to its default disposition (`SIG_DFL`).
///
/// Rust's runtime ignores `SIGPIPE` by default, which turns a closed pipe
/// (e.g. `lsifcheck dump.lsif | head`) into an `Err(BrokenPipe)` from a
/// write call instead of the conventional silent termination. Restoring the
/// default disposition lets the kernel terminate the process the way other
/// Unix line tools do.
#[cfg(unix)]
fn install_sigpipe_default() {
    // SAFETY: signal() is called during single-threaded startup before any
    // other threads exist, and SIG_DFL is a valid SIGPIPE handler. The
    // previous handler is intentionally discarded.
    //
    // The workspace denies `unsafe_code`; this is the one unavoidable libc
    // call, scoped with an inline allow so nothing else is exempted.
    #[allow(unsafe_code)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
}
