use std::process::ExitCode;

fn main() -> ExitCode {
    sceneloc::cli::run_cli()
}
