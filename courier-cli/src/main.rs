//! Entry point for the `courier` binary.
#![forbid(unsafe_code)]

use courier_cli::CliError;

fn main() {
    if let Err(err) = courier_cli::init_logging() {
        eprintln!("courier: logging disabled: {err}");
    }
    match courier_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("courier: {err}");
            std::process::exit(1);
        }
    }
}
