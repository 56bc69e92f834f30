//! Entry point for the `concord` command-line interface.
#![forbid(unsafe_code)]

use concord_cli::CliError;

#[expect(clippy::print_stderr, reason = "the binary reports fatal errors on stderr")]
fn main() {
    match concord_cli::run() {
        Ok(()) => {}
        // Clap renders help, version and usage errors itself.
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("concord: {err}");
            std::process::exit(1);
        }
    }
}
