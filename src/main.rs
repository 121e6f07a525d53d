//! bsbuild - command-line front end for the Bootscore style build

use std::process::ExitCode;

use bootscore_build::cli;

fn main() -> ExitCode {
    cli::run()
}
