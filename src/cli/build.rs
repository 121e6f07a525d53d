//! Build command implementation

use std::process::ExitCode;

use super::{Session, EXIT_ERROR, EXIT_SUCCESS};
use crate::build::StyleBuild;
use crate::palette::export_palette;
use crate::watch::{watch_and_rebuild, WatchOptions};

/// Run the build command
pub fn run_build(session: &Session, force: bool, watch: bool, palette: bool) -> ExitCode {
    let context = session.context().with_force(force);
    let layout = context.layout().clone();

    let mut store = match session.open_store(&layout) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error opening settings: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if watch {
        let options = WatchOptions {
            config: session.config.watch.clone(),
            palette: palette || session.config.watch.palette,
        };

        println!("Starting watch mode ({})...", session.environment);
        println!("Press Ctrl+C to stop");
        println!();

        return match watch_and_rebuild(context, &mut store, &options) {
            Ok(()) => ExitCode::from(EXIT_SUCCESS),
            Err(e) => {
                eprintln!("Watch error: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    match StyleBuild::new(context).run(&mut store) {
        Ok(outcome) => println!("{}", outcome.summary()),
        Err(e) => {
            eprintln!("SCSS compiler error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    if palette {
        match export_palette(&layout) {
            Ok(export) => println!("Wrote {}", export.path.display()),
            Err(e) => {
                eprintln!("Palette export error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}
