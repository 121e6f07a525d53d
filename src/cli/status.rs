//! Status command implementation

use std::process::ExitCode;

use super::{Session, EXIT_ERROR, EXIT_SUCCESS};
use crate::build::StyleBuild;

/// Run the status command. Reads state only.
pub fn run_status(session: &Session) -> ExitCode {
    let context = session.context();
    let layout = context.layout().clone();

    let store = match session.open_store(&layout) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error opening settings: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let plan = match StyleBuild::new(context).plan(&store) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match &session.config_path {
        Some(path) => println!("Config:      {}", path.display()),
        None => println!("Config:      (defaults)"),
    }
    println!("Environment: {}", session.environment);
    println!("Source root: {}", plan.source_root.display());
    if layout.uses_child_sources() {
        println!(
            "             (child theme, imports fall back to {})",
            layout.template_dir().display()
        );
    }
    let missing = if plan.artifact_exists { "" } else { " (missing)" };
    println!("Stylesheet:  {}{}", plan.css_path.display(), missing);
    println!("Signature:   {}", plan.signature);
    println!("Marker:      {}", plan.marker);
    match plan.reason {
        Some(reason) => println!("Rebuild:     yes ({})", reason),
        None => println!("Rebuild:     no"),
    }

    ExitCode::from(EXIT_SUCCESS)
}
