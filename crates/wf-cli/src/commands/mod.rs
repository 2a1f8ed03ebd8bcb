pub mod check;
pub mod list;
pub mod play;
pub mod sample;
pub mod show;

use std::path::Path;

use tracing::debug;
use wf_core::{CoreError, Game, load_game, sample_game};

/// Load the world file, or the bundled sample when none is given.
fn load_world(path: Option<&Path>) -> Result<Game, String> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading world");
            load_game(path).map_err(describe_error)
        }
        None => Ok(sample_game()),
    }
}

/// Render a load error, listing validation issues one per line.
fn describe_error(error: CoreError) -> String {
    match &error {
        CoreError::Invalid(issues) => {
            let mut out = error.to_string();
            for issue in issues {
                out.push_str(&format!("\n  - {issue}"));
            }
            out
        }
        _ => error.to_string(),
    }
}

/// Shorten a description for table cells.
fn truncate(text: &str, max: usize) -> String {
    if text.is_empty() {
        "-".to_string()
    } else if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}
