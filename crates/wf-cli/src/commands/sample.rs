use std::path::Path;

use wf_core::sample_game;

pub fn run(output: Option<&Path>) -> Result<(), String> {
    let json = sample_game().to_json().map_err(|e| e.to_string())?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .map_err(|e| format!("cannot write {}: {e}", path.display()))?;
            println!("  Wrote sample world to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
