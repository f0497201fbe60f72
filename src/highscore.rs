//! High-score persistence across processes. Within a process the high score
//! lives in `GameStats`; this file only carries it between runs.

use std::path::{Path, PathBuf};

use crate::error::GameError;

pub fn default_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".alien_invasion_score")
}

/// A missing or unreadable file is just "no high score yet".
pub fn load(path: &Path) -> u64 {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

pub fn save(path: &Path, score: u64) -> Result<(), GameError> {
    std::fs::write(path, score.to_string())?;
    log::info!("High score {score} saved to {}", path.display());
    Ok(())
}
