use std::path::PathBuf;

use dirs::config_dir;

pub fn base_path() -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tpath")
}
