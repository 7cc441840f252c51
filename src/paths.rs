//! Filesystem locations for application data.

use std::path::PathBuf;

pub const DB_FILE_NAME: &str = "dorolexus.db";

/// Default database location inside the platform data directory,
/// e.g. `~/.local/share/dorolexus/dorolexus.db` on Linux.
/// Falls back to the working directory when no data directory is known.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dorolexus")
        .join(DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_ends_with_db_file() {
        let path = default_db_path();
        assert!(path.ends_with(PathBuf::from("dorolexus").join(DB_FILE_NAME)));
    }
}
