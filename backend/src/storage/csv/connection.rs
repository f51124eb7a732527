use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const MEMBERS_FILE_NAME: &str = "members.csv";
pub const MEMBERS_HEADER: &str = "id,name,rotation_rank,remote_weekday,created_at\n";

/// CsvConnection manages the data directory and makes sure the member file exists
#[derive(Clone, Debug)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| {
                    format!("Failed to create data directory {}", base_path.display())
                })?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Get the file path of the member queue
    pub fn members_file_path(&self) -> PathBuf {
        self.base_directory.join(MEMBERS_FILE_NAME)
    }

    /// Ensure the member CSV file exists with a proper header
    pub fn ensure_members_file_exists(&self) -> Result<()> {
        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory)?;
        }

        let file_path = self.members_file_path();
        if !file_path.exists() {
            fs::write(&file_path, MEMBERS_HEADER)
                .with_context(|| format!("Failed to create {}", file_path.display()))?;
            info!("Created empty member file: {}", file_path.display());
        }

        Ok(())
    }
}
