use crate::domain::ports::FilesystemRepository;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 以本機目錄為根的檔案存取
#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    base_path: PathBuf,
}

impl LocalFilesystem {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl FilesystemRepository for LocalFilesystem {
    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.full_path(path);
        tracing::debug!("📂 Reading {}", full_path.display());
        let data = fs::read(full_path).await?;
        Ok(data)
    }

    async fn save(&self, output_path: &str, output_data: &[u8]) -> Result<()> {
        let full_path = self.full_path(output_path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&full_path, output_data).await?;
        tracing::debug!("📝 Wrote {} bytes to {}", output_data.len(), full_path.display());
        Ok(())
    }
}
