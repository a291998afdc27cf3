use crate::domain::model::Resume;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 輸出資料的落地位置
pub trait FilesystemRepository: Send + Sync {
    fn read(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn save(
        &self,
        output_path: &str,
        output_data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// canonical 資料來源的讀寫邊界
#[async_trait]
pub trait ResumeRepository: Send + Sync {
    async fn first_and_translate(&self, input_path: &str) -> Result<Resume>;
    async fn persist(&self, resume: &Resume, output_path: &str) -> Result<String>;
}
