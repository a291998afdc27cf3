use crate::domain::ports::ResumeRepository;
use crate::utils::error::{Result, TranslateError};
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};

/// 交給外部渲染器的工作描述，本 crate 不負責產生 PDF
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderRequest {
    pub template: String,
    pub pdf: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranslationReport {
    pub resume_id: String,
    pub output_path: String,
    pub render: Option<RenderRequest>,
    #[serde(serialize_with = "serialize_duration")]
    pub duration: Duration,
}

fn serialize_duration<S: serde::Serializer>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

impl TranslationReport {
    pub fn to_json(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(TranslateError::serialization)
    }
}

pub struct TranslationEngine<R: ResumeRepository> {
    repository: R,
    render: Option<(String, String)>,
}

impl<R: ResumeRepository> TranslationEngine<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            render: None,
        }
    }

    pub fn with_render(mut self, template: impl Into<String>, pdf: impl Into<String>) -> Self {
        self.render = Some((template.into(), pdf.into()));
        self
    }

    pub async fn run(&self, input_path: &str, output_path: &str) -> Result<TranslationReport> {
        let started = Instant::now();
        tracing::info!("🚀 Starting translation: {} -> {}", input_path, output_path);

        // Read + translate
        let resume = self.repository.first_and_translate(input_path).await.inspect_err(|e| {
            tracing::error!("❌ Failed to translate input (code {}): {}", e.code(), e);
        })?;

        // Persist
        let output_path = self.repository.persist(&resume, output_path).await.inspect_err(|e| {
            tracing::error!("❌ Failed to persist output (code {}): {}", e.code(), e);
        })?;
        tracing::info!("💾 Output saved to: {}", output_path);

        let render = self.render.as_ref().map(|(template, pdf)| {
            tracing::debug!("🖨️ Render handed off: {} -> {}", template, pdf);
            RenderRequest {
                template: template.clone(),
                pdf: pdf.clone(),
                data: output_path.clone(),
            }
        });

        let duration = started.elapsed();
        tracing::info!("✅ Translation of '{}' finished in {:?}", resume.id(), duration);

        Ok(TranslationReport {
            resume_id: resume.id().to_string(),
            output_path,
            render,
            duration,
        })
    }
}
