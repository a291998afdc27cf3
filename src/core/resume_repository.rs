use crate::config::TranslatorConfig;
use crate::core::map_item::MapItems;
use crate::core::settings::MappingSettings;
use crate::core::strategy::{DotNotationStrategy, MappingStrategy};
use crate::domain::factory::ResumeFactory;
use crate::domain::model::Resume;
use crate::domain::ports::{FilesystemRepository, ResumeRepository};
use crate::utils::error::{Result, TranslateError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Toml,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Toml => "toml",
        }
    }

    pub fn render(&self, output: &Value) -> Result<Vec<u8>> {
        match self {
            OutputFormat::Json => serde_json::to_vec_pretty(output).map_err(TranslateError::serialization),
            OutputFormat::Toml => {
                // TOML 沒有 null
                let output = strip_nulls(output.clone());
                toml::to_string_pretty(&output)
                    .map(String::into_bytes)
                    .map_err(TranslateError::serialization)
            }
        }
    }
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(strip_nulls)
                .collect(),
        ),
        other => other,
    }
}

/// 以映射讀寫 canonical 履歷資料；空映射代表資料已是 canonical 形狀
pub struct CanonicalResumeRepository<S: FilesystemRepository, M: MappingStrategy> {
    storage: S,
    strategy: M,
    input_map: MapItems,
    output_map: MapItems,
    settings: MappingSettings,
    output_format: OutputFormat,
}

impl<S: FilesystemRepository, M: MappingStrategy> CanonicalResumeRepository<S, M> {
    pub fn new(storage: S, strategy: M, input_map: MapItems, output_map: MapItems, settings: MappingSettings) -> Self {
        Self {
            storage,
            strategy,
            input_map,
            output_map,
            settings,
            output_format: OutputFormat::default(),
        }
    }

    pub fn with_output_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    fn apply(&self, map: &MapItems, source: &Value) -> Result<Value> {
        if map.is_empty() {
            return Ok(source.clone());
        }
        self.strategy.validate(map, source, &self.settings)?;
        self.strategy.translate(map, source, &self.settings)
    }
}

impl<S: FilesystemRepository> CanonicalResumeRepository<S, DotNotationStrategy> {
    /// 依設定檔建立映射與輸出格式
    pub fn from_config(storage: S, config: &TranslatorConfig) -> Result<Self> {
        Ok(Self::new(
            storage,
            DotNotationStrategy::default(),
            config.input_map()?,
            config.output_map()?,
            config.settings.clone(),
        )
        .with_output_format(config.output.format))
    }
}

#[async_trait::async_trait]
impl<S: FilesystemRepository, M: MappingStrategy> ResumeRepository for CanonicalResumeRepository<S, M> {
    async fn first_and_translate(&self, input_path: &str) -> Result<Resume> {
        tracing::debug!("📥 Reading canonical input from: {}", input_path);
        let bytes = self.storage.read(input_path).await?;
        let input: Value = serde_json::from_slice(&bytes)?;

        let canonical = self.apply(&self.input_map, &input)?;
        let resume = ResumeFactory::from_array(&canonical)?;

        tracing::info!(
            "📥 Translated '{}' into resume '{}' ({} skills, {} projects)",
            input_path,
            resume.id(),
            resume.skills().len(),
            resume.projects().len()
        );
        Ok(resume)
    }

    async fn persist(&self, resume: &Resume, output_path: &str) -> Result<String> {
        let canonical = ResumeFactory::to_array(resume)?;
        let output = self.apply(&self.output_map, &canonical)?;
        let data = self.output_format.render(&output)?;

        tracing::debug!("💾 Writing {} bytes ({:?}) to: {}", data.len(), self.output_format, output_path);
        self.storage.save(output_path, &data).await?;

        Ok(output_path.to_string())
    }
}
