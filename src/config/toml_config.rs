use crate::core::factory::{MapEntry, MapItemsFactory};
use crate::core::map_item::MapItems;
use crate::core::resume_repository::OutputFormat;
use crate::core::settings::MappingSettings;
use crate::utils::error::{Result, TranslateError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    pub translator: TranslatorInfo,
    pub input: InputConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub settings: MappingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorInfo {
    pub name: String,
    pub description: Option<String>,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
    #[serde(default)]
    pub map: Vec<MapEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub map: Vec<MapEntry>,
    pub render: Option<RenderConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub template: String,
    pub pdf: String,
}

impl TranslatorConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| TranslateError::TomlError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RESUME_DIR})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_string_exists("translator.name", &self.translator.name)?;

        validation::validate_path_extension("input.path", &self.input.path, &["json"])?;

        // 輸出副檔名需與格式一致
        validation::validate_path_extension("output.path", &self.output.path, &[self.output.format.extension()])?;

        if let Some(render) = &self.output.render {
            validation::validate_template_path("output.render.template", &render.template)?;
            validation::validate_pdf_path("output.render.pdf", &render.pdf)?;
        }

        self.input_map()?;
        self.output_map()?;

        Ok(())
    }

    pub fn input_map(&self) -> Result<MapItems> {
        MapItemsFactory::from_entries(&self.input.map, &self.settings)
    }

    pub fn output_map(&self) -> Result<MapItems> {
        MapItemsFactory::from_entries(&self.output.map, &self.settings)
    }

    pub fn input_path(&self) -> &str {
        &self.input.path
    }

    pub fn output_path(&self) -> &str {
        &self.output.path
    }

    /// 取得渲染設定 (template, pdf)
    pub fn render(&self) -> Option<(&str, &str)> {
        self.output
            .render
            .as_ref()
            .map(|render| (render.template.as_str(), render.pdf.as_str()))
    }
}

impl Validate for TranslatorConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC_CONFIG: &str = r#"
[translator]
name = "json-resume"
description = "JSON Resume to canonical"
version = "1.0.0"

[input]
path = "resume.json"

[[input.map]]
from = "basics.name"
to = "Basic.Name"

[[input.map]]
from = "skills[]"
to = "Skills[]"

[[input.map]]
from = "skills[].name"
to = "Skills[].Name"
parent = "skills[]"

[output]
path = "out/resume.toml"
format = "toml"

[[output.map]]
from = "Basic.Name"
to = "name"

[output.render]
template = "templates/resume.html.twig"
pdf = "out/resume.pdf"

[settings]
skip_null = true
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TranslatorConfig::from_toml_str(BASIC_CONFIG).unwrap();

        assert_eq!(config.translator.name, "json-resume");
        assert_eq!(config.input_path(), "resume.json");
        assert_eq!(config.input.map.len(), 3);
        assert_eq!(config.input.map[2].parent.as_deref(), Some("skills[]"));
        assert_eq!(config.output.format, OutputFormat::Toml);
        assert_eq!(config.render(), Some(("templates/resume.html.twig", "out/resume.pdf")));
        assert!(config.settings.skip_null);
        assert!(!config.settings.strict);

        assert!(config.validate().is_ok());
        assert_eq!(config.input_map().unwrap().len(), 3);
        assert_eq!(config.output_map().unwrap().len(), 1);
    }

    #[test]
    fn test_defaults_for_optional_sections() {
        let config = TranslatorConfig::from_toml_str(
            r#"
[translator]
name = "passthrough"
version = "1.0"

[input]
path = "canonical.json"

[output]
path = "out.json"
"#,
        )
        .unwrap();

        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.input.map.is_empty());
        assert!(config.render().is_none());
        assert_eq!(config.settings, MappingSettings::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("RESUME_TRANSLATOR_TEST_INPUT", "from-env.json");

        let config = TranslatorConfig::from_toml_str(
            r#"
[translator]
name = "env"
version = "1.0"

[input]
path = "${RESUME_TRANSLATOR_TEST_INPUT}"

[output]
path = "${RESUME_TRANSLATOR_TEST_UNSET}/out.json"
"#,
        )
        .unwrap();
        assert_eq!(config.input_path(), "from-env.json");
        assert_eq!(config.output_path(), "${RESUME_TRANSLATOR_TEST_UNSET}/out.json");

        std::env::remove_var("RESUME_TRANSLATOR_TEST_INPUT");
    }

    #[test]
    fn test_config_validation() {
        let mismatched_format = BASIC_CONFIG.replace("out/resume.toml", "out/resume.json");
        let config = TranslatorConfig::from_toml_str(&mismatched_format).unwrap();
        let err = config.validate().unwrap_err();
        assert_eq!(err.code(), TranslateError::CODE_INVALID_CONFIG_VALUE);

        let bad_template = BASIC_CONFIG.replace("resume.html.twig", "resume.html");
        let config = TranslatorConfig::from_toml_str(&bad_template).unwrap();
        assert!(config.validate().is_err());

        let blank_name = BASIC_CONFIG.replace("\"json-resume\"", "\"  \"");
        let config = TranslatorConfig::from_toml_str(&blank_name).unwrap();
        assert!(config.validate().is_err());

        let orphan_child = BASIC_CONFIG.replace("from = \"skills[]\"\nto = \"Skills[]\"", "from = \"id\"\nto = \"Id\"");
        let config = TranslatorConfig::from_toml_str(&orphan_child).unwrap();
        let err = config.validate().unwrap_err();
        assert_eq!(err.code(), TranslateError::CODE_UNABLE_TO_FIND_PARENT_ITEM_FROM);
    }

    #[test]
    fn test_invalid_toml_is_toml_error() {
        let err = TranslatorConfig::from_toml_str("[translator\nname = 1").unwrap_err();
        assert_eq!(err.code(), TranslateError::CODE_TOML);
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC_CONFIG.as_bytes()).unwrap();

        let config = TranslatorConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.translator.name, "json-resume");
    }
}
