pub mod toml_config;

pub use toml_config::{InputConfig, OutputConfig, RenderConfig, TranslatorConfig, TranslatorInfo};
