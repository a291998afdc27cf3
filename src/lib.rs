pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::LocalFilesystem;
pub use crate::config::TranslatorConfig;
pub use crate::core::{
    CanonicalResumeRepository, DotNotationStrategy, MapEntry, MapItems, MapItemsFactory, MappingSettings,
    MappingStrategy, OutputFormat, TranslationEngine, TranslationReport,
};
pub use crate::domain::factory::ResumeFactory;
pub use crate::domain::model::Resume;
pub use crate::utils::error::{Result, TranslateError};
