pub mod dot_notation;
pub mod engine;
pub mod factory;
pub mod map_item;
pub mod repository;
pub mod resume_repository;
pub mod settings;
pub mod strategy;

pub use crate::domain::ports::{FilesystemRepository, ResumeRepository};
pub use crate::utils::error::Result;
pub use engine::{RenderRequest, TranslationEngine, TranslationReport};
pub use factory::{MapEntry, MapItemsFactory};
pub use map_item::{ElementInit, MapItem, MapItemKind, MapItems};
pub use repository::MapItemRepository;
pub use resume_repository::{CanonicalResumeRepository, OutputFormat};
pub use settings::MappingSettings;
pub use strategy::{DotNotationStrategy, MappingStrategy};
