//! 履歷的強型別文件模型。所有值物件建構後即不可變。

/// 定義同質清單的 newtype：建構時接收 `Vec<T>`，之後只提供唯讀存取
macro_rules! typed_list {
    ($(#[$meta:meta])* $name:ident, $item:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(Vec<$item>);

        impl $name {
            pub fn new(items: Vec<$item>) -> Self {
                Self(items)
            }

            pub fn items(&self) -> &[$item] {
                &self.0
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl From<Vec<$item>> for $name {
            fn from(items: Vec<$item>) -> Self {
                Self(items)
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }
    };
}

pub mod basic;
pub mod education;
pub mod language;
pub mod meta;
pub mod project;
pub mod resume;
pub mod skill;

pub use basic::{Basic, Location, Profile, Profiles};
pub use education::{Education, Educations};
pub use language::{Language, Languages};
pub use meta::Meta;
pub use project::{Highlight, Highlights, Keyword, Keywords, Project, Projects, Role, Roles};
pub use resume::Resume;
pub use skill::{DetailedKeyword, DetailedKeywords, Skill, Skills};
