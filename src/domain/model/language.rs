use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Language {
    language: String,
    fluency: String,
}

impl Language {
    pub fn new(language: impl Into<String>, fluency: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            fluency: fluency.into(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn fluency(&self) -> &str {
        &self.fluency
    }
}

typed_list!(Languages, Language);
