use serde::{Deserialize, Serialize};

/// 技能底下帶熟練度的關鍵字
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DetailedKeyword {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<String>,
}

impl DetailedKeyword {
    pub fn new(name: impl Into<String>, level: Option<String>) -> Self {
        Self {
            name: name.into(),
            level,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }
}

typed_list!(DetailedKeywords, DetailedKeyword);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Skill {
    name: String,
    level: String,
    keywords: DetailedKeywords,
}

impl Skill {
    pub fn new(name: impl Into<String>, level: impl Into<String>, keywords: DetailedKeywords) -> Self {
        Self {
            name: name.into(),
            level: level.into(),
            keywords,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn keywords(&self) -> &DetailedKeywords {
        &self.keywords
    }
}

typed_list!(Skills, Skill);
