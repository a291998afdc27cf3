use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Meta {
    #[serde(default)]
    canonical: String,
    #[serde(default)]
    version: String,
    // 來源未提供時保持空值，不自行補上時間
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_modified: Option<DateTime<Utc>>,
    // 以下三個在地化字串已棄用，僅為相容舊資料保留
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    labels: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    years: Option<String>,
}

impl Meta {
    pub fn new(canonical: impl Into<String>, version: impl Into<String>, last_modified: DateTime<Utc>) -> Self {
        Self {
            canonical: canonical.into(),
            version: version.into(),
            last_modified: Some(last_modified),
            content: None,
            labels: None,
            years: None,
        }
    }

    pub fn with_localization(
        mut self,
        content: Option<String>,
        labels: Option<String>,
        years: Option<String>,
    ) -> Self {
        self.content = content;
        self.labels = labels;
        self.years = years;
        self
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.last_modified
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn labels(&self) -> Option<&str> {
        self.labels.as_deref()
    }

    pub fn years(&self) -> Option<&str> {
        self.years.as_deref()
    }
}
