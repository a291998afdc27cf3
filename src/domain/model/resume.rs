use serde::{Deserialize, Serialize};

use super::{Basic, Educations, Languages, Meta, Projects, Skills};

/// 履歷聚合根
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Resume {
    #[serde(default)]
    id: String,
    #[serde(default)]
    basic: Basic,
    #[serde(default)]
    educations: Educations,
    #[serde(default)]
    languages: Languages,
    #[serde(default)]
    skills: Skills,
    #[serde(default)]
    projects: Projects,
    #[serde(default)]
    meta: Meta,
}

impl Resume {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        basic: Basic,
        educations: Educations,
        languages: Languages,
        skills: Skills,
        projects: Projects,
        meta: Meta,
    ) -> Self {
        Self {
            id: id.into(),
            basic,
            educations,
            languages,
            skills,
            projects,
            meta,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn basic(&self) -> &Basic {
        &self.basic
    }

    pub fn educations(&self) -> &Educations {
        &self.educations
    }

    pub fn languages(&self) -> &Languages {
        &self.languages
    }

    pub fn skills(&self) -> &Skills {
        &self.skills
    }

    pub fn projects(&self) -> &Projects {
        &self.projects
    }

    pub fn meta(&self) -> &Meta {
        &self.meta
    }
}
