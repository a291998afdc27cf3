use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Highlight {
    description: String,
}

impl Highlight {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Keyword {
    name: String,
}

impl Keyword {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Role {
    name: String,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

typed_list!(Highlights, Highlight);
typed_list!(Keywords, Keyword);
typed_list!(Roles, Role);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Project {
    name: String,
    description: String,
    start_date: String,
    end_date: String,
    url: String,
    entity: String,
    #[serde(rename = "Type")]
    kind: String,
    highlights: Highlights,
    keywords: Keywords,
    roles: Roles,
}

impl Project {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        url: impl Into<String>,
        entity: impl Into<String>,
        kind: impl Into<String>,
        highlights: Highlights,
        keywords: Keywords,
        roles: Roles,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            url: url.into(),
            entity: entity.into(),
            kind: kind.into(),
            highlights,
            keywords,
            roles,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn start_date(&self) -> &str {
        &self.start_date
    }

    pub fn end_date(&self) -> &str {
        &self.end_date
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn highlights(&self) -> &Highlights {
        &self.highlights
    }

    pub fn keywords(&self) -> &Keywords {
        &self.keywords
    }

    pub fn roles(&self) -> &Roles {
        &self.roles
    }
}

typed_list!(Projects, Project);
