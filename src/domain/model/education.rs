use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Education {
    institution: String,
    area: String,
    study_type: String,
    start_date: String,
    end_date: String,
    score: String,
}

impl Education {
    pub fn new(
        institution: impl Into<String>,
        area: impl Into<String>,
        study_type: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        score: impl Into<String>,
    ) -> Self {
        Self {
            institution: institution.into(),
            area: area.into(),
            study_type: study_type.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            score: score.into(),
        }
    }

    pub fn institution(&self) -> &str {
        &self.institution
    }

    pub fn area(&self) -> &str {
        &self.area
    }

    pub fn study_type(&self) -> &str {
        &self.study_type
    }

    pub fn start_date(&self) -> &str {
        &self.start_date
    }

    pub fn end_date(&self) -> &str {
        &self.end_date
    }

    pub fn score(&self) -> &str {
        &self.score
    }
}

typed_list!(Educations, Education);
