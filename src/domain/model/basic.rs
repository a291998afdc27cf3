use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Location {
    address: String,
    postal_code: String,
    city: String,
    country_code: String,
    region: String,
}

impl Location {
    pub fn new(
        address: impl Into<String>,
        postal_code: impl Into<String>,
        city: impl Into<String>,
        country_code: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            postal_code: postal_code.into(),
            city: city.into(),
            country_code: country_code.into(),
            region: region.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Profile {
    network: String,
    username: String,
    url: String,
}

impl Profile {
    pub fn new(network: impl Into<String>, username: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            username: username.into(),
            url: url.into(),
        }
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

typed_list!(
    /// 社群帳號清單
    Profiles,
    Profile
);

/// 聯絡資訊與個人簡介
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Basic {
    name: String,
    label: String,
    email: String,
    phone: String,
    url: String,
    summary: String,
    location: Location,
    profiles: Profiles,
    /// 已棄用的自由格式概述，保留給舊版資料
    #[serde(skip_serializing_if = "Option::is_none")]
    overview: Option<String>,
}

impl Basic {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        url: impl Into<String>,
        summary: impl Into<String>,
        location: Location,
        profiles: Profiles,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            email: email.into(),
            phone: phone.into(),
            url: url.into(),
            summary: summary.into(),
            location,
            profiles,
            overview: None,
        }
    }

    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = Some(overview.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn profiles(&self) -> &Profiles {
        &self.profiles
    }

    pub fn overview(&self) -> Option<&str> {
        self.overview.as_deref()
    }
}
