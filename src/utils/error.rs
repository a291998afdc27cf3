use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

/// 單一驗證失敗的描述，用於批次回報 canonical 資料的問題
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_value: Option<Value>,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            invalid_value: None,
        }
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.invalid_value = Some(value);
        self
    }
}

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Properties not found in source: {}", paths.join(", "))]
    PropertiesNotFound { paths: Vec<String> },

    #[error("Unable to find parent item '{parent_from}' for map item '{from}'")]
    UnableToFindParentItemFrom { from: String, parent_from: String },

    #[error("Invalid parent '{parent_from}' for map item '{from}': {reason}")]
    InvalidParentFromItemFormat {
        from: String,
        parent_from: String,
        reason: String,
    },

    #[error("Mismatched map item depth: '{from}' ({from_depth}) -> '{to}' ({to_depth})")]
    MismatchedMapItemDepth {
        from: String,
        to: String,
        from_depth: usize,
        to_depth: usize,
    },

    #[error("Invalid canonical data received: {} violation(s)", violations.len())]
    InvalidCanonicalDataReceived {
        violations: Vec<Violation>,
        input: Value,
    },

    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Unable to replace dot notation '{path}' in '{template}': {reason}")]
    UnableToReplaceDotNotation {
        template: String,
        path: String,
        reason: String,
    },

    #[error("Map item '{from}' writes a value at '{to}', which '{nested_from}' nests under")]
    ConflictingMapItemDestination {
        from: String,
        to: String,
        nested_from: String,
    },

    #[error("Serialization error: {message}")]
    SerializationError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {message}")]
    TomlError { message: String },

    #[error("Configuration validation error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Logger initialization error: {message}")]
    LoggerError { message: String },
}

impl TranslateError {
    pub const CODE_PROPERTIES_NOT_FOUND: u16 = 1;
    pub const CODE_UNABLE_TO_FIND_PARENT_ITEM_FROM: u16 = 2;
    pub const CODE_INVALID_PARENT_FROM_ITEM_FORMAT: u16 = 3;
    pub const CODE_MISMATCHED_MAP_ITEM_DEPTH: u16 = 4;
    pub const CODE_INVALID_CANONICAL_DATA_RECEIVED: u16 = 5;
    pub const CODE_JSON_PARSE: u16 = 6;
    pub const CODE_UNABLE_TO_REPLACE_DOT_NOTATION: u16 = 7;
    pub const CODE_CONFLICTING_MAP_ITEM_DESTINATION: u16 = 8;
    pub const CODE_SERIALIZATION: u16 = 9;
    pub const CODE_IO: u16 = 100;
    pub const CODE_TOML: u16 = 101;
    pub const CODE_CONFIG_VALIDATION: u16 = 102;
    pub const CODE_INVALID_CONFIG_VALUE: u16 = 103;
    pub const CODE_LOGGER: u16 = 104;

    pub fn serialization(error: impl std::fmt::Display) -> Self {
        Self::SerializationError {
            message: error.to_string(),
        }
    }

    /// 穩定的數字錯誤碼，供呼叫端判斷失敗種類
    pub fn code(&self) -> u16 {
        match self {
            Self::PropertiesNotFound { .. } => Self::CODE_PROPERTIES_NOT_FOUND,
            Self::UnableToFindParentItemFrom { .. } => Self::CODE_UNABLE_TO_FIND_PARENT_ITEM_FROM,
            Self::InvalidParentFromItemFormat { .. } => Self::CODE_INVALID_PARENT_FROM_ITEM_FORMAT,
            Self::MismatchedMapItemDepth { .. } => Self::CODE_MISMATCHED_MAP_ITEM_DEPTH,
            Self::InvalidCanonicalDataReceived { .. } => Self::CODE_INVALID_CANONICAL_DATA_RECEIVED,
            Self::JsonParse(_) => Self::CODE_JSON_PARSE,
            Self::UnableToReplaceDotNotation { .. } => Self::CODE_UNABLE_TO_REPLACE_DOT_NOTATION,
            Self::ConflictingMapItemDestination { .. } => Self::CODE_CONFLICTING_MAP_ITEM_DESTINATION,
            Self::SerializationError { .. } => Self::CODE_SERIALIZATION,
            Self::IoError(_) => Self::CODE_IO,
            Self::TomlError { .. } => Self::CODE_TOML,
            Self::ConfigValidationError { .. } => Self::CODE_CONFIG_VALIDATION,
            Self::InvalidConfigValueError { .. } => Self::CODE_INVALID_CONFIG_VALUE,
            Self::LoggerError { .. } => Self::CODE_LOGGER,
        }
    }

    /// 結構化的診斷內容
    pub fn context(&self) -> Value {
        match self {
            Self::PropertiesNotFound { paths } => json!({ "paths": paths }),
            Self::UnableToFindParentItemFrom { from, parent_from } => {
                json!({ "from": from, "parent_from": parent_from })
            }
            Self::InvalidParentFromItemFormat {
                from,
                parent_from,
                reason,
            } => json!({ "from": from, "parent_from": parent_from, "reason": reason }),
            Self::MismatchedMapItemDepth {
                from,
                to,
                from_depth,
                to_depth,
            } => json!({
                "from": from,
                "to": to,
                "from_depth": from_depth,
                "to_depth": to_depth,
            }),
            Self::InvalidCanonicalDataReceived { violations, input } => {
                json!({ "violations": violations, "input": input })
            }
            Self::JsonParse(e) => json!({
                "message": e.to_string(),
                "line": e.line(),
                "column": e.column(),
            }),
            Self::UnableToReplaceDotNotation {
                template,
                path,
                reason,
            } => json!({ "template": template, "path": path, "reason": reason }),
            Self::ConflictingMapItemDestination { from, to, nested_from } => {
                json!({ "from": from, "to": to, "nested_from": nested_from })
            }
            Self::SerializationError { message } | Self::LoggerError { message } => {
                json!({ "message": message })
            }
            Self::IoError(e) => json!({ "message": e.to_string() }),
            Self::TomlError { message } => json!({ "message": message }),
            Self::ConfigValidationError { field, message } => {
                json!({ "field": field, "message": message })
            }
            Self::InvalidConfigValueError {
                field,
                value,
                reason,
            } => json!({ "field": field, "value": value, "reason": reason }),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::PropertiesNotFound { .. } => {
                "Provide the missing properties or disable strict mode in [settings]"
            }
            Self::UnableToFindParentItemFrom { .. } => {
                "Declare the enclosing array (e.g. 'Skills[]') as its own map entry"
            }
            Self::InvalidParentFromItemFormat { .. } => {
                "Parents must end with '[]' and prefix both the item's source and destination"
            }
            Self::MismatchedMapItemDepth { .. } => {
                "Source and destination paths must contain the same number of '[]' segments"
            }
            Self::InvalidCanonicalDataReceived { .. } => {
                "Inspect the reported violations and fix the input document"
            }
            Self::JsonParse(_) => "Make sure the input file is valid JSON",
            Self::UnableToReplaceDotNotation { .. } => {
                "Template placeholders must resolve to scalar values"
            }
            Self::ConflictingMapItemDestination { .. } => {
                "A destination that receives a value cannot also hold nested keys; rename one of the targets"
            }
            Self::SerializationError { .. } => "The output contains values the chosen format cannot represent",
            Self::LoggerError { .. } => "Initialize the logger only once per process",
            Self::IoError(_) => "Check that the file exists and permissions are correct",
            Self::TomlError { .. } => "Make sure the configuration file is valid TOML",
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the reported configuration field"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, TranslateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        let err = TranslateError::MismatchedMapItemDepth {
            from: "Skills[].Name".to_string(),
            to: "name".to_string(),
            from_depth: 1,
            to_depth: 0,
        };
        assert_eq!(err.code(), 4);
        assert_eq!(err.context()["from_depth"], 1);

        let err = TranslateError::PropertiesNotFound {
            paths: vec!["Basic.Name".to_string()],
        };
        assert_eq!(err.code(), TranslateError::CODE_PROPERTIES_NOT_FOUND);
        assert!(err.to_string().contains("Basic.Name"));
    }

    #[test]
    fn test_invalid_canonical_data_context_carries_violations() {
        let err = TranslateError::InvalidCanonicalDataReceived {
            violations: vec![Violation::new("Skills", "expected a list").with_value(json!(3))],
            input: json!({ "Skills": 3 }),
        };

        let context = err.context();
        assert_eq!(context["violations"][0]["path"], "Skills");
        assert_eq!(context["violations"][0]["invalid_value"], 3);
        assert_eq!(context["input"]["Skills"], 3);
        assert_eq!(err.code(), 5);
    }

    #[test]
    fn test_json_parse_from_serde() {
        let parse_err = serde_json::from_str::<Value>("{ nope").unwrap_err();
        let err: TranslateError = parse_err.into();
        assert_eq!(err.code(), TranslateError::CODE_JSON_PARSE);
        assert_eq!(err.context()["line"], 1);
    }

    #[test]
    fn test_serialization_and_conflict_codes() {
        let err = TranslateError::serialization("key must be a string");
        assert_eq!(err.code(), TranslateError::CODE_SERIALIZATION);
        assert_eq!(err.context()["message"], "key must be a string");

        let err = TranslateError::ConflictingMapItemDestination {
            from: "basics.name".to_string(),
            to: "Basic".to_string(),
            nested_from: "basics.email".to_string(),
        };
        assert_eq!(err.code(), 8);
        assert_eq!(err.context()["nested_from"], "basics.email");

        let err = TranslateError::LoggerError {
            message: "already set".to_string(),
        };
        assert_eq!(err.code(), TranslateError::CODE_LOGGER);
    }
}
