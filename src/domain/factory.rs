use crate::domain::model::Resume;
use crate::utils::error::{Result, TranslateError, Violation};
use serde::Deserialize;
use serde_json::Value;

/// `Resume` 與 canonical 資料之間的雙向投影
pub struct ResumeFactory;

impl ResumeFactory {
    pub fn to_array(resume: &Resume) -> Result<Value> {
        serde_json::to_value(resume).map_err(TranslateError::serialization)
    }

    pub fn from_array(canonical: &Value) -> Result<Resume> {
        let Value::Object(sections) = canonical else {
            return Err(TranslateError::InvalidCanonicalDataReceived {
                violations: vec![Violation::new("", "canonical data must be an object")
                    .with_value(canonical.clone())],
                input: canonical.clone(),
            });
        };

        // null 欄位視同未提供，交給預設值
        let cleaned = drop_null_fields(canonical.clone());
        Resume::deserialize(&cleaned).map_err(|e| {
            let mut violations: Vec<Violation> = sections
                .iter()
                .filter_map(|(key, value)| {
                    let single = Value::Object([(key.clone(), drop_null_fields(value.clone()))].into_iter().collect());
                    Resume::deserialize(&single)
                        .err()
                        .map(|err| Violation::new(key.as_str(), err.to_string()).with_value(value.clone()))
                })
                .collect();
            if violations.is_empty() {
                violations.push(Violation::new("", e.to_string()).with_value(canonical.clone()));
            }

            TranslateError::InvalidCanonicalDataReceived {
                violations,
                input: canonical.clone(),
            }
        })
    }
}

/// 移除物件中值為 null 的欄位；陣列元素保持原樣
fn drop_null_fields(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, drop_null_fields(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(drop_null_fields).collect()),
        other => other,
    }
}
