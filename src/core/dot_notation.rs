//! 點記法路徑（`Skills[].Keywords[].Name`）的解析、讀取、寫入與樣板替換。

use crate::utils::error::{Result, TranslateError};
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::LazyLock;

pub const SEPARATOR: char = '.';
pub const ARRAY_MARKER: &str = "[]";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([^{}]*)\}").expect("placeholder pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub key: String,
    pub is_array: bool,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_array {
            write!(f, "{}{}", self.key, ARRAY_MARKER)
        } else {
            f.write_str(&self.key)
        }
    }
}

/// 解析路徑；空白、空區段或含有括號的區段視為無效
pub fn parse_path(path: &str) -> Option<Vec<Segment>> {
    if path.trim().is_empty() {
        return None;
    }

    path.split(SEPARATOR)
        .map(|raw| {
            let (key, is_array) = match raw.strip_suffix(ARRAY_MARKER) {
                Some(key) => (key, true),
                None => (raw, false),
            };
            let valid = !key.trim().is_empty()
                && !key.contains(['[', ']', '{', '}']);
            valid.then(|| Segment {
                key: key.to_string(),
                is_array,
            })
        })
        .collect()
}

pub fn format_path(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(Segment::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

pub fn depth(segments: &[Segment]) -> usize {
    segments.iter().filter(|s| s.is_array).count()
}

pub fn is_array_terminal(segments: &[Segment]) -> bool {
    segments.last().is_some_and(|s| s.is_array)
}

/// 截到最後一個陣列區段（含）為止，沒有陣列區段時為空
pub fn array_prefix(segments: &[Segment]) -> &[Segment] {
    match segments.iter().rposition(|s| s.is_array) {
        Some(pos) => &segments[..=pos],
        None => &[],
    }
}

/// 截到第 `depth` 個陣列區段（含）為止
pub fn truncate_to_depth(segments: &[Segment], depth: usize) -> &[Segment] {
    if depth == 0 {
        return &[];
    }
    let mut seen = 0;
    for (pos, segment) in segments.iter().enumerate() {
        if segment.is_array {
            seen += 1;
            if seen == depth {
                return &segments[..=pos];
            }
        }
    }
    segments
}

pub fn is_prefix(prefix: &[Segment], path: &[Segment]) -> bool {
    prefix.len() <= path.len() && path[..prefix.len()] == *prefix
}

/// 代入索引後的具體路徑，例如 `Skills.1.Name`
pub fn concrete_path(segments: &[Segment], indices: &[usize]) -> String {
    let mut indices = indices.iter();
    let mut parts = Vec::with_capacity(segments.len());
    for segment in segments {
        parts.push(segment.key.clone());
        if segment.is_array {
            if let Some(index) = indices.next() {
                parts.push(index.to_string());
            }
        }
    }
    parts.join(".")
}

/// 依索引讀取值。最後一個陣列區段沒有對應索引時回傳陣列本身
pub fn resolve<'a>(source: &'a Value, segments: &[Segment], indices: &[usize]) -> Option<&'a Value> {
    let mut indices = indices.iter().copied();
    let mut current = source;
    let last = segments.len().checked_sub(1)?;

    for (pos, segment) in segments.iter().enumerate() {
        current = current.get(segment.key.as_str())?;
        if segment.is_array {
            let items = current.as_array()?;
            match indices.next() {
                Some(index) => current = items.get(index)?,
                None if pos == last => return Some(current),
                None => return None,
            }
        }
    }

    Some(current)
}

fn object_mut(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}

fn array_mut(value: &mut Value) -> &mut Vec<Value> {
    if !value.is_array() {
        *value = Value::Array(Vec::new());
    }
    match value {
        Value::Array(items) => items,
        _ => unreachable!("value was just replaced with an array"),
    }
}

fn element_mut(value: &mut Value, index: usize) -> &mut Value {
    let items = array_mut(value);
    if items.len() <= index {
        items.resize(index + 1, Value::Null);
    }
    &mut items[index]
}

/// 沿路建立物件與陣列並回傳目標位置；衝突的非容器值會被覆蓋
pub fn slot_mut<'a>(dest: &'a mut Value, segments: &[Segment], indices: &[usize]) -> &'a mut Value {
    let mut indices = indices.iter().copied();
    let mut current = dest;

    for segment in segments {
        let slot = object_mut(current)
            .entry(segment.key.clone())
            .or_insert(Value::Null);
        current = if segment.is_array {
            match indices.next() {
                Some(index) => element_mut(slot, index),
                None => slot,
            }
        } else {
            slot
        };
    }

    current
}

pub fn assign(dest: &mut Value, segments: &[Segment], indices: &[usize], value: Value) {
    if segments.is_empty() {
        return;
    }
    *slot_mut(dest, segments, indices) = value;
}

/// 確保陣列至少有 `len` 個元素；以 `element(index)` 補齊，並替換範圍內既有的 null 元素
pub fn ensure_array(
    dest: &mut Value,
    segments: &[Segment],
    parent_indices: &[usize],
    len: usize,
    element: impl Fn(usize) -> Value,
) {
    if segments.is_empty() {
        return;
    }
    let items = array_mut(slot_mut(dest, segments, parent_indices));
    for (index, item) in items.iter_mut().enumerate().take(len) {
        if item.is_null() {
            *item = element(index);
        }
    }
    for index in items.len()..len {
        items.push(element(index));
    }
}

/// 樣板中 `{Path}` 佔位符的原始路徑
pub fn placeholders(template: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}

pub fn is_template(value: &str) -> bool {
    value.contains('{') || value.contains('}')
}

/// 以來源資料取代樣板中的每個佔位符
pub fn replace(
    template: &str,
    placeholders: &[(String, Vec<Segment>)],
    source: &Value,
    indices: &[usize],
    strict: bool,
) -> Result<String> {
    let mut output = String::with_capacity(template.len());
    let mut last_end = 0;

    for (caps, (path, segments)) in PLACEHOLDER.captures_iter(template).zip(placeholders) {
        let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
        output.push_str(&template[last_end..whole.start]);
        last_end = whole.end;

        let replacement = match resolve(source, segments, indices) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) => String::new(),
            Some(value @ (Value::Number(_) | Value::Bool(_))) => value.to_string(),
            Some(_) => {
                return Err(TranslateError::UnableToReplaceDotNotation {
                    template: template.to_string(),
                    path: concrete_path(segments, indices),
                    reason: "value is not a scalar".to_string(),
                })
            }
            None if strict => {
                return Err(TranslateError::UnableToReplaceDotNotation {
                    template: template.to_string(),
                    path: path.clone(),
                    reason: "value not found".to_string(),
                })
            }
            None => String::new(),
        };
        output.push_str(&replacement);
    }

    output.push_str(&template[last_end..]);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(raw: &str) -> Vec<Segment> {
        parse_path(raw).unwrap()
    }

    #[test]
    fn test_parse_path() {
        let segments = path("Skills[].Keywords[].Name");
        assert_eq!(segments.len(), 3);
        assert!(segments[0].is_array);
        assert!(!segments[2].is_array);
        assert_eq!(depth(&segments), 2);
        assert_eq!(format_path(&segments), "Skills[].Keywords[].Name");

        assert!(parse_path("").is_none());
        assert!(parse_path("Basic..Name").is_none());
        assert!(parse_path("Skills.[]").is_none());
        assert!(parse_path("Skills[0]").is_none());
    }

    #[test]
    fn test_prefix_helpers() {
        let segments = path("Projects[].Roles[].Name");
        assert_eq!(format_path(array_prefix(&segments)), "Projects[].Roles[]");
        assert_eq!(format_path(truncate_to_depth(&segments, 1)), "Projects[]");
        assert!(truncate_to_depth(&segments, 0).is_empty());
        assert!(is_prefix(&path("Projects[]"), &segments));
        assert!(!is_prefix(&path("Skills[]"), &segments));
        assert_eq!(concrete_path(&segments, &[2, 0]), "Projects.2.Roles.0.Name");
    }

    #[test]
    fn test_resolve() {
        let source = json!({
            "Basic": { "Location": { "City": "Porto" } },
            "Skills": [{ "Name": "Rust" }, { "Name": "SQL" }]
        });

        assert_eq!(resolve(&source, &path("Basic.Location.City"), &[]), Some(&json!("Porto")));
        assert_eq!(resolve(&source, &path("Skills[].Name"), &[1]), Some(&json!("SQL")));
        assert_eq!(resolve(&source, &path("Skills[].Name"), &[5]), None);
        assert_eq!(resolve(&source, &path("Skills[]"), &[]).and_then(Value::as_array).map(Vec::len), Some(2));
        assert_eq!(resolve(&source, &path("Basic.Missing"), &[]), None);
    }

    #[test]
    fn test_assign_builds_nested_structure() {
        let mut dest = json!({});
        assign(&mut dest, &path("skills[].keywords[]"), &[1, 0], json!("tokio"));
        assign(&mut dest, &path("basics.location.city"), &[], json!("Porto"));

        assert_eq!(
            dest,
            json!({
                "skills": [null, { "keywords": ["tokio"] }],
                "basics": { "location": { "city": "Porto" } }
            })
        );
    }

    #[test]
    fn test_ensure_array_pads_and_replaces_nulls() {
        let mut dest = json!({ "skills": [null] });
        ensure_array(&mut dest, &path("skills[]"), &[], 3, |_| json!({}));
        assert_eq!(dest, json!({ "skills": [{}, {}, {}] }));

        let mut dest = json!({});
        ensure_array(&mut dest, &path("skills[]"), &[], 0, |_| Value::Null);
        assert_eq!(dest, json!({ "skills": [] }));

        let mut dest = json!({ "tags": ["kept", null, "extra"] });
        ensure_array(&mut dest, &path("tags[]"), &[], 2, |index| json!(index));
        assert_eq!(dest, json!({ "tags": ["kept", 1, "extra"] }));
    }

    #[test]
    fn test_replace_placeholders() {
        let source = json!({
            "Basic": { "Location": { "City": "Porto", "CountryCode": "PT" } },
            "Skills": [{ "Name": "Rust", "Years": 4, "Tags": ["a"] }]
        });
        let template = "{Basic.Location.City}, {Basic.Location.CountryCode}";
        let parsed: Vec<(String, Vec<Segment>)> = placeholders(template)
            .into_iter()
            .map(|p| {
                let segments = path(&p);
                (p, segments)
            })
            .collect();
        assert_eq!(replace(template, &parsed, &source, &[], true).unwrap(), "Porto, PT");

        let template = "{Skills[].Name} ({Skills[].Years}y)";
        let parsed: Vec<(String, Vec<Segment>)> = placeholders(template)
            .into_iter()
            .map(|p| {
                let segments = path(&p);
                (p, segments)
            })
            .collect();
        assert_eq!(replace(template, &parsed, &source, &[0], true).unwrap(), "Rust (4y)");

        let missing = vec![("Basic.Nope".to_string(), path("Basic.Nope"))];
        assert_eq!(replace("x{Basic.Nope}y", &missing, &source, &[], false).unwrap(), "xy");
        let err = replace("x{Basic.Nope}y", &missing, &source, &[], true).unwrap_err();
        assert_eq!(err.code(), TranslateError::CODE_UNABLE_TO_REPLACE_DOT_NOTATION);

        let tags = vec![("Skills[].Tags".to_string(), path("Skills[].Tags"))];
        let err = replace("{Skills[].Tags}", &tags, &source, &[0], false).unwrap_err();
        assert_eq!(err.context()["path"], "Skills.0.Tags");
    }
}
