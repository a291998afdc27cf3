use crate::core::dot_notation::{self, Segment};
use crate::core::map_item::{MapItem, MapItemKind, MapItems};
use crate::core::settings::MappingSettings;
use crate::utils::error::{Result, TranslateError, Violation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 原始映射定義中的一筆 `from -> to`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEntry {
    pub from: String,
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl MapEntry {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }
}

/// `MapItems::to_array` 產生的序列化形式
#[derive(Debug, Deserialize)]
struct SerializedMapItem {
    from: String,
    to: String,
    depth: usize,
    is_array: bool,
    #[serde(default)]
    parent: Option<String>,
}

pub struct MapItemsFactory;

impl MapItemsFactory {
    /// 從原始定義建立：`{ "from": "to", ... }` 物件，或 `[{ from, to, parent? }]` 清單
    pub fn from_definition(definition: &Value, settings: &MappingSettings) -> Result<MapItems> {
        let mut violations = Vec::new();
        let mut entries = Vec::new();

        match definition {
            Value::Object(map) => {
                for (from, to) in map {
                    match to.as_str() {
                        Some(to) => entries.push(MapEntry::new(from.clone(), to)),
                        None => violations.push(
                            Violation::new(from.clone(), "map target must be a string")
                                .with_value(to.clone()),
                        ),
                    }
                }
            }
            Value::Array(list) => {
                for (index, raw) in list.iter().enumerate() {
                    match serde_json::from_value::<MapEntry>(raw.clone()) {
                        Ok(entry) => entries.push(entry),
                        Err(e) => violations.push(
                            Violation::new(index.to_string(), e.to_string()).with_value(raw.clone()),
                        ),
                    }
                }
            }
            other => violations.push(
                Violation::new("", "map definition must be an object or a list")
                    .with_value(other.clone()),
            ),
        }

        if !violations.is_empty() {
            return Err(TranslateError::InvalidCanonicalDataReceived {
                violations,
                input: definition.clone(),
            });
        }

        Self::from_entries(&entries, settings)
    }

    pub fn from_entries(entries: &[MapEntry], settings: &MappingSettings) -> Result<MapItems> {
        let mut items = entries
            .iter()
            .map(build_item)
            .collect::<Result<Vec<_>>>()?;

        link_parents(&mut items, settings.implicit_parents)?;
        check_destinations(&items)?;

        tracing::debug!("🗺️ Built {} map items from {} entries", items.len(), entries.len());
        Ok(MapItems::new(items))
    }

    /// 從序列化形式還原；紀錄的深度與陣列旗標必須與路徑一致
    pub fn from_array(serialized: &Value) -> Result<MapItems> {
        let stored: Vec<SerializedMapItem> =
            serde_json::from_value(serialized.clone()).map_err(|e| {
                TranslateError::InvalidCanonicalDataReceived {
                    violations: vec![Violation::new("", e.to_string())],
                    input: serialized.clone(),
                }
            })?;

        let entries: Vec<MapEntry> = stored
            .iter()
            .map(|s| MapEntry {
                from: s.from.clone(),
                to: s.to.clone(),
                parent: s.parent.clone(),
            })
            .collect();

        let items = Self::from_entries(&entries, &MappingSettings::default())?;

        for (item, stored) in items.iter().zip(&stored) {
            if item.depth() != stored.depth || item.is_array() != stored.is_array {
                return Err(TranslateError::MismatchedMapItemDepth {
                    from: stored.from.clone(),
                    to: stored.to.clone(),
                    from_depth: stored.depth,
                    to_depth: item.depth(),
                });
            }
        }

        Ok(items)
    }
}

fn parse(path: &str) -> Result<Vec<Segment>> {
    dot_notation::parse_path(path).ok_or_else(|| TranslateError::PropertiesNotFound {
        paths: vec![path.to_string()],
    })
}

fn parse_placeholders(template: &str) -> Result<Vec<(String, Vec<Segment>)>> {
    let raw = dot_notation::placeholders(template);
    if raw.is_empty() {
        return Err(TranslateError::UnableToReplaceDotNotation {
            template: template.to_string(),
            path: String::new(),
            reason: "template has no '{Path}' placeholder".to_string(),
        });
    }

    raw.into_iter()
        .map(|path| match dot_notation::parse_path(&path) {
            Some(segments) => Ok((path, segments)),
            None => Err(TranslateError::UnableToReplaceDotNotation {
                template: template.to_string(),
                path,
                reason: "placeholder is not a valid path".to_string(),
            }),
        })
        .collect()
}

fn build_item(entry: &MapEntry) -> Result<MapItem> {
    let to_segments = parse(&entry.to)?;
    let to_depth = dot_notation::depth(&to_segments);

    let (from_segments, scope, kind) = if dot_notation::is_template(&entry.from) {
        let placeholders = parse_placeholders(&entry.from)?;

        // 最深的佔位符決定走訪範圍，其餘佔位符必須位於同一條陣列鏈上
        let (deepest_path, deepest) = placeholders
            .iter()
            .map(|(path, segments)| (path, dot_notation::array_prefix(segments)))
            .max_by_key(|(_, prefix)| dot_notation::depth(prefix))
            .map(|(path, prefix)| (path.clone(), prefix.to_vec()))
            .unwrap_or_default();

        for (path, segments) in &placeholders {
            let prefix = dot_notation::array_prefix(segments);
            if !dot_notation::is_prefix(prefix, &deepest) {
                return Err(TranslateError::MismatchedMapItemDepth {
                    from: path.clone(),
                    to: deepest_path,
                    from_depth: dot_notation::depth(prefix),
                    to_depth: dot_notation::depth(&deepest),
                });
            }
        }

        (Vec::new(), deepest, MapItemKind::Template { placeholders })
    } else {
        let from_segments = parse(&entry.from)?;
        let from_depth = dot_notation::depth(&from_segments);

        if dot_notation::is_array_terminal(&from_segments) && dot_notation::is_array_terminal(&to_segments) {
            let scope = dot_notation::truncate_to_depth(&from_segments, from_depth.saturating_sub(1)).to_vec();
            (from_segments, scope, MapItemKind::Array)
        } else {
            let scope = dot_notation::array_prefix(&from_segments).to_vec();
            (from_segments, scope, MapItemKind::Path)
        }
    };

    let from_depth = match kind {
        MapItemKind::Template { .. } => dot_notation::depth(&scope),
        _ => dot_notation::depth(&from_segments),
    };
    if from_depth != to_depth {
        return Err(TranslateError::MismatchedMapItemDepth {
            from: entry.from.clone(),
            to: entry.to.clone(),
            from_depth,
            to_depth,
        });
    }

    if let Some(parent) = &entry.parent {
        check_explicit_parent(entry, parent, &scope)?;
    }

    Ok(MapItem::new(
        entry.from.clone(),
        entry.to.clone(),
        from_segments,
        to_segments,
        scope,
        from_depth,
        kind,
    ))
}

fn check_explicit_parent(entry: &MapEntry, parent: &str, scope: &[Segment]) -> Result<()> {
    let invalid = |reason: String| TranslateError::InvalidParentFromItemFormat {
        from: entry.from.clone(),
        parent_from: parent.to_string(),
        reason,
    };

    let segments = dot_notation::parse_path(parent)
        .filter(|segments| dot_notation::is_array_terminal(segments))
        .ok_or_else(|| invalid("parent must be a path ending with '[]'".to_string()))?;

    if scope.is_empty() {
        return Err(invalid("item has no enclosing array".to_string()));
    }
    if segments != scope {
        return Err(invalid(format!(
            "expected the nearest enclosing array '{}'",
            dot_notation::format_path(scope)
        )));
    }

    Ok(())
}

/// 每個有外層陣列的項目都必須找得到已宣告的父陣列項目
fn link_parents(items: &mut Vec<MapItem>, implicit_parents: bool) -> Result<()> {
    let mut index = 0;

    while index < items.len() {
        let Some(parent_from) = items[index].parent_from() else {
            index += 1;
            continue;
        };

        let parent = items
            .iter()
            .find(|candidate| candidate.is_array() && candidate.from() == parent_from);

        match parent {
            Some(parent) => {
                let item = &items[index];
                if !dot_notation::is_prefix(parent.to_segments(), item.to_segments()) {
                    return Err(TranslateError::InvalidParentFromItemFormat {
                        from: item.from().to_string(),
                        parent_from,
                        reason: format!(
                            "destination '{}' is not nested under parent destination '{}'",
                            item.to(),
                            parent.to()
                        ),
                    });
                }
                index += 1;
            }
            None if implicit_parents => {
                let item = &items[index];
                let parent_depth = dot_notation::depth(item.scope());
                let parent_to = dot_notation::format_path(dot_notation::truncate_to_depth(
                    item.to_segments(),
                    parent_depth,
                ));
                tracing::debug!(
                    "➕ Declaring implicit parent '{}' -> '{}' for '{}'",
                    parent_from,
                    parent_to,
                    item.from()
                );
                let parent = build_item(&MapEntry::new(parent_from, parent_to))?;
                // 新插入的父項目本身也要再檢查一次
                items.insert(index, parent);
            }
            None => {
                return Err(TranslateError::UnableToFindParentItemFrom {
                    from: items[index].from().to_string(),
                    parent_from,
                });
            }
        }
    }

    Ok(())
}

/// 單值項目的目的路徑不能同時是其他項目的外層路徑，否則寫入時會互相覆蓋
fn check_destinations(items: &[MapItem]) -> Result<()> {
    for item in items.iter().filter(|item| !item.is_array()) {
        let nested = items.iter().find(|other| {
            other.to_segments().len() > item.to_segments().len()
                && dot_notation::is_prefix(item.to_segments(), other.to_segments())
        });

        if let Some(nested) = nested {
            return Err(TranslateError::ConflictingMapItemDestination {
                from: item.from().to_string(),
                to: item.to().to_string(),
                nested_from: nested.from().to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_definition_object_form() {
        let map = MapItemsFactory::from_definition(
            &json!({
                "basics.name": "Basic.Name",
                "skills[]": "Skills[]",
                "skills[].name": "Skills[].Name",
            }),
            &MappingSettings::default(),
        )
        .unwrap();

        assert_eq!(map.len(), 3);
        let name = map.get("skills[].name").unwrap();
        assert_eq!(name.to(), "Skills[].Name");
        assert_eq!(name.depth(), 1);
        assert!(!name.is_array());
        assert_eq!(name.parent_from().as_deref(), Some("skills[]"));
        assert_eq!(map.find_parent(name).unwrap().unwrap().from(), "skills[]");

        let skills = map.get("skills[]").unwrap();
        assert!(skills.is_array());
        assert_eq!(skills.parent_from(), None);
        assert!(map.find_parent(skills).unwrap().is_none());
    }

    #[test]
    fn test_mismatched_depth() {
        let err = MapItemsFactory::from_entries(
            &[MapEntry::new("Skills[].Name", "skill_name")],
            &MappingSettings::default(),
        )
        .unwrap_err();
        assert_eq!(err.code(), TranslateError::CODE_MISMATCHED_MAP_ITEM_DEPTH);
        assert_eq!(err.context()["from_depth"], 1);
        assert_eq!(err.context()["to_depth"], 0);
    }

    #[test]
    fn test_missing_parent() {
        let err = MapItemsFactory::from_entries(
            &[MapEntry::new("Skills[].Name", "skills[].name")],
            &MappingSettings::default(),
        )
        .unwrap_err();
        assert_eq!(err.code(), TranslateError::CODE_UNABLE_TO_FIND_PARENT_ITEM_FROM);
        assert_eq!(err.context()["parent_from"], "Skills[]");
    }

    #[test]
    fn test_implicit_parents_are_declared_outermost_first() {
        let map = MapItemsFactory::from_entries(
            &[MapEntry::new("Projects[].Roles[].Name", "projects[].roles[].title")],
            &MappingSettings {
                implicit_parents: true,
                ..MappingSettings::default()
            },
        )
        .unwrap();

        let froms: Vec<&str> = map.iter().map(MapItem::from).collect();
        assert_eq!(froms, vec!["Projects[]", "Projects[].Roles[]", "Projects[].Roles[].Name"]);
        assert_eq!(map.get("Projects[].Roles[]").unwrap().to(), "projects[].roles[]");
        assert_eq!(map.get("Projects[]").unwrap().to(), "projects[]");
    }

    #[test]
    fn test_invalid_explicit_parent() {
        let entries = [
            MapEntry::new("Projects[]", "projects[]"),
            MapEntry::new("Projects[].Roles[]", "projects[].roles[]"),
            MapEntry::new("Projects[].Roles[].Name", "projects[].roles[].name").with_parent("Projects[]"),
        ];
        let err = MapItemsFactory::from_entries(&entries, &MappingSettings::default()).unwrap_err();
        assert_eq!(err.code(), TranslateError::CODE_INVALID_PARENT_FROM_ITEM_FORMAT);

        let entries = [
            MapEntry::new("Skills[]", "skills[]"),
            MapEntry::new("Skills[].Name", "skills[].name").with_parent("Skills"),
        ];
        let err = MapItemsFactory::from_entries(&entries, &MappingSettings::default()).unwrap_err();
        assert_eq!(err.code(), TranslateError::CODE_INVALID_PARENT_FROM_ITEM_FORMAT);
    }

    #[test]
    fn test_destination_must_nest_under_parent_destination() {
        let entries = [
            MapEntry::new("Skills[]", "skills[]"),
            MapEntry::new("Skills[].Name", "tools[].name"),
        ];
        let err = MapItemsFactory::from_entries(&entries, &MappingSettings::default()).unwrap_err();
        assert_eq!(err.code(), TranslateError::CODE_INVALID_PARENT_FROM_ITEM_FORMAT);
        assert!(err.context()["reason"].as_str().unwrap().contains("tools[].name"));
    }

    #[test]
    fn test_value_destination_cannot_contain_other_destinations() {
        let entries = [
            MapEntry::new("basics.name", "Basic"),
            MapEntry::new("basics.email", "Basic.Email"),
        ];
        let err = MapItemsFactory::from_entries(&entries, &MappingSettings::default()).unwrap_err();
        assert_eq!(err.code(), TranslateError::CODE_CONFLICTING_MAP_ITEM_DESTINATION);
        assert_eq!(err.context()["from"], "basics.name");
        assert_eq!(err.context()["nested_from"], "basics.email");

        // 陣列本身與其元素寫到同一個目的路徑是允許的
        let entries = [
            MapEntry::new("Skills[]", "skills[]"),
            MapEntry::new("Skills[].Name", "skills[]"),
        ];
        assert!(MapItemsFactory::from_entries(&entries, &MappingSettings::default()).is_ok());
    }

    #[test]
    fn test_template_items() {
        let entries = [
            MapEntry::new("Skills[]", "skills[]"),
            MapEntry::new("{Skills[].Name} for {Basic.Name}", "skills[].label"),
        ];
        let map = MapItemsFactory::from_entries(&entries, &MappingSettings::default()).unwrap();
        let label = map.get("{Skills[].Name} for {Basic.Name}").unwrap();
        assert!(label.is_template());
        assert_eq!(label.depth(), 1);
        assert_eq!(label.parent_from().as_deref(), Some("Skills[]"));

        let err = MapItemsFactory::from_entries(
            &[MapEntry::new("{Skills[].Name} {Projects[].Name}", "label")],
            &MappingSettings::default(),
        )
        .unwrap_err();
        assert_eq!(err.code(), TranslateError::CODE_MISMATCHED_MAP_ITEM_DEPTH);

        let err = MapItemsFactory::from_entries(&[MapEntry::new("{}", "label")], &MappingSettings::default())
            .unwrap_err();
        assert_eq!(err.code(), TranslateError::CODE_UNABLE_TO_REPLACE_DOT_NOTATION);
    }

    #[test]
    fn test_invalid_definitions() {
        let err = MapItemsFactory::from_definition(&json!({ "a": 1 }), &MappingSettings::default()).unwrap_err();
        assert_eq!(err.code(), TranslateError::CODE_INVALID_CANONICAL_DATA_RECEIVED);

        let err = MapItemsFactory::from_definition(&json!("a"), &MappingSettings::default()).unwrap_err();
        assert_eq!(err.code(), TranslateError::CODE_INVALID_CANONICAL_DATA_RECEIVED);

        let err = MapItemsFactory::from_entries(&[MapEntry::new("Basic..Name", "name")], &MappingSettings::default())
            .unwrap_err();
        assert_eq!(err.code(), TranslateError::CODE_PROPERTIES_NOT_FOUND);
    }

    #[test]
    fn test_from_array_restores_to_array_output() {
        let map = MapItemsFactory::from_definition(
            &json!([
                { "from": "Skills[]", "to": "skills[]" },
                { "from": "Skills[].Keywords[]", "to": "skills[].keywords[]" },
                { "from": "Skills[].Keywords[].Name", "to": "skills[].keywords[]", "parent": "Skills[].Keywords[]" },
            ]),
            &MappingSettings::default(),
        )
        .unwrap();

        let serialized = map.to_array();
        assert_eq!(serialized[2]["depth"], 2);
        assert_eq!(serialized[2]["parent"], "Skills[].Keywords[]");
        assert_eq!(serialized[0]["parent"], Value::Null);

        let restored = MapItemsFactory::from_array(&serialized).unwrap();
        assert_eq!(restored, map);
    }

    #[test]
    fn test_from_array_rejects_tampered_depth() {
        let serialized = json!([{ "from": "Skills[]", "to": "skills[]", "depth": 2, "is_array": true }]);
        let err = MapItemsFactory::from_array(&serialized).unwrap_err();
        assert_eq!(err.code(), TranslateError::CODE_MISMATCHED_MAP_ITEM_DEPTH);

        let err = MapItemsFactory::from_array(&json!([{ "from": "a" }])).unwrap_err();
        assert_eq!(err.code(), TranslateError::CODE_INVALID_CANONICAL_DATA_RECEIVED);
    }
}
