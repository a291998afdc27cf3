use crate::core::dot_notation::{self, Segment};
use crate::core::map_item::{ElementInit, MapItemKind, MapItems};
use crate::core::repository::MapItemRepository;
use crate::core::settings::MappingSettings;
use crate::utils::error::{Result, TranslateError, Violation};
use serde_json::{Map, Value};

/// 依映射在兩種巢狀結構之間轉換
pub trait MappingStrategy: Send + Sync {
    fn translate(&self, map: &MapItems, source: &Value, settings: &MappingSettings) -> Result<Value>;
    fn normalize(&self, map: &MapItems, source: &Value, settings: &MappingSettings) -> Result<Value>;
    fn validate(&self, map: &MapItems, source: &Value, settings: &MappingSettings) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct DotNotationStrategy {
    repository: MapItemRepository,
}

impl DotNotationStrategy {
    pub fn new(repository: MapItemRepository) -> Self {
        Self { repository }
    }
}

impl MappingStrategy for DotNotationStrategy {
    fn translate(&self, map: &MapItems, source: &Value, settings: &MappingSettings) -> Result<Value> {
        let mut output = Value::Object(Map::new());
        let mut missing = Vec::new();

        for item in map {
            let tuples = self.repository.element_indices(item, source);

            match item.kind() {
                MapItemKind::Array => {
                    let init = map.element_init(item);
                    for parent in &tuples {
                        let len = self.repository.count(item, source, parent);
                        dot_notation::ensure_array(&mut output, item.to_segments(), parent, len, |index| {
                            match init {
                                ElementInit::Object => Value::Object(Map::new()),
                                ElementInit::Null => Value::Null,
                                ElementInit::Copy => {
                                    let mut indices = parent.clone();
                                    indices.push(index);
                                    self.repository
                                        .resolve(item.from_segments(), source, &indices)
                                        .cloned()
                                        .unwrap_or(Value::Null)
                                }
                            }
                        });
                    }
                }
                MapItemKind::Path => {
                    for indices in &tuples {
                        let Some(value) = self.repository.resolve(item.from_segments(), source, indices) else {
                            if settings.strict {
                                missing.push(dot_notation::concrete_path(item.from_segments(), indices));
                            }
                            continue;
                        };
                        if value.is_null() && settings.skip_null {
                            continue;
                        }
                        dot_notation::assign(&mut output, item.to_segments(), indices, value.clone());
                    }
                }
                MapItemKind::Template { placeholders } => {
                    for indices in &tuples {
                        let text = dot_notation::replace(item.from(), placeholders, source, indices, settings.strict)?;
                        dot_notation::assign(&mut output, item.to_segments(), indices, Value::String(text));
                    }
                }
            }
        }

        if !missing.is_empty() {
            return Err(TranslateError::PropertiesNotFound { paths: missing });
        }

        tracing::debug!("🔄 Translated source through {} map items", map.len());
        Ok(output)
    }

    fn normalize(&self, map: &MapItems, source: &Value, settings: &MappingSettings) -> Result<Value> {
        let identity = map.identity()?;
        self.translate(&identity, source, settings)
    }

    fn validate(&self, map: &MapItems, source: &Value, settings: &MappingSettings) -> Result<()> {
        if !source.is_object() {
            return Err(TranslateError::InvalidCanonicalDataReceived {
                violations: vec![Violation::new("", "canonical data must be an object").with_value(source.clone())],
                input: source.clone(),
            });
        }

        let mut violations = Vec::new();
        for item in map {
            match item.kind() {
                MapItemKind::Array => {
                    let expect = Expect { required: false, scalar_leaf: false };
                    inspect(source, item.from_segments(), "", expect, &mut violations);
                }
                MapItemKind::Path => {
                    let expect = Expect { required: settings.strict, scalar_leaf: false };
                    inspect(source, item.from_segments(), "", expect, &mut violations);
                }
                MapItemKind::Template { placeholders } => {
                    let expect = Expect { required: settings.strict, scalar_leaf: true };
                    for (_, segments) in placeholders {
                        inspect(source, segments, "", expect, &mut violations);
                    }
                }
            }
        }

        let mut unique: Vec<Violation> = Vec::with_capacity(violations.len());
        for violation in violations {
            if !unique.iter().any(|v| v.path == violation.path && v.message == violation.message) {
                unique.push(violation);
            }
        }

        if unique.is_empty() {
            Ok(())
        } else {
            tracing::debug!("⚠️ Source failed validation with {} violation(s)", unique.len());
            Err(TranslateError::InvalidCanonicalDataReceived {
                violations: unique,
                input: source.clone(),
            })
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Expect {
    required: bool,
    scalar_leaf: bool,
}

fn join(trail: &str, key: &str) -> String {
    if trail.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", trail, key)
    }
}

/// 沿著路徑檢查來源結構，null 視同不存在
fn inspect(value: &Value, segments: &[Segment], trail: &str, expect: Expect, out: &mut Vec<Violation>) {
    let Some((segment, rest)) = segments.split_first() else {
        return;
    };

    let Some(object) = value.as_object() else {
        out.push(Violation::new(trail, "expected an object").with_value(value.clone()));
        return;
    };

    let path = join(trail, &segment.key);
    let child = match object.get(&segment.key) {
        None | Some(Value::Null) => {
            if expect.required && !segment.is_array {
                out.push(Violation::new(path, "required property is missing"));
            }
            return;
        }
        Some(child) => child,
    };

    if segment.is_array {
        match child.as_array() {
            Some(items) => {
                for (index, item) in items.iter().enumerate() {
                    if !rest.is_empty() {
                        inspect(item, rest, &format!("{}.{}", path, index), expect, out);
                    } else if expect.scalar_leaf && (item.is_object() || item.is_array()) {
                        out.push(
                            Violation::new(format!("{}.{}", path, index), "expected a scalar value")
                                .with_value(item.clone()),
                        );
                    }
                }
            }
            None => out.push(Violation::new(path, "expected a list").with_value(child.clone())),
        }
    } else if rest.is_empty() {
        if expect.scalar_leaf && (child.is_object() || child.is_array()) {
            out.push(Violation::new(path, "expected a scalar value").with_value(child.clone()));
        }
    } else {
        inspect(child, rest, &path, expect, out);
    }
}
