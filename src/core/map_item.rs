use crate::core::dot_notation::{self, Segment};
use crate::core::factory::{MapEntry, MapItemsFactory};
use crate::core::settings::MappingSettings;
use crate::utils::error::{Result, TranslateError};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum MapItemKind {
    /// 單一值的對應
    Path,
    /// 陣列本身的對應，決定目的陣列的長度
    Array,
    /// 含 `{Path}` 佔位符的字串樣板
    Template { placeholders: Vec<(String, Vec<Segment>)> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementInit {
    /// 有子項目寫入欄位，元素為空物件
    Object,
    /// 由其他項目逐一填值
    Null,
    /// 沒有任何子項目，直接複製來源元素
    Copy,
}

/// 來源路徑與目的路徑之間的一筆宣告式對應
#[derive(Debug, Clone, PartialEq)]
pub struct MapItem {
    from: String,
    to: String,
    from_segments: Vec<Segment>,
    to_segments: Vec<Segment>,
    scope: Vec<Segment>,
    depth: usize,
    kind: MapItemKind,
}

impl MapItem {
    pub(crate) fn new(
        from: String,
        to: String,
        from_segments: Vec<Segment>,
        to_segments: Vec<Segment>,
        scope: Vec<Segment>,
        depth: usize,
        kind: MapItemKind,
    ) -> Self {
        Self {
            from,
            to,
            from_segments,
            to_segments,
            scope,
            depth,
            kind,
        }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_array(&self) -> bool {
        self.kind == MapItemKind::Array
    }

    pub fn is_template(&self) -> bool {
        matches!(self.kind, MapItemKind::Template { .. })
    }

    pub fn kind(&self) -> &MapItemKind {
        &self.kind
    }

    /// 來源路徑區段；樣板項目為空
    pub fn from_segments(&self) -> &[Segment] {
        &self.from_segments
    }

    pub fn to_segments(&self) -> &[Segment] {
        &self.to_segments
    }

    /// 列舉此項目所有索引組合時所走訪的陣列前綴
    pub fn scope(&self) -> &[Segment] {
        &self.scope
    }

    /// 外層父陣列項目的來源路徑，深度 0 時為 `None`
    pub fn parent_from(&self) -> Option<String> {
        (!self.scope.is_empty()).then(|| dot_notation::format_path(&self.scope))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapItems {
    items: Vec<MapItem>,
}

impl MapItems {
    pub(crate) fn new(items: Vec<MapItem>) -> Self {
        Self { items }
    }

    pub fn get(&self, from: &str) -> Option<&MapItem> {
        self.items.iter().find(|item| item.from == from)
    }

    /// 找出宣告為陣列、且來源路徑等於 `item` 父路徑的項目
    pub fn find_parent(&self, item: &MapItem) -> Result<Option<&MapItem>> {
        let Some(parent_from) = item.parent_from() else {
            return Ok(None);
        };

        self.items
            .iter()
            .find(|candidate| candidate.is_array() && candidate.from == parent_from)
            .map(Some)
            .ok_or_else(|| TranslateError::UnableToFindParentItemFrom {
                from: item.from.clone(),
                parent_from,
            })
    }

    /// 陣列項目的元素初始值取決於有哪些項目會寫進元素
    pub fn element_init(&self, item: &MapItem) -> ElementInit {
        let object_children = self.items.iter().any(|other| {
            other.to_segments.len() > item.to_segments.len()
                && dot_notation::is_prefix(&item.to_segments, &other.to_segments)
        });
        if object_children {
            return ElementInit::Object;
        }

        let value_writers = self
            .items
            .iter()
            .any(|other| !other.is_array() && other.to_segments == item.to_segments);
        if value_writers {
            ElementInit::Null
        } else {
            ElementInit::Copy
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MapItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 序列化為陣列形式，可由 `MapItemsFactory::from_array` 還原
    pub fn to_array(&self) -> Value {
        Value::Array(
            self.items
                .iter()
                .map(|item| {
                    json!({
                        "from": item.from,
                        "to": item.to,
                        "depth": item.depth,
                        "is_array": item.is_array(),
                        "parent": item.parent_from(),
                    })
                })
                .collect(),
        )
    }

    /// 交換來源與目的，用於反向翻譯；樣板項目無法反轉，會被略過
    pub fn inverted(&self) -> Result<MapItems> {
        let entries: Vec<MapEntry> = self
            .items
            .iter()
            .filter(|item| {
                if item.is_template() {
                    tracing::debug!("⏭️ Skipping template map item '{}' on inversion", item.from);
                }
                !item.is_template()
            })
            .map(|item| MapEntry::new(item.to.clone(), item.from.clone()))
            .collect();

        MapItemsFactory::from_entries(
            &entries,
            &MappingSettings {
                implicit_parents: true,
                ..MappingSettings::default()
            },
        )
    }

    /// 每個被引用的來源路徑都對應到自己，用於正規化
    pub fn identity(&self) -> Result<MapItems> {
        let mut entries: Vec<MapEntry> = Vec::new();
        let mut push = |path: String| {
            if !entries.iter().any(|entry| entry.from == path) {
                entries.push(MapEntry::new(path.clone(), path));
            }
        };

        for item in &self.items {
            match &item.kind {
                MapItemKind::Template { placeholders } => {
                    for (_, segments) in placeholders {
                        push(dot_notation::format_path(segments));
                    }
                }
                MapItemKind::Path | MapItemKind::Array => push(item.from.clone()),
            }
        }

        let entries = drop_covered_paths(entries);

        MapItemsFactory::from_entries(
            &entries,
            &MappingSettings {
                implicit_parents: true,
                ..MappingSettings::default()
            },
        )
    }
}

/// 已由較短路徑整段複製的欄位不再重複列出
fn drop_covered_paths(entries: Vec<MapEntry>) -> Vec<MapEntry> {
    let parsed: Vec<Option<Vec<Segment>>> = entries
        .iter()
        .map(|entry| dot_notation::parse_path(&entry.from))
        .collect();
    let covered = |segments: &[Segment]| {
        parsed.iter().flatten().any(|outer| {
            outer.len() < segments.len()
                && !dot_notation::is_array_terminal(outer)
                && dot_notation::is_prefix(outer, segments)
        })
    };

    entries
        .iter()
        .zip(&parsed)
        .filter(|(_, segments)| segments.as_deref().map_or(true, |segments| !covered(segments)))
        .map(|(entry, _)| entry.clone())
        .collect()
}

impl<'a> IntoIterator for &'a MapItems {
    type Item = &'a MapItem;
    type IntoIter = std::slice::Iter<'a, MapItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
