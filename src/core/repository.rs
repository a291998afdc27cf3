use crate::core::dot_notation::{self, Segment};
use crate::core::map_item::{MapItem, MapItems};
use crate::utils::error::Result;
use serde_json::Value;

/// 針對來源資料查詢映射項目對應的陣列元素
#[derive(Debug, Clone, Copy, Default)]
pub struct MapItemRepository;

impl MapItemRepository {
    pub fn new() -> Self {
        Self
    }

    /// 列出此項目在來源中所有存在元素的索引組合（深度優先、依來源順序）
    pub fn element_indices(&self, item: &MapItem, source: &Value) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        walk(source, item.scope(), &mut prefix, &mut out);
        out
    }

    /// 陣列項目在指定父索引下的元素數量，不存在時為 0
    pub fn count(&self, item: &MapItem, source: &Value, parent_indices: &[usize]) -> usize {
        dot_notation::resolve(source, item.from_segments(), parent_indices)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    pub fn resolve<'a>(&self, segments: &[Segment], source: &'a Value, indices: &[usize]) -> Option<&'a Value> {
        dot_notation::resolve(source, segments, indices)
    }

    pub fn find_parent<'m>(&self, items: &'m MapItems, item: &MapItem) -> Result<Option<&'m MapItem>> {
        items.find_parent(item)
    }
}

fn walk(value: &Value, segments: &[Segment], prefix: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    let Some((segment, rest)) = segments.split_first() else {
        out.push(prefix.clone());
        return;
    };
    let Some(child) = value.get(segment.key.as_str()) else {
        return;
    };

    if segment.is_array {
        let Some(items) = child.as_array() else {
            return;
        };
        for (index, item) in items.iter().enumerate() {
            prefix.push(index);
            walk(item, rest, prefix, out);
            prefix.pop();
        }
    } else {
        walk(child, rest, prefix, out);
    }
}
