use serde::{Deserialize, Serialize};

/// 映射行為設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingSettings {
    /// 來源缺少對應值時直接失敗，而非略過
    pub strict: bool,
    /// 不寫入 null 值
    pub skip_null: bool,
    /// 自動補上未宣告的父陣列項目
    pub implicit_parents: bool,
}

impl MappingSettings {
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }
}
