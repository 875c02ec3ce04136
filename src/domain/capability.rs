// ==========================================
// 养护作业优先级系统 - 能力对照表
// ==========================================
// 用途: 能力分类代码 → 能力描述（自由文本）
// 红线: 代码不存在 与 代码存在但描述为空 是两种不同情况
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 能力判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityResolution {
    pub can_do_internally: bool,
    pub needs_capability_check: bool,
}

/// 能力对照表
///
/// 键在写入和查询时都会去除首尾空白。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapabilityTable {
    entries: HashMap<String, Option<String>>,
}

impl CapabilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入一条记录（后写覆盖）
    ///
    /// # 返回
    /// - Some(旧描述): 代码已存在（调用方据此报告重复）
    /// - None: 新代码
    pub fn insert(
        &mut self,
        code: impl AsRef<str>,
        descriptor: Option<String>,
    ) -> Option<Option<String>> {
        self.entries
            .insert(code.as_ref().trim().to_string(), descriptor)
    }

    /// 查询
    ///
    /// # 返回
    /// - None: 代码不在表中
    /// - Some(None): 代码存在但描述为空
    /// - Some(Some(desc)): 代码存在且有描述
    pub fn get(&self, code: &str) -> Option<Option<&str>> {
        self.entries.get(code.trim()).map(|d| d.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>> FromIterator<(K, Option<String>)> for CapabilityTable {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        let mut table = CapabilityTable::new();
        for (code, descriptor) in iter {
            table.insert(code, descriptor);
        }
        table
    }
}
