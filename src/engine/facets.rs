// ==========================================
// 生产负荷排产看板 - 筛选选项
// ==========================================
// 职责: 从详细排产提取下拉框选项 + 排产周期（不同周数）
// ==========================================

use crate::domain::AllocationRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 明细筛选下拉选项
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub weeks: Vec<u32>,     // 升序
    pub groups: Vec<String>, // 字典序
    pub styles: Vec<String>, // 字典序
    pub horizon_weeks: usize,
}

impl FilterOptions {
    /// 从详细排产构建（缺失值不进入选项）
    pub fn from_records(records: &[AllocationRecord]) -> Self {
        let weeks: BTreeSet<u32> = records.iter().filter_map(|r| r.week).collect();
        let groups: BTreeSet<&str> = records.iter().filter_map(|r| r.group.as_deref()).collect();
        let styles: BTreeSet<&str> = records.iter().filter_map(|r| r.style.as_deref()).collect();

        let weeks: Vec<u32> = weeks.into_iter().collect();
        let horizon_weeks = weeks.len();
        Self {
            weeks,
            groups: groups.into_iter().map(str::to_string).collect(),
            styles: styles.into_iter().map(str::to_string).collect(),
            horizon_weeks,
        }
    }
}
