// ==========================================
// 生产负荷排产看板 - 分组/周透视引擎
// ==========================================
// 职责: 扁平记录 → (分组, 周) 聚合，供分组可选的时间序列图使用
// 输入: 实现 PivotSource 的记录序列
// 输出: GroupWeekPivot（周升序、分组字典序、嵌套取值）
// ==========================================
// 两种模式:
// - Sum:       分配数量按 (分组, 周) 累加
// - LastValue: 效率原值，重复 (分组, 周) 后者覆盖前者
// ==========================================

use crate::domain::{AllocationRecord, WeeklyGroupEfficiency};
use crate::perf::PerfGuard;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// PivotSource - 透视数据源
// ==========================================
pub trait PivotSource {
    /// 分组标识（缺失返回 None）
    fn pivot_group(&self) -> Option<&str>;

    /// 周号（缺失返回 None）
    fn pivot_week(&self) -> Option<u32>;

    /// 参与聚合的数值
    fn pivot_value(&self) -> f64;
}

impl PivotSource for AllocationRecord {
    fn pivot_group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    fn pivot_week(&self) -> Option<u32> {
        self.week
    }

    fn pivot_value(&self) -> f64 {
        self.allocated_qty
    }
}

impl PivotSource for WeeklyGroupEfficiency {
    fn pivot_group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    fn pivot_week(&self) -> Option<u32> {
        self.week
    }

    fn pivot_value(&self) -> f64 {
        self.efficiency
    }
}

/// 透视聚合模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PivotMode {
    Sum,       // 累加
    LastValue, // 后写覆盖
}

// ==========================================
// GroupWeekPivot - 透视结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupWeekPivot {
    pub mode: Option<PivotMode>,
    pub weeks: Vec<u32>,                               // 周（数值升序）
    pub groups: Vec<String>,                           // 分组（字典序）
    pub values: BTreeMap<String, BTreeMap<u32, f64>>,  // group → week → value
}

impl GroupWeekPivot {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// 单元格取值（无记录返回 None）
    pub fn value(&self, group: &str, week: u32) -> Option<f64> {
        self.values.get(group).and_then(|by_week| by_week.get(&week)).copied()
    }

    /// 某分组在全部周上的序列，缺失单元按 0
    pub fn series(&self, group: &str) -> Vec<f64> {
        let by_week = self.values.get(group);
        self.weeks
            .iter()
            .map(|w| by_week.and_then(|m| m.get(w)).copied().unwrap_or(0.0))
            .collect()
    }

    /// 默认展示分组（排序后的第一个）
    pub fn default_group(&self) -> Option<&str> {
        self.groups.first().map(|g| g.as_str())
    }

    /// 全部 (分组, 周) 键
    pub fn keys(&self) -> BTreeSet<(String, u32)> {
        self.values
            .iter()
            .flat_map(|(g, by_week)| by_week.keys().map(move |w| (g.clone(), *w)))
            .collect()
    }
}

// ==========================================
// PivotBuilder - 透视构建器
// ==========================================
pub struct PivotBuilder {
    // 无状态引擎
}

impl PivotBuilder {
    /// 通用构建
    ///
    /// 规则：
    /// 1) 分组或周缺失的记录静默跳过（不报错）
    /// 2) Sum: 单元初值 0，逐条累加
    /// 3) LastValue: 直接写入，重复键后者覆盖
    ///
    /// 纯函数，无副作用
    pub fn build<R: PivotSource>(records: &[R], mode: PivotMode) -> GroupWeekPivot {
        let mut perf = PerfGuard::new("pivot_build", records.len());

        let mut weeks = BTreeSet::new();
        let mut groups = BTreeSet::new();
        let mut values: BTreeMap<String, BTreeMap<u32, f64>> = BTreeMap::new();
        let mut skipped = 0usize;

        for record in records {
            let (group, week) = match (record.pivot_group(), record.pivot_week()) {
                (Some(g), Some(w)) if !g.is_empty() => (g, w),
                _ => {
                    skipped += 1;
                    continue;
                }
            };

            weeks.insert(week);
            groups.insert(group.to_string());

            let cell = values
                .entry(group.to_string())
                .or_default()
                .entry(week)
                .or_insert(0.0);
            match mode {
                PivotMode::Sum => *cell += record.pivot_value(),
                PivotMode::LastValue => *cell = record.pivot_value(),
            }
        }

        if skipped > 0 {
            tracing::debug!(skipped, ?mode, "透视跳过缺少分组/周的记录");
        }

        let pivot = GroupWeekPivot {
            mode: Some(mode),
            weeks: weeks.into_iter().collect(),
            groups: groups.into_iter().collect(),
            values,
        };
        perf.set_rows_out(pivot.groups.len());
        pivot
    }

    /// 分配数量按 (分组, 周) 求和
    pub fn allocated_by_group_week(records: &[AllocationRecord]) -> GroupWeekPivot {
        Self::build(records, PivotMode::Sum)
    }

    /// 分组周效率（后写覆盖）
    pub fn efficiency_by_group_week(records: &[WeeklyGroupEfficiency]) -> GroupWeekPivot {
        Self::build(records, PivotMode::LastValue)
    }
}
