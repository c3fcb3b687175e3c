// ==========================================
// 生产负荷排产看板 - 明细表筛选引擎
// ==========================================
// 职责: 按 FilterState 从详细排产中取子集
// 规则: 三个维度 AND；周数值相等，分组/款式字符串精确相等
// 稳定筛选: 保持原始顺序，不重排，不修改输入
// ==========================================

use crate::domain::{AllocationRecord, FilterState};
use crate::perf::PerfGuard;

pub struct TableFilter {
    // 无状态引擎
}

impl TableFilter {
    /// 判断单条记录是否满足筛选条件
    pub fn matches(record: &AllocationRecord, filter: &FilterState) -> bool {
        filter.week.matches(record.week.as_ref())
            && filter.group.matches(record.group.as_ref())
            && filter.style.matches(record.style.as_ref())
    }

    /// 执行筛选
    ///
    /// # 返回
    /// 新序列（借用原记录），可能为空
    pub fn apply<'a>(
        records: &'a [AllocationRecord],
        filter: &FilterState,
    ) -> Vec<&'a AllocationRecord> {
        let mut perf = PerfGuard::new("table_filter", records.len());

        let filtered: Vec<&AllocationRecord> = records
            .iter()
            .filter(|r| Self::matches(r, filter))
            .collect();

        tracing::debug!(
            total = records.len(),
            matched = filtered.len(),
            week = %filter.week,
            group = %filter.group,
            style = %filter.style,
            "明细筛选完成"
        );
        perf.set_rows_out(filtered.len());
        filtered
    }

}
