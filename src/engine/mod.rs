// ==========================================
// 生产负荷排产看板 - 引擎层
// ==========================================
// 职责: 对已计算好的方案做纯函数整形
// 红线: 无状态、无副作用，全部视图可由 (records, FilterState) 重建
// ==========================================

pub mod facets;
pub mod pivot;
pub mod table_filter;

// 重导出
pub use facets::FilterOptions;
pub use pivot::{GroupWeekPivot, PivotBuilder, PivotMode, PivotSource};
pub use table_filter::TableFilter;
