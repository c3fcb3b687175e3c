// ==========================================
// 生产负荷排产看板 - 领域模型层
// ==========================================
// 职责: 定义排产服务返回的方案结构与筛选条件
// 红线: 不含网络访问逻辑,不含展示逻辑
// ==========================================

pub mod filter;
pub mod plan;

// 重导出核心类型
pub use filter::{FilterCriterion, FilterState, FilterUpdate, Selector, MATCH_ALL};
pub use plan::{
    AllocationRecord, DemandDetail, KpiSet, PlanResult, SummaryRow, WeeklyGroupEfficiency,
};
