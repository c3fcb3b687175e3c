// ==========================================
// 生产负荷排产看板 - 应用层
// ==========================================
// 职责: 方案会话（当前方案 + 筛选状态）
// ==========================================

pub mod state;

// 重导出
pub use state::{LoadedPlan, PlanSession};
