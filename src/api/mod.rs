// ==========================================
// 生产负荷排产看板 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供 CLI 调用
// - PlanApi: 上传生成方案 / 模板下载
// - DashboardApi: 看板视图模型
// ==========================================

pub mod error;
pub mod validator;
pub mod planning_client;
pub mod plan_api;
pub mod dashboard_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use validator::{validate_upload_file_name, ALLOWED_EXTENSIONS};
pub use planning_client::{HttpPlanningClient, PlanningService};
pub use plan_api::PlanApi;
pub use dashboard_api::{
    format_thousands, ChartView, DashboardApi, DashboardView, Dataset, StatCard, TableBody,
    TableView,
};
