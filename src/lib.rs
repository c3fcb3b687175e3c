// ==========================================
// 生产负荷排产看板 - 客户端核心库
// ==========================================
// 职责: 上传排产数据 → 调用排产服务 → 方案透视/筛选/导出
// 系统定位: 排产算法由远端服务负责，本库只做结果的整形与呈现
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 方案结果与筛选条件
pub mod domain;

// 引擎层 - 透视/筛选/选项
pub mod engine;

// 导出层 - CSV
pub mod export;

// 配置层 - 客户端配置
pub mod config;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// 国际化
pub mod i18n;

// API 层 - 排产服务与看板视图
pub mod api;

// 应用层 - 方案会话
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    AllocationRecord, DemandDetail, FilterCriterion, FilterState, KpiSet, PlanResult,
    Selector, SummaryRow, WeeklyGroupEfficiency,
};

pub use engine::{FilterOptions, GroupWeekPivot, PivotBuilder, PivotMode, TableFilter};

pub use api::{ApiError, ApiResult, DashboardApi, HttpPlanningClient, PlanApi, PlanningService};

pub use app::PlanSession;

pub use i18n::Language;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Load Optimizer";
