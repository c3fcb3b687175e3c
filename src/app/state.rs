// ==========================================
// 生产负荷排产看板 - 方案会话（Plan Data Store）
// ==========================================
// 职责: 持有当前方案结果与筛选状态
// 规则:
// - load 整体替换方案并重置筛选
// - set_filter 只改一个维度，不触发任何重算
// - clear 回到空状态
// - 所有派生视图由调用方在变更后显式重建
// ==========================================

use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{AllocationRecord, FilterCriterion, FilterState, FilterUpdate, PlanResult};
use crate::engine::{FilterOptions, GroupWeekPivot, PivotBuilder, TableFilter};

/// 已加载方案
#[derive(Debug, Clone)]
pub struct LoadedPlan {
    /// 本次加载标识（每次 load 重新生成）
    pub load_id: Uuid,

    /// 加载时间
    pub loaded_at: DateTime<Local>,

    /// 上传的源文件名（从 JSON 直接查看时为 None）
    pub source_file: Option<String>,

    /// 方案结果
    pub result: PlanResult,
}

/// 方案会话
///
/// 单一所有者，无内部锁；由唯一的界面事件流驱动
#[derive(Debug, Default)]
pub struct PlanSession {
    plan: Option<LoadedPlan>,
    filter: FilterState,
}

impl PlanSession {
    /// 创建空会话
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================
    // 变更操作
    // ==========================================

    /// 加载方案（整体替换），重置筛选为“全部”
    ///
    /// # 返回
    /// 新的加载标识
    pub fn load(&mut self, result: PlanResult) -> Uuid {
        self.load_from(result, None)
    }

    /// 加载方案并记录源文件名
    pub fn load_from(&mut self, result: PlanResult, source_file: Option<String>) -> Uuid {
        let load_id = Uuid::new_v4();

        let incomplete = result.incomplete_record_count();
        if incomplete > 0 {
            tracing::warn!(
                load_id = %load_id,
                incomplete,
                "部分明细缺少分组或周，透视时将跳过"
            );
        }

        tracing::info!(
            load_id = %load_id,
            source_file = source_file.as_deref().unwrap_or("-"),
            detailed_plan = result.detailed_plan.len(),
            summary = result.summary.len(),
            "方案已加载"
        );

        if let Some(previous) = &self.plan {
            tracing::debug!(previous = %previous.load_id, "替换旧方案");
        }

        self.plan = Some(LoadedPlan {
            load_id,
            loaded_at: Local::now(),
            source_file,
            result,
        });
        self.filter = FilterState::match_all();
        load_id
    }

    /// 更新单个筛选维度
    pub fn set_filter(&mut self, update: FilterUpdate) {
        tracing::debug!(criterion = %update.criterion(), "更新筛选");
        self.filter.apply(update);
    }

    /// 按界面原始取值更新筛选（"all" 表示全部）
    pub fn set_filter_raw(&mut self, criterion: FilterCriterion, raw: &str) -> ApiResult<()> {
        let update = FilterUpdate::parse(criterion, raw).map_err(ApiError::InvalidInput)?;
        self.set_filter(update);
        Ok(())
    }

    /// 清空会话（回到初始状态）
    pub fn clear(&mut self) {
        if let Some(previous) = self.plan.take() {
            tracing::info!(load_id = %previous.load_id, "方案已清除");
        }
        self.filter = FilterState::match_all();
    }

    // ==========================================
    // 只读访问
    // ==========================================

    pub fn is_loaded(&self) -> bool {
        self.plan.is_some()
    }

    pub fn plan(&self) -> Option<&PlanResult> {
        self.plan.as_ref().map(|p| &p.result)
    }

    pub fn loaded(&self) -> Option<&LoadedPlan> {
        self.plan.as_ref()
    }

    pub fn load_id(&self) -> Option<Uuid> {
        self.plan.as_ref().map(|p| p.load_id)
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// 当前方案（未加载时报错）
    pub fn require_plan(&self) -> ApiResult<&PlanResult> {
        self.plan().ok_or(ApiError::NoPlanLoaded)
    }

    /// 详细排产（未加载时为空）
    pub fn records(&self) -> &[AllocationRecord] {
        self.plan().map(|p| p.detailed_plan.as_slice()).unwrap_or(&[])
    }

    // ==========================================
    // 派生视图（显式调用，纯投影）
    // ==========================================

    /// 按当前筛选的明细
    pub fn filtered_records(&self) -> Vec<&AllocationRecord> {
        TableFilter::apply(self.records(), &self.filter)
    }

    /// 分配数量透视（Sum）
    pub fn allocation_pivot(&self) -> GroupWeekPivot {
        PivotBuilder::allocated_by_group_week(self.records())
    }

    /// 分组周效率透视（LastValue）
    pub fn efficiency_pivot(&self) -> GroupWeekPivot {
        self.plan()
            .map(|p| PivotBuilder::efficiency_by_group_week(p.weekly_efficiency()))
            .unwrap_or_default()
    }

    /// 筛选下拉选项
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_records(self.records())
    }
}
