// ==========================================
// 生产负荷排产看板 - 看板视图 API
// ==========================================
// 职责: 将方案结果投影为可直接展示的视图模型
// - 统计卡片 / KPI 表 / 分配汇总表 / 需求表 / 明细表
// - 图表序列（产能环形图、效率柱状图、按周分配、按周效率）
// 规则: 全部为纯投影，不修改会话；空序列给出本地化占位文本
// ==========================================

use serde::Serialize;
use uuid::Uuid;

use crate::api::error::ApiResult;
use crate::app::PlanSession;
use crate::domain::{AllocationRecord, DemandDetail, KpiSet, SummaryRow};
use crate::engine::{FilterOptions, GroupWeekPivot};
use crate::i18n::{t_lang, Language};

/// 缺失文本的展示值
pub const MISSING_CELL: &str = "-";

// ==========================================
// 数值格式化
// ==========================================

/// 四舍五入到整数（.5 向上）
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// 取整并加千分位（1234567.4 → "1,234,567"）
pub fn format_thousands(value: f64) -> String {
    let rounded = round_half_up(value);
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// 两位小数
pub fn format_fixed2(value: f64) -> String {
    format!("{:.2}", value)
}

fn text_or_missing(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => MISSING_CELL.to_string(),
    }
}

// ==========================================
// 视图模型
// ==========================================

/// 统计卡片
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub label: String,
    pub value: String,
    pub unit: String,
}

/// 表格内容：数据行或占位文本
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum TableBody {
    Rows(Vec<Vec<String>>),
    Placeholder(String),
}

/// 表格视图
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub title: String,
    pub headers: Vec<String>,
    pub body: TableBody,
}

impl TableView {
    pub fn rows(&self) -> &[Vec<String>] {
        match &self.body {
            TableBody::Rows(rows) => rows,
            TableBody::Placeholder(_) => &[],
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        match &self.body {
            TableBody::Placeholder(text) => Some(text),
            TableBody::Rows(_) => None,
        }
    }
}

/// 图表数据集
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

/// 图表
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    /// 按分组切换的图表：当前分组 + 可选分组
    pub selected_group: Option<String>,
    pub groups: Vec<String>,
}

/// 完整看板
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub load_id: Uuid,
    pub horizon_weeks: usize,
    pub filter_options: FilterOptions,
    pub stat_cards: Vec<StatCard>,
    pub kpi_table: TableView,
    pub allocation_table: TableView,
    pub demand_table: TableView,
    pub detailed_table: TableView,
    pub capacity_chart: ChartView,
    pub efficiency_chart: ChartView,
    pub weekly_allocation_chart: ChartView,
    pub weekly_efficiency_chart: ChartView,
}

// ==========================================
// DashboardApi - 看板视图 API
// ==========================================

/// 看板视图API
///
/// 只持有展示语言；所有数据都从调用方传入的会话/记录读取
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardApi {
    language: Language,
}

impl DashboardApi {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    fn t(&self, key: &str) -> String {
        t_lang(self.language, key)
    }

    fn headers(&self, keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| self.t(k)).collect()
    }

    fn week_label(&self, week: u32) -> String {
        format!("{} {}", self.t("th_week"), week)
    }

    // ==========================================
    // 整体视图
    // ==========================================

    /// 构建完整看板
    ///
    /// # 参数
    /// - session: 方案会话（必须已加载）
    /// - chart_group: 按周图表展示的分组（None 取第一个分组）
    pub fn dashboard(
        &self,
        session: &PlanSession,
        chart_group: Option<&str>,
    ) -> ApiResult<DashboardView> {
        let plan = session.require_plan()?;
        let load_id = session.load_id().unwrap_or_else(Uuid::nil);

        let filter_options = session.filter_options();
        let filtered = session.filtered_records();

        tracing::debug!(
            load_id = %load_id,
            filtered = filtered.len(),
            total = plan.detailed_plan.len(),
            "构建看板视图"
        );

        Ok(DashboardView {
            load_id,
            horizon_weeks: filter_options.horizon_weeks,
            stat_cards: self.stat_cards(&plan.kpi),
            kpi_table: self.kpi_table(&plan.kpi),
            allocation_table: self.allocation_table(&plan.summary),
            demand_table: self.demand_table(&plan.demand_details),
            detailed_table: self.detailed_table(&filtered),
            capacity_chart: self.capacity_chart(&plan.kpi),
            efficiency_chart: self.efficiency_chart(&plan.summary),
            weekly_allocation_chart: self
                .weekly_allocation_chart(&session.allocation_pivot(), chart_group),
            weekly_efficiency_chart: self
                .weekly_efficiency_chart(&session.efficiency_pivot(), chart_group),
            filter_options,
        })
    }

    // ==========================================
    // KPI
    // ==========================================

    /// 顶部统计卡片（一位小数百分比）
    pub fn stat_cards(&self, kpi: &KpiSet) -> Vec<StatCard> {
        let pct = |v: f64| format!("{:.1}%", v);
        vec![
            StatCard {
                label: self.t("stat_total_demand"),
                value: format_thousands(kpi.total_demand),
                unit: self.t("unit_units"),
            },
            StatCard {
                label: self.t("stat_avg_efficiency"),
                value: pct(kpi.weighted_avg_eff),
                unit: self.t("unit_optimization"),
            },
            StatCard {
                label: self.t("stat_capacity_used"),
                value: pct(kpi.cap_utilization),
                unit: self.t("unit_capacity"),
            },
            StatCard {
                label: self.t("stat_model_score"),
                value: pct(kpi.model_score),
                unit: self.t("unit_performance"),
            },
        ]
    }

    /// KPI 表（固定 7 行）
    pub fn kpi_table(&self, kpi: &KpiSet) -> TableView {
        let units = self.t("unit_units");
        let row = |key: &str, value: String, unit: String| vec![self.t(key), value, unit];

        let rows = vec![
            row("kpi_demand", format_thousands(kpi.total_demand), units.clone()),
            row("kpi_allocated", format_thousands(kpi.total_allocated), units.clone()),
            row("kpi_avg_eff", format_fixed2(kpi.weighted_avg_eff), "%".to_string()),
            row("kpi_cap_util", format_fixed2(kpi.cap_utilization), "%".to_string()),
            row("kpi_score", format_fixed2(kpi.model_score), "%".to_string()),
            row("kpi_changeovers", kpi.changeovers.to_string(), self.t("unit_changes")),
            row("kpi_shortfall", format_thousands(kpi.unallocated_qty), units),
        ];

        TableView {
            title: self.t("section_kpi"),
            headers: self.headers(&["th_metric", "th_value", "th_unit"]),
            body: TableBody::Rows(rows),
        }
    }

    // ==========================================
    // 表格
    // ==========================================

    /// 分配汇总表
    pub fn allocation_table(&self, summary: &[SummaryRow]) -> TableView {
        let rows = summary
            .iter()
            .map(|row| {
                vec![
                    row.group.clone(),
                    format!("{:.0}", round_half_up(row.average_hc)),
                    format_fixed2(row.efficiency_pct),
                    format_thousands(row.weekly_capacity),
                    format_thousands(row.total_capacity),
                    format_thousands(row.allocated_units),
                ]
            })
            .collect();

        TableView {
            title: self.t("section_allocation_plan"),
            headers: self.headers(&[
                "th_group",
                "th_avg_hc",
                "th_eff_pct",
                "th_weekly_cap",
                "th_total_cap",
                "th_allocated_units",
            ]),
            body: TableBody::Rows(rows),
        }
    }

    /// 需求明细表（空 → 占位文本）
    pub fn demand_table(&self, details: &[DemandDetail]) -> TableView {
        let body = if details.is_empty() {
            TableBody::Placeholder(self.t("no_demand_data"))
        } else {
            TableBody::Rows(
                details
                    .iter()
                    .map(|row| {
                        let qty = if row.demand_qty == 0.0 {
                            "0".to_string()
                        } else {
                            format_thousands(row.demand_qty)
                        };
                        vec![
                            text_or_missing(row.style.as_deref()),
                            text_or_missing(row.sell_style.as_deref()),
                            text_or_missing(row.pack_style.as_deref()),
                            text_or_missing(row.sell_color.as_deref()),
                            text_or_missing(row.sell_size.as_deref()),
                            qty,
                        ]
                    })
                    .collect(),
            )
        };

        TableView {
            title: self.t("section_demand_details"),
            headers: self.headers(&[
                "th_style",
                "th_sell_style",
                "th_pack_style",
                "th_sell_color",
                "th_sell_size",
                "th_demand_qty",
            ]),
            body,
        }
    }

    /// 详细排产表（传入已筛选的记录；序号为筛选后位置）
    pub fn detailed_table(&self, records: &[&AllocationRecord]) -> TableView {
        let body = if records.is_empty() {
            TableBody::Placeholder(self.t("no_plan_data"))
        } else {
            TableBody::Rows(
                records
                    .iter()
                    .enumerate()
                    .map(|(index, r)| {
                        vec![
                            index.to_string(),
                            r.week.map(|w| w.to_string()).unwrap_or_else(|| MISSING_CELL.to_string()),
                            text_or_missing(r.group.as_deref()),
                            text_or_missing(r.shift.as_deref()),
                            text_or_missing(r.style.as_deref()),
                            text_or_missing(r.sell_style.as_deref()),
                            text_or_missing(r.pack_style.as_deref()),
                            text_or_missing(r.sell_color.as_deref()),
                            text_or_missing(r.sell_size.as_deref()),
                            text_or_missing(r.sell_pack.as_deref()),
                            text_or_missing(r.primary_dc.as_deref()),
                            format_thousands(r.allocated_qty),
                            format_thousands(r.shift_capacity),
                            format!("{:.0}", round_half_up(r.headcount)),
                            format!("{:.2}%", r.efficiency),
                        ]
                    })
                    .collect(),
            )
        };

        let mut headers = vec!["#".to_string()];
        headers.extend(self.headers(&[
            "th_week",
            "th_group",
            "th_shift",
            "th_style",
            "th_sell_style",
            "th_pack_style",
            "th_sell_color",
            "th_sell_size",
            "th_sell_pack",
            "th_primary_dc",
            "th_allocated_qty",
            "th_shift_cap",
            "th_hc",
            "th_eff",
        ]));

        TableView {
            title: self.t("section_detailed_plan"),
            headers,
            body,
        }
    }

    // ==========================================
    // 图表
    // ==========================================

    /// 产能环形图：[已用, 100 - 已用]
    pub fn capacity_chart(&self, kpi: &KpiSet) -> ChartView {
        ChartView {
            title: self.t("chart_capacity_utilization"),
            labels: vec![
                self.t("chart_used_capacity"),
                self.t("chart_available_capacity"),
            ],
            datasets: vec![Dataset {
                label: self.t("chart_capacity_utilization"),
                data: vec![kpi.cap_utilization, 100.0 - kpi.cap_utilization],
            }],
            selected_group: None,
            groups: Vec::new(),
        }
    }

    /// 分组效率柱状图
    pub fn efficiency_chart(&self, summary: &[SummaryRow]) -> ChartView {
        ChartView {
            title: self.t("chart_efficiency_distribution"),
            labels: summary.iter().map(|r| r.group.clone()).collect(),
            datasets: vec![Dataset {
                label: self.t("th_eff_pct"),
                data: summary.iter().map(|r| r.efficiency_pct).collect(),
            }],
            selected_group: None,
            groups: Vec::new(),
        }
    }

    /// 按周分配柱状图（Sum 透视，取整）
    pub fn weekly_allocation_chart(
        &self,
        pivot: &GroupWeekPivot,
        group: Option<&str>,
    ) -> ChartView {
        self.group_series_chart(
            pivot,
            group,
            self.t("chart_allocated_units"),
            |g| format!("{} ({})", self.t("chart_allocated_units"), g),
            true,
        )
    }

    /// 按周效率折线图（LastValue 透视）
    pub fn weekly_efficiency_chart(
        &self,
        pivot: &GroupWeekPivot,
        group: Option<&str>,
    ) -> ChartView {
        self.group_series_chart(
            pivot,
            group,
            self.t("chart_weekly_efficiency"),
            |g| format!("{} % ({})", self.t("chart_efficiency"), g),
            false,
        )
    }

    fn group_series_chart(
        &self,
        pivot: &GroupWeekPivot,
        group: Option<&str>,
        title: String,
        dataset_label: impl Fn(&str) -> String,
        round: bool,
    ) -> ChartView {
        let selected = group.or_else(|| pivot.default_group()).map(str::to_string);

        let datasets = match &selected {
            Some(g) => {
                let mut data = pivot.series(g);
                if round {
                    data.iter_mut().for_each(|v| *v = round_half_up(*v));
                }
                vec![Dataset {
                    label: dataset_label(g),
                    data,
                }]
            }
            None => Vec::new(),
        };

        ChartView {
            title,
            labels: pivot.weeks.iter().map(|w| self.week_label(*w)).collect(),
            datasets,
            selected_group: selected,
            groups: pivot.groups.clone(),
        }
    }
}
