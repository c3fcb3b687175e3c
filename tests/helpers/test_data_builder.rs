// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use load_optimizer::domain::{
    AllocationRecord, DemandDetail, KpiSet, PlanResult, SummaryRow, WeeklyGroupEfficiency,
};

// ==========================================
// AllocationRecord 构建器
// ==========================================

pub struct RecordBuilder {
    record: AllocationRecord,
}

impl RecordBuilder {
    pub fn new(group: &str, week: u32) -> Self {
        Self {
            record: AllocationRecord {
                group: Some(group.to_string()),
                week: Some(week),
                ..Default::default()
            },
        }
    }

    /// 缺少分组/周的记录
    pub fn incomplete() -> Self {
        Self {
            record: AllocationRecord::default(),
        }
    }

    pub fn qty(mut self, qty: f64) -> Self {
        self.record.allocated_qty = qty;
        self
    }

    pub fn style(mut self, style: &str) -> Self {
        self.record.style = Some(style.to_string());
        self
    }

    pub fn shift(mut self, shift: &str) -> Self {
        self.record.shift = Some(shift.to_string());
        self
    }

    pub fn capacity(mut self, capacity: f64) -> Self {
        self.record.shift_capacity = capacity;
        self
    }

    pub fn headcount(mut self, hc: f64) -> Self {
        self.record.headcount = hc;
        self
    }

    pub fn efficiency(mut self, eff: f64) -> Self {
        self.record.efficiency = eff;
        self
    }

    pub fn no_week(mut self) -> Self {
        self.record.week = None;
        self
    }

    pub fn no_group(mut self) -> Self {
        self.record.group = None;
        self
    }

    pub fn build(self) -> AllocationRecord {
        self.record
    }
}

/// 快捷构造: (分组, 周, 数量)
pub fn record(group: &str, week: u32, qty: f64) -> AllocationRecord {
    RecordBuilder::new(group, week).qty(qty).build()
}

pub fn weekly_eff(group: &str, week: u32, efficiency: f64) -> WeeklyGroupEfficiency {
    WeeklyGroupEfficiency {
        group: Some(group.to_string()),
        week: Some(week),
        efficiency,
    }
}

pub fn summary_row(group: &str, efficiency_pct: f64, allocated_units: f64) -> SummaryRow {
    SummaryRow {
        group: group.to_string(),
        average_hc: 85.6,
        efficiency_pct,
        weekly_capacity: 1200.0,
        total_capacity: 2400.0,
        allocated_units,
    }
}

pub fn demand(style: &str, qty: f64) -> DemandDetail {
    DemandDetail {
        style: Some(style.to_string()),
        demand_qty: qty,
        ..Default::default()
    }
}

// ==========================================
// PlanResult 构建器
// ==========================================

pub struct PlanBuilder {
    plan: PlanResult,
}

impl PlanBuilder {
    pub fn new() -> Self {
        Self {
            plan: PlanResult {
                kpi: sample_kpi(),
                ..Default::default()
            },
        }
    }

    pub fn kpi(mut self, kpi: KpiSet) -> Self {
        self.plan.kpi = kpi;
        self
    }

    pub fn records(mut self, records: Vec<AllocationRecord>) -> Self {
        self.plan.detailed_plan = records;
        self
    }

    pub fn summary(mut self, rows: Vec<SummaryRow>) -> Self {
        self.plan.summary = rows;
        self
    }

    pub fn demand(mut self, rows: Vec<DemandDetail>) -> Self {
        self.plan.demand_details = rows;
        self
    }

    pub fn weekly_efficiency(mut self, rows: Vec<WeeklyGroupEfficiency>) -> Self {
        self.plan.weekly_group_efficiency = Some(rows);
        self
    }

    pub fn build(self) -> PlanResult {
        self.plan
    }
}

pub fn sample_kpi() -> KpiSet {
    KpiSet {
        total_demand: 12345.6,
        total_allocated: 11000.4,
        weighted_avg_eff: 128.4,
        cap_utilization: 80.5,
        model_score: 93.0,
        changeovers: 4,
        unallocated_qty: 1345.2,
    }
}

/// 标准场景: A 组两周 + B 组一周，三种款式
pub fn sample_plan() -> PlanResult {
    PlanBuilder::new()
        .records(vec![
            RecordBuilder::new("A", 1).qty(10.0).style("Knit").shift("S1").efficiency(95.5).build(),
            RecordBuilder::new("A", 1).qty(5.0).style("Woven").shift("S2").efficiency(101.0).build(),
            RecordBuilder::new("B", 1).qty(7.0).style("Knit").shift("S1").efficiency(88.0).build(),
            RecordBuilder::new("A", 2).qty(12.4).style("IDLE").shift("S1").build(),
        ])
        .summary(vec![summary_row("A", 153.1, 1421.0), summary_row("B", 97.25, 7.0)])
        .demand(vec![demand("Knit", 1421.0), demand("Woven", 0.0)])
        .weekly_efficiency(vec![
            weekly_eff("A", 1, 90.0),
            weekly_eff("A", 2, 110.0),
            weekly_eff("B", 1, 75.0),
        ])
        .build()
}
