// ==========================================
// 生产负荷排产看板 - 方案结果领域模型
// ==========================================
// 来源: 排产服务 POST /generate-plan 的 JSON 响应
// 字段名严格对齐服务端输出（含空格/大写 key）
// ==========================================

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ==========================================
// 宽松反序列化
// ==========================================
// 单行字段类型不符时只影响该字段，不让整个响应解析失败

/// 数值字段：缺失或 null 统一按 0 处理，数字字符串按数值解析
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value).unwrap_or(0.0))
}

fn null_as_zero_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let count = match &value {
        Some(Value::Number(n)) if n.is_i64() => n.as_i64(),
        Some(v) => number_from_value(v)
            .filter(|f| f.fract() == 0.0)
            .map(|f| f as i64),
        None => None,
    };
    Ok(count.unwrap_or(0))
}

/// 文本字段：字符串原样保留，数字/布尔转为文本，其余视为缺失
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(number_to_text(&n)),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }))
}

fn lenient_string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

/// 周字段：整数、整数值浮点或数字字符串；无法识别时为 None（透视跳过该行）
fn lenient_week<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(number_from_value)
        .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
        .map(|f| f as u32))
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

// 101 与 101.0 都显示为 "101"
fn number_to_text(n: &serde_json::Number) -> String {
    match (n.as_i64(), n.as_u64(), n.as_f64()) {
        (Some(i), _, _) => i.to_string(),
        (None, Some(u), _) => u.to_string(),
        (None, None, Some(f)) => f.to_string(),
        _ => n.to_string(),
    }
}

// ==========================================
// PlanResult - 排产服务完整响应
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    #[serde(default)]
    pub kpi: KpiSet,                                   // 方案级 KPI
    #[serde(default)]
    pub summary: Vec<SummaryRow>,                      // 分组汇总
    #[serde(default)]
    pub demand_details: Vec<DemandDetail>,             // 需求明细
    #[serde(default)]
    pub detailed_plan: Vec<AllocationRecord>,          // 详细排产（唯一事实来源）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planning_horizon: Option<u32>,                 // 服务端计算的排产周数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_group_efficiency: Option<Vec<WeeklyGroupEfficiency>>, // 分组周效率（可选）
}

impl PlanResult {
    /// 缺少 Group 或 Week 的明细行数（透视时会被跳过）
    pub fn incomplete_record_count(&self) -> usize {
        self.detailed_plan
            .iter()
            .filter(|r| r.group.is_none() || r.week.is_none())
            .count()
    }

    /// 分组周效率（缺省为空切片）
    pub fn weekly_efficiency(&self) -> &[WeeklyGroupEfficiency] {
        self.weekly_group_efficiency.as_deref().unwrap_or(&[])
    }
}

// ==========================================
// KpiSet - 方案级指标
// ==========================================
// 上游计算，本库只展示
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSet {
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_demand: f64,      // 总需求
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_allocated: f64,   // 总分配
    #[serde(default, deserialize_with = "null_as_zero")]
    pub weighted_avg_eff: f64,  // 加权平均效率 (%)
    #[serde(default, deserialize_with = "null_as_zero")]
    pub cap_utilization: f64,   // 产能利用率 (%)
    #[serde(default, deserialize_with = "null_as_zero")]
    pub model_score: f64,       // 模型得分 (%)
    #[serde(default, deserialize_with = "null_as_zero_i64")]
    pub changeovers: i64,       // 换型次数
    #[serde(default, deserialize_with = "null_as_zero")]
    pub unallocated_qty: f64,   // 未分配数量
}

// ==========================================
// SummaryRow - 分组分配汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    #[serde(rename = "Group", default, deserialize_with = "lenient_string_or_empty")]
    pub group: String,
    #[serde(rename = "Average HC", default, deserialize_with = "null_as_zero")]
    pub average_hc: f64,
    #[serde(rename = "Efficiency (%)", default, deserialize_with = "null_as_zero")]
    pub efficiency_pct: f64,
    #[serde(rename = "Weekly Capacity (Units)", default, deserialize_with = "null_as_zero")]
    pub weekly_capacity: f64,
    #[serde(rename = "Total Capacity (Units)", default, deserialize_with = "null_as_zero")]
    pub total_capacity: f64,
    #[serde(rename = "Allocated Units", default, deserialize_with = "null_as_zero")]
    pub allocated_units: f64,
}

// ==========================================
// DemandDetail - 需求明细行
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandDetail {
    #[serde(rename = "Style", default, deserialize_with = "lenient_string")]
    pub style: Option<String>,
    #[serde(rename = "SELL_STYLE", default, deserialize_with = "lenient_string")]
    pub sell_style: Option<String>,
    #[serde(rename = "SELL_COLOR", default, deserialize_with = "lenient_string")]
    pub sell_color: Option<String>,
    #[serde(rename = "SELL_SIZE", default, deserialize_with = "lenient_string")]
    pub sell_size: Option<String>,
    #[serde(rename = "PACK_STYLE", default, deserialize_with = "lenient_string")]
    pub pack_style: Option<String>,
    #[serde(rename = "Demand Qty", default, deserialize_with = "null_as_zero")]
    pub demand_qty: f64,
}

// ==========================================
// AllocationRecord - 详细排产行
// ==========================================
// 无主键，行身份 = 在响应序列中的位置
// 接收后不可变，新方案整体替换
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationRecord {
    #[serde(rename = "Week", default, deserialize_with = "lenient_week")]
    pub week: Option<u32>,
    #[serde(rename = "Group", default, deserialize_with = "lenient_string")]
    pub group: Option<String>,
    #[serde(rename = "Shift", default, deserialize_with = "lenient_string")]
    pub shift: Option<String>,
    #[serde(rename = "Style", default, deserialize_with = "lenient_string")]
    pub style: Option<String>,
    #[serde(rename = "SELL_STYLE", default, deserialize_with = "lenient_string")]
    pub sell_style: Option<String>,
    #[serde(rename = "PACK_STYLE", default, deserialize_with = "lenient_string")]
    pub pack_style: Option<String>,
    #[serde(rename = "SELL_COLOR", default, deserialize_with = "lenient_string")]
    pub sell_color: Option<String>,
    #[serde(rename = "SELL_SIZE", default, deserialize_with = "lenient_string")]
    pub sell_size: Option<String>,
    #[serde(rename = "SELL_PACK", default, deserialize_with = "lenient_string")]
    pub sell_pack: Option<String>,
    #[serde(rename = "PRIMARY_DC", default, deserialize_with = "lenient_string")]
    pub primary_dc: Option<String>,
    #[serde(rename = "Allocated Qty", default, deserialize_with = "null_as_zero")]
    pub allocated_qty: f64,
    #[serde(rename = "Shift Capacity", default, deserialize_with = "null_as_zero")]
    pub shift_capacity: f64,
    #[serde(rename = "HC", default, deserialize_with = "null_as_zero")]
    pub headcount: f64,
    #[serde(rename = "Eff", default, deserialize_with = "null_as_zero")]
    pub efficiency: f64, // 可超过 100（超效）
}

// ==========================================
// WeeklyGroupEfficiency - 分组周效率
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyGroupEfficiency {
    #[serde(rename = "Group", default, deserialize_with = "lenient_string")]
    pub group: Option<String>,
    #[serde(rename = "Week", default, deserialize_with = "lenient_week")]
    pub week: Option<u32>,
    #[serde(rename = "Efficiency", default, deserialize_with = "null_as_zero")]
    pub efficiency: f64,
}
