// ==========================================
// 生产负荷排产看板 - 筛选条件领域类型
// ==========================================
// FilterState = (周, 分组, 款式) 三元组
// 每一项要么“全部”，要么一个具体值
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 界面上表示“全部”的原始取值
pub const MATCH_ALL: &str = "all";

// ==========================================
// Selector - 单项筛选选择器
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector<T> {
    #[default]
    All,     // 匹配全部
    Only(T), // 精确匹配
}

impl<T: PartialEq> Selector<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }

    /// 判断字段值是否满足选择器
    ///
    /// All 匹配任何值（包括缺失）；Only(v) 只匹配 Some(v)
    pub fn matches(&self, value: Option<&T>) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(expected) => value == Some(expected),
        }
    }
}

impl<T> Selector<T> {
    pub fn as_only(&self) -> Option<&T> {
        match self {
            Selector::All => None,
            Selector::Only(v) => Some(v),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => write!(f, "{}", MATCH_ALL),
            Selector::Only(v) => write!(f, "{}", v),
        }
    }
}

// ==========================================
// FilterCriterion - 筛选维度
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterCriterion {
    Week,
    Group,
    Style,
}

impl fmt::Display for FilterCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterCriterion::Week => write!(f, "week"),
            FilterCriterion::Group => write!(f, "group"),
            FilterCriterion::Style => write!(f, "style"),
        }
    }
}

// ==========================================
// FilterUpdate - 单维度筛选更新
// ==========================================
// 由 PlanSession::set_filter 消费，一次只改一个维度
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    Week(Selector<u32>),
    Group(Selector<String>),
    Style(Selector<String>),
}

impl FilterUpdate {
    pub fn criterion(&self) -> FilterCriterion {
        match self {
            FilterUpdate::Week(_) => FilterCriterion::Week,
            FilterUpdate::Group(_) => FilterCriterion::Group,
            FilterUpdate::Style(_) => FilterCriterion::Style,
        }
    }

    /// 解析界面原始取值
    ///
    /// - "all" → Selector::All
    /// - 周必须是整数；分组/款式按原样精确保存（不 trim、不转大小写）
    pub fn parse(criterion: FilterCriterion, raw: &str) -> Result<Self, String> {
        if raw == MATCH_ALL {
            return Ok(match criterion {
                FilterCriterion::Week => FilterUpdate::Week(Selector::All),
                FilterCriterion::Group => FilterUpdate::Group(Selector::All),
                FilterCriterion::Style => FilterUpdate::Style(Selector::All),
            });
        }

        match criterion {
            FilterCriterion::Week => raw
                .trim()
                .parse::<u32>()
                .map(|w| FilterUpdate::Week(Selector::Only(w)))
                .map_err(|_| format!("week filter must be an integer or '{}': {}", MATCH_ALL, raw)),
            FilterCriterion::Group => Ok(FilterUpdate::Group(Selector::Only(raw.to_string()))),
            FilterCriterion::Style => Ok(FilterUpdate::Style(Selector::Only(raw.to_string()))),
        }
    }
}

// ==========================================
// FilterState - 当前筛选状态
// ==========================================
// 由 PlanSession 独占；TableFilter 只读
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub week: Selector<u32>,
    pub group: Selector<String>,
    pub style: Selector<String>,
}

impl FilterState {
    /// 全部维度均为“全部”
    pub fn match_all() -> Self {
        Self::default()
    }

    pub fn is_match_all(&self) -> bool {
        self.week.is_all() && self.group.is_all() && self.style.is_all()
    }

    /// 应用单维度更新，其他维度保持不变
    pub fn apply(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::Week(s) => self.week = s,
            FilterUpdate::Group(s) => self.group = s,
            FilterUpdate::Style(s) => self.style = s,
        }
    }

    /// 链式构造
    pub fn with(mut self, update: FilterUpdate) -> Self {
        self.apply(update);
        self
    }
}
