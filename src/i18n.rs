// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）和泰文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 看板语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En, // English
    Th, // ภาษาไทย
}

impl Language {
    /// 语言代码（与 locales/*.yml 文件名一致）
    pub fn tag(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Th => "th",
        }
    }

    /// 解析语言代码，大小写不敏感，未知代码返回 None
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Language::En),
            "th" | "thai" => Some(Language::Th),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_tag(s).ok_or_else(|| format!("unsupported language: {}", s))
    }
}

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置全局语言
///
/// # 参数
/// - language: 看板语言
pub fn set_locale(language: Language) {
    rust_i18n::set_locale(language.tag());
}

/// 翻译消息（全局语言）
///
/// # 示例
/// ```no_run
/// use load_optimizer::i18n::t;
/// let label = t("kpi_demand");
/// ```
pub fn t(key: &str) -> String {
    let locale = current_locale();
    let text = rust_i18n::t!(key).to_string();
    fallback_to_key(key, &locale, text)
}

/// 按指定语言翻译（不修改全局语言）
///
/// 未知 key 返回 key 本身
pub fn t_lang(language: Language, key: &str) -> String {
    let text = rust_i18n::t!(key, locale = language.tag()).to_string();
    fallback_to_key(key, language.tag(), text)
}

/// 按指定语言翻译（带参数）
///
/// # 示例
/// ```no_run
/// use load_optimizer::i18n::{t_with_args, Language};
/// let msg = t_with_args(Language::En, "msg_template_saved", &[("path", "/tmp/a.xlsx")]);
/// ```
pub fn t_with_args(language: Language, key: &str, args: &[(&str, &str)]) -> String {
    let mut result = t_lang(language, key);
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

// rust-i18n 缺失 key 时可能返回 "locale.key"，统一收敛为 key
fn fallback_to_key(key: &str, locale: &str, text: String) -> String {
    if text == format!("{}.{}", locale, key) {
        key.to_string()
    } else {
        text
    }
}
