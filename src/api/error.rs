// ==========================================
// 生产负荷排产看板 - API层错误类型
// ==========================================
// 职责: 定义 API 层错误类型，并给出面向用户的提示文本
// 规则: 服务端 detail 原样透出；无 detail 时使用通用失败提示
// ==========================================

use crate::i18n::{t_lang, Language};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 上传前本地校验
    // ==========================================
    /// 文件扩展名不是 .xlsx/.xls（不发起网络请求）
    #[error("invalid file format: {0} (expected .xlsx or .xls)")]
    InvalidFileFormat(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no plan is loaded")]
    NoPlanLoaded,

    // ==========================================
    // 排产服务错误
    // ==========================================
    /// 服务端返回非 2xx 且带 detail
    #[error("{detail}")]
    ServiceRejected { status: u16, detail: String },

    /// 服务端返回非 2xx 且无可用 detail
    #[error("planning service failed with status {status}")]
    ServiceFailed { status: u16 },

    /// 网络/传输层失败
    #[error("request failed: {0}")]
    Transport(String),

    /// 模板下载失败（携带底层错误文本）
    #[error("template download failed: {0}")]
    TemplateDownload(String),

    /// 成功响应但结构无法解析
    #[error("invalid response from planning service: {0}")]
    InvalidResponse(String),

    // ==========================================
    // 本地文件 / 导出错误
    // ==========================================
    #[error("file error: {0}")]
    Io(String),

    #[error("csv export failed: {0}")]
    CsvExport(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 面向用户的提示文本
    ///
    /// - 扩展名错误 → 本地化提示
    /// - 服务端 detail → 原样返回
    /// - 服务端失败无 detail / 网络失败 → 本地化通用提示
    /// - 模板下载失败 → 本地化模板提示
    pub fn user_message(&self, language: Language) -> String {
        match self {
            ApiError::InvalidFileFormat(_) => t_lang(language, "error_invalid_file"),
            ApiError::ServiceRejected { detail, .. } => detail.clone(),
            ApiError::ServiceFailed { .. } | ApiError::InvalidResponse(_) => {
                t_lang(language, "error_generate_plan")
            }
            ApiError::Transport(raw) => {
                tracing::warn!(error = %raw, "排产服务请求失败");
                t_lang(language, "error_generate_plan")
            }
            ApiError::TemplateDownload(raw) => {
                tracing::warn!(error = %raw, "模板下载失败");
                t_lang(language, "error_template_download")
            }
            ApiError::NoPlanLoaded => t_lang(language, "error_no_plan"),
            other => other.to_string(),
        }
    }

    /// HTTP 状态码（仅服务端错误）
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ServiceRejected { status, .. } | ApiError::ServiceFailed { status } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Io(err.to_string())
    }
}

impl From<csv::Error> for ApiError {
    fn from(err: csv::Error) -> Self {
        ApiError::CsvExport(err.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidResponse(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
