// ==========================================
// 生产负荷排产看板 - 配置管理器
// ==========================================
// 职责: 客户端配置加载
// 优先级: 默认值 < JSON 配置文件 < 环境变量
// ==========================================

use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

// ==========================================
// 配置键（环境变量）
// ==========================================
pub mod config_keys {
    pub const API_URL: &str = "LOAD_OPTIMIZER_API_URL";
    pub const TIMEOUT_SECS: &str = "LOAD_OPTIMIZER_TIMEOUT_SECS";
    pub const LANG: &str = "LOAD_OPTIMIZER_LANG";
    pub const DOWNLOAD_DIR: &str = "LOAD_OPTIMIZER_DOWNLOAD_DIR";
}

/// 默认排产服务地址
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// 默认请求超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// 模板保存文件名（固定）
pub const DEFAULT_TEMPLATE_FILE_NAME: &str = "data_detail_template.xlsx";

/// 配置目录下的子目录名
const CONFIG_DIR_NAME: &str = "load-optimizer";
const CONFIG_FILE_NAME: &str = "config.json";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ValueError {
        key: String,
        value: String,
        message: String,
    },
}

// ==========================================
// ClientConfig - 客户端配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// 排产服务根地址（不含末尾 /）
    pub api_base_url: String,

    /// 请求超时（秒）
    pub request_timeout_secs: u64,

    /// 默认界面语言
    pub language: Language,

    /// 模板保存文件名
    pub template_file_name: String,

    /// 下载/导出目录（缺省为系统下载目录或当前目录）
    pub download_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            language: Language::En,
            template_file_name: DEFAULT_TEMPLATE_FILE_NAME.to_string(),
            download_dir: None,
        }
    }
}

impl ClientConfig {
    /// 实际使用的下载目录
    pub fn resolved_download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager;

impl ConfigManager {
    /// 默认配置文件路径: <config_dir>/load-optimizer/config.json
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// 加载配置
    ///
    /// # 参数
    /// - explicit_path: 显式指定的配置文件（必须存在）；None 时尝试默认路径（可不存在）
    pub fn load(explicit_path: Option<&Path>) -> Result<ClientConfig, ConfigError> {
        let mut config = match explicit_path {
            Some(path) => Self::load_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::load_file(&path)?,
                _ => ClientConfig::default(),
            },
        };

        Self::apply_overrides(&mut config, |key| std::env::var(key).ok())?;

        tracing::debug!(
            api_base_url = %config.api_base_url,
            timeout_secs = config.request_timeout_secs,
            language = %config.language,
            "客户端配置已加载"
        );
        Ok(config)
    }

    /// 从 JSON 文件读取（缺失字段使用默认值）
    pub fn load_file(path: &Path) -> Result<ClientConfig, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 应用环境变量覆写
    ///
    /// lookup 抽象出来便于测试（避免测试间共享进程环境变量）
    pub fn apply_overrides<F>(config: &mut ClientConfig, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(config_keys::API_URL) {
            let url = url.trim();
            if !url.is_empty() {
                config.api_base_url = url.trim_end_matches('/').to_string();
            }
        }

        if let Some(raw) = lookup(config_keys::TIMEOUT_SECS) {
            config.request_timeout_secs =
                raw.trim().parse::<u64>().map_err(|e| ConfigError::ValueError {
                    key: config_keys::TIMEOUT_SECS.to_string(),
                    value: raw.clone(),
                    message: e.to_string(),
                })?;
        }

        if let Some(raw) = lookup(config_keys::LANG) {
            config.language = Language::from_tag(&raw).ok_or_else(|| ConfigError::ValueError {
                key: config_keys::LANG.to_string(),
                value: raw.clone(),
                message: "expected en or th".to_string(),
            })?;
        }

        if let Some(dir) = lookup(config_keys::DOWNLOAD_DIR) {
            if !dir.trim().is_empty() {
                config.download_dir = Some(PathBuf::from(dir));
            }
        }

        Ok(())
    }
}
