// ==========================================
// 生产负荷排产看板 - 配置层
// ==========================================
// 职责: 客户端配置（服务地址、超时、语言、下载目录）
// 来源: 默认值 → JSON 配置文件 → 环境变量
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ClientConfig, ConfigError, ConfigManager};
