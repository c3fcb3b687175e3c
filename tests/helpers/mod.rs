// ==========================================
// 集成测试公共模块
// ==========================================
// 各测试文件只用到其中一部分
#![allow(dead_code)]

pub mod fake_service;
pub mod test_data_builder;

/// 测试日志（重复调用安全）
pub fn init_logging() {
    load_optimizer::logging::init_test();
}
