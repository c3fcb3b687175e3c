// ==========================================
// 生产负荷排产看板 - 导出层
// ==========================================

pub mod csv_export;

pub use csv_export::{
    to_csv_string, write_csv_file, DETAILED_PLAN_CSV_FILE_NAME, SUMMARY_CSV_FILE_NAME,
};
