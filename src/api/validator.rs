// ==========================================
// 生产负荷排产看板 - 上传文件校验
// ==========================================
// 规则: 只接受 .xlsx / .xls，其他扩展名在本地拒绝，不发起网络请求
// 工作簿内容校验由排产服务负责
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use std::path::Path;

/// 允许上传的扩展名
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// 校验上传文件名，返回用于 multipart 的文件名
///
/// 扩展名比较区分大小写（PLAN.XLSX 会被拒绝）
pub fn validate_upload_file_name(path: &Path) -> ApiResult<String> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ApiError::InvalidFileFormat(path.display().to_string()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !ALLOWED_EXTENSIONS.contains(&ext) {
        return Err(ApiError::InvalidFileFormat(file_name.to_string()));
    }

    Ok(file_name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_excel_files() {
        assert_eq!(
            validate_upload_file_name(Path::new("/data/plan.xlsx")).unwrap(),
            "plan.xlsx"
        );
        assert_eq!(
            validate_upload_file_name(Path::new("legacy.xls")).unwrap(),
            "legacy.xls"
        );
    }

    #[test]
    fn test_rejects_other_extensions() {
        for name in ["plan.csv", "plan", "plan.xlsx.bak", "plan.XLSX", "/"] {
            let result = validate_upload_file_name(Path::new(name));
            assert!(
                matches!(result, Err(ApiError::InvalidFileFormat(_))),
                "{} should be rejected",
                name
            );
        }
    }
}
