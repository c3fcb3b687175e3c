// ==========================================
// 生产负荷排产看板 - CSV 导出
// ==========================================
// 格式:
// - 表头 = 第一条记录的字段名（按插入顺序），不加引号
// - 每个单元格用双引号包裹，内部引号不转义（已知限制，保持原样）
// - 行之间用 \n 分隔，末尾无换行
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

/// 汇总表默认导出文件名
pub const SUMMARY_CSV_FILE_NAME: &str = "allocation_summary.csv";

/// 详细排产默认导出文件名
pub const DETAILED_PLAN_CSV_FILE_NAME: &str = "detailed_plan.csv";

/// 单元格文本
///
/// 数字按最短形式输出（10.0 → "10"），null 输出空串
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.as_f64().map(|f| f.to_string()).unwrap_or_default()
            }
        }
        Some(other) => other.to_string(),
    }
}

fn to_object<T: Serialize>(row: &T) -> ApiResult<Map<String, Value>> {
    match serde_json::to_value(row).map_err(|e| ApiError::CsvExport(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(ApiError::InvalidInput(format!(
            "csv rows must serialize to objects, got {}",
            other
        ))),
    }
}

/// 将任意记录序列导出为 CSV 文本
///
/// # 错误
/// - 空序列 → InvalidInput（没有可导出的内容）
pub fn to_csv_string<T: Serialize>(rows: &[T]) -> ApiResult<String> {
    let first = rows
        .first()
        .ok_or_else(|| ApiError::InvalidInput("nothing to export".to_string()))?;
    let headers: Vec<String> = to_object(first)?.keys().cloned().collect();

    // QuoteStyle::Never: 由本函数自行加引号，csv 不做任何转义
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(&headers)?;
    for row in rows {
        let object = to_object(row)?;
        let cells: Vec<String> = headers
            .iter()
            .map(|h| format!("\"{}\"", cell_text(object.get(h))))
            .collect();
        writer.write_record(&cells)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ApiError::CsvExport(e.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| ApiError::CsvExport(e.to_string()))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// 导出到文件，返回导出行数
pub fn write_csv_file<T: Serialize>(rows: &[T], path: &Path) -> ApiResult<usize> {
    let text = to_csv_string(rows)?;
    std::fs::write(path, text)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "CSV 导出完成");
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_and_quoted_cells() {
        let rows = vec![json!({"Group": "A", "Units": 10})];
        assert_eq!(to_csv_string(&rows).unwrap(), "Group,Units\n\"A\",\"10\"");
    }

    #[test]
    fn test_header_follows_first_record() {
        let rows = vec![
            json!({"b": 1, "a": 2}),
            json!({"a": 3, "c": 4}),
        ];
        assert_eq!(
            to_csv_string(&rows).unwrap(),
            "b,a\n\"1\",\"2\"\n\"\",\"3\""
        );
    }

    #[test]
    fn test_float_and_null_cells() {
        let rows = vec![json!({"qty": 12.5, "cap": 10.0, "dc": null, "ok": true})];
        assert_eq!(
            to_csv_string(&rows).unwrap(),
            "qty,cap,dc,ok\n\"12.5\",\"10\",\"\",\"true\""
        );
    }

    #[test]
    fn test_embedded_quotes_are_not_escaped() {
        let rows = vec![json!({"Style": "5\" Boxer, knit"})];
        assert_eq!(
            to_csv_string(&rows).unwrap(),
            "Style\n\"5\" Boxer, knit\""
        );
    }

    #[test]
    fn test_empty_rows_rejected() {
        let rows: Vec<Value> = Vec::new();
        assert!(matches!(to_csv_string(&rows), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_non_object_rows_rejected() {
        assert!(matches!(
            to_csv_string(&[1, 2, 3]),
            Err(ApiError::InvalidInput(_))
        ));
    }
}
