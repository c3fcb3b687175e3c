use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

static PERF_ENABLED: OnceLock<AtomicBool> = OnceLock::new();

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 性能日志开关
///
/// - Debug 默认开启；Release 默认关闭
/// - `LOAD_OPTIMIZER_PERF=1` 强制开启，`LOAD_OPTIMIZER_PERF=0` 强制关闭
fn perf_flag() -> &'static AtomicBool {
    PERF_ENABLED.get_or_init(|| {
        let enabled = match std::env::var("LOAD_OPTIMIZER_PERF") {
            Ok(v) => is_true(&v),
            Err(_) => cfg!(debug_assertions),
        };
        AtomicBool::new(enabled)
    })
}

/// 运行期切换性能日志（CLI `--perf` 使用）
pub fn set_enabled(enabled: bool) {
    perf_flag().store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    perf_flag().load(Ordering::Relaxed)
}

/// 性能统计 Guard：记录 elapsed_us + 输入/输出行数
///
/// 使用方式：
/// ```ignore
/// let mut perf = load_optimizer::perf::PerfGuard::new("table_filter", records.len());
/// // do work...
/// perf.set_rows_out(filtered.len());
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    rows_in: usize,
    rows_out: Option<usize>,
}

impl PerfGuard {
    pub fn new(op: &'static str, rows_in: usize) -> Self {
        Self {
            op,
            start: Instant::now(),
            rows_in,
            rows_out: None,
        }
    }

    pub fn set_rows_out(&mut self, rows_out: usize) {
        self.rows_out = Some(rows_out);
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        let elapsed_us = self.start.elapsed().as_micros() as u64;
        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_us,
            rows_in = self.rows_in,
            rows_out = self.rows_out.unwrap_or(0),
            "done"
        );
    }
}
