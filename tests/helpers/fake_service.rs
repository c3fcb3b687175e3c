// ==========================================
// 排产服务测试替身
// ==========================================
// 记录调用次数与上传内容，按预设结果返回
// ==========================================

use async_trait::async_trait;
use load_optimizer::api::{ApiError, ApiResult, PlanningService};
use load_optimizer::PlanResult;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// 预设的生成结果
#[derive(Debug, Clone)]
pub enum FakeOutcome {
    Plan(PlanResult),
    Rejected { status: u16, detail: String },
    Failed { status: u16 },
    Unreachable(String),
}

pub struct FakePlanningService {
    outcome: Mutex<FakeOutcome>,
    template: Option<Vec<u8>>,
    generate_calls: AtomicUsize,
    template_calls: AtomicUsize,
    uploads: Mutex<Vec<(String, usize)>>,
}

impl FakePlanningService {
    pub fn returning(plan: PlanResult) -> Self {
        Self::with_outcome(FakeOutcome::Plan(plan))
    }

    pub fn rejecting(status: u16, detail: &str) -> Self {
        Self::with_outcome(FakeOutcome::Rejected {
            status,
            detail: detail.to_string(),
        })
    }

    pub fn failing(status: u16) -> Self {
        Self::with_outcome(FakeOutcome::Failed { status })
    }

    fn with_outcome(outcome: FakeOutcome) -> Self {
        Self {
            outcome: Mutex::new(outcome),
            template: Some(b"PK\x03\x04template".to_vec()),
            generate_calls: AtomicUsize::new(0),
            template_calls: AtomicUsize::new(0),
            uploads: Mutex::new(Vec::new()),
        }
    }

    /// 模板下载返回失败
    pub fn without_template(mut self) -> Self {
        self.template = None;
        self
    }

    /// 切换后续调用的结果
    pub fn set_outcome(&self, outcome: FakeOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    pub fn template_calls(&self) -> usize {
        self.template_calls.load(Ordering::SeqCst)
    }

    /// 已上传的 (文件名, 字节数)
    pub fn uploads(&self) -> Vec<(String, usize)> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlanningService for FakePlanningService {
    async fn generate_plan(&self, file_name: &str, contents: Vec<u8>) -> ApiResult<PlanResult> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        self.uploads
            .lock()
            .unwrap()
            .push((file_name.to_string(), contents.len()));

        let outcome = self.outcome.lock().unwrap().clone();
        match outcome {
            FakeOutcome::Plan(plan) => Ok(plan),
            FakeOutcome::Rejected { status, detail } => {
                Err(ApiError::ServiceRejected { status, detail })
            }
            FakeOutcome::Failed { status } => Err(ApiError::ServiceFailed { status }),
            FakeOutcome::Unreachable(reason) => Err(ApiError::Transport(reason)),
        }
    }

    async fn download_template(&self) -> ApiResult<Vec<u8>> {
        self.template_calls.fetch_add(1, Ordering::SeqCst);
        self.template
            .clone()
            .ok_or(ApiError::ServiceFailed { status: 404 })
    }
}
