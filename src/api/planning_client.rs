// ==========================================
// 生产负荷排产看板 - 排产服务客户端
// ==========================================
// 外部协作方（黑盒）:
// - POST {base}/generate-plan  multipart: file=<xlsx>
// - GET  {base}/template       返回模板工作簿
// 失败响应: {"detail": "..."}
// ==========================================
// 无重试；超时由配置决定
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ClientConfig;
use crate::domain::PlanResult;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// xlsx MIME 类型
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

// ==========================================
// PlanningService Trait
// ==========================================
// 实现者: HttpPlanningClient（生产）/ 测试替身
#[async_trait]
pub trait PlanningService: Send + Sync {
    /// 上传工作簿并生成排产方案
    async fn generate_plan(&self, file_name: &str, contents: Vec<u8>) -> ApiResult<PlanResult>;

    /// 下载模板工作簿
    async fn download_template(&self) -> ApiResult<Vec<u8>>;
}

/// 失败响应体
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

/// 解析非 2xx 响应
///
/// detail 存在且非空 → ServiceRejected；否则 → ServiceFailed
pub fn parse_error_body(status: u16, body: &[u8]) -> ApiError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Some(detail),
        }) if !detail.trim().is_empty() => ApiError::ServiceRejected { status, detail },
        _ => ApiError::ServiceFailed { status },
    }
}

/// 解析成功响应
pub fn parse_plan_body(body: &[u8]) -> ApiResult<PlanResult> {
    serde_json::from_slice::<PlanResult>(body)
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

// ==========================================
// HttpPlanningClient - reqwest 实现
// ==========================================
pub struct HttpPlanningClient {
    client: Client,
    base_url: String,
}

impl HttpPlanningClient {
    /// 根据客户端配置创建
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl PlanningService for HttpPlanningClient {
    async fn generate_plan(&self, file_name: &str, contents: Vec<u8>) -> ApiResult<PlanResult> {
        let url = self.endpoint("generate-plan");
        let size = contents.len();
        tracing::info!(url = %url, file_name, size, "上传排产数据");

        let part = Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str(XLSX_MIME)?;
        let form = Form::new().part("file", part);

        let resp = self.client.post(&url).multipart(form).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            let err = parse_error_body(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), error = %err, "排产服务返回失败");
            return Err(err);
        }

        let plan = parse_plan_body(&body)?;
        tracing::info!(
            detailed_plan = plan.detailed_plan.len(),
            summary = plan.summary.len(),
            demand_details = plan.demand_details.len(),
            "排产方案已接收"
        );
        Ok(plan)
    }

    async fn download_template(&self) -> ApiResult<Vec<u8>> {
        let url = self.endpoint("template");
        tracing::info!(url = %url, "下载模板");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            return Err(parse_error_body(status.as_u16(), &body));
        }
        Ok(body.to_vec())
    }
}
