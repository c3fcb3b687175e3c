// ==========================================
// 生产负荷排产看板 - 排产方案 API
// ==========================================
// 职责: 上传工作簿生成方案、加载已保存的响应、下载模板
// 规则:
// - 扩展名校验失败时不调用排产服务
// - 服务失败时会话保持原样（旧方案与筛选都不变）
// ==========================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::planning_client::{parse_plan_body, PlanningService};
use crate::api::validator::validate_upload_file_name;
use crate::app::PlanSession;
use crate::config::config_manager::DEFAULT_TEMPLATE_FILE_NAME;
use crate::domain::PlanResult;

// ==========================================
// PlanApi - 排产方案 API
// ==========================================

/// 排产方案API
///
/// 职责：
/// 1. 校验并上传工作簿，成功后整体替换会话中的方案
/// 2. 从 JSON 文件加载之前保存的方案响应
/// 3. 下载模板工作簿到指定目录
pub struct PlanApi {
    service: Arc<dyn PlanningService>,
    template_file_name: String,
}

impl PlanApi {
    /// 创建新的PlanApi实例
    pub fn new(service: Arc<dyn PlanningService>) -> Self {
        Self {
            service,
            template_file_name: DEFAULT_TEMPLATE_FILE_NAME.to_string(),
        }
    }

    /// 指定模板保存文件名
    pub fn with_template_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.template_file_name = file_name.into();
        self
    }

    pub fn template_file_name(&self) -> &str {
        &self.template_file_name
    }

    // ==========================================
    // 方案生成
    // ==========================================

    /// 上传工作簿并生成方案
    ///
    /// # 参数
    /// - session: 方案会话（仅在成功时被替换）
    /// - path: 工作簿路径（.xlsx / .xls）
    ///
    /// # 返回
    /// 新方案的加载标识
    pub async fn generate_plan(&self, session: &mut PlanSession, path: &Path) -> ApiResult<Uuid> {
        let (file_name, plan) = self.upload(path).await?;
        Ok(session.load_from(plan, Some(file_name)))
    }

    /// 上传工作簿并返回方案（不改动任何会话）
    pub async fn fetch_plan(&self, path: &Path) -> ApiResult<PlanResult> {
        Ok(self.upload(path).await?.1)
    }

    // 校验扩展名 → 读文件 → 调用服务；文件内容交给服务端判定
    async fn upload(&self, path: &Path) -> ApiResult<(String, PlanResult)> {
        let file_name = validate_upload_file_name(path)?;
        let contents = tokio::fs::read(path).await?;

        match self.service.generate_plan(&file_name, contents).await {
            Ok(plan) => Ok((file_name, plan)),
            Err(e) => {
                tracing::error!(file_name = %file_name, error = %e, "生成方案失败");
                Err(e)
            }
        }
    }

    /// 从 JSON 文件加载已保存的方案响应
    pub async fn load_response_file(
        &self,
        session: &mut PlanSession,
        path: &Path,
    ) -> ApiResult<Uuid> {
        let body = tokio::fs::read(path).await?;
        let plan = parse_plan_body(&body)?;
        let source = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string);
        Ok(session.load_from(plan, source))
    }

    /// 将当前方案保存为 JSON（与服务响应结构一致，可再次加载）
    pub async fn save_response_file(&self, session: &PlanSession, path: &Path) -> ApiResult<()> {
        let plan = session.require_plan()?;
        let text = serde_json::to_string_pretty(plan)
            .map_err(|e| ApiError::InternalError(e.to_string()))?;
        tokio::fs::write(path, text).await?;
        tracing::info!(path = %path.display(), "方案响应已保存");
        Ok(())
    }

    // ==========================================
    // 模板下载
    // ==========================================

    /// 下载模板工作簿，保存到 dir 下固定文件名
    ///
    /// # 返回
    /// 保存路径
    pub async fn download_template(&self, dir: &Path) -> ApiResult<PathBuf> {
        let bytes = self.service.download_template().await.map_err(|e| {
            tracing::error!(error = %e, "模板下载失败");
            ApiError::TemplateDownload(e.to_string())
        })?;

        tokio::fs::create_dir_all(dir).await?;
        let target = dir.join(&self.template_file_name);
        tokio::fs::write(&target, &bytes).await?;

        tracing::info!(path = %target.display(), size = bytes.len(), "模板已保存");
        Ok(target)
    }
}
