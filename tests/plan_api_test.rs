// ==========================================
// PlanApi 集成测试
// ==========================================
// 测试范围:
// 1. 扩展名校验失败时不调用排产服务
// 2. 服务端 detail 原样透出 / 无 detail 使用通用提示
// 3. 失败时会话保持原样
// 4. 模板下载保存为固定文件名
// 5. 方案响应保存与再次加载
// ==========================================

mod helpers;

use std::path::PathBuf;
use std::sync::Arc;

use helpers::fake_service::{FakeOutcome, FakePlanningService};
use helpers::test_data_builder::{record, sample_plan, PlanBuilder};
use load_optimizer::api::ApiError;
use load_optimizer::domain::{FilterUpdate, Selector};
use load_optimizer::{Language, PlanApi, PlanSession};
use tempfile::TempDir;

fn write_workbook(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"PK\x03\x04fake workbook").unwrap();
    path
}

#[tokio::test]
async fn test_generate_plan_成功加载() {
    helpers::init_logging();
    let dir = TempDir::new().unwrap();
    let path = write_workbook(&dir, "plan.xlsx");
    let service = Arc::new(FakePlanningService::returning(sample_plan()));
    let api = PlanApi::new(service.clone());
    let mut session = PlanSession::new();

    let load_id = api.generate_plan(&mut session, &path).await.unwrap();

    assert_eq!(session.load_id(), Some(load_id));
    assert_eq!(session.records().len(), 4);
    assert_eq!(
        session.loaded().and_then(|p| p.source_file.as_deref()),
        Some("plan.xlsx")
    );
    assert_eq!(service.generate_calls(), 1);
    assert_eq!(service.uploads(), vec![("plan.xlsx".to_string(), 17)]);
}

#[tokio::test]
async fn test_generate_plan_非excel文件不调用服务() {
    let dir = TempDir::new().unwrap();
    let service = Arc::new(FakePlanningService::returning(sample_plan()));
    let api = PlanApi::new(service.clone());
    let mut session = PlanSession::new();

    for name in ["plan.csv", "plan.XLSX", "plan"] {
        let path = write_workbook(&dir, name);
        let err = api.generate_plan(&mut session, &path).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidFileFormat(_)));
        assert_eq!(
            err.user_message(Language::En),
            "Please upload a valid Excel file (.xlsx)"
        );
    }

    assert_eq!(service.generate_calls(), 0);
    assert!(!session.is_loaded());
}

#[tokio::test]
async fn test_generate_plan_xls也被接受() {
    let dir = TempDir::new().unwrap();
    let path = write_workbook(&dir, "legacy.xls");
    let service = Arc::new(FakePlanningService::returning(sample_plan()));
    let api = PlanApi::new(service.clone());
    let mut session = PlanSession::new();

    api.generate_plan(&mut session, &path).await.unwrap();
    assert_eq!(service.uploads()[0].0, "legacy.xls");
}

#[tokio::test]
async fn test_generate_plan_服务端detail原样透出() {
    let dir = TempDir::new().unwrap();
    let path = write_workbook(&dir, "plan.xlsx");
    let detail = "Error processing plan: Missing columns in 'demand_forecast': QTY";
    let api = PlanApi::new(Arc::new(FakePlanningService::rejecting(500, detail)));
    let mut session = PlanSession::new();

    let err = api.generate_plan(&mut session, &path).await.unwrap_err();

    assert_eq!(err.user_message(Language::En), detail);
    assert_eq!(err.user_message(Language::Th), detail);
    assert_eq!(err.status(), Some(500));
    assert!(!session.is_loaded());
}

#[tokio::test]
async fn test_generate_plan_无detail使用通用提示() {
    let dir = TempDir::new().unwrap();
    let path = write_workbook(&dir, "plan.xlsx");
    let api = PlanApi::new(Arc::new(FakePlanningService::failing(502)));
    let mut session = PlanSession::new();

    let err = api.generate_plan(&mut session, &path).await.unwrap_err();
    assert_eq!(err.user_message(Language::En), "Failed to generate plan");
}

#[tokio::test]
async fn test_generate_plan_网络失败使用通用提示() {
    helpers::init_logging();
    let dir = TempDir::new().unwrap();
    let path = write_workbook(&dir, "plan.xlsx");
    let service = Arc::new(FakePlanningService::returning(sample_plan()));
    service.set_outcome(FakeOutcome::Unreachable(
        "error sending request for url (http://localhost:8000/api/generate-plan): connection refused"
            .to_string(),
    ));
    let api = PlanApi::new(service.clone());
    let mut session = PlanSession::new();

    let err = api.generate_plan(&mut session, &path).await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.user_message(Language::En), "Failed to generate plan");
    assert!(!session.is_loaded());
}

#[tokio::test]
async fn test_generate_plan_空文件交给服务端判定() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.xlsx");
    std::fs::write(&path, b"").unwrap();
    let detail = "Invalid file format. Please upload an Excel file.";
    let service = Arc::new(FakePlanningService::rejecting(400, detail));
    let api = PlanApi::new(service.clone());
    let mut session = PlanSession::new();

    let err = api.generate_plan(&mut session, &path).await.unwrap_err();

    assert_eq!(service.uploads(), vec![("empty.xlsx".to_string(), 0)]);
    assert_eq!(err.user_message(Language::En), detail);
}

#[tokio::test]
async fn test_generate_plan_失败保留旧方案与筛选() {
    let dir = TempDir::new().unwrap();
    let path = write_workbook(&dir, "plan.xlsx");
    let service = Arc::new(FakePlanningService::returning(sample_plan()));
    let api = PlanApi::new(service.clone());
    let mut session = PlanSession::new();

    let first = api.generate_plan(&mut session, &path).await.unwrap();
    session.set_filter(FilterUpdate::Group(Selector::Only("B".to_string())));

    service.set_outcome(FakeOutcome::Rejected {
        status: 400,
        detail: "Invalid file format. Please upload an Excel file.".to_string(),
    });
    assert!(api.generate_plan(&mut session, &path).await.is_err());

    assert_eq!(session.load_id(), Some(first));
    assert_eq!(session.plan(), Some(&sample_plan()));
    assert_eq!(session.filter().group, Selector::Only("B".to_string()));
    assert_eq!(service.generate_calls(), 2);
}

#[tokio::test]
async fn test_generate_plan_新方案替换旧方案() {
    let dir = TempDir::new().unwrap();
    let path = write_workbook(&dir, "plan.xlsx");
    let service = Arc::new(FakePlanningService::returning(sample_plan()));
    let api = PlanApi::new(service.clone());
    let mut session = PlanSession::new();

    api.generate_plan(&mut session, &path).await.unwrap();
    session.set_filter(FilterUpdate::Week(Selector::Only(1)));

    let next = PlanBuilder::new().records(vec![record("C", 7, 3.0)]).build();
    service.set_outcome(FakeOutcome::Plan(next.clone()));
    api.generate_plan(&mut session, &path).await.unwrap();

    assert_eq!(session.plan(), Some(&next));
    assert!(session.filter().is_match_all());
}

#[tokio::test]
async fn test_generate_plan_文件不存在() {
    let dir = TempDir::new().unwrap();
    let service = Arc::new(FakePlanningService::returning(sample_plan()));
    let api = PlanApi::new(service.clone());
    let mut session = PlanSession::new();

    let err = api
        .generate_plan(&mut session, &dir.path().join("missing.xlsx"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Io(_)));
    assert_eq!(service.generate_calls(), 0);
}

// ==========================================
// 模板下载
// ==========================================

#[tokio::test]
async fn test_download_template_固定文件名() {
    let dir = TempDir::new().unwrap();
    let service = Arc::new(FakePlanningService::returning(sample_plan()));
    let api = PlanApi::new(service.clone());

    let saved = api.download_template(dir.path()).await.unwrap();

    assert_eq!(saved, dir.path().join("data_detail_template.xlsx"));
    assert_eq!(std::fs::read(&saved).unwrap(), b"PK\x03\x04template".to_vec());
    assert_eq!(service.template_calls(), 1);
}

#[tokio::test]
async fn test_download_template_自定义文件名与子目录() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("downloads");
    let api = PlanApi::new(Arc::new(FakePlanningService::returning(sample_plan())))
        .with_template_file_name("input_template.xlsx");

    let saved = api.download_template(&target).await.unwrap();
    assert_eq!(saved, target.join("input_template.xlsx"));
    assert!(saved.exists());
}

#[tokio::test]
async fn test_download_template_失败不写文件() {
    let dir = TempDir::new().unwrap();
    let api = PlanApi::new(Arc::new(
        FakePlanningService::returning(sample_plan()).without_template(),
    ));

    let err = api.download_template(dir.path()).await.unwrap_err();
    assert!(matches!(err, ApiError::TemplateDownload(_)));
    assert_eq!(err.user_message(Language::En), "Failed to download template");
    assert_eq!(err.user_message(Language::Th), "ดาวน์โหลดแม่แบบไม่สำเร็จ");
    assert!(!dir.path().join("data_detail_template.xlsx").exists());
}

// ==========================================
// 方案响应保存 / 加载
// ==========================================

#[tokio::test]
async fn test_保存并再次加载方案响应() {
    let dir = TempDir::new().unwrap();
    let path = write_workbook(&dir, "plan.xlsx");
    let api = PlanApi::new(Arc::new(FakePlanningService::returning(sample_plan())));

    let mut session = PlanSession::new();
    api.generate_plan(&mut session, &path).await.unwrap();

    let response = dir.path().join("response.json");
    api.save_response_file(&session, &response).await.unwrap();

    let mut restored = PlanSession::new();
    api.load_response_file(&mut restored, &response).await.unwrap();
    assert_eq!(restored.plan(), session.plan());
    assert_eq!(
        restored.loaded().and_then(|p| p.source_file.as_deref()),
        Some("response.json")
    );
}

#[tokio::test]
async fn test_加载无效响应文件() {
    let dir = TempDir::new().unwrap();
    let response = dir.path().join("response.json");
    std::fs::write(&response, "not json").unwrap();
    let api = PlanApi::new(Arc::new(FakePlanningService::returning(sample_plan())));

    let mut session = PlanSession::new();
    let err = api.load_response_file(&mut session, &response).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse(_)));
    assert!(!session.is_loaded());
}

#[tokio::test]
async fn test_未加载方案时不能保存() {
    let dir = TempDir::new().unwrap();
    let api = PlanApi::new(Arc::new(FakePlanningService::returning(sample_plan())));
    let session = PlanSession::new();

    let err = api
        .save_response_file(&session, &dir.path().join("response.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NoPlanLoaded));
}
