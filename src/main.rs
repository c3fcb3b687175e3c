// ==========================================
// 生产负荷排产看板 - CLI 主入口
// ==========================================
// 子命令:
// - plan <FILE>      上传工作簿生成方案并展示
// - view <JSON>      展示之前保存的方案响应
// - template         下载模板工作簿
// 输出: 表格到 stdout，日志到 stderr
// ==========================================

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use load_optimizer::api::{ChartView, DashboardView, StatCard, TableView};
use load_optimizer::config::{ClientConfig, ConfigManager};
use load_optimizer::export::{write_csv_file, DETAILED_PLAN_CSV_FILE_NAME, SUMMARY_CSV_FILE_NAME};
use load_optimizer::i18n::{self, t_lang, t_with_args};
use load_optimizer::{
    logging, perf, ApiError, DashboardApi, FilterCriterion, HttpPlanningClient, Language, PlanApi,
    PlanSession, APP_NAME, VERSION,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Load Optimizer planning dashboard client", long_about = None)]
struct Cli {
    /// Config file (JSON); defaults to <config_dir>/load-optimizer/config.json
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Display language (en / th)
    #[arg(long, global = true)]
    lang: Option<Language>,

    /// Log per-operation timings under the `perf` target
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    perf: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    json_log: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a workbook to the planning service and show the resulting plan
    Plan(PlanArgs),
    /// Show a previously saved plan response
    View(ViewArgs),
    /// Download the input workbook template
    Template(TemplateArgs),
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// Workbook to upload (.xlsx / .xls)
    #[arg(value_hint = ValueHint::FilePath)]
    file: PathBuf,

    /// Save the raw plan response as JSON for later `view`
    #[arg(long, value_hint = ValueHint::FilePath)]
    save_response: Option<PathBuf>,

    #[command(flatten)]
    display: DisplayArgs,
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Plan response JSON
    #[arg(value_hint = ValueHint::FilePath)]
    response: PathBuf,

    #[command(flatten)]
    display: DisplayArgs,
}

#[derive(Args, Debug)]
struct TemplateArgs {
    /// Target directory (defaults to the configured download directory)
    #[arg(long, value_hint = ValueHint::DirPath)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DisplayArgs {
    /// Detail filter: week number or `all`
    #[arg(long, default_value = "all")]
    week: String,

    /// Detail filter: group or `all`
    #[arg(long, default_value = "all")]
    group: String,

    /// Detail filter: style or `all`
    #[arg(long, default_value = "all")]
    style: String,

    /// Group shown in the weekly charts (defaults to the first group)
    #[arg(long)]
    chart_group: Option<String>,

    /// Write allocation_summary.csv
    #[arg(long, action = ArgAction::SetTrue)]
    export_summary: bool,

    /// Write detailed_plan.csv
    #[arg(long, action = ArgAction::SetTrue)]
    export_plan: bool,

    /// Directory for CSV exports (defaults to the configured download directory)
    #[arg(long, value_hint = ValueHint::DirPath)]
    export_dir: Option<PathBuf>,

    /// Print the dashboard view as JSON instead of text tables
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.json_log {
        logging::init_json();
    } else {
        logging::init();
    }
    if cli.perf {
        perf::set_enabled(true);
    }

    let mut config = match ConfigManager::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(lang) = cli.lang {
        config.language = lang;
    }
    i18n::set_locale(config.language);

    tracing::info!(version = VERSION, api = %config.api_base_url, "{} 启动", APP_NAME);

    let language = config.language;
    match run(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = match err.downcast_ref::<ApiError>() {
                Some(api_err) => api_err.user_message(language),
                None => format!("{:#}", err),
            };
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command, config: ClientConfig) -> Result<()> {
    let client = HttpPlanningClient::new(&config)?;
    let plan_api = PlanApi::new(Arc::new(client))
        .with_template_file_name(config.template_file_name.clone());
    let mut session = PlanSession::new();

    match command {
        Command::Plan(args) => {
            plan_api.generate_plan(&mut session, &args.file).await?;
            if let Some(path) = &args.save_response {
                plan_api.save_response_file(&session, path).await?;
            }
            show(&mut session, &args.display, &config)
        }
        Command::View(args) => {
            plan_api
                .load_response_file(&mut session, &args.response)
                .await
                .with_context(|| format!("failed to load {}", args.response.display()))?;
            show(&mut session, &args.display, &config)
        }
        Command::Template(args) => {
            let dir = args.out.unwrap_or_else(|| config.resolved_download_dir());
            let saved = plan_api.download_template(&dir).await?;
            let path = saved.display().to_string();
            println!(
                "{}",
                t_with_args(config.language, "msg_template_saved", &[("path", path.as_str())])
            );
            Ok(())
        }
    }
}

// ==========================================
// 展示
// ==========================================

fn show(session: &mut PlanSession, args: &DisplayArgs, config: &ClientConfig) -> Result<()> {
    session.set_filter_raw(FilterCriterion::Week, &args.week)?;
    session.set_filter_raw(FilterCriterion::Group, &args.group)?;
    session.set_filter_raw(FilterCriterion::Style, &args.style)?;

    let dashboard = DashboardApi::new(config.language);
    let view = dashboard.dashboard(session, args.chart_group.as_deref())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_dashboard(&view, config.language));
    }

    if args.export_summary || args.export_plan {
        let dir = args
            .export_dir
            .clone()
            .unwrap_or_else(|| config.resolved_download_dir());
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;

        let plan = session.require_plan()?;
        if args.export_summary {
            export(&plan.summary, &dir.join(SUMMARY_CSV_FILE_NAME), config.language)?;
        }
        if args.export_plan {
            export(
                &plan.detailed_plan,
                &dir.join(DETAILED_PLAN_CSV_FILE_NAME),
                config.language,
            )?;
        }
    }
    Ok(())
}

fn export<T: serde::Serialize>(rows: &[T], path: &Path, language: Language) -> Result<()> {
    let count = write_csv_file(rows, path)?;
    let count = count.to_string();
    let path = path.display().to_string();
    println!(
        "{}",
        t_with_args(language, "msg_export_saved", &[("count", count.as_str()), ("path", path.as_str())])
    );
    Ok(())
}

fn render_dashboard(view: &DashboardView, language: Language) -> String {
    let mut out = String::new();

    out.push_str(&render_stat_cards(&view.stat_cards));
    out.push_str(&format!(
        "{}: {}\n\n",
        t_lang(language, "planning_horizon"),
        view.horizon_weeks
    ));

    for table in [
        &view.kpi_table,
        &view.allocation_table,
        &view.demand_table,
        &view.detailed_table,
    ] {
        out.push_str(&render_table(table));
        out.push('\n');
    }

    for chart in [
        &view.capacity_chart,
        &view.efficiency_chart,
        &view.weekly_allocation_chart,
        &view.weekly_efficiency_chart,
    ] {
        out.push_str(&render_chart(chart));
        out.push('\n');
    }
    out
}

fn render_stat_cards(cards: &[StatCard]) -> String {
    cards
        .iter()
        .map(|c| format!("{}: {} {}\n", c.label, c.value, c.unit))
        .chain(std::iter::once("\n".to_string()))
        .collect()
}

fn render_table(table: &TableView) -> String {
    let mut out = format!("== {} ==\n", table.title);

    if let Some(text) = table.placeholder() {
        out.push_str(text);
        out.push('\n');
        return out;
    }

    let rows = table.rows();
    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let width = widths.get(i).copied().unwrap_or(0);
                let pad = width.saturating_sub(c.chars().count());
                format!("{}{}", c, " ".repeat(pad))
            })
            .collect();
        format!("{}\n", padded.join(" | ").trim_end())
    };

    out.push_str(&line(&table.headers));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("{}\n", rule.join("-+-")));
    for row in rows {
        out.push_str(&line(row));
    }
    out
}

fn render_chart(chart: &ChartView) -> String {
    let mut out = format!("== {} ==\n", chart.title);
    for dataset in &chart.datasets {
        out.push_str(&format!("{}\n", dataset.label));
        for (label, value) in chart.labels.iter().zip(&dataset.data) {
            out.push_str(&format!("  {}: {}\n", label, value));
        }
    }
    out
}
