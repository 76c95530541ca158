// ==========================================
// 学费欠费计提引擎 - 命令行入口
// ==========================================
// 用法: fee-dues --snapshot <文件|目录> [--date YYYY-MM-DD] [--format json|csv|table]
//                [--config settings.json] [--top N] [--summary]
// 说明: 日志输出到 stderr,报表输出到 stdout
// ==========================================

use anyhow::Context;
use clap::{Parser, ValueEnum};
use fee_dues_engine::config::ConfigManager;
use fee_dues_engine::engine::{DuesEngine, DuesSummary};
use fee_dues_engine::report::{render_table, write_dues_csv};
use fee_dues_engine::snapshot::source_for_path;
use fee_dues_engine::{logging, DuesRecord, FeeSettings, APP_NAME, VERSION};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Table,
}

#[derive(Parser, Debug)]
#[command(name = "fee-dues", version, about = "按参考日期计算学生欠费")]
struct Cli {
    /// 快照路径: JSON 文件,或含各集合文件的目录
    #[arg(short = 's', long = "snapshot")]
    snapshot: PathBuf,

    /// 参考日期 (默认: 本地当天)
    #[arg(short = 'd', long = "date")]
    date: Option<String>,

    /// 输出格式
    #[arg(short = 'f', long = "format", value_enum, default_value = "table")]
    format: OutputFormat,

    /// 收费设置 JSON 文件
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// 仅输出欠费最多的前 N 名
    #[arg(long = "top")]
    top: Option<usize>,

    /// 额外输出汇总
    #[arg(long = "summary")]
    summary: bool,
}

async fn load_settings(path: Option<&PathBuf>) -> anyhow::Result<FeeSettings> {
    let manager = match path {
        Some(path) => ConfigManager::from_json_file(path)
            .await
            .with_context(|| format!("读取收费设置失败: {}", path.display()))?,
        None => ConfigManager::new(),
    };
    Ok(manager.load_settings()?)
}

fn write_output(
    format: OutputFormat,
    records: &[&DuesRecord],
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, records)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let owned: Vec<DuesRecord> = records.iter().map(|r| (*r).clone()).collect();
            write_dues_csv(&mut *out, &owned)?;
        }
        OutputFormat::Table => {
            write!(out, "{}", render_table(records))?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    tracing::info!("{} v{}", APP_NAME, VERSION);

    let settings = load_settings(cli.config.as_ref()).await?;
    let engine = DuesEngine::new(settings).context("收费设置校验失败")?;

    let source = source_for_path(&cli.snapshot);
    tracing::info!(source = %source.describe(), "加载快照");
    let snapshot = source
        .load()
        .await
        .with_context(|| format!("加载快照失败: {}", cli.snapshot.display()))?;

    let report = match cli.date.as_deref() {
        Some(raw) => engine.compute(&snapshot, DuesEngine::parse_reference_date(raw)?)?,
        None => engine.compute_today(&snapshot)?,
    };

    for skipped in &report.skipped {
        tracing::warn!(student_id = ?skipped.student_id, reason = %skipped.reason, "已跳过");
    }

    let records: Vec<&DuesRecord> = match cli.top {
        Some(n) => report.sorted_by_outstanding_desc().into_iter().take(n).collect(),
        None => report.records.iter().collect(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_output(cli.format, &records, &mut out)?;

    if cli.summary {
        let summary = DuesSummary::from_records(&report.records);
        match cli.format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut out, &summary)?;
                writeln!(out)?;
            }
            _ => {
                writeln!(out)?;
                writeln!(out, "Session {} as of {}", report.session.label(), report.reference_date)?;
                writeln!(out, "{}", summary.compact_line())?;
            }
        }
    }

    out.flush()?;
    Ok(())
}
