//! # 安装包素材转换 — 程序入口
//!
//! 本文件仅负责日志初始化、构建转换器并按固定计划执行。
//! 转换逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::io::Write;
use std::path::Path;

use installer_artwork::artwork;
use installer_artwork::converter::{ConvertConfig, ImageConverter};
use installer_artwork::error::AppError;

/// 游戏工程根目录（相对当前工作目录）。
const BASE_DIR: &str = "EternalJourney";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("❌ 素材转换未能启动: {err}");
        eprintln!("失败: {err}");
    }
}

fn run() -> Result<(), AppError> {
    let converter = ImageConverter::new(ConvertConfig::default())?;
    let jobs = artwork::installer_artwork_jobs(Path::new(BASE_DIR));
    log::info!("start: {} 个转换任务，基础目录 {}", jobs.len(), BASE_DIR);

    let reports = artwork::run_jobs(&converter, &jobs);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for report in &reports {
        writeln!(out, "{report}")?;
    }
    writeln!(out, "转换完成。")?;

    let failed = reports.iter().filter(|report| !report.is_success()).count();
    log::info!("done: 成功 {} 项，失败 {} 项", reports.len() - failed, failed);

    Ok(())
}
