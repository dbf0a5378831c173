//! 安装包素材生成计划
//!
//! # 设计思路
//!
//! 安装向导需要三份素材：左侧大图（原尺寸 BMP）、右上角小图（55x58 BMP）
//! 与应用图标（多尺寸 ICO），全部来自同一张 `game_logo.png`。
//!
//! # 实现思路
//!
//! - `installer_artwork_jobs` 只根据基础目录拼出固定路径，不接受其他配置。
//! - `run_jobs` 按顺序逐项经过错误边界，单项失败不影响后续任务。

use std::path::{Path, PathBuf};

use crate::converter::{ConversionReport, ImageConverter, TargetSize};

/// 小图（WizardSmallImage）尺寸。
pub const SMALL_IMAGE_SIZE: TargetSize = TargetSize { width: 55, height: 58 };

/// 单个转换任务。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtworkJob {
    Bitmap {
        input: PathBuf,
        output: PathBuf,
        target: Option<TargetSize>,
    },
    Icon {
        input: PathBuf,
        output: PathBuf,
    },
}

/// 生成安装包素材任务列表。
pub fn installer_artwork_jobs(base_dir: &Path) -> Vec<ArtworkJob> {
    let content_dir = base_dir.join("Content");
    let logo_png = content_dir.join("game_logo.png");

    vec![
        ArtworkJob::Bitmap {
            input: logo_png.clone(),
            output: content_dir.join("game_logo.bmp"),
            target: None,
        },
        ArtworkJob::Bitmap {
            input: logo_png.clone(),
            output: content_dir.join("game_logo_small.bmp"),
            target: Some(SMALL_IMAGE_SIZE),
        },
        ArtworkJob::Icon {
            input: logo_png,
            output: base_dir.join("Icon.ico"),
        },
    ]
}

/// 按顺序执行任务，返回每项的报告。
pub fn run_jobs(converter: &ImageConverter, jobs: &[ArtworkJob]) -> Vec<ConversionReport> {
    jobs.iter()
        .map(|job| match job {
            ArtworkJob::Bitmap {
                input,
                output,
                target,
            } => converter.run_bmp(input, output, *target),
            ArtworkJob::Icon { input, output } => converter.run_ico(input, output),
        })
        .collect()
}
