//! # 数据模型
//!
//! ## 设计思路
//!
//! 将“调用参数”“流水线中间结果”“对外报告”解耦：
//! - `TargetSize` 表示调用方指定的精确缩放尺寸
//! - `RawImageData` 表示已读取但未解码的字节
//! - `ConversionReport` 表示一次受错误边界保护的转换结果

use std::fmt;
use std::path::{Path, PathBuf};

use super::ConvertError;

/// 精确缩放目标尺寸（像素）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn new(width: u32, height: u32) -> Result<Self, ConvertError> {
        if width == 0 || height == 0 {
            return Err(ConvertError::Resize(format!(
                "目标尺寸必须大于 0：{}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }
}

impl From<(u32, u32)> for TargetSize {
    /// 不做校验；零尺寸会在缩放阶段被拒绝。
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// 加载阶段输出：原始字节与来源标识。
pub(crate) struct RawImageData {
    /// 原始图片字节。
    pub(crate) bytes: Vec<u8>,
    /// 来源提示（用于日志与诊断）。
    pub(crate) source_hint: String,
}

/// 输出容器类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Bmp,
    Ico,
}

/// 单次转换的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// BMP 写入成功，附带实际写入的尺寸。
    Bitmap { width: u32, height: u32 },
    /// ICO 写入成功，附带帧数。
    Icon { frames: usize },
    /// 转换失败，附带可读原因。
    Failed(String),
}

/// 一次转换的报告，`Display` 即控制台输出行。
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub kind: OutputKind,
    pub outcome: ConversionOutcome,
}

impl ConversionReport {
    pub(crate) fn new(
        input: &Path,
        output: &Path,
        kind: OutputKind,
        outcome: ConversionOutcome,
    ) -> Self {
        Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            kind,
            outcome,
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self.outcome, ConversionOutcome::Failed(_))
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ConversionOutcome::Failed(reason) => write!(f, "失败: {}", reason),
            _ => write!(
                f,
                "成功: {} -> {}",
                self.input.display(),
                self.output.display()
            ),
        }
    }
}
