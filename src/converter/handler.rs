//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `ImageConverter` 只持有一份不可变配置，各阶段实现分布在 `loader`、`pipeline`、
//! `bmp`、`ico` 中。对外提供两层入口：
//! 1. `convert_png_to_*`：可失败的核心流程，返回 `Result`
//! 2. `run_*`：错误边界，吞掉失败并返回 `ConversionReport`
//!
//! ## 实现思路
//!
//! 错误边界只记录日志并返回失败报告，从不向上传播，
//! 这样一串互相独立的转换可以在某一项失败后继续执行。

use std::path::Path;

use super::source::{ConversionOutcome, ConversionReport, OutputKind, TargetSize};
use super::{ConvertConfig, ConvertError};

/// 图片转换器。
#[derive(Debug, Clone)]
pub struct ImageConverter {
    config: ConvertConfig,
}

impl ImageConverter {
    /// 根据配置创建转换器，配置非法时直接拒绝。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use installer_artwork::converter::{ConvertConfig, ImageConverter};
    ///
    /// let converter = ImageConverter::new(ConvertConfig::default())?;
    /// # Ok::<(), installer_artwork::converter::ConvertError>(())
    /// ```
    pub fn new(config: ConvertConfig) -> Result<Self, ConvertError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// PNG → BMP 的错误边界。
    pub fn run_bmp(
        &self,
        input: &Path,
        output: &Path,
        target: Option<TargetSize>,
    ) -> ConversionReport {
        let outcome = match self.convert_png_to_bmp(input, output, target) {
            Ok((width, height)) => ConversionOutcome::Bitmap { width, height },
            Err(err) => Self::contain_failure(input, output, err),
        };
        ConversionReport::new(input, output, OutputKind::Bmp, outcome)
    }

    /// PNG → ICO 的错误边界。
    pub fn run_ico(&self, input: &Path, output: &Path) -> ConversionReport {
        let outcome = match self.convert_png_to_ico(input, output) {
            Ok(frames) => ConversionOutcome::Icon { frames },
            Err(err) => Self::contain_failure(input, output, err),
        };
        ConversionReport::new(input, output, OutputKind::Ico, outcome)
    }

    fn contain_failure(input: &Path, output: &Path, err: ConvertError) -> ConversionOutcome {
        log::error!(
            "❌ 转换失败 - {} -> {}：{}",
            input.display(),
            output.display(),
            err
        );
        ConversionOutcome::Failed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_config() {
        let config = ConvertConfig {
            icon_sizes: vec![0],
            ..ConvertConfig::default()
        };

        assert!(matches!(
            ImageConverter::new(config),
            Err(ConvertError::InvalidConfig(_))
        ));
    }

    #[test]
    fn run_bmp_contains_missing_input() {
        let converter = ImageConverter::new(ConvertConfig::default()).expect("converter init failed");
        let dir = tempfile::tempdir().expect("tempdir failed");
        let output = dir.path().join("out.bmp");

        let report = converter.run_bmp(&dir.path().join("missing.png"), &output, None);

        assert!(!report.is_success());
        assert_eq!(report.kind, OutputKind::Bmp);
        assert!(!output.exists());
    }

    #[test]
    fn run_bmp_contains_oversized_target() {
        let converter = ImageConverter::new(ConvertConfig::default()).expect("converter init failed");
        let dir = tempfile::tempdir().expect("tempdir failed");
        let input = dir.path().join("logo.png");
        image::RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 255]))
            .save_with_format(&input, image::ImageFormat::Png)
            .expect("failed to write png");
        let output = dir.path().join("huge.bmp");

        let report = converter.run_bmp(&input, &output, Some(TargetSize::from((u32::MAX, u32::MAX))));

        assert!(matches!(report.outcome, ConversionOutcome::Failed(_)));
        assert!(!output.exists());
    }

    #[test]
    fn run_ico_contains_missing_input() {
        let converter = ImageConverter::new(ConvertConfig::default()).expect("converter init failed");
        let dir = tempfile::tempdir().expect("tempdir failed");
        let output = dir.path().join("Icon.ico");

        let report = converter.run_ico(&dir.path().join("missing.png"), &output);

        assert!(matches!(report.outcome, ConversionOutcome::Failed(_)));
        assert!(!output.exists());
    }
}
