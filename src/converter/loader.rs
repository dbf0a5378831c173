//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 在“尽可能早”的阶段执行输入校验：存在性、体积上限、文件签名。
//! 目标是尽快失败，不对缺失或非图片文件做任何解码尝试。
//!
//! ## 实现思路
//!
//! - 文件：存在性 + metadata 体积限制 + 读取。
//! - 签名：`infer` 识别 magic bytes，开启 `require_png` 时只接受 PNG。

use std::path::Path;

use super::source::RawImageData;
use super::{ConvertConfig, ConvertError, ImageConverter};

const PNG_MIME: &str = "image/png";

impl ImageConverter {
    /// 从本地路径加载图片原始字节。
    pub(super) fn load_from_file(
        &self,
        path: &Path,
        config: &ConvertConfig,
    ) -> Result<RawImageData, ConvertError> {
        log::info!("📁 开始读取本地图片 - 路径: {}", path.display());

        if !path.exists() {
            return Err(ConvertError::FileSystem(format!(
                "文件不存在：{}",
                path.display()
            )));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| ConvertError::FileSystem(format!("无法读取文件信息：{}", e)))?;

        if !metadata.is_file() {
            return Err(ConvertError::FileSystem(format!(
                "路径不是文件：{}",
                path.display()
            )));
        }

        if metadata.len() > config.max_file_size {
            return Err(ConvertError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                metadata.len() as f64 / 1024.0 / 1024.0,
                config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| ConvertError::FileSystem(format!("无法读取图片文件：{}", e)))?;
        Self::validate_image_signature(&bytes, config.require_png)?;

        Ok(RawImageData {
            bytes,
            source_hint: path.display().to_string(),
        })
    }

    /// 通过文件签名（magic bytes）校验输入是否为图片。
    fn validate_image_signature(bytes: &[u8], require_png: bool) -> Result<(), ConvertError> {
        if bytes.is_empty() {
            return Err(ConvertError::InvalidFormat("图片内容为空".to_string()));
        }

        let kind = infer::get(bytes)
            .ok_or_else(|| ConvertError::InvalidFormat("无法识别图片类型".to_string()))?;

        if kind.matcher_type() != infer::MatcherType::Image {
            return Err(ConvertError::InvalidFormat(format!(
                "文件签名不是图片类型：{}",
                kind.mime_type()
            )));
        }

        if require_png && kind.mime_type() != PNG_MIME {
            return Err(ConvertError::InvalidFormat(format!(
                "输入不是 PNG：{}",
                kind.mime_type()
            )));
        }

        Ok(())
    }
}
