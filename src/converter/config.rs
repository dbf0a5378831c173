//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `ConvertConfig`：读取体积上限、解码像素上限、
//! 缩放滤镜与图标尺寸列表。生产默认值由 `Default` 提供，不读取任何配置文件。
//!
//! ## 实现思路
//!
//! - `Default` 对应安装包素材的固定策略（Lanczos3 + 六档图标尺寸）。
//! - `validate` 在构建转换器时执行一次，拒绝无法产出合法输出的组合。

use image::imageops::FilterType;

use super::ConvertError;

/// ICO 目录项能表达的最大边长。
pub const MAX_ICON_SIZE: u32 = 256;

/// 默认图标尺寸（正方形边长，像素）。
pub const DEFAULT_ICON_SIZES: [u32; 6] = [16, 32, 48, 64, 128, 256];

/// 图片转换配置。
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// 读取输入文件时允许的最大体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 解码阶段允许的预计内存上限（按 RGBA 估算，字节）。
    pub max_decoded_bytes: u64,
    /// BMP 缩放与图标渲染使用的滤镜。
    pub resize_filter: FilterType,
    /// ICO 中包含的正方形尺寸，按顺序写入。
    pub icon_sizes: Vec<u32>,
    /// 是否只接受 PNG 输入。
    pub require_png: bool,
    /// 是否跳过大于源图短边的图标尺寸（不放大）。
    pub skip_upscaled_icon_sizes: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            max_decoded_bytes: 160 * 1024 * 1024,
            resize_filter: FilterType::Lanczos3,
            icon_sizes: DEFAULT_ICON_SIZES.to_vec(),
            require_png: true,
            skip_upscaled_icon_sizes: false,
        }
    }
}

impl ConvertConfig {
    /// 校验配置是否可用。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use installer_artwork::converter::ConvertConfig;
    ///
    /// ConvertConfig::default().validate()?;
    /// # Ok::<(), installer_artwork::converter::ConvertError>(())
    /// ```
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.max_file_size == 0 {
            return Err(ConvertError::InvalidConfig("max_file_size 不能为 0".to_string()));
        }
        if self.max_decoded_pixels == 0 || self.max_decoded_bytes == 0 {
            return Err(ConvertError::InvalidConfig(
                "max_decoded_pixels / max_decoded_bytes 不能为 0".to_string(),
            ));
        }
        if self.icon_sizes.is_empty() {
            return Err(ConvertError::InvalidConfig("icon_sizes 不能为空".to_string()));
        }
        if let Some(size) = self
            .icon_sizes
            .iter()
            .find(|size| **size == 0 || **size > MAX_ICON_SIZE)
        {
            return Err(ConvertError::InvalidConfig(format!(
                "图标尺寸 {} 超出范围（1~{}）",
                size, MAX_ICON_SIZE
            )));
        }

        let mut sorted = self.icon_sizes.clone();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.len() != self.icon_sizes.len() {
            return Err(ConvertError::InvalidConfig("icon_sizes 存在重复尺寸".to_string()));
        }

        Ok(())
    }
}
