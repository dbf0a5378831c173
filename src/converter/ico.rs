//! # PNG → ICO 转换
//!
//! ## 设计思路
//!
//! 应用图标需要在一个 ICO 容器里携带多档正方形尺寸。每一档都从原始解码图像
//! 独立缩放，不从上一档级联，避免误差累积。
//!
//! ## 实现思路
//!
//! - 输入先强制为 RGBA8，保留透明通道。
//! - 非正方形源图按比例缩放后居中放入透明画布，保证每帧都是 `size×size`。
//! - 每帧以 PNG 压缩存储（`IcoFrame::as_png`），目录项位深为 32。

use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::{DynamicImage, ExtendedColorType, RgbaImage};
use std::path::Path;
use std::time::Instant;

use super::pipeline::{ensure_rgba8, resize_exact};
use super::source::TargetSize;
use super::{ConvertConfig, ConvertError, ImageConverter};

impl ImageConverter {
    /// 将 PNG 转换为多尺寸 ICO，返回写入的帧数。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use installer_artwork::converter::{ConvertConfig, ImageConverter};
    ///
    /// let converter = ImageConverter::new(ConvertConfig::default())?;
    /// let frames = converter.convert_png_to_ico("Content/game_logo.png".as_ref(), "Icon.ico".as_ref())?;
    /// assert_eq!(frames, 6);
    /// # Ok::<(), installer_artwork::converter::ConvertError>(())
    /// ```
    pub fn convert_png_to_ico(&self, input: &Path, output: &Path) -> Result<usize, ConvertError> {
        let config = self.config();
        let total_start = Instant::now();

        let raw = self.load_from_file(input, config)?;
        let rgba = ensure_rgba8(self.decode(&raw, config)?);

        let sizes = select_icon_sizes(&rgba, &config.icon_sizes, config.skip_upscaled_icon_sizes)?;

        let render_start = Instant::now();
        let frames = render_icon_frames(&rgba, &sizes, config)?;
        let render_elapsed = render_start.elapsed();

        let bytes = encode_ico(&frames)?;
        std::fs::write(output, &bytes).map_err(|e| {
            ConvertError::FileSystem(format!("无法写入 {}：{}", output.display(), e))
        })?;

        log::info!(
            "✅ ICO 写入完成 - sizes={:?} {} bytes render={}ms total={}ms",
            sizes,
            bytes.len(),
            render_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(frames.len())
    }
}

/// 按配置筛选图标尺寸；开启 `skip_upscaled` 时去掉大于源图短边的尺寸。
fn select_icon_sizes(
    source: &RgbaImage,
    sizes: &[u32],
    skip_upscaled: bool,
) -> Result<Vec<u32>, ConvertError> {
    if !skip_upscaled {
        return Ok(sizes.to_vec());
    }

    let shortest = source.width().min(source.height());
    let selected: Vec<u32> = sizes.iter().copied().filter(|size| *size <= shortest).collect();

    if selected.is_empty() {
        return Err(ConvertError::ResourceLimit(format!(
            "源图 {}x{} 小于所有图标尺寸 {:?}",
            source.width(),
            source.height(),
            sizes
        )));
    }

    if selected.len() != sizes.len() {
        log::warn!("⚠️ 跳过放大尺寸：保留 {:?}", selected);
    }

    Ok(selected)
}

/// 为每个尺寸从同一源图渲染一帧正方形 RGBA 图标。
pub fn render_icon_frames(
    source: &RgbaImage,
    sizes: &[u32],
    config: &ConvertConfig,
) -> Result<Vec<IcoFrame<'static>>, ConvertError> {
    let original = DynamicImage::ImageRgba8(source.clone());

    sizes
        .iter()
        .map(|&size| {
            let square = render_square(&original, size, config)?;
            IcoFrame::as_png(square.as_raw(), size, size, ExtendedColorType::Rgba8)
                .map_err(|e| ConvertError::Encode(format!("构建 {}x{} 图标帧失败：{}", size, size, e)))
        })
        .collect()
}

/// 缩放到能放进 `size×size` 的最大尺寸，再居中贴到透明画布上。
fn render_square(
    original: &DynamicImage,
    size: u32,
    config: &ConvertConfig,
) -> Result<RgbaImage, ConvertError> {
    let (width, height) = (original.width(), original.height());
    let fitted = fit_within(width, height, size);

    let resized = ensure_rgba8(resize_exact(original, fitted, config)?);
    if fitted.width == size && fitted.height == size {
        return Ok(resized);
    }

    let mut canvas = RgbaImage::new(size, size);
    let x = (size - fitted.width) / 2;
    let y = (size - fitted.height) / 2;
    image::imageops::overlay(&mut canvas, &resized, x as i64, y as i64);
    Ok(canvas)
}

fn fit_within(width: u32, height: u32, size: u32) -> TargetSize {
    if width == height {
        return TargetSize { width: size, height: size };
    }

    let longest = width.max(height) as f64;
    let scale = size as f64 / longest;
    let fit = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, size);

    TargetSize {
        width: fit(width),
        height: fit(height),
    }
}

/// 将已渲染的帧编码为 ICO 容器字节。
pub fn encode_ico(frames: &[IcoFrame<'_>]) -> Result<Vec<u8>, ConvertError> {
    let mut bytes = Vec::new();
    IcoEncoder::new(&mut bytes)
        .encode_images(frames)
        .map_err(|e| ConvertError::Encode(format!("ICO 编码失败：{}", e)))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn fit_within_keeps_aspect_ratio() {
        assert_eq!(fit_within(512, 512, 48), TargetSize { width: 48, height: 48 });
        assert_eq!(fit_within(400, 200, 64), TargetSize { width: 64, height: 32 });
        assert_eq!(fit_within(10, 1000, 16), TargetSize { width: 1, height: 16 });
    }

    #[test]
    fn render_square_pads_wide_source_with_transparency() {
        let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 20, Rgba([255, 0, 0, 255])));

        let square = render_square(&source, 16, &ConvertConfig::default()).expect("render should succeed");

        assert_eq!(square.dimensions(), (16, 16));
        assert_eq!(square.get_pixel(8, 0)[3], 0);
        assert_eq!(square.get_pixel(8, 8)[3], 255);
    }

    #[test]
    fn select_icon_sizes_skips_upscaling_only_when_enabled() {
        let source = RgbaImage::new(100, 64);
        let sizes = [16, 32, 48, 64, 128, 256];

        assert_eq!(select_icon_sizes(&source, &sizes, false).expect("all sizes"), sizes.to_vec());
        assert_eq!(
            select_icon_sizes(&source, &sizes, true).expect("trimmed sizes"),
            vec![16, 32, 48, 64]
        );
        assert!(matches!(
            select_icon_sizes(&RgbaImage::new(8, 8), &sizes, true),
            Err(ConvertError::ResourceLimit(_))
        ));
    }

    #[test]
    fn render_icon_frames_respects_pixel_budget() {
        let source = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 255]));
        let config = ConvertConfig {
            max_decoded_pixels: 32 * 32,
            ..ConvertConfig::default()
        };

        let result = render_icon_frames(&source, &[16, 32, 48], &config);

        assert!(matches!(result, Err(ConvertError::ResourceLimit(_))));
    }

    #[test]
    fn encode_ico_writes_one_entry_per_frame() {
        let source = RgbaImage::from_pixel(64, 64, Rgba([0, 128, 255, 255]));
        let frames = render_icon_frames(&source, &[16, 32, 256], &ConvertConfig::default())
            .expect("frames should render");

        let bytes = encode_ico(&frames).expect("ico encode should succeed");

        assert_eq!(&bytes[0..4], &[0, 0, 1, 0]);
        assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), 3);
        // 256 在目录项中记为 0
        assert_eq!(bytes[6 + 2 * 16], 0);
    }
}
