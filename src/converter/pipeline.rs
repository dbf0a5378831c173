//! # 解码与变换流水线模块
//!
//! ## 设计思路
//!
//! 将“字节 → 图像 → 目标像素格式”的过程集中管理，并在每次分配像素缓冲前执行同一套预算检查：
//! 解码前检查 header 尺寸，缩放前检查目标尺寸。超限一律返回 `ResourceLimit`，
//! 不让下游库在乘法溢出或超大分配上 panic。
//!
//! ## 实现思路
//!
//! 1. 读取 header 得到格式与尺寸
//! 2. `check_pixel_budget` 快速拒绝
//! 3. 完整解码
//! 4. 精确缩放：目标尺寸先过预算，再走 fast_image_resize，失败回退 image::resize_exact
//! 5. 像素格式已匹配时原样返回，否则转换

use fast_image_resize as fr;
use image::imageops::FilterType;
use image::{
    DynamicImage, GenericImageView, ImageBuffer, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage,
};
use std::io::Cursor;

use super::source::{RawImageData, TargetSize};
use super::{ConvertConfig, ConvertError, ImageConverter};

/// 按 RGBA8 估算的每像素字节数。
const BYTES_PER_PIXEL: u64 = 4;

impl ImageConverter {
    /// 将原始字节解码为内存图像。
    pub(crate) fn decode(
        &self,
        raw: &RawImageData,
        config: &ConvertConfig,
    ) -> Result<DynamicImage, ConvertError> {
        let (format, header_width, header_height) = read_header(&raw.bytes)?;
        check_pixel_budget(config, header_width, header_height, "解码")?;

        let decoded = image::load_from_memory_with_format(&raw.bytes, format)
            .map_err(|e| ConvertError::Decode(format!("图片解码失败：{}", e)))?;

        let (width, height) = decoded.dimensions();
        log::info!(
            "✅ 图片解码成功 - 来源: {} 格式: {:?} 尺寸: {}x{} 像素格式: {:?}",
            raw.source_hint,
            format,
            width,
            height,
            decoded.color()
        );

        Ok(decoded)
    }
}

/// 只读 header：返回识别出的格式与宽高，不解码像素。
fn read_header(bytes: &[u8]) -> Result<(ImageFormat, u32, u32), ConvertError> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ConvertError::InvalidFormat(format!("无法识别图片格式：{}", e)))?;

    let format = reader
        .format()
        .ok_or_else(|| ConvertError::InvalidFormat("不支持的图片格式".to_string()))?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| ConvertError::InvalidFormat(format!("无法读取图片尺寸：{}", e)))?;

    Ok((format, width, height))
}

/// 分配 `width x height` 像素缓冲前的预算检查，像素数与内存估算分别对照各自上限。
///
/// `stage` 只用于错误信息（“解码” / “缩放”）。
pub(crate) fn check_pixel_budget(
    config: &ConvertConfig,
    width: u32,
    height: u32,
    stage: &str,
) -> Result<(), ConvertError> {
    let pixels = u64::from(width) * u64::from(height);
    if pixels > config.max_decoded_pixels {
        return Err(ConvertError::ResourceLimit(format!(
            "{}尺寸 {}x{} 共 {} 像素，超过上限 {} 像素",
            stage, width, height, pixels, config.max_decoded_pixels
        )));
    }

    let estimated = pixels.checked_mul(BYTES_PER_PIXEL).ok_or_else(|| {
        ConvertError::ResourceLimit(format!("{}尺寸 {}x{} 内存估算溢出", stage, width, height))
    })?;
    if estimated > config.max_decoded_bytes {
        return Err(ConvertError::ResourceLimit(format!(
            "{}尺寸 {}x{} 预计占用 {:.2} MB，超过上限 {:.2} MB",
            stage,
            width,
            height,
            estimated as f64 / 1024.0 / 1024.0,
            config.max_decoded_bytes as f64 / 1024.0 / 1024.0
        )));
    }

    Ok(())
}

/// 精确缩放到目标尺寸（不保持宽高比），滤镜取自配置。
///
/// RGB8 输入保持 RGB8，其余像素格式按 RGBA8 缩放。
pub(crate) fn resize_exact(
    image: &DynamicImage,
    target: TargetSize,
    config: &ConvertConfig,
) -> Result<DynamicImage, ConvertError> {
    if target.width == 0 || target.height == 0 {
        return Err(ConvertError::Resize(format!("目标尺寸必须大于 0：{}", target)));
    }
    check_pixel_budget(config, target.width, target.height, "缩放")?;

    let (width, height) = image.dimensions();
    if (width, height) == (target.width, target.height) {
        return Ok(image.clone());
    }

    let filter = config.resize_filter;
    log::info!(
        "🧩 缩放：{}x{} -> {}（filter={:?}）",
        width,
        height,
        target,
        filter
    );

    match resize_with_fast_image_resize(image, target, filter) {
        Ok(resized) => Ok(resized),
        Err(err) => {
            log::warn!(
                "⚠️ fast_image_resize 缩放失败，回退 image::resize_exact：{}",
                err
            );
            Ok(image.resize_exact(target.width, target.height, filter))
        }
    }
}

fn resize_with_fast_image_resize(
    image: &DynamicImage,
    target: TargetSize,
    filter: FilterType,
) -> Result<DynamicImage, ConvertError> {
    let (src_width, src_height) = image.dimensions();
    let keep_rgb = matches!(image, DynamicImage::ImageRgb8(_));

    let (pixel_type, src_bytes) = if keep_rgb {
        (fr::PixelType::U8x3, image.to_rgb8().into_raw())
    } else {
        (fr::PixelType::U8x4, image.to_rgba8().into_raw())
    };

    let src_image = fr::images::Image::from_vec_u8(src_width, src_height, src_bytes, pixel_type)
        .map_err(|e| ConvertError::Resize(format!("构建源图像缓冲失败：{}", e)))?;

    let mut dst_image = fr::images::Image::new(target.width, target.height, pixel_type);

    let mut resizer = fr::Resizer::new();
    let options = fr::ResizeOptions::new()
        .resize_alg(fr::ResizeAlg::Convolution(to_fast_filter(filter)));

    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| ConvertError::Resize(format!("fast_image_resize 执行失败：{}", e)))?;

    let bytes = dst_image.into_vec();
    if keep_rgb {
        let rgb = ImageBuffer::<Rgb<u8>, Vec<u8>>::from_raw(target.width, target.height, bytes)
            .ok_or_else(|| ConvertError::Resize("fast_image_resize 输出缓冲长度异常".to_string()))?;
        Ok(DynamicImage::ImageRgb8(rgb))
    } else {
        let rgba = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(target.width, target.height, bytes)
            .ok_or_else(|| ConvertError::Resize("fast_image_resize 输出缓冲长度异常".to_string()))?;
        Ok(DynamicImage::ImageRgba8(rgba))
    }
}

fn to_fast_filter(filter: FilterType) -> fr::FilterType {
    match filter {
        FilterType::Nearest => fr::FilterType::Box,
        FilterType::Triangle => fr::FilterType::Bilinear,
        FilterType::CatmullRom => fr::FilterType::CatmullRom,
        FilterType::Gaussian => fr::FilterType::Mitchell,
        FilterType::Lanczos3 => fr::FilterType::Lanczos3,
    }
}

/// 强制 24 位 RGB；已是 RGB8 时直接取出缓冲，不触碰通道数据。
///
/// Alpha 通道直接丢弃，不做背景合成。
pub(crate) fn ensure_rgb8(image: DynamicImage) -> RgbImage {
    match image {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => {
            log::debug!("🎨 像素格式 {:?} -> Rgb8", other.color());
            other.to_rgb8()
        }
    }
}

/// 强制 32 位 RGBA；已是 RGBA8 时直接取出缓冲。
pub(crate) fn ensure_rgba8(image: DynamicImage) -> RgbaImage {
    match image {
        DynamicImage::ImageRgba8(rgba) => rgba,
        other => {
            log::debug!("🎨 像素格式 {:?} -> Rgba8", other.color());
            other.to_rgba8()
        }
    }
}
