//! # PNG → BMP 转换
//!
//! ## 设计思路
//!
//! 安装向导图片要求未压缩的 24 位 BMP。流程为：读取 → 解码 → 可选精确缩放 →
//! 强制 RGB8 → 内存编码 → 写文件。编码完成后才创建输出文件，
//! 任一阶段失败都不会留下半成品。

use image::{ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use super::pipeline::{ensure_rgb8, resize_exact};
use super::source::TargetSize;
use super::{ConvertError, ImageConverter};

impl ImageConverter {
    /// 将 PNG 转换为 24 位 BMP，返回实际写入的尺寸。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use installer_artwork::converter::{ConvertConfig, ImageConverter, TargetSize};
    ///
    /// let converter = ImageConverter::new(ConvertConfig::default())?;
    /// let size = converter.convert_png_to_bmp(
    ///     "Content/game_logo.png".as_ref(),
    ///     "Content/game_logo_small.bmp".as_ref(),
    ///     Some(TargetSize::new(55, 58)?),
    /// )?;
    /// assert_eq!(size, (55, 58));
    /// # Ok::<(), installer_artwork::converter::ConvertError>(())
    /// ```
    pub fn convert_png_to_bmp(
        &self,
        input: &Path,
        output: &Path,
        target: Option<TargetSize>,
    ) -> Result<(u32, u32), ConvertError> {
        let config = self.config();
        let total_start = Instant::now();

        let raw = self.load_from_file(input, config)?;
        let decoded = self.decode(&raw, config)?;

        let resize_start = Instant::now();
        let transformed = match target {
            Some(target) => resize_exact(&decoded, target, config)?,
            None => decoded,
        };
        let resize_elapsed = resize_start.elapsed();

        let rgb = ensure_rgb8(transformed);
        let dimensions = rgb.dimensions();

        let encode_start = Instant::now();
        let bytes = encode_bmp(&rgb)?;
        std::fs::write(output, &bytes).map_err(|e| {
            ConvertError::FileSystem(format!("无法写入 {}：{}", output.display(), e))
        })?;
        let encode_elapsed = encode_start.elapsed();

        log::info!(
            "✅ BMP 写入完成 - {}x{} {} bytes resize={}ms encode={}ms total={}ms",
            dimensions.0,
            dimensions.1,
            bytes.len(),
            resize_elapsed.as_millis(),
            encode_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(dimensions)
    }
}

/// 将 RGB8 缓冲编码为未压缩 24 位 BMP。
pub fn encode_bmp(image: &RgbImage) -> Result<Vec<u8>, ConvertError> {
    let mut cursor = Cursor::new(Vec::new());
    image
        .write_to(&mut cursor, ImageFormat::Bmp)
        .map_err(|e| ConvertError::Encode(format!("BMP 编码失败：{}", e)))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn encode_bmp_writes_24_bit_header() {
        let image = RgbImage::from_pixel(5, 3, Rgb([255, 0, 0]));

        let bytes = encode_bmp(&image).expect("bmp encode should succeed");

        assert_eq!(&bytes[0..2], b"BM");
        let bits_per_pixel = u16::from_le_bytes([bytes[28], bytes[29]]);
        assert_eq!(bits_per_pixel, 24);
        let compression = u32::from_le_bytes([bytes[30], bytes[31], bytes[32], bytes[33]]);
        assert_eq!(compression, 0);
    }

    #[test]
    fn encode_bmp_roundtrips_dimensions() {
        let image = RgbImage::from_pixel(55, 58, Rgb([1, 2, 3]));

        let bytes = encode_bmp(&image).expect("bmp encode should succeed");
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Bmp)
            .expect("bmp decode should succeed");

        assert_eq!((decoded.width(), decoded.height()), (55, 58));
        assert_eq!(decoded.color(), image::ColorType::Rgb8);
    }
}
