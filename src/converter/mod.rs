//! # 图片转换模块（converter）
//!
//! ## 设计思路
//!
//! 将“读取校验 → 解码 → 缩放 / 像素格式 → 编码写入 → 错误边界”
//! 按职责拆分为多个子模块：
//!
//! - `handler`：转换器本体与错误边界（`run_bmp` / `run_ico`）
//! - `loader`：本地文件读取与签名校验
//! - `pipeline`：解码、像素限制、精确缩放、像素格式强制
//! - `bmp`：24 位 BMP 编码与写入
//! - `ico`：多尺寸图标帧渲染与 ICO 编码
//! - `config/error/source`：配置、错误、数据模型
//!
//! ## 调用链
//!
//! ```text
//! artwork::run_jobs
//!    ↓
//! handler.rs（run_bmp / run_ico 错误边界）
//!    ↓
//! bmp.rs / ico.rs（convert_png_to_* 编排 + 阶段耗时日志）
//!    ├─ loader.rs（存在性 + 体积 + 签名）
//!    ├─ pipeline.rs（解码 + 缩放 + 像素格式）
//!    └─ image 编码器（BMP / ICO）
//!    ↓
//! ConversionReport
//! ```

mod bmp;
mod config;
mod error;
mod handler;
mod ico;
mod loader;
mod pipeline;
mod source;

pub use bmp::encode_bmp;
pub use config::{ConvertConfig, DEFAULT_ICON_SIZES, MAX_ICON_SIZE};
pub use error::ConvertError;
pub use handler::ImageConverter;
pub use ico::{encode_ico, render_icon_frames};
pub use source::{ConversionOutcome, ConversionReport, OutputKind, TargetSize};
