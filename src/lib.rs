//! # 安装包素材转换工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  main ── env_logger ── artwork::run_jobs                 │
//! │                          │                               │
//! │  ┌─ artwork ──── 固定任务计划（BMP / 小图 BMP / ICO）     │
//! │  │                                                       │
//! │  ├─ converter ── 读取·解码·缩放·编码 + 错误边界            │
//! │  │   ├─ bmp        24 位 BMP                             │
//! │  │   └─ ico        16~256 多尺寸图标                      │
//! │  │                                                       │
//! │  └─ error ────── AppError（任务之外的错误）                │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 应用级错误类型 `AppError` |
//! | [`converter`] | PNG → BMP / ICO 转换与单任务错误边界 |
//! | [`artwork`] | 安装包素材的固定路径与执行顺序 |

pub mod artwork;
pub mod converter;
pub mod error;
