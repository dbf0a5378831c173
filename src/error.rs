//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 单个转换任务的失败由 `converter` 的错误边界吞掉并渲染为报告行；
//! `AppError` 只承载任务之外、会阻止整次运行的错误（例如转换器配置非法）。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `ConvertError` 与 `std::io::Error` 提供 `From` 转换，无需手动 map。

use crate::converter::ConvertError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 转换器初始化失败
    #[error("{0}")]
    Convert(#[from] ConvertError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),
}
