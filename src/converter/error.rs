//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载转换链路中的所有错误来源（读取 / 解码 / 缩放 / 编码 / 写入）。
//! 通过 `thiserror` 保持人类可读错误，调用侧在错误边界统一渲染为一行失败信息。

/// 图片转换统一错误类型。
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("缩放错误：{0}")]
    Resize(String),

    #[error("编码错误：{0}")]
    Encode(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    #[error("配置错误：{0}")]
    InvalidConfig(String),
}
