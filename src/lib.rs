//! 交互式前景提取的种子矩形选择工具。
//!
//! [`selection`] 持有选区状态机，[`display`] 负责窗口与事件合成，
//! [`source`] 负责图片解码，[`segmenter`] 定义下游分割接口。

pub mod display;
pub mod segmenter;
pub mod selection;
pub mod source;
