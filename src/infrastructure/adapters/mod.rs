//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod image;
pub mod llm;
pub mod speech;
pub mod storage;

pub use image::*;
pub use llm::*;
pub use speech::*;
pub use storage::*;
