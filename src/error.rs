//! 错误类型定义

use crate::graph::VertexId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("站点已存在: {0}")]
    StationAlreadyExists(VertexId),

    #[error("站点不存在: {0}")]
    StationNotFound(VertexId),

    #[error("无效的站点 ID: {id}（当前顶点数 {num_vertices}）")]
    InvalidStation { id: VertexId, num_vertices: usize },

    #[error("顶点容量超限: 请求 {requested}, 上限 {max}")]
    CapacityExceeded { requested: usize, max: usize },

    #[error("操作历史为空")]
    HistoryEmpty,

    #[error("导入错误: {0}")]
    ImportError(String),

    #[error("命令错误: {0}")]
    CommandError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV 错误: {0}")]
    CsvError(#[from] csv::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
