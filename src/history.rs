//! 操作历史与撤销
//!
//! 每次成功的拓扑修改记录为一条带时间戳的操作，撤销时执行结构上的逆操作。

use crate::config::RouteMode;
use crate::error::{Error, Result};
use crate::graph::{DeletedStation, Graph, RouteEdge, Station, VertexId, Weight};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// 拓扑修改操作
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// 添加站点
    AddStation { id: VertexId, name: String },
    /// 删除站点，连同被删除的线路
    DeleteStation {
        id: VertexId,
        station: Option<Station>,
        routes: Vec<RouteEdge>,
    },
    /// 添加线路；`previous` 为覆盖前的权重
    AddRoute {
        source: VertexId,
        destination: VertexId,
        weight: Weight,
        previous: Option<Weight>,
    },
    /// 删除线路
    DeleteRoute {
        source: VertexId,
        destination: VertexId,
        weight: Weight,
    },
}

impl Action {
    /// 操作类型名称
    pub fn kind(&self) -> &'static str {
        match self {
            Action::AddStation { .. } => "ADD_STATION",
            Action::DeleteStation { .. } => "DELETE_STATION",
            Action::AddRoute { .. } => "ADD_ROUTE",
            Action::DeleteRoute { .. } => "DELETE_ROUTE",
        }
    }

    /// 在图上执行逆操作
    fn revert(&self, graph: &mut Graph) -> Result<()> {
        match self {
            // 只注销站点记录；之前已存在的线路与扩容后的顶点空间保持不变
            Action::AddStation { id, .. } => {
                graph.unregister_station(*id)?;
            }
            Action::DeleteStation {
                station, routes, ..
            } => {
                if let Some(station) = station {
                    graph.add_station(station.id(), station.name())?;
                }
                for r in routes {
                    graph.add_route(r.source, r.destination, r.weight)?;
                }
            }
            Action::AddRoute {
                source,
                destination,
                previous,
                ..
            } => match previous {
                Some(old) => {
                    graph.add_route(*source, *destination, *old)?;
                }
                None => {
                    graph.delete_route(*source, *destination)?;
                }
            },
            Action::DeleteRoute {
                source,
                destination,
                weight,
            } => {
                graph.add_route(*source, *destination, *weight)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::AddStation { id, name } => write!(f, "{} {} ({})", self.kind(), id, name),
            Action::DeleteStation { id, station, routes } => {
                let name = station.as_ref().map(Station::name).unwrap_or("-");
                write!(f, "{} {} ({}), {} route(s)", self.kind(), id, name, routes.len())
            }
            Action::AddRoute {
                source,
                destination,
                weight,
                ..
            }
            | Action::DeleteRoute {
                source,
                destination,
                weight,
            } => write!(f, "{} {} -> {} (weight: {})", self.kind(), source, destination, weight),
        }
    }
}

/// 历史条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub action: Action,
    pub recorded_at: DateTime<Utc>,
}

/// 后进先出的操作历史
#[derive(Debug, Clone, Default)]
pub struct ActionHistory {
    entries: Vec<HistoryEntry>,
}

impl ActionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一条操作
    pub fn record(&mut self, action: Action) {
        self.entries.push(HistoryEntry {
            action,
            recorded_at: Utc::now(),
        });
    }

    /// 最近一条操作
    pub fn peek(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// 从新到旧遍历
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// 撤销最近一条操作
    ///
    /// 逆操作失败时条目保留在历史中。
    pub fn undo(&mut self, graph: &mut Graph) -> Result<Action> {
        let entry = self.entries.last().ok_or(Error::HistoryEmpty)?;
        entry.action.revert(graph)?;

        let action = self
            .entries
            .pop()
            .map(|e| e.action)
            .ok_or(Error::HistoryEmpty)?;
        info!(action = %action, "撤销操作");
        Ok(action)
    }
}

/// 编辑会话：图 + 操作历史
///
/// 通过会话执行的修改在成功后才写入历史。
#[derive(Debug, Clone, Default)]
pub struct Session {
    graph: Graph,
    history: ActionHistory,
}

impl Session {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            history: ActionHistory::new(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    pub fn add_station(&mut self, id: VertexId, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        self.graph.add_station(id, name.clone())?;
        self.history.record(Action::AddStation { id, name });
        Ok(())
    }

    pub fn delete_station(&mut self, id: VertexId) -> Result<DeletedStation> {
        let deleted = self.graph.delete_station(id)?;
        self.history.record(Action::DeleteStation {
            id,
            station: deleted.station.clone(),
            routes: deleted.routes.clone(),
        });
        Ok(deleted)
    }

    pub fn add_route(
        &mut self,
        source: VertexId,
        destination: VertexId,
        weight: Weight,
    ) -> Result<Option<Weight>> {
        let previous = self.graph.add_route(source, destination, weight)?;
        self.history.record(Action::AddRoute {
            source,
            destination,
            weight,
            previous,
        });
        Ok(previous)
    }

    /// 删除线路；线路不存在时不写入历史
    pub fn delete_route(&mut self, source: VertexId, destination: VertexId) -> Result<Option<Weight>> {
        let removed = self.graph.delete_route(source, destination)?;
        if let Some(weight) = removed {
            self.history.record(Action::DeleteRoute {
                source,
                destination,
                weight,
            });
        }
        Ok(removed)
    }

    /// 切换线路语义（不改变拓扑，不写入历史）
    pub fn set_route_mode(&mut self, mode: RouteMode) {
        self.graph.set_route_mode(mode);
    }

    /// 撤销最近一次修改
    pub fn undo(&mut self) -> Result<Action> {
        self.history.undo(&mut self.graph)
    }

    /// 清空历史
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
