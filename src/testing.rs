//! Scripted oracle for unit tests.

use crate::events::UnitKind;
use crate::location::*;
use crate::oracle::*;
use fnv::FnvHashMap;
use std::cell::Cell;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkCall {
    Spawn(UnitKind, Vec<Position>),
    Remove(Vec<Position>),
    Upgrade(Vec<Position>),
}

/// Oracle answering from fixed tables. Launches without a scripted path are
/// treated as invalid launch points. All scripted edge tiles are reported as
/// the bottom-left edge.
#[derive(Default)]
pub struct ScriptedOracle {
    paths: FnvHashMap<Position, Vec<Position>>,
    edge: Vec<Position>,
    path_queries: Cell<usize>,
    queries: Cell<usize>,
    pub calls: Vec<SinkCall>,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, launch: Position, path: Vec<Position>) -> Self {
        self.paths.insert(launch, path);
        self
    }

    pub fn with_edge(mut self, tiles: &[(u8, u8)]) -> Self {
        self.edge.extend(tiles.iter().copied().map(Position::from));
        self
    }

    pub fn path_queries(&self) -> usize {
        self.path_queries.get()
    }

    /// Number of oracle queries of any kind made so far.
    pub fn queries(&self) -> usize {
        self.queries.get()
    }

    fn touch(&self) {
        self.queries.set(self.queries.get() + 1);
    }
}

impl SimulationOracle for ScriptedOracle {
    fn find_path_to_edge(&self, position: Position) -> Option<Vec<Position>> {
        self.touch();
        self.path_queries.set(self.path_queries.get() + 1);
        self.paths.get(&position).cloned()
    }

    fn distance_between(&self, a: Position, b: Position) -> f64 {
        self.touch();
        a.euclidean_distance(b)
    }

    fn edge_region(&self, edge: MapEdge) -> Vec<Position> {
        self.touch();
        match edge {
            MapEdge::BottomLeft => self.edge.clone(),
            _ => Vec::new(),
        }
    }
}

impl ConstructionSink for ScriptedOracle {
    fn spawn(&mut self, kind: UnitKind, positions: &[Position]) -> u32 {
        self.calls.push(SinkCall::Spawn(kind, positions.to_vec()));
        positions.len() as u32
    }

    fn remove(&mut self, positions: &[Position]) -> u32 {
        self.calls.push(SinkCall::Remove(positions.to_vec()));
        positions.len() as u32
    }

    fn upgrade(&mut self, positions: &[Position]) -> u32 {
        self.calls.push(SinkCall::Upgrade(positions.to_vec()));
        positions.len() as u32
    }
}
