use crate::events::UnitKind;
use crate::location::*;
use serde::{Deserialize, Serialize};

/// The four diagonal edges of the arena. Enemy units score by reaching one of
/// the two bottom edges; ours score on the top edges.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum MapEdge {
    TopRight,
    TopLeft,
    BottomLeft,
    BottomRight,
}

impl MapEdge {
    /// The edge a unit launched from this edge is heading for.
    pub fn opposite(self) -> MapEdge {
        match self {
            MapEdge::TopRight => MapEdge::BottomLeft,
            MapEdge::TopLeft => MapEdge::BottomRight,
            MapEdge::BottomLeft => MapEdge::TopRight,
            MapEdge::BottomRight => MapEdge::TopLeft,
        }
    }
}

/// Read-only view of the simulation used while planning.
/// Implementations must be deterministic for a fixed map state.
pub trait SimulationOracle {
    /// Step-by-step path of a mobile unit launched from `position`, or `None`
    /// if `position` is not a valid launch point.
    fn find_path_to_edge(&self, position: Position) -> Option<Vec<Position>>;

    /// The simulation's native distance between two tiles.
    fn distance_between(&self, a: Position, b: Position) -> f64;

    fn edge_region(&self, edge: MapEdge) -> Vec<Position>;
}

/// Build and deploy requests. Each call returns how many of the requested
/// positions the simulation accepted; the planner never depends on it.
pub trait ConstructionSink {
    fn spawn(&mut self, kind: UnitKind, positions: &[Position]) -> u32;

    fn remove(&mut self, positions: &[Position]) -> u32;

    fn upgrade(&mut self, positions: &[Position]) -> u32;
}
