//! Offline reference arena.
//!
//! `ArenaOracle` models the 28x28 diamond map with a set of blocking
//! structures. It answers planning queries with a plain shortest-path model
//! (cardinal moves, one tile per step) and applies construction requests to
//! its own structure set. It does not simulate combat. It is meant for tests,
//! benchmarks and offline replay of recorded launch histories, not as a
//! replacement for the match engine's pathing rules.
//!
//! Units always take a shortest path. Among equally short steps they switch
//! axis from their previous move (vertical on the first move), then prefer
//! the step heading toward their target edge. In an open arena this walks a
//! unit down a clean diagonal staircase.

use crate::constants::*;
use crate::events::UnitKind;
use crate::location::*;
use crate::oracle::*;
use fnv::FnvHashSet;
use pathfinding::directed::bfs::bfs_reach;
use std::collections::VecDeque;

/// Neighbor offsets for cardinal movement.
pub const NEIGHBORS_4: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

const UNREACHED: u32 = u32::MAX;

#[derive(Clone, Debug, Default)]
pub struct ArenaOracle {
    structures: FnvHashSet<Position>,
    upgraded: FnvHashSet<Position>,
    deployments: Vec<(UnitKind, Position)>,
}

impl ArenaOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_structures(mut self, positions: impl IntoIterator<Item = Position>) -> Self {
        self.structures
            .extend(positions.into_iter().filter(|p| p.in_arena()));
        self
    }

    pub fn is_blocked(&self, position: Position) -> bool {
        self.structures.contains(&position)
    }

    pub fn structures(&self) -> &FnvHashSet<Position> {
        &self.structures
    }

    /// Mobile units deployed so far, in request order.
    pub fn deployments(&self) -> &[(UnitKind, Position)] {
        &self.deployments
    }

    /// The edge `position` lies on, or the edge of the quadrant it is in.
    pub fn launch_edge(position: Position) -> MapEdge {
        let (x, y) = (position.x(), position.y());
        match (x < HALF_ARENA, y < HALF_ARENA) {
            (true, true) => MapEdge::BottomLeft,
            (false, true) => MapEdge::BottomRight,
            (true, false) => MapEdge::TopLeft,
            (false, false) => MapEdge::TopRight,
        }
    }

    fn successors(&self, position: Position) -> Vec<Position> {
        NEIGHBORS_4
            .iter()
            .filter_map(|&(dx, dy)| position.offset(dx, dy))
            .filter(|p| !self.is_blocked(*p))
            .collect()
    }

    /// Steps from every open tile to the nearest of `goals`.
    fn distance_field(&self, goals: &[Position]) -> Vec<u32> {
        let mut dist = vec![UNREACHED; ARENA_SIZE as usize * ARENA_SIZE as usize];
        let mut queue: VecDeque<(Position, u32)> = VecDeque::new();

        for &goal in goals {
            if !goal.in_arena() || self.is_blocked(goal) || dist[index(goal)] != UNREACHED {
                continue;
            }
            dist[index(goal)] = 0;
            queue.push_back((goal, 0));
        }

        while let Some((position, d)) = queue.pop_front() {
            for next in self.successors(position) {
                let idx = index(next);
                if dist[idx] != UNREACHED {
                    continue;
                }
                dist[idx] = d + 1;
                queue.push_back((next, d + 1));
            }
        }

        dist
    }
}

fn index(position: Position) -> usize {
    position.y() as usize * ARENA_SIZE as usize + position.x() as usize
}

/// Unit direction of travel toward `edge`.
fn heading(edge: MapEdge) -> (i8, i8) {
    match edge {
        MapEdge::TopRight => (1, 1),
        MapEdge::TopLeft => (-1, 1),
        MapEdge::BottomLeft => (-1, -1),
        MapEdge::BottomRight => (1, -1),
    }
}

/// Follow `field` downhill from `launch` until it reaches zero.
/// `launch` must be reached by the field.
fn walk(launch: Position, target: MapEdge, field: &[u32]) -> Vec<Position> {
    let (hx, hy) = heading(target);
    let mut path = vec![launch];
    let mut current = launch;
    let mut last_vertical: Option<bool> = None;

    while field[index(current)] > 0 {
        let want = field[index(current)] - 1;
        let step = NEIGHBORS_4
            .iter()
            .filter_map(|&(dx, dy)| current.offset(dx, dy).map(|p| (dx, dy, p)))
            .filter(|&(_, _, p)| field[index(p)] == want)
            .min_by_key(|&(dx, dy, _)| {
                let vertical = dx == 0;
                let repeats_axis = last_vertical.map_or(!vertical, |last| last == vertical);
                let away = (dx != 0 && dx != hx) || (dy != 0 && dy != hy);
                (repeats_axis, away)
            });

        let (dx, _, next) = match step {
            Some(step) => step,
            None => break,
        };
        last_vertical = Some(dx == 0);
        path.push(next);
        current = next;
    }

    path
}

/// How far `position` is from `edge`, measured along the arena diagonal.
fn distance_to_edge(position: Position, edge: MapEdge) -> i16 {
    let (x, y) = (position.x() as i16, position.y() as i16);
    let half = HALF_ARENA as i16;
    let far = ARENA_SIZE as i16 - 1;
    match edge {
        MapEdge::BottomLeft => x + y - (half - 1),
        MapEdge::BottomRight => (half + y) - x,
        MapEdge::TopLeft => (x + half) - y,
        MapEdge::TopRight => (far + half) - (x + y),
    }
}

fn edge_tiles(edge: MapEdge) -> Vec<Position> {
    (0..HALF_ARENA)
        .map(|i| match edge {
            MapEdge::BottomLeft => Position::new(i, HALF_ARENA - 1 - i),
            MapEdge::BottomRight => Position::new(HALF_ARENA + i, i),
            MapEdge::TopLeft => Position::new(i, HALF_ARENA + i),
            MapEdge::TopRight => Position::new(HALF_ARENA + i, ARENA_SIZE - 1 - i),
        })
        .collect()
}

impl SimulationOracle for ArenaOracle {
    fn find_path_to_edge(&self, position: Position) -> Option<Vec<Position>> {
        if !position.in_arena() || self.is_blocked(position) {
            return None;
        }

        let target = Self::launch_edge(position).opposite();
        let field = self.distance_field(&edge_tiles(target));
        if field[index(position)] != UNREACHED {
            return Some(walk(position, target, &field));
        }

        // The target edge is walled off; the unit walks as deep as it can and stalls.
        let deepest = bfs_reach(position, |p| self.successors(*p))
            .min_by_key(|p| distance_to_edge(*p, target))?;
        let field = self.distance_field(&[deepest]);
        Some(walk(position, target, &field))
    }

    fn distance_between(&self, a: Position, b: Position) -> f64 {
        a.euclidean_distance(b)
    }

    fn edge_region(&self, edge: MapEdge) -> Vec<Position> {
        edge_tiles(edge)
    }
}

impl ConstructionSink for ArenaOracle {
    fn spawn(&mut self, kind: UnitKind, positions: &[Position]) -> u32 {
        let mut accepted = 0;
        for &position in positions {
            if !position.in_arena() || self.is_blocked(position) {
                continue;
            }
            match kind {
                UnitKind::Wall | UnitKind::Support | UnitKind::Turret => {
                    self.structures.insert(position);
                }
                UnitKind::Scout | UnitKind::Demolisher | UnitKind::Interceptor => {
                    self.deployments.push((kind, position));
                }
                UnitKind::Remove | UnitKind::Upgrade => continue,
            }
            accepted += 1;
        }
        accepted
    }

    /// Removal takes down whatever structure stands on a tile, including one
    /// that was there before a transient wall request for the same tile.
    fn remove(&mut self, positions: &[Position]) -> u32 {
        let mut accepted = 0;
        for position in positions {
            if self.structures.remove(position) {
                self.upgraded.remove(position);
                accepted += 1;
            }
        }
        accepted
    }

    fn upgrade(&mut self, positions: &[Position]) -> u32 {
        let mut accepted = 0;
        for &position in positions {
            if self.is_blocked(position) && self.upgraded.insert(position) {
                accepted += 1;
            }
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_have_fourteen_tiles_inside_the_arena() {
        let oracle = ArenaOracle::new();
        for edge in [
            MapEdge::TopRight,
            MapEdge::TopLeft,
            MapEdge::BottomLeft,
            MapEdge::BottomRight,
        ] {
            let tiles = oracle.edge_region(edge);
            assert_eq!(tiles.len(), 14);
            assert!(tiles.iter().all(|p| p.in_arena()));
            assert!(tiles.iter().all(|p| distance_to_edge(*p, edge) == 0));
            assert!(tiles.iter().all(|p| ArenaOracle::launch_edge(*p) == edge));
        }
    }

    #[test]
    fn open_arena_path_crosses_to_the_opposite_edge() {
        let oracle = ArenaOracle::new();
        let launch = Position::new(4, 18);
        let path = oracle.find_path_to_edge(launch).unwrap();

        assert_eq!(path[0], launch);
        let end = *path.last().unwrap();
        assert!(oracle.edge_region(MapEdge::BottomRight).contains(&end));
        for step in path.windows(2) {
            assert_eq!(step[0].manhattan_distance(step[1]), 1);
        }
    }

    #[test]
    fn open_arena_paths_are_diagonal_staircases() {
        let oracle = ArenaOracle::new();

        let left = oracle.find_path_to_edge(Position::new(4, 18)).unwrap();
        let expected: Vec<Position> = (0..29u8)
            .map(|t| Position::new(4 + t / 2, 18 - (t + 1) / 2))
            .collect();
        assert_eq!(left, expected);
        assert_eq!(left[28], Position::new(18, 4));

        // Mirrored launch, mirrored path.
        let right = oracle.find_path_to_edge(Position::new(23, 18)).unwrap();
        let mirrored: Vec<Position> = left
            .iter()
            .map(|p| Position::new(ARENA_SIZE - 1 - p.x(), p.y()))
            .collect();
        assert_eq!(right, mirrored);
        assert_eq!(right[28], Position::new(9, 4));
    }

    #[test]
    fn invalid_launches_have_no_path() {
        let oracle = ArenaOracle::new().with_structures([Position::new(4, 18)]);
        assert_eq!(oracle.find_path_to_edge(Position::new(0, 0)), None);
        assert_eq!(oracle.find_path_to_edge(Position::new(4, 18)), None);
    }

    #[test]
    fn walled_off_target_makes_the_unit_stall() {
        // Seal the whole row just above our half.
        let row: Vec<Position> = (0..ARENA_SIZE)
            .map(|x| Position::new(x, HALF_ARENA - 1))
            .filter(|p| p.in_arena())
            .collect();
        let oracle = ArenaOracle::new().with_structures(row);

        let path = oracle.find_path_to_edge(Position::new(4, 18)).unwrap();
        let end = *path.last().unwrap();

        assert!(!oracle.edge_region(MapEdge::BottomRight).contains(&end));
        assert!(!oracle.edge_region(MapEdge::BottomLeft).contains(&end));
        assert_eq!(end.y(), HALF_ARENA);
    }

    #[test]
    fn transient_walls_leave_nothing_behind() {
        let mut oracle = ArenaOracle::new();
        let walls = [Position::new(6, 8), Position::new(8, 8), Position::new(0, 0)];

        assert_eq!(oracle.spawn(UnitKind::Wall, &walls), 2);
        assert!(oracle.is_blocked(Position::new(6, 8)));
        assert_eq!(oracle.upgrade(&walls), 2);
        assert_eq!(oracle.remove(&walls), 2);

        assert!(oracle.structures().is_empty());
        assert!(oracle.upgraded.is_empty());
    }

    #[test]
    fn transient_wall_over_an_existing_wall_takes_it_down() {
        let mut oracle = ArenaOracle::new().with_structures([Position::new(6, 8)]);
        let walls = [Position::new(6, 8), Position::new(6, 9)];

        assert_eq!(oracle.spawn(UnitKind::Wall, &walls), 1);
        assert_eq!(oracle.remove(&walls), 2);
        assert!(oracle.structures().is_empty());
    }

    #[test]
    fn interceptors_are_recorded_in_order() {
        let mut oracle = ArenaOracle::new().with_structures([Position::new(7, 6)]);
        oracle.spawn(
            UnitKind::Interceptor,
            &[Position::new(4, 9), Position::new(7, 6), Position::new(23, 9)],
        );
        assert_eq!(
            oracle.deployments(),
            &[
                (UnitKind::Interceptor, Position::new(4, 9)),
                (UnitKind::Interceptor, Position::new(23, 9)),
            ]
        );
    }
}
