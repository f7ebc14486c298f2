//! Interceptor plan catalog.
//!
//! A plan is a fixed recipe: deploy an interceptor at `start_position`,
//! assume it detonates at `explode_position`, and optionally drop a set of
//! transient walls first to shape enemy pathing. The catalog is static data;
//! its order is significant because selection breaks score ties in favour of
//! earlier plans.

use crate::constants::*;
use crate::error::*;
use crate::location::*;
use fnv::FnvHashSet;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPlan", into = "RawPlan")]
pub struct InterceptorPlan {
    start_position: Position,
    explode_position: Position,
    extra_wall_positions: Vec<Position>,
}

#[derive(Clone, Serialize, Deserialize)]
struct RawPlan {
    start: Position,
    explode: Position,
    #[serde(default)]
    walls: Vec<Position>,
}

impl TryFrom<RawPlan> for InterceptorPlan {
    type Error = PlannerError;

    fn try_from(raw: RawPlan) -> Result<Self> {
        InterceptorPlan::new(raw.start, raw.explode, raw.walls)
    }
}

impl From<InterceptorPlan> for RawPlan {
    fn from(plan: InterceptorPlan) -> Self {
        RawPlan {
            start: plan.start_position,
            explode: plan.explode_position,
            walls: plan.extra_wall_positions,
        }
    }
}

impl InterceptorPlan {
    pub fn new(
        start_position: Position,
        explode_position: Position,
        extra_wall_positions: Vec<Position>,
    ) -> Result<Self> {
        let invalid = |reason: String| PlannerError::InvalidPlan {
            start: start_position,
            reason,
        };

        if !start_position.in_arena() {
            return Err(invalid("start position is outside the arena".to_string()));
        }
        if !explode_position.in_arena() {
            return Err(invalid(format!(
                "explode position {:?} is outside the arena",
                explode_position
            )));
        }
        if let Some(wall) = extra_wall_positions.iter().find(|w| !w.in_arena()) {
            return Err(invalid(format!("wall {:?} is outside the arena", wall)));
        }
        if extra_wall_positions.contains(&start_position) {
            return Err(invalid("a wall blocks the start position".to_string()));
        }
        if !extra_wall_positions.iter().all_unique() {
            return Err(invalid("duplicate wall positions".to_string()));
        }

        Ok(InterceptorPlan {
            start_position,
            explode_position,
            extra_wall_positions,
        })
    }

    pub fn start_position(&self) -> Position {
        self.start_position
    }

    pub fn explode_position(&self) -> Position {
        self.explode_position
    }

    /// Walls to place transiently before deploying, in construction order.
    pub fn extra_wall_positions(&self) -> &[Position] {
        &self.extra_wall_positions
    }

    /// Frames until the interceptor detonates.
    pub fn explode_time(&self) -> u32 {
        explode_time_for_distance(
            self.start_position
                .manhattan_distance(self.explode_position),
        )
    }

    pub fn side(&self) -> Side {
        self.start_position.side()
    }

    /// Whether this plan needs exactly the given wall set, ignoring order.
    pub fn has_walls(&self, walls: &[Position]) -> bool {
        let ours: FnvHashSet<Position> = self.extra_wall_positions.iter().copied().collect();
        let theirs: FnvHashSet<Position> = walls.iter().copied().collect();
        ours == theirs
    }
}

/// Ordered, read-only set of candidate plans.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanCatalog {
    plans: Vec<InterceptorPlan>,
}

impl PlanCatalog {
    pub fn new(plans: Vec<InterceptorPlan>) -> Self {
        PlanCatalog { plans }
    }

    /// Load a catalog from a JSON list of `{"start", "explode", "walls"}` objects.
    pub fn from_json(json: &str) -> Result<PlanCatalog> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn plans(&self) -> &[InterceptorPlan] {
        &self.plans
    }

    pub fn iter(&self) -> impl Iterator<Item = &InterceptorPlan> {
        self.plans.iter()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

/// Walls forming the interceptor ramps next to (7, 6) and (20, 6).
const LEFT_RAMP: [(u8, u8); 9] = [
    (6, 8),
    (6, 9),
    (6, 10),
    (7, 11),
    (8, 6),
    (8, 7),
    (8, 8),
    (8, 9),
    (8, 10),
];

const RIGHT_RAMP: [(u8, u8); 9] = [
    (21, 8),
    (21, 9),
    (21, 10),
    (20, 11),
    (19, 6),
    (19, 7),
    (19, 8),
    (19, 9),
    (19, 10),
];

/// (start, explode) pairs for the left half. The right half is mirrored.
///
/// Enemy units cross the arena on a diagonal and reach our half late, so an
/// interceptor only meets them near the end of their walk. Each pair puts the
/// blast within range of three neighbouring edge launches at detonation time.
/// Together with their mirrors they catch a launch from every enemy edge tile
/// of an open arena.
const LEFT_PLANS: [((u8, u8), (u8, u8)); 5] = [
    ((6, 7), (9, 7)),
    ((4, 9), (1, 12)),
    ((1, 12), (4, 9)),
    ((4, 9), (7, 6)),
    ((6, 7), (9, 4)),
];

fn mirror(x: u8) -> u8 {
    ARENA_SIZE - 1 - x
}

fn positions(coords: &[(u8, u8)]) -> Vec<Position> {
    coords.iter().copied().map(Position::from).collect()
}

/// A built-in plan. The tables above are known to pass `InterceptorPlan::new`.
fn built_in(start: (u8, u8), explode: (u8, u8), walls: &[(u8, u8)]) -> InterceptorPlan {
    InterceptorPlan {
        start_position: start.into(),
        explode_position: explode.into(),
        extra_wall_positions: positions(walls),
    }
}

/// The built-in catalog: open-field plans on both edges, followed by the two
/// ramp plans that need transient walls.
pub fn default_catalog() -> PlanCatalog {
    let mut plans = Vec::new();

    for &((sx, sy), (ex, ey)) in LEFT_PLANS.iter() {
        plans.push(built_in((sx, sy), (ex, ey), &[]));
        plans.push(built_in((mirror(sx), sy), (mirror(ex), ey), &[]));
    }

    plans.push(built_in((7, 6), (10, 3), &LEFT_RAMP));
    plans.push(built_in((20, 6), (17, 3), &RIGHT_RAMP));

    PlanCatalog::new(plans)
}
