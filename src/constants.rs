pub const ARENA_SIZE: u8 = 28;
pub const HALF_ARENA: u8 = 14;

/// Largest x coordinate that still belongs to the left half for plan grouping.
pub const LEFT_SIDE_MAX_X: u8 = 12;

/// Simulation frames an interceptor needs to cross one tile.
pub const INTERCEPTOR_FRAMES_PER_TILE: u32 = 4;

/// Radius of the interceptor self-destruct blast.
pub const DEFAULT_EXPLOSION_RANGE: f64 = 1.5;
/// Radius within which enemy units can hit the interceptor before it detonates.
pub const DEFAULT_ATTACKER_RANGE: f64 = 3.5;

/// Stop selecting once this much probability mass is covered.
pub const DEFAULT_COVERAGE_THRESHOLD: f64 = 0.9;

pub const DEFAULT_RISK_WEIGHT: f64 = 0.5;
pub const DEFAULT_EXPLODE_TIME_WEIGHT: f64 = 0.001;
pub const DEFAULT_NEW_WALL_WEIGHT: f64 = 0.001;

/// Number of frames until an interceptor travelling `tiles` tiles detonates.
/// One extra tile's worth of frames accounts for the deployment delay.
#[inline]
pub fn explode_time_for_distance(tiles: u32) -> u32 {
    INTERCEPTOR_FRAMES_PER_TILE * (tiles + 1)
}

/// Whether `(x, y)` lies inside the diamond shaped arena.
pub fn in_arena_bounds(x: i16, y: i16) -> bool {
    let half = HALF_ARENA as i16;
    if !(0..ARENA_SIZE as i16).contains(&x) || !(0..ARENA_SIZE as i16).contains(&y) {
        return false;
    }
    let row = if y < half { y } else { ARENA_SIZE as i16 - 1 - y };
    let start_x = half - 1 - row;
    let end_x = half + row;
    (start_x..=end_x).contains(&x)
}
