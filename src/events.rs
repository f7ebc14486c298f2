//! Action frame decoding.
//!
//! The game streams one action frame per simulated frame. Each frame carries
//! an `events` object whose `spawn` list reports every unit that appeared in
//! that frame as `[[x, y], unit_type_index, unit_id, owner]`. Only enemy
//! spawns of tracked mobile categories are of interest to the planner.

use crate::error::*;
use crate::location::*;
use bitflags::*;
use log::*;
use serde::{Deserialize, Serialize};

/// Unit kinds in the order the game config lists them.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum UnitKind {
    Wall,
    Support,
    Turret,
    Scout,
    Demolisher,
    Interceptor,
    Remove,
    Upgrade,
}

impl UnitKind {
    pub fn from_index(index: usize) -> Option<UnitKind> {
        match index {
            0 => Some(UnitKind::Wall),
            1 => Some(UnitKind::Support),
            2 => Some(UnitKind::Turret),
            3 => Some(UnitKind::Scout),
            4 => Some(UnitKind::Demolisher),
            5 => Some(UnitKind::Interceptor),
            6 => Some(UnitKind::Remove),
            7 => Some(UnitKind::Upgrade),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            UnitKind::Wall => 0,
            UnitKind::Support => 1,
            UnitKind::Turret => 2,
            UnitKind::Scout => 3,
            UnitKind::Demolisher => 4,
            UnitKind::Interceptor => 5,
            UnitKind::Remove => 6,
            UnitKind::Upgrade => 7,
        }
    }

    pub fn category(self) -> UnitCategories {
        match self {
            UnitKind::Wall => UnitCategories::WALL,
            UnitKind::Support => UnitCategories::SUPPORT,
            UnitKind::Turret => UnitCategories::TURRET,
            UnitKind::Scout => UnitCategories::SCOUT,
            UnitKind::Demolisher => UnitCategories::DEMOLISHER,
            UnitKind::Interceptor => UnitCategories::INTERCEPTOR,
            UnitKind::Remove | UnitKind::Upgrade => UnitCategories::NONE,
        }
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct UnitCategories: u8 {
        const NONE = 0;
        const WALL = 1;
        const SUPPORT = 2;
        const TURRET = 4;
        const SCOUT = 8;
        const DEMOLISHER = 16;
        const INTERCEPTOR = 32;

        const STRUCTURES = Self::WALL.bits() | Self::SUPPORT.bits() | Self::TURRET.bits();
        const MOBILE = Self::SCOUT.bits() | Self::DEMOLISHER.bits() | Self::INTERCEPTOR.bits();
    }
}

impl Default for UnitCategories {
    fn default() -> Self {
        UnitCategories::MOBILE
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Owner {
    Us,
    Enemy,
}

impl Owner {
    fn from_player_index(index: u8) -> Option<Owner> {
        match index {
            1 => Some(Owner::Us),
            2 => Some(Owner::Enemy),
            _ => None,
        }
    }
}

/// A single unit spawn reported by an action frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SpawnEvent {
    pub position: Position,
    pub kind: UnitKind,
    pub owner: Owner,
}

#[derive(Deserialize)]
struct RawFrame {
    #[serde(default)]
    events: RawEvents,
}

#[derive(Default, Deserialize)]
struct RawEvents {
    #[serde(default)]
    spawn: Vec<serde_json::Value>,
}

type RawSpawn = (Position, usize, serde_json::Value, u8);

/// Decode every spawn event in an action frame.
///
/// Entries that don't decode are skipped with a warning rather than failing
/// the whole frame. A frame that isn't valid JSON at all is an error.
pub fn parse_spawn_events(frame: &str) -> Result<Vec<SpawnEvent>> {
    let raw: RawFrame = serde_json::from_str(frame)?;

    let mut events = Vec::with_capacity(raw.events.spawn.len());
    for entry in raw.events.spawn {
        let (position, type_index, _id, player): RawSpawn = match serde_json::from_value(entry) {
            Ok(spawn) => spawn,
            Err(err) => {
                warn!("Dropping undecodable spawn entry: {}", err);
                continue;
            }
        };

        let kind = match UnitKind::from_index(type_index) {
            Some(kind) => kind,
            None => {
                warn!("Dropping spawn with unknown unit type {}", type_index);
                continue;
            }
        };

        let owner = match Owner::from_player_index(player) {
            Some(owner) => owner,
            None => {
                warn!("Dropping spawn with unknown owner {}", player);
                continue;
            }
        };

        events.push(SpawnEvent {
            position,
            kind,
            owner,
        });
    }

    Ok(events)
}

/// Launch positions of enemy units whose category is in `tracked`.
pub fn enemy_launch_positions(
    events: &[SpawnEvent],
    tracked: UnitCategories,
) -> impl Iterator<Item = Position> + '_ {
    events
        .iter()
        .filter(move |e| e.owner == Owner::Enemy && tracked.intersects(e.kind.category()))
        .map(|e| e.position)
}
