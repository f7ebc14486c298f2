//! Planner configuration.
//!
//! Everything the planner needs to know about the match is carried in a
//! `PlannerConfig` value handed to each component when it is built. The unit
//! shorthand table is read once from the game's start-of-match config.

use crate::constants::*;
use crate::error::*;
use crate::events::UnitKind;
use serde::{Deserialize, Serialize};

/// Shorthand codes the game uses to name unit types in build requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitCodes {
    pub wall: String,
    pub support: String,
    pub turret: String,
    pub scout: String,
    pub demolisher: String,
    pub interceptor: String,
}

impl Default for UnitCodes {
    fn default() -> Self {
        UnitCodes {
            wall: "FF".to_string(),
            support: "EF".to_string(),
            turret: "DF".to_string(),
            scout: "PI".to_string(),
            demolisher: "EI".to_string(),
            interceptor: "SI".to_string(),
        }
    }
}

#[derive(Deserialize)]
struct GameConfig {
    #[serde(rename = "unitInformation", default)]
    unit_information: Vec<UnitInformation>,
}

#[derive(Deserialize)]
struct UnitInformation {
    shorthand: Option<String>,
}

impl UnitCodes {
    /// Read the shorthand table from the game config JSON. The first six
    /// `unitInformation` entries must each carry a `shorthand`.
    pub fn from_game_config(json: &str) -> Result<UnitCodes> {
        let config: GameConfig = serde_json::from_str(json)?;

        let shorthand = |kind: UnitKind| -> Result<String> {
            let index = kind.index();
            config
                .unit_information
                .get(index)
                .and_then(|info| info.shorthand.clone())
                .ok_or(PlannerError::MissingUnit { index })
        };

        Ok(UnitCodes {
            wall: shorthand(UnitKind::Wall)?,
            support: shorthand(UnitKind::Support)?,
            turret: shorthand(UnitKind::Turret)?,
            scout: shorthand(UnitKind::Scout)?,
            demolisher: shorthand(UnitKind::Demolisher)?,
            interceptor: shorthand(UnitKind::Interceptor)?,
        })
    }

    /// Shorthand for a buildable or deployable unit kind.
    pub fn code(&self, kind: UnitKind) -> Option<&str> {
        match kind {
            UnitKind::Wall => Some(&self.wall),
            UnitKind::Support => Some(&self.support),
            UnitKind::Turret => Some(&self.turret),
            UnitKind::Scout => Some(&self.scout),
            UnitKind::Demolisher => Some(&self.demolisher),
            UnitKind::Interceptor => Some(&self.interceptor),
            UnitKind::Remove | UnitKind::Upgrade => None,
        }
    }
}

/// Tunables for coverage evaluation and plan selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Blast radius of a detonating interceptor.
    pub explosion_range: f64,
    /// Range at which enemy units can hit the interceptor on its way out.
    pub attacker_range: f64,
    /// Selection stops once this much probability mass is covered.
    pub coverage_threshold: f64,
    pub risk_weight: f64,
    pub explode_time_weight: f64,
    pub new_wall_weight: f64,
    pub units: UnitCodes,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            explosion_range: DEFAULT_EXPLOSION_RANGE,
            attacker_range: DEFAULT_ATTACKER_RANGE,
            coverage_threshold: DEFAULT_COVERAGE_THRESHOLD,
            risk_weight: DEFAULT_RISK_WEIGHT,
            explode_time_weight: DEFAULT_EXPLODE_TIME_WEIGHT,
            new_wall_weight: DEFAULT_NEW_WALL_WEIGHT,
            units: UnitCodes::default(),
        }
    }
}

impl PlannerConfig {
    pub fn from_json(json: &str) -> Result<PlannerConfig> {
        Ok(serde_json::from_str(json)?)
    }
}
