//! Public API for the interceptor planner.
//!
//! The `PlannerBuilder` provides a fluent, append-only API for configuring
//! the planner. The resulting `InterceptorPlanner` is fed action frames as
//! they stream in and asked for a deployment once per turn.

use crate::catalog::*;
use crate::config::*;
use crate::deploy::*;
use crate::error::*;
use crate::events::*;
use crate::location::*;
use crate::oracle::*;
use crate::probability::*;
use crate::selector::*;
use log::*;

/// Append-only builder for configuring the planner.
pub struct PlannerBuilder {
    config: PlannerConfig,
    plans: Vec<InterceptorPlan>,
    tracked: UnitCategories,
}

impl PlannerBuilder {
    /// Start with an empty catalog.
    pub fn new() -> Self {
        PlannerBuilder {
            config: PlannerConfig::default(),
            plans: Vec::new(),
            tracked: UnitCategories::default(),
        }
    }

    pub fn config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the unit shorthand table, keeping the rest of the config.
    pub fn units(mut self, units: UnitCodes) -> Self {
        self.config.units = units;
        self
    }

    /// Append a plan to the end of the catalog.
    pub fn add_plan(mut self, plan: InterceptorPlan) -> Self {
        self.plans.push(plan);
        self
    }

    /// Append every plan of `catalog`, preserving its order.
    pub fn add_catalog(mut self, catalog: PlanCatalog) -> Self {
        self.plans.extend(catalog.plans().iter().cloned());
        self
    }

    /// Unit categories whose enemy spawns count as launches (default: mobile units).
    pub fn track(mut self, categories: UnitCategories) -> Self {
        self.tracked = categories;
        self
    }

    pub fn build(self) -> InterceptorPlanner {
        InterceptorPlanner {
            config: self.config,
            catalog: PlanCatalog::new(self.plans),
            tracked: self.tracked,
            model: PositionProbabilityModel::new(),
        }
    }
}

impl Default for PlannerBuilder {
    /// Returns a builder pre-loaded with the built-in catalog.
    fn default() -> Self {
        PlannerBuilder::new().add_catalog(default_catalog())
    }
}

/// Per-match planner state: configuration, the static catalog and the
/// launch history observed so far.
pub struct InterceptorPlanner {
    config: PlannerConfig,
    catalog: PlanCatalog,
    tracked: UnitCategories,
    model: PositionProbabilityModel,
}

impl InterceptorPlanner {
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &PlanCatalog {
        &self.catalog
    }

    pub fn model(&self) -> &PositionProbabilityModel {
        &self.model
    }

    /// Adopt the unit shorthands from the game's start-of-match config.
    pub fn on_game_start(&mut self, game_config: &str) -> Result<()> {
        self.config.units = UnitCodes::from_game_config(game_config)?;
        Ok(())
    }

    /// Shorthand the game expects for `kind` in build requests.
    pub fn unit_code(&self, kind: UnitKind) -> Option<&str> {
        self.config.units.code(kind)
    }

    pub fn record_launch(&mut self, position: Position) {
        self.model.record(position);
    }

    /// Record every tracked enemy launch in an action frame. Returns the
    /// number of launches recorded.
    pub fn on_action_frame(&mut self, frame: &str) -> Result<usize> {
        let events = parse_spawn_events(frame)?;
        let mut recorded = 0;
        for position in enemy_launch_positions(&events, self.tracked) {
            self.model.record(position);
            recorded += 1;
        }
        if recorded > 0 {
            trace!(
                "Recorded {} enemy launch(es), {} total",
                recorded,
                self.model.total()
            );
        }
        Ok(recorded)
    }

    /// Choose this turn's interceptor plans against the current map.
    pub fn plan_turn<O: SimulationOracle + ?Sized>(&self, oracle: &O) -> PlanSelection {
        let distribution = self.model.distribution();
        PlanSelector::new(self.config.clone()).select(&self.catalog, &distribution, oracle)
    }

    /// Plan the turn and issue the resulting requests to `oracle`.
    pub fn deploy_turn<O: SimulationOracle + ConstructionSink + ?Sized>(
        &self,
        oracle: &mut O,
    ) -> Vec<DeployOperation> {
        let selection = self.plan_turn(&*oracle);
        DeploymentExecutor::execute(&selection, oracle)
    }
}
