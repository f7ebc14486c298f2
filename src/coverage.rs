//! Coverage evaluation for a single interceptor plan.
//!
//! For every launch position in the distribution the oracle predicts the
//! enemy's path on the current map. A launch counts as covered when the
//! interceptor would catch the unit at detonation time, or when the unit is
//! not a threat anyway (no valid path, or a path that stalls short of the
//! scoring edge). Launches that reach the scoring edge before detonation are
//! never covered. Independently, a launch adds to the plan's risk if the unit
//! passes within attacking range of the detonation point on its way there.

use crate::catalog::InterceptorPlan;
use crate::config::PlannerConfig;
use crate::location::*;
use crate::oracle::*;
use crate::probability::Distribution;
use fnv::{FnvHashMap, FnvHashSet};

/// Outcome of evaluating one plan against one distribution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoverageReport {
    /// Probability mass neutralized by the plan.
    pub coverage: f64,
    /// Launch positions that make up `coverage`, in distribution order.
    pub covered_positions: Vec<Position>,
    /// Probability mass of launches that could hit the interceptor first.
    pub risk: f64,
}

pub struct CoverageEvaluator<'a, O: SimulationOracle + ?Sized> {
    oracle: &'a O,
    explosion_range: f64,
    attacker_range: f64,
    /// Edge tiles where enemy units score. Fetched on first use.
    scoring_edge: Option<FnvHashSet<Position>>,
    /// Paths are fixed for the lifetime of one planning pass.
    paths: FnvHashMap<Position, Option<Vec<Position>>>,
}

impl<'a, O: SimulationOracle + ?Sized> CoverageEvaluator<'a, O> {
    pub fn new(oracle: &'a O, config: &PlannerConfig) -> Self {
        CoverageEvaluator {
            oracle,
            explosion_range: config.explosion_range,
            attacker_range: config.attacker_range,
            scoring_edge: None,
            paths: FnvHashMap::default(),
        }
    }

    pub fn evaluate(
        &mut self,
        plan: &InterceptorPlan,
        distribution: &Distribution,
    ) -> CoverageReport {
        let oracle = self.oracle;
        let scoring_edge = self.scoring_edge.get_or_insert_with(|| {
            oracle
                .edge_region(MapEdge::BottomLeft)
                .into_iter()
                .chain(oracle.edge_region(MapEdge::BottomRight))
                .collect()
        });

        let explode_time = plan.explode_time() as usize;
        let explode_position = plan.explode_position();
        let mut report = CoverageReport::default();

        for (position, probability) in distribution.iter() {
            let path = self
                .paths
                .entry(position)
                .or_insert_with(|| oracle.find_path_to_edge(position));

            let path = match path {
                None => {
                    report.coverage += probability;
                    report.covered_positions.push(position);
                    continue;
                }
                Some(path) => path,
            };

            // Unit leaves the field before the interceptor goes off.
            if path.len() < explode_time {
                continue;
            }

            let stalls = path
                .last()
                .map_or(true, |end| !scoring_edge.contains(end));

            // A path exactly `explode_time` long has no entry at the
            // detonation step; the unit is then at its final tile.
            let at_detonation = path.get(explode_time).or(path.last());
            let caught = at_detonation.map_or(false, |p| {
                oracle.distance_between(explode_position, *p) <= self.explosion_range
            });

            if stalls || caught {
                report.coverage += probability;
                report.covered_positions.push(position);
            }

            let exposed = path[..explode_time]
                .iter()
                .any(|p| oracle.distance_between(explode_position, *p) <= self.attacker_range);
            if exposed {
                report.risk += probability;
            }
        }

        report
    }
}
