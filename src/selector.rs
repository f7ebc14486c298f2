//! Greedy plan selection.
//!
//! Each pass evaluates every catalog plan against the launch mass that is
//! still uncovered and accepts the best scoring one. Passes repeat until the
//! coverage threshold is met or the best remaining plan covers nothing.
//!
//! The first plan accepted on a side fixes that side's transient wall set for
//! the turn. Later plans on the same side must need exactly the same walls or
//! they are skipped.

use crate::catalog::*;
use crate::config::PlannerConfig;
use crate::coverage::*;
use crate::location::*;
use crate::oracle::SimulationOracle;
use crate::probability::Distribution;
use fnv::FnvHashSet;
use itertools::Itertools;
use log::*;

/// One accepted plan, as recorded by the selector.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionStep {
    pub side: Side,
    pub score: f64,
    pub coverage: f64,
    pub risk: f64,
    /// Uncovered launch mass left after this plan was accepted.
    pub remaining_mass: f64,
}

/// Plans chosen for one turn, grouped by side in acceptance order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlanSelection {
    left: Vec<InterceptorPlan>,
    right: Vec<InterceptorPlan>,
    steps: Vec<SelectionStep>,
    total_coverage: f64,
}

impl PlanSelection {
    pub fn plans(&self, side: Side) -> &[InterceptorPlan] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn left(&self) -> &[InterceptorPlan] {
        &self.left
    }

    pub fn right(&self) -> &[InterceptorPlan] {
        &self.right
    }

    /// All plans, left side first.
    pub fn iter(&self) -> impl Iterator<Item = &InterceptorPlan> {
        self.left.iter().chain(self.right.iter())
    }

    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    /// The wall set committed on `side`, if any plan has been accepted there.
    pub fn walls(&self, side: Side) -> Option<&[Position]> {
        self.plans(side).first().map(|p| p.extra_wall_positions())
    }

    pub fn steps(&self) -> &[SelectionStep] {
        &self.steps
    }

    pub fn total_coverage(&self) -> f64 {
        self.total_coverage
    }

    /// Selection accepting `plans` in order, bypassing the greedy search.
    #[cfg(test)]
    pub(crate) fn from_plans(plans: Vec<InterceptorPlan>) -> Self {
        let mut selection = PlanSelection::default();
        for plan in plans {
            let step = SelectionStep {
                side: plan.side(),
                score: 0.0,
                coverage: 0.0,
                risk: 0.0,
                remaining_mass: 0.0,
            };
            selection.accept(plan, step);
        }
        selection
    }

    fn accept(&mut self, plan: InterceptorPlan, step: SelectionStep) {
        self.total_coverage += step.coverage;
        self.steps.push(step);
        match plan.side() {
            Side::Left => self.left.push(plan),
            Side::Right => self.right.push(plan),
        }
    }
}

pub struct PlanSelector {
    config: PlannerConfig,
}

impl PlanSelector {
    pub fn new(config: PlannerConfig) -> Self {
        PlanSelector { config }
    }

    /// Greedy score: coverage minus half the risk, with small penalties for
    /// slow detonation and for walls that still need to be built.
    pub fn score(&self, plan: &InterceptorPlan, report: &CoverageReport, new_walls: usize) -> f64 {
        report.coverage
            - self.config.risk_weight * report.risk
            - self.config.explode_time_weight * plan.explode_time() as f64
            - self.config.new_wall_weight * new_walls as f64
    }

    pub fn select<O: SimulationOracle + ?Sized>(
        &self,
        catalog: &PlanCatalog,
        distribution: &Distribution,
        oracle: &O,
    ) -> PlanSelection {
        let mut selection = PlanSelection::default();

        if distribution.is_empty() {
            debug!("No launch history yet, skipping interceptor selection");
            return selection;
        }

        let mut evaluator = CoverageEvaluator::new(oracle, &self.config);
        let mut working = distribution.clone();

        while selection.total_coverage < self.config.coverage_threshold {
            let mut best: Option<(f64, &InterceptorPlan, CoverageReport)> = None;

            for plan in catalog.iter() {
                let side = plan.side();

                if let Some(walls) = selection.walls(side) {
                    if !plan.has_walls(walls) {
                        trace!(
                            "Skipping plan at {:?}: {:?} walls already committed",
                            plan.start_position(),
                            side
                        );
                        continue;
                    }
                }

                let report = evaluator.evaluate(plan, &working);
                let new_walls = if selection.plans(side).is_empty() {
                    plan.extra_wall_positions().len()
                } else {
                    0
                };
                let score = self.score(plan, &report, new_walls);

                trace!(
                    "Plan {:?} -> {:?}: coverage={:.3} risk={:.3} score={:.4}",
                    plan.start_position(),
                    plan.explode_position(),
                    report.coverage,
                    report.risk,
                    score
                );

                if best.as_ref().map_or(true, |(best_score, _, _)| score > *best_score) {
                    best = Some((score, plan, report));
                }
            }

            let (score, plan, report) = match best {
                Some(best) => best,
                None => break,
            };

            if report.coverage <= 0.0 {
                debug!(
                    "No plan adds coverage, stopping at {:.3}",
                    selection.total_coverage
                );
                break;
            }

            let covered: FnvHashSet<Position> = report.covered_positions.iter().copied().collect();
            working.remove_all(&covered);

            selection.accept(
                plan.clone(),
                SelectionStep {
                    side: plan.side(),
                    score,
                    coverage: report.coverage,
                    risk: report.risk,
                    remaining_mass: working.total_mass(),
                },
            );
        }

        debug!(
            "Selected {} interceptor plan(s) covering {:.3}: [{}]",
            selection.len(),
            selection.total_coverage,
            selection
                .iter()
                .map(|p| format!("{:?}", p.start_position()))
                .join(", ")
        );

        selection
    }
}
