//! Turning a selection into build and deploy requests.
//!
//! Plans that need walls get a spawn request immediately followed by a
//! removal request for the same tiles. The walls only exist for the current
//! construction snapshot, which is enough to shape enemy pathing for the
//! coming frame without leaving anything standing into combat.

use crate::events::UnitKind;
use crate::location::*;
use crate::oracle::ConstructionSink;
use crate::selector::PlanSelection;
use log::*;

/// A single request the caller should forward to the simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeployOperation {
    SpawnWalls(Vec<Position>),
    RemoveWalls(Vec<Position>),
    SpawnInterceptor(Position),
}

pub struct DeploymentExecutor;

impl DeploymentExecutor {
    /// Requests for every selected plan, left side first, each side in
    /// acceptance order.
    pub fn operations(selection: &PlanSelection) -> Vec<DeployOperation> {
        let mut ops = Vec::new();

        for plan in selection.iter() {
            let walls = plan.extra_wall_positions();
            if !walls.is_empty() {
                ops.push(DeployOperation::SpawnWalls(walls.to_vec()));
                ops.push(DeployOperation::RemoveWalls(walls.to_vec()));
            }
            ops.push(DeployOperation::SpawnInterceptor(plan.start_position()));
        }

        ops
    }

    pub fn execute<S: ConstructionSink + ?Sized>(
        selection: &PlanSelection,
        sink: &mut S,
    ) -> Vec<DeployOperation> {
        let ops = Self::operations(selection);
        execute_operations(sink, &ops);
        ops
    }
}

/// Fire a list of operations at the simulation.
///
/// Requests are fire-and-forget: whether they succeed is up to the
/// simulation. Returns the number of positions it reported as accepted.
pub fn execute_operations<S: ConstructionSink + ?Sized>(
    sink: &mut S,
    operations: &[DeployOperation],
) -> u32 {
    let mut accepted = 0u32;

    for op in operations {
        accepted += match op {
            DeployOperation::SpawnWalls(walls) => sink.spawn(UnitKind::Wall, walls),
            DeployOperation::RemoveWalls(walls) => sink.remove(walls),
            DeployOperation::SpawnInterceptor(position) => {
                sink.spawn(UnitKind::Interceptor, std::slice::from_ref(position))
            }
        };
    }

    debug!(
        "Issued {} deploy operation(s), {} request(s) accepted",
        operations.len(),
        accepted
    );

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::*;
    use crate::testing::*;

    fn plan(start: (u8, u8), explode: (u8, u8), walls: &[(u8, u8)]) -> InterceptorPlan {
        InterceptorPlan::new(
            start.into(),
            explode.into(),
            walls.iter().copied().map(Position::from).collect(),
        )
        .unwrap()
    }

    #[test]
    fn empty_selection_issues_nothing() {
        let mut oracle = ScriptedOracle::new();
        let ops = DeploymentExecutor::execute(&PlanSelection::default(), &mut oracle);
        assert!(ops.is_empty());
        assert!(oracle.calls.is_empty());
    }

    #[test]
    fn walls_are_spawned_then_removed_before_the_interceptor() {
        let walls = vec![Position::new(6, 8), Position::new(8, 8)];
        let selection = PlanSelection::from_plans(vec![plan((7, 6), (7, 10), &[(6, 8), (8, 8)])]);
        let mut oracle = ScriptedOracle::new();

        let ops = DeploymentExecutor::execute(&selection, &mut oracle);

        assert_eq!(
            ops,
            vec![
                DeployOperation::SpawnWalls(walls.clone()),
                DeployOperation::RemoveWalls(walls.clone()),
                DeployOperation::SpawnInterceptor(Position::new(7, 6)),
            ]
        );
        assert_eq!(
            oracle.calls,
            vec![
                SinkCall::Spawn(UnitKind::Wall, walls.clone()),
                SinkCall::Remove(walls),
                SinkCall::Spawn(UnitKind::Interceptor, vec![Position::new(7, 6)]),
            ]
        );
    }

    #[test]
    fn left_side_deploys_first_in_acceptance_order() {
        let selection = PlanSelection::from_plans(vec![
            plan((23, 9), (23, 9), &[]),
            plan((4, 9), (4, 11), &[]),
            plan((20, 6), (20, 10), &[]),
            plan((3, 10), (3, 10), &[]),
        ]);

        let ops = DeploymentExecutor::operations(&selection);

        assert_eq!(
            ops,
            vec![
                DeployOperation::SpawnInterceptor(Position::new(4, 9)),
                DeployOperation::SpawnInterceptor(Position::new(3, 10)),
                DeployOperation::SpawnInterceptor(Position::new(23, 9)),
                DeployOperation::SpawnInterceptor(Position::new(20, 6)),
            ]
        );
    }

    #[test]
    fn every_walled_plan_gets_its_own_transient_pair() {
        let selection = PlanSelection::from_plans(vec![
            plan((7, 6), (7, 10), &[(6, 8)]),
            plan((5, 8), (5, 11), &[(6, 8)]),
        ]);
        let mut oracle = ScriptedOracle::new();

        let accepted = execute_operations(&mut oracle, &DeploymentExecutor::operations(&selection));

        assert_eq!(oracle.calls.len(), 6);
        assert_eq!(accepted, 6);
    }
}
