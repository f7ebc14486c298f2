pub mod arena;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod coverage;
pub mod deploy;
pub mod error;
pub mod events;
pub mod location;
pub mod oracle;
pub mod planner;
pub mod probability;
pub mod selector;

#[cfg(test)]
mod testing;

pub use catalog::{default_catalog, InterceptorPlan, PlanCatalog};
pub use config::{PlannerConfig, UnitCodes};
pub use coverage::{CoverageEvaluator, CoverageReport};
pub use deploy::{execute_operations, DeployOperation, DeploymentExecutor};
pub use error::{PlannerError, Result};
pub use location::{Position, Side};
pub use oracle::{ConstructionSink, MapEdge, SimulationOracle};
pub use planner::{InterceptorPlanner, PlannerBuilder};
pub use probability::{Distribution, PositionProbabilityModel};
pub use selector::{PlanSelection, PlanSelector};
