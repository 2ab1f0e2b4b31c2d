//! When steps for workflow execution scenarios.

use super::world::{WorkflowWorld, run_async};
use brigade::task::domain::WorkflowContext;
use eyre::eyre;
use rstest_bdd_macros::when;

#[when("the workflow runs")]
fn workflow_runs(world: &mut WorkflowWorld) -> Result<(), eyre::Report> {
    let executor = world
        .executor
        .as_ref()
        .ok_or_else(|| eyre!("team has not been assembled"))?;
    let outcome = run_async(executor.execute_steps(&world.steps, WorkflowContext::new()));
    world.outcome = Some(outcome);
    Ok(())
}
