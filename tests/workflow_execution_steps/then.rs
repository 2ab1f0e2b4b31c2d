//! Then steps for workflow execution scenarios.

use super::world::WorkflowWorld;
use brigade::workflow::domain::StepResult;
use brigade::workflow::services::WorkflowError;
use eyre::{WrapErr, eyre};
use rstest_bdd_macros::then;

fn results(world: &WorkflowWorld) -> Result<&[StepResult], eyre::Report> {
    match world.outcome.as_ref() {
        Some(Ok(results)) => Ok(results),
        Some(Err(err)) => Err(eyre!("workflow failed unexpectedly: {err}")),
        None => Err(eyre!("workflow has not run")),
    }
}

#[then("the run succeeds with {count:usize} results")]
fn run_succeeds(world: &WorkflowWorld, count: usize) -> Result<(), eyre::Report> {
    let found = results(world)?.len();
    if found != count {
        return Err(eyre!("expected {count} results, found {found}"));
    }
    Ok(())
}

#[then(r#"the result for "{id}" is a failure"#)]
fn result_is_failure(world: &WorkflowWorld, id: String) -> Result<(), eyre::Report> {
    let result = results(world)?
        .iter()
        .find(|result| result.step_id.as_str() == id)
        .ok_or_else(|| eyre!("no result for step {id}"))?;
    if result.success || result.error.is_none() {
        return Err(eyre!("expected step {id} to fail, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the run fails at step "{id}""#)]
fn run_fails_at(world: &WorkflowWorld, id: String) -> Result<(), eyre::Report> {
    match world.outcome.as_ref() {
        Some(Err(WorkflowError::RequiredStepFailed { step, .. })) if step.as_str() == id => Ok(()),
        other => Err(eyre!("expected a failure at step {id}, got {other:?}")),
    }
}

#[then(r#"the "{agent}" agent received no requests"#)]
fn agent_received_nothing(world: &WorkflowWorld, agent: String) -> Result<(), eyre::Report> {
    let requests = world
        .gateway(&agent)?
        .requests()
        .wrap_err("read recorded requests")?;
    if !requests.is_empty() {
        return Err(eyre!("{agent} received {} requests", requests.len()));
    }
    Ok(())
}
