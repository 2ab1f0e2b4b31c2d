//! Given steps for workflow execution scenarios.

use super::world::WorkflowWorld;
use brigade::agent::domain::AgentName;
use brigade::completion::ports::CompletionError;
use brigade::task::domain::{StepId, TaskAction};
use brigade::workflow::domain::WorkflowStep;
use eyre::WrapErr;
use rstest_bdd_macros::given;

fn build_step(
    id: &str,
    agent: &str,
    action: &str,
    dependency: Option<&str>,
) -> Result<WorkflowStep, eyre::Report> {
    let dependencies = dependency
        .map(StepId::new)
        .transpose()
        .wrap_err("dependency id")?;
    Ok(WorkflowStep::new(
        StepId::new(id).wrap_err("step id")?,
        AgentName::new(agent).wrap_err("agent name")?,
        TaskAction::new(action).wrap_err("action")?,
        format!("{action} ({id})"),
    )
    .with_dependencies(dependencies))
}

#[given("a team of completion-backed agents")]
fn team_of_agents(world: &mut WorkflowWorld) -> Result<(), eyre::Report> {
    world.assemble_team()
}

#[given(r#"the "{agent}" agent replies "{text}""#)]
fn agent_replies(world: &mut WorkflowWorld, agent: String, text: String) -> Result<(), eyre::Report> {
    world
        .gateway(&agent)?
        .push_text(text)
        .wrap_err("queue scripted reply")
}

#[given(r#"the "{agent}" agent is unavailable"#)]
fn agent_unavailable(world: &mut WorkflowWorld, agent: String) -> Result<(), eyre::Report> {
    world
        .gateway(&agent)?
        .push_error(CompletionError::Http {
            status: 503,
            body: format!("{agent} backend unavailable"),
        })
        .wrap_err("queue scripted error")
}

#[given(r#"a required step "{id}" for "{agent}" doing "{action}" with no dependencies"#)]
fn required_step(
    world: &mut WorkflowWorld,
    id: String,
    agent: String,
    action: String,
) -> Result<(), eyre::Report> {
    world.steps.push(build_step(&id, &agent, &action, None)?);
    Ok(())
}

#[given(r#"a required step "{id}" for "{agent}" doing "{action}" after "{dependency}""#)]
fn required_step_after(
    world: &mut WorkflowWorld,
    id: String,
    agent: String,
    action: String,
    dependency: String,
) -> Result<(), eyre::Report> {
    world
        .steps
        .push(build_step(&id, &agent, &action, Some(&dependency))?);
    Ok(())
}

#[given(r#"an optional step "{id}" for "{agent}" doing "{action}" after "{dependency}""#)]
fn optional_step_after(
    world: &mut WorkflowWorld,
    id: String,
    agent: String,
    action: String,
    dependency: String,
) -> Result<(), eyre::Report> {
    world
        .steps
        .push(build_step(&id, &agent, &action, Some(&dependency))?.optional());
    Ok(())
}
