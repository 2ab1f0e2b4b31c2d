//! Workflow runs over completion-backed agents.

use super::helpers::Team;
use brigade::agent::domain::{AgentName, AgentStatus};
use brigade::completion::domain::joined_text;
use brigade::completion::ports::CompletionError;
use brigade::task::domain::{StepId, TaskAction, WorkflowContext};
use brigade::workflow::domain::{StepHook, WorkflowCatalog, WorkflowStep};
use brigade::workflow::services::WorkflowError;
use eyre::{Result, WrapErr, ensure};
use rstest::rstest;
use serde_json::json;

fn step(id: &str, agent: &str, action: &str, deps: &[&str]) -> Result<WorkflowStep> {
    let dependencies = deps
        .iter()
        .map(|dep| StepId::new(*dep))
        .collect::<Result<Vec<_>, _>>()
        .wrap_err("dependencies")?;
    Ok(WorkflowStep::new(
        StepId::new(id).wrap_err("step id")?,
        AgentName::new(agent).wrap_err("agent name")?,
        TaskAction::new(action).wrap_err("action")?,
        format!("step {id}"),
    )
    .with_dependencies(dependencies))
}

fn outage() -> CompletionError {
    CompletionError::Http {
        status: 500,
        body: "backend down".to_owned(),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn optional_failure_is_recorded_and_the_run_completes() -> Result<()> {
    let team = Team::new()?;
    team.reply("developer", "Implemented A.")?;
    team.reply("tester", "Tests for B.")?;
    team.gateway("documenter")?
        .push_error(outage())
        .wrap_err("queue error")?;
    let steps = vec![
        step("a", "developer", "implement-feature", &[])?,
        step("b", "tester", "write-tests", &["a"])?,
        step("c", "documenter", "write-docs", &["a"])?.optional(),
    ];

    let results = team
        .executor
        .execute_steps(&steps, WorkflowContext::new())
        .await
        .wrap_err("optional failure must not abort the run")?;

    ensure!(results.len() == 3, "expected three results, got {results:?}");
    let last = results.last().ok_or_else(|| eyre::eyre!("missing result"))?;
    ensure!(last.step_id.as_str() == "c" && !last.success);
    ensure!(
        last.error.as_deref().is_some_and(|error| error.contains("backend down")),
        "error text should carry the backend failure"
    );
    let metrics = team.dispatcher.store().metrics().wrap_err("metrics")?;
    ensure!(metrics.tasks_completed == 2 && metrics.tasks_failed == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn required_failure_stops_the_run() -> Result<()> {
    let team = Team::new()?;
    team.reply("developer", "Implemented A.")?;
    team.gateway("tester")?
        .push_error(outage())
        .wrap_err("queue error")?;
    let steps = vec![
        step("a", "developer", "implement-feature", &[])?,
        step("b", "tester", "write-tests", &["a"])?,
        step("c", "documenter", "write-docs", &[])?,
    ];

    let result = team
        .executor
        .execute_steps(&steps, WorkflowContext::new())
        .await;

    ensure!(
        matches!(
            &result,
            Err(WorkflowError::RequiredStepFailed { step, .. }) if step.as_str() == "b"
        ),
        "expected a required-step failure, got {result:?}"
    );
    let documenter = team.gateway("documenter")?;
    ensure!(documenter.requests().wrap_err("requests")?.is_empty());
    let completed = team.dispatcher.store().completed_tasks().wrap_err("completed")?;
    ensure!(completed.len() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_dependency_skips_the_step() -> Result<()> {
    let team = Team::new()?;
    team.reply("developer", "Implemented A.")?;
    let steps = vec![
        step("a", "developer", "implement-feature", &[])?,
        step("b", "tester", "write-tests", &["nonexistent"])?,
    ];

    let results = team
        .executor
        .execute_steps(&steps, WorkflowContext::new())
        .await
        .wrap_err("run should complete")?;

    ensure!(results.len() == 1);
    ensure!(results.first().is_some_and(|result| result.step_id.as_str() == "a"));
    let tester = team.gateway("tester")?;
    ensure!(tester.requests().wrap_err("requests")?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn previous_result_reaches_the_next_prompt() -> Result<()> {
    let team = Team::new()?;
    team.reply("developer", "Implemented the parser.")?;
    team.reply("validator", "All checks pass.")?;
    let steps = vec![
        step("build", "developer", "implement-feature", &[])?
            .with_on_success(StepHook::new(["validate".to_owned()])),
        step("validate", "validator", "validate-code", &["build"])?,
    ];
    let context = WorkflowContext::new().with_value("requirements", json!("parse CSV"));

    let results = team
        .executor
        .execute_steps(&steps, context)
        .await
        .wrap_err("run should complete")?;

    ensure!(results.iter().all(|result| result.success));
    let requests = team.gateway("validator")?.requests().wrap_err("requests")?;
    let request = requests.first().ok_or_else(|| eyre::eyre!("no request"))?;
    let entry = request
        .log
        .entries()
        .first()
        .ok_or_else(|| eyre::eyre!("empty conversation"))?;
    let prompt = joined_text(&entry.content);
    ensure!(prompt.contains("previousResult"), "prompt was {prompt}");
    ensure!(prompt.contains("Implemented the parser."), "prompt was {prompt}");
    ensure!(prompt.contains("parse CSV"), "prompt was {prompt}");

    let validation = results
        .last()
        .and_then(|result| result.result.as_ref())
        .and_then(|value| value.get("validationResults"))
        .ok_or_else(|| eyre::eyre!("missing validation results"))?;
    ensure!(validation["passed"] == json!(true));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn catalogued_workflow_runs_by_name() -> Result<()> {
    let catalog = WorkflowCatalog::from_json(
        r#"{
          "workflows": {
            "feature-development": {
              "description": "Build, test and document a feature",
              "trigger": "manual",
              "steps": [
                {"id": "implement", "agent": "developer", "action": "implement-feature",
                 "description": "Implement", "onSuccess": "test"},
                {"id": "test", "agent": "tester", "action": "write-tests",
                 "description": "Test", "dependencies": ["implement"]},
                {"id": "docs", "agent": "documenter", "action": "write-docs",
                 "description": "Document", "dependencies": ["implement"], "optional": true}
              ]
            }
          }
        }"#,
    )
    .wrap_err("catalog should parse")?;
    let team = Team::new()?;
    team.reply("developer", "Done.")?;
    team.reply("tester", "Tested.")?;
    team.reply("documenter", "Documented.")?;

    let results = team
        .executor
        .execute_named(&catalog, "feature-development", WorkflowContext::new())
        .await
        .wrap_err("workflow should run")?;

    ensure!(results.len() == 3);
    let statuses = team.dispatcher.agents_status().wrap_err("status")?;
    ensure!(statuses.iter().all(|state| state.status == AgentStatus::Idle));

    let missing = team
        .executor
        .execute_named(&catalog, "release", WorkflowContext::new())
        .await;
    ensure!(matches!(missing, Err(WorkflowError::WorkflowNotFound(name)) if name == "release"));
    Ok(())
}
