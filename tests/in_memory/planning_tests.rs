//! Plan requests followed by plan execution over the team.

use super::helpers::Team;
use brigade::completion::adapters::ScriptedCompletionGateway;
use brigade::completion::domain::CompletionOptions;
use brigade::planning::services::Planner;
use eyre::{Result, WrapErr, ensure};
use rstest::rstest;
use std::sync::Arc;

const PLAN_REPLY: &str = r#"I suggest the following plan.
{
  "tasks": [
    {"id": "task-1", "description": "Implement export", "agent": "developer",
     "action": "implement-feature", "dependencies": [],
     "metadata": {"requirements": ["export to CSV"]}},
    {"id": "task-2", "description": "Test export", "agent": "tester",
     "action": "write-tests", "dependencies": ["task-1"]},
    {"id": "task-3", "description": "Document export", "agent": "documenter",
     "action": "write-docs", "dependencies": ["task-2"]}
  ],
  "risks": ["large files"],
  "estimatedTime": "3 hours"
}"#;

fn planner(team: &Team, gateway: &ScriptedCompletionGateway) -> Planner<mockable::DefaultClock> {
    Planner::new(
        Arc::new(gateway.clone()),
        Arc::clone(&team.dispatcher),
        CompletionOptions::new("planner", 1024, 0.2),
        Arc::clone(&team.clock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn planned_tasks_run_through_the_team() -> Result<()> {
    let team = Team::new()?;
    let gateway = ScriptedCompletionGateway::new();
    gateway.push_text(PLAN_REPLY).wrap_err("queue plan")?;
    team.reply("developer", "Export implemented.")?;
    team.reply("tester", "Tests added.")?;
    team.reply("documenter", "Docs added.")?;
    let planner = planner(&team, &gateway);

    let plan = planner
        .plan("Users can export reports to CSV")
        .await
        .wrap_err("plan")?;
    let outcomes = planner.execute_plan(&plan).await.wrap_err("execute plan")?;

    ensure!(plan.tasks.len() == 3);
    ensure!(outcomes.len() == 3);
    ensure!(outcomes.iter().all(|outcome| outcome.success));
    let completed = team.dispatcher.store().completed_tasks().wrap_err("completed")?;
    ensure!(completed.len() == 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_planned_task_skips_dependents() -> Result<()> {
    let team = Team::new()?;
    let gateway = ScriptedCompletionGateway::new();
    gateway.push_text(PLAN_REPLY).wrap_err("queue plan")?;
    team.reply("developer", "Export implemented.")?;
    team.gateway("tester")?
        .push_error(brigade::completion::ports::CompletionError::ScriptExhausted)
        .wrap_err("queue error")?;
    let planner = planner(&team, &gateway);

    let plan = planner.plan("export").await.wrap_err("plan")?;
    let outcomes = planner.execute_plan(&plan).await.wrap_err("execute plan")?;

    ensure!(outcomes.len() == 2);
    ensure!(outcomes.last().is_some_and(|outcome| !outcome.success));
    ensure!(
        team.gateway("documenter")?
            .requests()
            .wrap_err("requests")?
            .is_empty()
    );
    Ok(())
}
