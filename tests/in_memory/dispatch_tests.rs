//! Dispatch, queue processing and bus notices across real components.

use super::helpers::Team;
use brigade::agent::domain::AgentName;
use brigade::completion::domain::{CompletionResponse, ContentBlock};
use brigade::dispatch::services::DispatchError;
use brigade::message::domain::{HistoryFilter, MessageKind, Recipient};
use brigade::task::domain::{Task, TaskAction, TaskDraft, TaskKind, TaskStatus};
use eyre::{Result, WrapErr, ensure};
use rstest::rstest;
use serde_json::json;
use std::num::NonZeroUsize;

fn adhoc(team: &Team, agent: &str, action: &str, description: &str) -> Result<Task> {
    Ok(TaskDraft::new(
        TaskKind::Adhoc,
        TaskAction::new(action).wrap_err("action")?,
        description,
        AgentName::new(agent).wrap_err("agent name")?,
    )
    .build(team.clock.as_ref()))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn requested_writes_reach_the_shared_state() -> Result<()> {
    let team = Team::new()?;
    team.gateway("developer")?
        .push_response(CompletionResponse::from_blocks(vec![
            ContentBlock::text("Writing the handler."),
            ContentBlock::tool_use(
                "toolu_1",
                "write_file",
                json!({"file_path": "src/handler.rs", "content": "fn handle() {}"}),
            ),
        ]))
        .wrap_err("queue response")?;
    let mut task = adhoc(&team, "developer", "implement-feature", "Add handler")?;

    let outcome = team
        .dispatcher
        .assign_task(&mut task)
        .await
        .wrap_err("dispatch")?;

    ensure!(outcome.success);
    ensure!(outcome.files_modified == vec!["src/handler.rs".to_owned()]);
    ensure!(task.status() == TaskStatus::Completed);
    let store = team.dispatcher.store();
    ensure!(store.modified_files().wrap_err("files")? == vec!["src/handler.rs".to_owned()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bus_records_assignment_and_result_notices() -> Result<()> {
    let team = Team::new()?;
    team.reply("tester", "Created tests/test_login.py")?;
    let bus = team.dispatcher.bus();
    let tester = AgentName::new("tester").wrap_err("agent name")?;
    let mut mailbox = bus
        .subscribe_mailbox(
            AgentName::new("observer").wrap_err("agent name")?,
            NonZeroUsize::new(8).ok_or_else(|| eyre::eyre!("zero capacity"))?,
        )
        .wrap_err("mailbox")?;
    let mut task = adhoc(&team, "tester", "write-tests", "Cover login")?;

    team.dispatcher
        .assign_task(&mut task)
        .await
        .wrap_err("dispatch")?;

    let assignments = bus
        .history(&HistoryFilter::new().with_kind(MessageKind::Task))
        .wrap_err("history")?;
    ensure!(assignments.len() == 1);
    ensure!(assignments.iter().all(|notice| notice.recipient() == &Recipient::Agent(tester.clone())));
    let results = bus
        .history(&HistoryFilter::new().with_from(tester).with_kind(MessageKind::Result))
        .wrap_err("history")?;
    ensure!(results.len() == 1);

    let received = mailbox
        .try_recv()
        .wrap_err("broadcast result should reach the observer")?;
    ensure!(received.kind() == MessageKind::Result);
    ensure!(received.payload()["success"] == json!(true));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn queue_drains_in_order_and_keeps_per_task_errors() -> Result<()> {
    let team = Team::new()?;
    team.reply("developer", "First.")?;
    team.reply("documenter", "Second.")?;
    team.dispatcher
        .submit(adhoc(&team, "developer", "fix-bug", "first")?)
        .wrap_err("submit")?;
    team.dispatcher
        .submit(adhoc(&team, "deployer", "deploy", "orphan")?)
        .wrap_err("submit")?;
    team.dispatcher
        .submit(adhoc(&team, "documenter", "write-docs", "second")?)
        .wrap_err("submit")?;

    let reports = team
        .dispatcher
        .process_queue()
        .await
        .wrap_err("drain queue")?;

    let descriptions: Vec<&str> = reports
        .iter()
        .map(|report| report.task.description())
        .collect();
    ensure!(descriptions == ["first", "orphan", "second"]);
    ensure!(matches!(
        reports.get(1).map(|report| &report.outcome),
        Some(Err(DispatchError::AgentNotFound(_)))
    ));
    let metrics = team.dispatcher.store().metrics().wrap_err("metrics")?;
    ensure!(metrics.task_queue_length == 0);
    ensure!(metrics.tasks_completed == 2);
    ensure!(metrics.tasks_failed == 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn snapshot_reflects_the_whole_team() -> Result<()> {
    let team = Team::new()?;
    team.reply("validator", "Found one error.")?;
    let mut task = adhoc(&team, "validator", "review", "Review login")?;

    team.dispatcher
        .assign_task(&mut task)
        .await
        .wrap_err("dispatch")?;

    let snapshot = team.dispatcher.store().snapshot().wrap_err("snapshot")?;
    ensure!(snapshot.agents.len() == 4);
    ensure!(snapshot.completed_tasks.len() == 1);
    ensure!(snapshot.metrics.active_agents == 4);
    let payload = serde_json::to_value(&snapshot).wrap_err("serialise snapshot")?;
    ensure!(payload.get("completedTasks").is_some(), "snapshot was {payload}");
    Ok(())
}
