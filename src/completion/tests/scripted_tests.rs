//! Tests for the scripted gateway and gateway selection.

use crate::completion::adapters::{ScriptedCompletionGateway, gateway_from_config};
use crate::completion::domain::{CompletionOptions, ConversationLog, HealthStatus};
use crate::completion::ports::{CompletionError, CompletionGateway};
use crate::config::{GatewayConfig, Provider};
use rstest::{fixture, rstest};

#[fixture]
fn options() -> CompletionOptions {
    CompletionOptions::new("test-model", 64, 0.0)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn replays_replies_in_order_and_records_requests(options: CompletionOptions) {
    let gateway = ScriptedCompletionGateway::new();
    gateway.push_text("one").expect("script should accept reply");
    gateway
        .push_error(CompletionError::Http {
            status: 503,
            body: "overloaded".to_owned(),
        })
        .expect("script should accept reply");
    let mut log = ConversationLog::new();
    log.push_user_text("hi");

    let first = gateway
        .complete(&log, &options)
        .await
        .expect("first reply should succeed");
    let second = gateway.complete(&log, &options).await;
    let third = gateway.complete(&log, &options).await;

    assert_eq!(first.text_content(), "one");
    assert!(matches!(
        second,
        Err(CompletionError::Http { status: 503, .. })
    ));
    assert!(matches!(third, Err(CompletionError::ScriptExhausted)));
    let requests = gateway.requests().expect("requests should be readable");
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].log, log);
    assert_eq!(requests[0].options, options);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn health_reports_queue_depth() {
    let gateway = ScriptedCompletionGateway::new();
    gateway.push_text("a").expect("script should accept reply");

    let report = gateway.health_check().await;

    assert_eq!(report.status, HealthStatus::Healthy);
    assert_eq!(report.message.as_deref(), Some("1 scripted replies queued"));
    assert_eq!(gateway.remaining().expect("remaining should be readable"), 1);
}

#[rstest]
fn factory_rejects_anthropic_without_key() {
    let config = GatewayConfig {
        provider: Provider::Anthropic,
        ..GatewayConfig::default()
    };

    assert!(matches!(
        gateway_from_config(&config),
        Err(CompletionError::Configuration(_))
    ));
}

#[rstest]
fn factory_builds_selected_provider() {
    let ollama = gateway_from_config(&GatewayConfig::default());
    let anthropic = gateway_from_config(&GatewayConfig {
        provider: Provider::Anthropic,
        api_key: Some("sk-test".to_owned()),
        ..GatewayConfig::default()
    });

    assert!(ollama.is_ok());
    assert!(anthropic.is_ok());
}

#[rstest]
fn options_from_config_use_gateway_defaults() {
    let options = CompletionOptions::from_config(&GatewayConfig::default());

    assert_eq!(options.model, "deepseek-coder:33b");
    assert_eq!(options.max_tokens, 4096);
    assert!(options.system_prompt.is_none());
    assert!(options.tools.is_empty());
}
