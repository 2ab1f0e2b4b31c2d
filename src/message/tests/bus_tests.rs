//! Tests for delivery routing, ordering and history.

use crate::agent::domain::AgentName;
use crate::message::domain::{
    AgentMessage, DeliveryError, HistoryFilter, MessageKind, OutboundMessage, Recipient,
};
use crate::message::services::{MessageBus, MessageBusError, MessageCallback};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::json;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

type Deliveries = Arc<Mutex<Vec<String>>>;

fn name(value: &str) -> AgentName {
    AgentName::new(value).expect("valid agent name")
}

fn recorder(label: &str, deliveries: &Deliveries) -> MessageCallback {
    let label = label.to_owned();
    let sink = Arc::clone(deliveries);
    Arc::new(move |message: &AgentMessage| {
        sink.lock()
            .expect("recorder lock")
            .push(format!("{label}:{}", message.kind()));
        Ok(())
    })
}

fn recorded(deliveries: &Deliveries) -> Vec<String> {
    deliveries.lock().expect("recorder lock").clone()
}

#[fixture]
fn bus() -> MessageBus<DefaultClock> {
    MessageBus::new(Arc::new(DefaultClock))
}

fn direct(to: &str, kind: MessageKind) -> OutboundMessage {
    OutboundMessage::new(name("orchestrator"), name(to), kind, json!({}))
}

#[rstest]
fn direct_message_reaches_only_the_recipient(bus: MessageBus<DefaultClock>) {
    let deliveries = Deliveries::default();
    bus.subscribe(name("developer"), recorder("dev", &deliveries))
        .expect("subscribe");
    bus.subscribe(name("tester"), recorder("test", &deliveries))
        .expect("subscribe");

    bus.send(direct("tester", MessageKind::Task)).expect("send");

    assert_eq!(recorded(&deliveries), vec!["test:task"]);
}

#[rstest]
fn broadcast_reaches_everyone_in_subscription_order(bus: MessageBus<DefaultClock>) {
    let deliveries = Deliveries::default();
    bus.subscribe(name("tester"), recorder("test", &deliveries))
        .expect("subscribe");
    bus.subscribe_broadcast(name("monitor"), recorder("monitor", &deliveries))
        .expect("subscribe");
    bus.subscribe(name("developer"), recorder("dev", &deliveries))
        .expect("subscribe");

    bus.send(OutboundMessage::broadcast(
        name("orchestrator"),
        MessageKind::Status,
        json!({}),
    ))
    .expect("send");

    assert_eq!(
        recorded(&deliveries),
        vec!["test:status", "monitor:status", "dev:status"]
    );
}

#[rstest]
fn repeated_subscriptions_each_receive_a_delivery(bus: MessageBus<DefaultClock>) {
    let deliveries = Deliveries::default();
    bus.subscribe(name("developer"), recorder("a", &deliveries))
        .expect("subscribe");
    bus.subscribe(name("developer"), recorder("b", &deliveries))
        .expect("subscribe");

    bus.send(direct("developer", MessageKind::Query)).expect("send");

    assert_eq!(recorded(&deliveries), vec!["a:query", "b:query"]);
}

#[rstest]
fn broadcast_only_subscriber_ignores_direct_messages(bus: MessageBus<DefaultClock>) {
    let deliveries = Deliveries::default();
    bus.subscribe_broadcast(name("monitor"), recorder("monitor", &deliveries))
        .expect("subscribe");

    bus.send(direct("monitor", MessageKind::Task)).expect("send");

    assert!(recorded(&deliveries).is_empty());
}

#[rstest]
fn unsubscribe_removes_only_that_subscriber(bus: MessageBus<DefaultClock>) {
    let deliveries = Deliveries::default();
    bus.subscribe(name("developer"), recorder("dev", &deliveries))
        .expect("subscribe");
    bus.subscribe_broadcast(name("monitor"), recorder("monitor", &deliveries))
        .expect("subscribe");

    let removed = bus.unsubscribe(&name("developer")).expect("unsubscribe");
    bus.send(OutboundMessage::broadcast(
        name("orchestrator"),
        MessageKind::Status,
        json!({}),
    ))
    .expect("send");

    assert_eq!(removed, 2);
    assert_eq!(recorded(&deliveries), vec!["monitor:status"]);
}

#[rstest]
fn failing_callback_stops_delivery_but_keeps_history(bus: MessageBus<DefaultClock>) {
    let deliveries = Deliveries::default();
    let failing: MessageCallback = Arc::new(|_message: &AgentMessage| {
        Err(DeliveryError::Rejected {
            subscriber: AgentName::new("developer").expect("valid name"),
            reason: "not now".to_owned(),
        })
    });
    bus.subscribe(name("developer"), failing).expect("subscribe");
    bus.subscribe(name("tester"), recorder("test", &deliveries))
        .expect("subscribe");

    let result = bus.send(OutboundMessage::broadcast(
        name("orchestrator"),
        MessageKind::Status,
        json!({}),
    ));

    assert!(matches!(
        result,
        Err(MessageBusError::Delivery(DeliveryError::Rejected { .. }))
    ));
    assert!(recorded(&deliveries).is_empty());
    assert_eq!(bus.history(&HistoryFilter::new()).expect("history").len(), 1);
}

#[rstest]
fn history_filters_by_conjunction(bus: MessageBus<DefaultClock>) {
    bus.send(direct("developer", MessageKind::Task)).expect("send");
    bus.send(direct("tester", MessageKind::Task)).expect("send");
    bus.send(OutboundMessage::new(
        name("developer"),
        name("tester"),
        MessageKind::Query,
        json!({ "question": "coverage?" }),
    ))
    .expect("send");

    let to_tester = bus
        .history(&HistoryFilter::new().with_to(name("tester")))
        .expect("history");
    let tester_tasks = bus
        .history(
            &HistoryFilter::new()
                .with_to(name("tester"))
                .with_kind(MessageKind::Task),
        )
        .expect("history");
    let from_developer = bus
        .history(&HistoryFilter::new().with_from(name("developer")))
        .expect("history");

    assert_eq!(to_tester.len(), 2);
    assert_eq!(tester_tasks.len(), 1);
    assert_eq!(from_developer.len(), 1);
    assert_eq!(from_developer[0].payload()["question"], "coverage?");
    assert_eq!(
        bus.history(&HistoryFilter::new()).expect("history").len(),
        3
    );
}

#[rstest]
fn clear_drops_history_and_keeps_subscriptions(bus: MessageBus<DefaultClock>) {
    let deliveries = Deliveries::default();
    bus.subscribe(name("developer"), recorder("dev", &deliveries))
        .expect("subscribe");
    bus.send(direct("developer", MessageKind::Task)).expect("send");

    bus.clear().expect("clear");
    bus.send(direct("developer", MessageKind::Result)).expect("send");

    let history = bus.history(&HistoryFilter::new()).expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].recipient(), &Recipient::Agent(name("developer")));
    assert_eq!(recorded(&deliveries), vec!["dev:task", "dev:result"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mailbox_receives_in_order_and_reports_overflow() {
    let bus = MessageBus::new(Arc::new(DefaultClock));
    let capacity = NonZeroUsize::new(2).expect("non-zero capacity");
    let mut mailbox = bus
        .subscribe_mailbox(name("developer"), capacity)
        .expect("subscribe");

    bus.send(direct("developer", MessageKind::Task)).expect("first fits");
    bus.send(direct("developer", MessageKind::Query)).expect("second fits");
    let overflow = bus.send(direct("developer", MessageKind::Status));

    assert!(matches!(
        overflow,
        Err(MessageBusError::Delivery(DeliveryError::MailboxFull { .. }))
    ));
    let first = mailbox.recv().await.expect("first message");
    let second = mailbox.recv().await.expect("second message");
    assert_eq!(first.kind(), MessageKind::Task);
    assert_eq!(second.kind(), MessageKind::Query);
}
