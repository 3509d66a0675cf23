//! End-to-end wiring scenarios: gateway injection through routing,
//! transform/handle, and tapping, plus the timed producers under a paused
//! clock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use flowline::{
    Bus, Channel, DirectChannel, EventKind, FanoutChannel, Flow, FlowConfig, FlowError, Gateway,
    Message, Payload, Pipeline, RandomInjector, Router, SequenceSource, Sink, Tap, Task, TaskRef,
    TransformFn, parity_key,
};

fn number_label(msg: &Message) -> Result<Message, FlowError> {
    match msg.payload() {
        Payload::Int(v) => Ok(Message::text(format!("Number {v}"))),
        other => Err(FlowError::PayloadMismatch {
            expected: "int",
            found: other.kind(),
        }),
    }
}

struct RecordingSink {
    label: &'static str,
    seen: Mutex<Vec<Payload>>,
}

impl RecordingSink {
    fn new(label: &'static str) -> Arc<Self> {
        Arc::new(Self {
            label,
            seen: Mutex::new(Vec::new()),
        })
    }

    fn seen(&self) -> Vec<Payload> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sink for RecordingSink {
    fn name(&self) -> &str {
        self.label
    }

    async fn consume(&self, msg: &Message) -> Result<(), FlowError> {
        self.seen.lock().unwrap().push(msg.payload().clone());
        Ok(())
    }
}

struct Wiring {
    gateway: Gateway,
    even_sink: Arc<RecordingSink>,
    odd_sink: Arc<RecordingSink>,
    tap_sink: Arc<RecordingSink>,
}

/// Builds the full odd/even object graph against the given bus.
fn wire(bus: Bus) -> Wiring {
    let numbers = DirectChannel::new("numbers", bus.clone());
    let even = FanoutChannel::new("even", bus.clone());
    let odd = FanoutChannel::new("odd", bus.clone());

    let even_sink = RecordingSink::new("even-handler");
    let odd_sink = RecordingSink::new("odd-handler");
    let tap_sink = RecordingSink::new("raw-handler");

    even.attach(Arc::new(Pipeline::new(
        "even-flow",
        bus.clone(),
        TransformFn::arc("even-label", number_label),
        even_sink.clone(),
    )));
    odd.attach(Arc::new(Pipeline::new(
        "odd-flow",
        bus.clone(),
        TransformFn::arc("odd-label", number_label),
        odd_sink.clone(),
    )));
    odd.attach(Arc::new(Tap::new("raw-tap", bus.clone(), tap_sink.clone())));

    let router = Router::new("parity-router", bus.clone(), parity_key)
        .route("even", even.clone())
        .route("odd", odd.clone());
    numbers.attach(Arc::new(router));

    let gateway = Gateway::new(numbers, bus);
    Wiring {
        gateway,
        even_sink,
        odd_sink,
        tap_sink,
    }
}

#[tokio::test]
async fn test_negative_odd_reaches_pipeline_and_tap() {
    let bus = Bus::new(64);
    let w = wire(bus);

    w.gateway.send_number(-7).await.unwrap();

    assert_eq!(w.odd_sink.seen(), vec![Payload::Text("Number -7".into())]);
    assert_eq!(w.tap_sink.seen(), vec![Payload::Int(-7)]);
    assert!(w.even_sink.seen().is_empty());
}

#[tokio::test]
async fn test_even_value_skips_the_tap() {
    let bus = Bus::new(64);
    let w = wire(bus);

    w.gateway.send_number(4).await.unwrap();

    assert_eq!(w.even_sink.seen(), vec![Payload::Text("Number 4".into())]);
    assert!(w.odd_sink.seen().is_empty());
    assert!(w.tap_sink.seen().is_empty());
}

#[tokio::test]
async fn test_one_event_per_stage_per_message() {
    let bus = Bus::new(64);
    let mut rx = bus.subscribe();
    let w = wire(bus);

    w.gateway.send_number(-7).await.unwrap();

    let mut kinds = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        kinds.push(ev.kind);
    }

    for expected in [
        EventKind::GatewayInjected,
        EventKind::Routed,
        EventKind::Transformed,
        EventKind::Handled,
        EventKind::Tapped,
    ] {
        let count = kinds.iter().filter(|k| **k == expected).count();
        assert_eq!(count, 1, "expected exactly one {expected:?}, got {count}");
    }
}

#[tokio::test]
async fn test_routing_is_purely_parity_driven() {
    let bus = Bus::new(64);
    let w = wire(bus);

    for v in [-8, -3, 0, 1, 2, 9] {
        w.gateway.send_number(v).await.unwrap();
    }

    assert_eq!(
        w.even_sink.seen(),
        vec![
            Payload::Text("Number -8".into()),
            Payload::Text("Number 0".into()),
            Payload::Text("Number 2".into()),
        ]
    );
    assert_eq!(
        w.odd_sink.seen(),
        vec![
            Payload::Text("Number -3".into()),
            Payload::Text("Number 1".into()),
            Payload::Text("Number 9".into()),
        ]
    );
    assert_eq!(
        w.tap_sink.seen(),
        vec![Payload::Int(-3), Payload::Int(1), Payload::Int(9)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_sequence_source_emits_consecutive_integers() {
    let bus = Bus::new(256);
    let numbers = DirectChannel::new("numbers", bus.clone());
    let sink = RecordingSink::new("collector");
    numbers.attach(Arc::new(Tap::new("collect", bus.clone(), sink.clone())));

    let source = Arc::new(SequenceSource::new(
        numbers,
        Duration::from_millis(100),
        bus,
    ));
    let token = CancellationToken::new();
    let child = token.child_token();
    let src = Arc::clone(&source);
    let handle = tokio::spawn(async move { src.run(child).await });

    tokio::time::sleep(Duration::from_millis(450)).await;
    token.cancel();
    handle.await.unwrap().unwrap();

    let values: Vec<i64> = sink
        .seen()
        .iter()
        .map(|p| match p {
            Payload::Int(v) => *v,
            other => panic!("unexpected payload {other:?}"),
        })
        .collect();
    assert!(values.len() >= 4, "expected several ticks, got {values:?}");
    let expected: Vec<i64> = (0..values.len() as i64).collect();
    assert_eq!(values, expected);
}

#[tokio::test(start_paused = true)]
async fn test_injector_emits_bounded_negative_values() {
    let bus = Bus::new(256);
    let numbers = DirectChannel::new("numbers", bus.clone());
    let sink = RecordingSink::new("collector");
    numbers.attach(Arc::new(Tap::new("collect", bus.clone(), sink.clone())));

    let gateway = Gateway::new(numbers, bus.clone());
    let injector = Arc::new(RandomInjector::new(
        gateway,
        Duration::from_millis(1000),
        100,
        bus,
    ));
    let token = CancellationToken::new();
    let child = token.child_token();
    let inj = Arc::clone(&injector);
    let handle = tokio::spawn(async move { inj.run(child).await });

    tokio::time::sleep(Duration::from_millis(3500)).await;
    token.cancel();
    handle.await.unwrap().unwrap();

    let values = sink.seen();
    assert!(!values.is_empty());
    for p in &values {
        match p {
            Payload::Int(v) => assert!((-99..=0).contains(v), "value {v} out of range"),
            other => panic!("unexpected payload {other:?}"),
        }
    }
}

struct OneShot;

#[async_trait]
impl Task for OneShot {
    fn name(&self) -> &str {
        "one-shot"
    }

    async fn run(&self, _token: CancellationToken) -> Result<(), FlowError> {
        Ok(())
    }
}

struct Looper;

#[async_trait]
impl Task for Looper {
    fn name(&self) -> &str {
        "looper"
    }

    async fn run(&self, token: CancellationToken) -> Result<(), FlowError> {
        token.cancelled().await;
        Ok(())
    }
}

#[tokio::test]
async fn test_flow_run_returns_when_all_tasks_finish() {
    let flow = Flow::new(FlowConfig::default(), Vec::new());
    flow.run(vec![Arc::new(OneShot) as TaskRef]).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_flow_shutdown_stops_tasks_within_grace() {
    let flow = Arc::new(Flow::new(FlowConfig::default(), Vec::new()));
    let runner = Arc::clone(&flow);
    let handle = tokio::spawn(async move { runner.run(vec![Arc::new(Looper) as TaskRef]).await });

    tokio::time::sleep(Duration::from_millis(50)).await;
    flow.shutdown();
    handle.await.unwrap().unwrap();
}
