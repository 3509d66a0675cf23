//! # Odd/even routing demo
//!
//! Wires the full flow: a sequence source ticking every 100ms and a random
//! injector ticking every 1000ms both feed the "numbers" channel; a parity
//! router fans messages out to the "even" and "odd" channels, each carrying
//! a transform/handle pipeline, with an extra raw tap on "odd". Every stage
//! is logged through the event bus.
//!
//! ## Run
//! ```bash
//! cargo run --example odd_even
//! ```
//!
//! Stop with Ctrl-C.

use std::sync::Arc;

use flowline::{
    Channel, DirectChannel, FanoutChannel, Flow, FlowConfig, FlowError, Gateway, LogWriter,
    Message, Payload, Pipeline, RandomInjector, Router, SequenceSource, SinkFn, Tap, TaskRef,
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

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cfg = FlowConfig::default();
    let flow = Flow::new(cfg.clone(), vec![Arc::new(LogWriter)]);
    let bus = flow.bus();

    let numbers = DirectChannel::new("numbers", bus.clone());
    let even = FanoutChannel::new("even", bus.clone());
    let odd = FanoutChannel::new("odd", bus.clone());

    even.attach(Arc::new(Pipeline::new(
        "even-flow",
        bus.clone(),
        TransformFn::arc("even-label", number_label),
        SinkFn::arc("even-handler", |_msg: Message| async { Ok::<(), FlowError>(()) }),
    )));
    odd.attach(Arc::new(Pipeline::new(
        "odd-flow",
        bus.clone(),
        TransformFn::arc("odd-label", number_label),
        SinkFn::arc("odd-handler", |_msg: Message| async { Ok::<(), FlowError>(()) }),
    )));
    odd.attach(Arc::new(Tap::new(
        "raw-tap",
        bus.clone(),
        SinkFn::arc("raw-handler", |_msg: Message| async { Ok::<(), FlowError>(()) }),
    )));

    let router = Router::new("parity-router", bus.clone(), parity_key)
        .route("even", even.clone())
        .route("odd", odd.clone());
    numbers.attach(Arc::new(router));

    let gateway = Gateway::new(numbers.clone(), bus.clone());
    let source = SequenceSource::new(numbers.clone(), cfg.poll_interval, bus.clone());
    let injector = RandomInjector::new(
        gateway,
        cfg.inject_interval,
        cfg.random_bound_clamped(),
        bus,
    );

    flow.run(vec![Arc::new(source) as TaskRef, Arc::new(injector)])
        .await?;
    Ok(())
}
