//! Steps for running a service record through the `Processor`.

use crate::fixtures::{PipelineContext, Service};
use anyhow::{Result, anyhow, ensure};
use backfill::Processor;
use rstest_bdd_macros::{given, then, when};

#[given("a loaded service with port {port}")]
fn loaded_service(pipeline_context: &PipelineContext, port: u16) {
    pipeline_context.service.set(Service {
        name: "api".into(),
        port,
    });
}

#[given("a registered service default with port {port}")]
fn service_default(pipeline_context: &PipelineContext, port: u16) {
    let mut registry = pipeline_context.registry.take().unwrap_or_default();
    registry.register(Service {
        name: String::new(),
        port,
    });
    pipeline_context.registry.set(registry);
}

#[given("a transformer that adds {increment} to the port")]
fn port_transformer(pipeline_context: &PipelineContext, increment: u16) {
    pipeline_context.port_increment.set(increment);
}

#[given("a validator that rejects port {port}")]
fn port_validator(pipeline_context: &PipelineContext, port: u16) {
    pipeline_context.rejected_port.set(port);
}

#[given("a pipeline with no source")]
fn no_source(pipeline_context: &PipelineContext) -> Result<()> {
    ensure!(
        pipeline_context.service.is_empty(),
        "a service value was already loaded"
    );
    Ok(())
}

#[when("the service is processed")]
fn process_service(pipeline_context: &PipelineContext) {
    let mut processor = pipeline_context
        .service
        .take()
        .map_or_else(Processor::new, Processor::from_value)
        .with_defaults(pipeline_context.registry.take().unwrap_or_default());
    if let Some(increment) = pipeline_context.port_increment.take() {
        processor = processor.with_transformer(move |service: &mut Service| {
            service.port = service.port.saturating_add(increment);
        });
    }
    if let Some(rejected) = pipeline_context.rejected_port.take() {
        processor = processor.with_validator(move |service: &Service| {
            if service.port == rejected {
                return Err(format!("port {rejected} is not allowed"));
            }
            Ok(())
        });
    }
    pipeline_context.result.set(processor.build());
}

#[then("the processed port is {port}")]
fn assert_port(pipeline_context: &PipelineContext, port: u16) -> Result<()> {
    let service = pipeline_context
        .result
        .take()
        .ok_or_else(|| anyhow!("pipeline result missing"))?
        .map_err(|err| anyhow!("pipeline failed: {err}"))?;
    ensure!(
        service.port == port,
        "expected port {port}, got {}",
        service.port
    );
    Ok(())
}

#[then("processing fails at the {stage} stage")]
fn assert_failed_stage(pipeline_context: &PipelineContext, stage: String) -> Result<()> {
    let err = pipeline_context
        .result
        .take()
        .ok_or_else(|| anyhow!("pipeline result missing"))?
        .err()
        .ok_or_else(|| anyhow!("pipeline unexpectedly succeeded"))?;
    ensure!(
        err.stage().as_str() == stage,
        "expected failure at {stage}, got {} ({err})",
        err.stage()
    );
    Ok(())
}
