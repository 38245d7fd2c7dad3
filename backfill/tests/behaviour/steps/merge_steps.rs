//! Steps for filling zero fields on a flat record.

use crate::fixtures::{MergeContext, Server};
use anyhow::{Result, anyhow, ensure};
use backfill::{DefaultRegistry, MergeError, apply_defaults};
use rstest_bdd_macros::{given, then, when};

fn register(merge_context: &MergeContext, server: Server) {
    let mut registry = merge_context.registry.take().unwrap_or_default();
    registry.register(server);
    merge_context.registry.set(registry);
}

#[given("an unnamed server with timeout {timeout}")]
fn unnamed_server(merge_context: &MergeContext, timeout: u64) -> Result<()> {
    ensure!(merge_context.server.is_empty(), "server already initialised");
    merge_context.server.set(Server {
        name: String::new(),
        timeout,
    });
    Ok(())
}

#[given("a server named {name} with timeout {timeout}")]
fn named_server(merge_context: &MergeContext, name: String, timeout: u64) -> Result<()> {
    ensure!(merge_context.server.is_empty(), "server already initialised");
    merge_context.server.set(Server { name, timeout });
    Ok(())
}

#[given("a registered server default with timeout {timeout}")]
fn server_default(merge_context: &MergeContext, timeout: u64) {
    register(
        merge_context,
        Server {
            name: String::new(),
            timeout,
        },
    );
}

#[given("a registered server default named {name} with timeout {timeout}")]
fn named_server_default(merge_context: &MergeContext, name: String, timeout: u64) {
    register(merge_context, Server { name, timeout });
}

#[when("server defaults are applied")]
fn apply_server_defaults(merge_context: &MergeContext) -> Result<()> {
    let mut server = merge_context
        .server
        .take()
        .ok_or_else(|| anyhow!("server missing"))?;
    let registry = merge_context.registry.take().unwrap_or_default();
    let outcome = apply_defaults(&mut server, &registry);
    merge_context.server.set(server);
    merge_context.outcome.set(outcome);
    Ok(())
}

#[when("defaults are applied to a bare integer")]
fn apply_to_integer(merge_context: &MergeContext) {
    let mut value = 0_u32;
    let outcome = apply_defaults(&mut value, &DefaultRegistry::new());
    merge_context.outcome.set(outcome);
}

fn merged_server(merge_context: &MergeContext) -> Result<Server> {
    let outcome = merge_context
        .outcome
        .with_ref(Clone::clone)
        .ok_or_else(|| anyhow!("merge outcome missing"))?;
    outcome.map_err(|err| anyhow!("merge failed: {err}"))?;
    merge_context
        .server
        .with_ref(Clone::clone)
        .ok_or_else(|| anyhow!("server missing"))
}

#[then("the server timeout is {timeout}")]
fn assert_timeout(merge_context: &MergeContext, timeout: u64) -> Result<()> {
    let server = merged_server(merge_context)?;
    ensure!(
        server.timeout == timeout,
        "expected timeout {timeout}, got {}",
        server.timeout
    );
    Ok(())
}

#[then("the server still has no name")]
fn assert_no_name(merge_context: &MergeContext) -> Result<()> {
    let server = merged_server(merge_context)?;
    ensure!(server.name.is_empty(), "unexpected name {:?}", server.name);
    Ok(())
}

#[then("the server name is {name}")]
fn assert_name(merge_context: &MergeContext, name: String) -> Result<()> {
    let server = merged_server(merge_context)?;
    ensure!(server.name == name, "expected name {name}, got {}", server.name);
    Ok(())
}

#[then("the merge fails because the root is not a record")]
fn assert_not_a_pointer(merge_context: &MergeContext) -> Result<()> {
    let outcome = merge_context
        .outcome
        .take()
        .ok_or_else(|| anyhow!("merge outcome missing"))?;
    ensure!(
        matches!(outcome, Err(MergeError::NotAPointer { .. })),
        "unexpected outcome {outcome:?}"
    );
    Ok(())
}
