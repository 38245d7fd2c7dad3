//! Steps for cyclic and shared reference graphs.

use std::rc::Rc;

use crate::fixtures::{GraphContext, GraphNode, SharedPair};
use anyhow::{Result, anyhow, ensure};
use backfill::{MergeError, apply_defaults};
use rstest_bdd_macros::{given, then, when};

#[given("node {from} links to node {to}")]
fn link_nodes(graph_context: &GraphContext, from: String, to: String) -> Result<()> {
    let mut nodes = graph_context.nodes.take().unwrap_or_default();
    let target = Rc::clone(
        nodes
            .entry(to.clone())
            .or_insert_with(|| GraphNode::shared(&to)),
    );
    nodes
        .entry(from.clone())
        .or_insert_with(|| GraphNode::shared(&from))
        .try_borrow_mut()
        .map_err(|err| anyhow!("node {from} already borrowed: {err}"))?
        .next = Some(target);
    graph_context.nodes.set(nodes);
    Ok(())
}

#[given("a registered node default with weight {weight}")]
fn node_default(graph_context: &GraphContext, weight: u32) {
    let mut registry = graph_context.registry.take().unwrap_or_default();
    registry.register(GraphNode {
        label: String::new(),
        weight,
        next: None,
    });
    graph_context.registry.set(registry);
}

#[given("a shared node referenced twice")]
fn shared_node(graph_context: &GraphContext) {
    let node = GraphNode::shared("shared");
    graph_context.shared.set(SharedPair {
        left: Rc::clone(&node),
        right: node,
    });
}

#[when("node defaults are applied starting at {label}")]
fn apply_from(graph_context: &GraphContext, label: String) -> Result<()> {
    let mut root = graph_context
        .nodes
        .with_ref(|nodes| nodes.get(&label).map(Rc::clone))
        .flatten()
        .ok_or_else(|| anyhow!("node {label} missing"))?;
    let registry = graph_context.registry.take().unwrap_or_default();
    graph_context
        .outcome
        .set(apply_defaults(&mut root, &registry));
    Ok(())
}

#[when("the shared graph is filled")]
fn fill_shared(graph_context: &GraphContext) -> Result<()> {
    let mut pair = graph_context
        .shared
        .take()
        .ok_or_else(|| anyhow!("shared pair missing"))?;
    let registry = graph_context.registry.take().unwrap_or_default();
    graph_context
        .outcome
        .set(apply_defaults(&mut pair, &registry));
    graph_context.shared.set(pair);
    Ok(())
}

#[then("a circular reference error is reported")]
fn assert_cycle(graph_context: &GraphContext) -> Result<()> {
    let outcome = graph_context
        .outcome
        .with_ref(Clone::clone)
        .ok_or_else(|| anyhow!("merge outcome missing"))?;
    ensure!(
        matches!(outcome, Err(MergeError::CircularReference { .. })),
        "unexpected outcome {outcome:?}"
    );
    Ok(())
}

#[then("node {label} has weight {weight}")]
fn assert_node_weight(graph_context: &GraphContext, label: String, weight: u32) -> Result<()> {
    let actual = graph_context
        .nodes
        .with_ref(|nodes| nodes.get(&label).map(|node| node.borrow().weight))
        .flatten()
        .ok_or_else(|| anyhow!("node {label} missing"))?;
    ensure!(
        actual == weight,
        "expected node {label} to have weight {weight}, got {actual}"
    );
    Ok(())
}

#[then("the shared node ends with weight {weight}")]
fn assert_shared_weight(graph_context: &GraphContext, weight: u32) -> Result<()> {
    let outcome = graph_context
        .outcome
        .take()
        .ok_or_else(|| anyhow!("merge outcome missing"))?;
    outcome.map_err(|err| anyhow!("shared graph must merge: {err}"))?;
    let (same, actual) = graph_context
        .shared
        .with_ref(|pair| {
            (
                Rc::ptr_eq(&pair.left, &pair.right),
                pair.left.borrow().weight,
            )
        })
        .ok_or_else(|| anyhow!("shared pair missing"))?;
    ensure!(same, "shared handles were split apart");
    ensure!(actual == weight, "expected weight {weight}, got {actual}");
    Ok(())
}
