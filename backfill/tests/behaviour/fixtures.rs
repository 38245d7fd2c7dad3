//! Shared fixtures and scenario state for the behavioural tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use backfill::{BackfillResult, DefaultRegistry, MergeError, Mergeable};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// Record used by the default-merging scenarios.
#[derive(Debug, Clone, PartialEq, Mergeable)]
pub struct Server {
    pub name: String,
    pub timeout: u64,
}

/// Linked node used to build cyclic and shared graphs.
#[derive(Debug, Mergeable)]
pub struct GraphNode {
    pub label: String,
    pub weight: u32,
    pub next: Option<Rc<RefCell<GraphNode>>>,
}

impl GraphNode {
    pub fn shared(label: &str) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            label: label.to_owned(),
            weight: 0,
            next: None,
        }))
    }
}

/// Two handles to what may be the same node.
#[derive(Debug, Mergeable)]
pub struct SharedPair {
    pub left: Rc<RefCell<GraphNode>>,
    pub right: Rc<RefCell<GraphNode>>,
}

/// Record processed by the pipeline scenarios.
#[derive(Debug, Clone, PartialEq, Mergeable)]
pub struct Service {
    pub name: String,
    pub port: u16,
}

/// State shared by the default-merging steps.
#[derive(Debug, Default, ScenarioState)]
pub struct MergeContext {
    pub server: Slot<Server>,
    pub registry: Slot<DefaultRegistry>,
    pub outcome: Slot<Result<(), MergeError>>,
}

/// State shared by the cycle-detection steps.
#[derive(Debug, Default, ScenarioState)]
pub struct GraphContext {
    pub nodes: Slot<HashMap<String, Rc<RefCell<GraphNode>>>>,
    pub shared: Slot<SharedPair>,
    pub registry: Slot<DefaultRegistry>,
    pub outcome: Slot<Result<(), MergeError>>,
}

impl Drop for GraphContext {
    fn drop(&mut self) {
        if let Some(nodes) = self.nodes.take() {
            for node in nodes.values() {
                node.borrow_mut().next = None;
            }
        }
    }
}

/// State shared by the pipeline steps.
#[derive(Debug, Default, ScenarioState)]
pub struct PipelineContext {
    pub service: Slot<Service>,
    pub registry: Slot<DefaultRegistry>,
    pub port_increment: Slot<u16>,
    pub rejected_port: Slot<u16>,
    pub result: Slot<BackfillResult<Service>>,
}

#[fixture]
pub fn merge_context() -> MergeContext {
    MergeContext::default()
}

#[fixture]
pub fn graph_context() -> GraphContext {
    GraphContext::default()
}

#[fixture]
pub fn pipeline_context() -> PipelineContext {
    PipelineContext::default()
}
