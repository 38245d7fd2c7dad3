//! Binds the behavioural feature files to the step registry.

use crate::fixtures::{
    GraphContext, MergeContext, PipelineContext, graph_context, merge_context, pipeline_context,
};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/default_merging.feature",
    fixtures = [merge_context: MergeContext]
);
scenarios!(
    "tests/features/cycle_detection.feature",
    fixtures = [graph_context: GraphContext]
);
scenarios!(
    "tests/features/processing_pipeline.feature",
    fixtures = [pipeline_context: PipelineContext]
);
