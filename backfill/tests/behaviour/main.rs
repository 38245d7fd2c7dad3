//! Behavioural tests for `backfill` using `rstest-bdd`.
//!
//! Feature files live under `tests/features`. [`scenarios`] binds them to the
//! fixtures in [`fixtures`], and the step implementations live in [`steps`].

mod fixtures;
mod scenarios;
mod steps;
