//! The derive resolves items through a re-export when `crate` is overridden.

mod deps {
    pub use backfill as fill;
}

use backfill::{DefaultRegistry, apply_defaults};

#[derive(Debug, PartialEq, backfill::Mergeable)]
#[backfill(crate = "deps::fill")]
struct Aliased {
    retries: u32,
    #[backfill(skip)]
    tag: &'static str,
}

fn main() {
    let registry = DefaultRegistry::new().with(Aliased { retries: 3, tag: "ignored" });
    let mut value = Aliased { retries: 0, tag: "kept" };
    let result: Result<(), backfill::MergeError> = apply_defaults(&mut value, &registry);
    assert!(result.is_ok());
    assert_eq!(value, Aliased { retries: 3, tag: "kept" });
}
