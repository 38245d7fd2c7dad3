//! Generic records gain `Mergeable` bounds on their type parameters.

use std::collections::HashMap;

use backfill::{DefaultRegistry, Mergeable, apply_defaults};

#[derive(Mergeable)]
struct Keyed<V> {
    entries: Option<HashMap<String, V>>,
    fallback: V,
}

#[derive(Mergeable)]
struct Pair(u8, Box<Keyed<u16>>);

#[derive(Mergeable)]
struct Marker;

fn main() {
    let registry = DefaultRegistry::new().with(Keyed::<u16> {
        entries: None,
        fallback: 9,
    });
    let mut pair = Pair(
        1,
        Box::new(Keyed {
            entries: None,
            fallback: 0,
        }),
    );
    let _ = apply_defaults(&mut pair, &registry);
    let _ = apply_defaults(&mut Marker, &registry);
}
