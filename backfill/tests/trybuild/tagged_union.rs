//! Enums derive as tagged unions over their variants.

use backfill::{DefaultRegistry, Dynamic, Mergeable, NodeKind, apply_defaults};

#[derive(Mergeable)]
enum Backend {
    Memory,
    Disk { path: std::path::PathBuf, sync: bool },
    Remote(String, #[backfill(skip)] u8),
}

#[derive(Mergeable)]
struct Store {
    primary: Backend,
    extras: Vec<Dynamic>,
}

fn main() {
    let registry = DefaultRegistry::new().with(Backend::Disk {
        path: "/var/lib/store".into(),
        sync: true,
    });
    let mut store = Store {
        primary: Backend::Memory,
        extras: vec![Dynamic::new(Backend::Remote(String::new(), 1))],
    };
    assert_eq!(store.primary.kind(), NodeKind::Dynamic);
    let _ = apply_defaults(&mut store, &registry);
}
