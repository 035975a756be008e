mod codec;
mod lockstep;
mod persistence;

use tracing_subscriber::EnvFilter;

use crate::{Dsu, Relation, store::NodeStore};

/// Installs a test subscriber honoring `RUST_LOG`; repeated calls are no-ops.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Relation of every ordered pair `(a, b)` at `version`.
fn relation_table<S: NodeStore>(dsu: &Dsu<S>, version: usize) -> Vec<Option<Relation>> {
    let n = dsu.domain_size();
    let mut table = Vec::with_capacity(n * n);
    for a in 1..=n {
        for b in 1..=n {
            table.push(dsu.relation_at(a, b, version).unwrap());
        }
    }
    table
}
