use crate::{NodeArena, PersistentArray, Relation, UnionFind};

/// All three arrays have a root for every committed version.
#[test]
fn version_lists_stay_aligned() {
    let mut uf = UnionFind::<NodeArena>::new(10).unwrap();
    let ops = [
        (1, 2, Relation::SAME),
        (3, 4, Relation::DOMINATES),
        (1, 3, Relation::DOMINATED),
        (5, 1, Relation::SAME),
        (6, 7, Relation::DOMINATES),
        (7, 8, Relation::DOMINATES),
        (8, 5, Relation::SAME),
        (2, 4, Relation::SAME),
    ];
    let mut version = 0;
    for (a, b, rel) in ops {
        let next = uf.union(a, b, rel, version).unwrap();
        let counts = uf.arrays().map(PersistentArray::version_count);
        assert_eq!(counts, [uf.version_count(); 3]);
        version = next;
    }

    for v in 0..uf.version_count() {
        for x in 1..=10 {
            uf.parent_at(v, x).unwrap();
            uf.rank_at(v, x).unwrap();
            uf.weight_at(v, x).unwrap();
        }
    }
}

/// Branching from an old version still aligns the arrays.
#[test]
fn union_from_older_version() {
    let mut uf = UnionFind::<NodeArena>::new(4).unwrap();
    let v1 = uf.union(1, 2, Relation::SAME, 0).unwrap();
    let v2 = uf.union(3, 4, Relation::DOMINATES, 0).unwrap();
    assert_eq!((v1, v2), (1, 2));
    assert_eq!(uf.relation(1, 2, v2).unwrap(), None);
    assert_eq!(uf.relation(3, 4, v2).unwrap(), Some(Relation::DOMINATES));
    assert_eq!(uf.relation(3, 4, v1).unwrap(), None);
}

/// Errors in the middle of a union commit nothing.
#[test]
fn failed_union_commits_nothing() {
    let mut uf = UnionFind::<NodeArena>::new(3).unwrap();
    assert!(uf.union(1, 4, Relation::SAME, 0).is_err());
    assert!(uf.union(1, 2, Relation::SAME, 3).is_err());
    assert_eq!(uf.version_count(), 1);
    assert_eq!(uf.arrays().map(PersistentArray::version_count), [1; 3]);
}
