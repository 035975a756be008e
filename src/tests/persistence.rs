use crate::{NodeArena, PersistentArray, Relation, VersionedDsu};

/// Every earlier version keeps its contents after later updates.
#[test]
fn old_versions_unchanged() {
    let mut a = PersistentArray::<NodeArena>::build(&[0; 16]).unwrap();
    let mut snapshots = vec![vec![0; 16]];
    for step in 1..=40 {
        let prev = a.version_count() - 1;
        let pos = (step * 7) % 16 + 1;
        let value = i32::try_from(step).unwrap();
        a.update(prev, pos, value).unwrap();
        let mut next = snapshots[prev].clone();
        next[pos - 1] = value;
        snapshots.push(next);
    }
    for (version, expected) in snapshots.iter().enumerate() {
        for pos in 1..=16 {
            assert_eq!(a.query(version, pos).unwrap(), expected[pos - 1]);
        }
    }
}

/// Undone versions remain readable.
#[test]
fn undone_version_still_queryable() {
    let mut dsu = VersionedDsu::new(4).unwrap();
    let v1 = dsu.union(1, 2, Relation::DOMINATES).unwrap().version();
    dsu.undo().unwrap();
    dsu.union(3, 4, Relation::SAME).unwrap();

    assert_eq!(dsu.relation(1, 2).unwrap(), None);
    assert_eq!(dsu.relation_at(1, 2, v1).unwrap(), Some(Relation::DOMINATES));
    assert_eq!(dsu.relation_at(3, 4, v1).unwrap(), None);
}
