use std::io::{self, Cursor};

use crate::{Error, PersistentArray, Relation, VersionedDsu};

use super::{init_tracing, relation_table};

fn to_ints(bytes: &[u8]) -> Vec<i32> {
    bytes
        .chunks_exact(4)
        .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

fn to_bytes(ints: &[i32]) -> Vec<u8> {
    ints.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn sample() -> VersionedDsu {
    let mut dsu = VersionedDsu::new(7).unwrap();
    dsu.union(1, 2, Relation::SAME).unwrap();
    dsu.union(2, 3, Relation::DOMINATES).unwrap();
    dsu.union(4, 5, Relation::DOMINATED).unwrap();
    dsu.undo().unwrap();
    dsu.union(6, 1, Relation::DOMINATES).unwrap();
    dsu.union(5, 3, Relation::SAME).unwrap();
    dsu
}

/// Byte-exact layout of the smallest structure.
#[test]
fn layout_of_single_element() {
    let dsu = VersionedDsu::new(1).unwrap();
    let expected = [
        1, // n
        1, 0, // stack
        1, 1, 1, 0, 0, 0, 0, 0, 1, // parent
        1, 1, 1, 0, 0, 0, 0, 0, 1, // rank
        1, 1, 1, 0, 0, 0, 0, 0, 0, // weight
    ];
    assert_eq!(to_ints(&dsu.save().unwrap()), expected);
}

/// Stack is written top first.
#[test]
fn stack_written_top_first() {
    let dsu = sample();
    assert_eq!(dsu.history().as_slice(), &[0, 1, 2, 4, 5]);
    let ints = to_ints(&dsu.save().unwrap());
    assert_eq!(&ints[..7], &[7, 5, 5, 4, 2, 1, 0]);
}

#[test]
fn round_trip_every_version() {
    init_tracing();
    let dsu = sample();
    let restored = VersionedDsu::load(&dsu.save().unwrap()).unwrap();

    assert_eq!(restored.domain_size(), dsu.domain_size());
    assert_eq!(restored.current(), dsu.current());
    assert_eq!(restored.history(), dsu.history());
    assert_eq!(restored.version_count(), dsu.version_count());
    assert_eq!(
        restored.union_find().arrays().map(PersistentArray::node_count),
        dsu.union_find().arrays().map(PersistentArray::node_count),
    );
    for version in 0..dsu.version_count() {
        assert_eq!(relation_table(&restored, version), relation_table(&dsu, version));
        for x in 1..=7 {
            assert_eq!(restored.find_at(x, version).unwrap(), dsu.find_at(x, version).unwrap());
            assert_eq!(restored.rank_at(version, x).unwrap(), dsu.rank_at(version, x).unwrap());
        }
    }
    assert_eq!(restored.save().unwrap(), dsu.save().unwrap());
}

/// A restored structure keeps working: undo, time travel, new unions.
#[test]
fn restored_structure_is_live() {
    let mut restored = VersionedDsu::load(&sample().save().unwrap()).unwrap();
    assert_eq!(restored.undo().unwrap(), 4);
    assert_eq!(restored.time_travel(1).unwrap(), 1);
    assert!(matches!(restored.time_travel(3), Err(Error::NotOnStack { version: 3 })));
    let v = restored.union(7, 1, Relation::SAME).unwrap().version();
    assert_eq!(v, 6);
    assert_eq!(restored.relation(7, 2).unwrap(), Some(Relation::SAME));
}

#[test]
fn reader_writer_round_trip() {
    let dsu = sample();
    let mut sink = Vec::new();
    dsu.write_to(&mut sink).unwrap();
    let restored = VersionedDsu::read_from(Cursor::new(sink)).unwrap();
    assert_eq!(restored.history(), dsu.history());
}

struct FailingWriter;

impl io::Write for FailingWriter {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn write_failure_is_io_error() {
    let dsu = sample();
    let before = dsu.save().unwrap();
    assert!(matches!(dsu.write_to(FailingWriter), Err(Error::Io(_))));
    assert_eq!(dsu.save().unwrap(), before);
}

#[test]
fn every_truncation_rejected() {
    let bytes = sample().save().unwrap();
    for len in 0..bytes.len() {
        let err = VersionedDsu::load(&bytes[..len]).unwrap_err();
        assert!(matches!(err, Error::Truncated { .. }), "len {len}: {err}");
    }
}

#[test]
fn trailing_bytes_rejected() {
    let mut bytes = sample().save().unwrap();
    bytes.push(0);
    assert!(matches!(VersionedDsu::load(&bytes), Err(Error::Corrupt(_))));
}

#[test]
fn huge_counts_rejected_before_allocating() {
    let bytes = to_bytes(&[3, i32::MAX]);
    assert!(matches!(VersionedDsu::load(&bytes), Err(Error::Truncated { .. })));
}

#[test]
fn bad_header_rejected() {
    let mut ints = to_ints(&VersionedDsu::new(1).unwrap().save().unwrap());
    ints[0] = -1;
    assert!(matches!(VersionedDsu::load(&to_bytes(&ints)), Err(Error::Corrupt(_))));
    ints[0] = 0;
    assert!(matches!(VersionedDsu::load(&to_bytes(&ints)), Err(Error::EmptyDomain)));
}

#[test]
fn history_must_start_at_zero() {
    let mut ints = to_ints(&VersionedDsu::new(1).unwrap().save().unwrap());
    ints[2] = 5;
    assert!(matches!(VersionedDsu::load(&to_bytes(&ints)), Err(Error::Corrupt(_))));
}

#[test]
fn handles_outside_pool_rejected() {
    let clean = to_ints(&VersionedDsu::new(1).unwrap().save().unwrap());

    let mut ints = clean.clone();
    ints[9] = 7; // parent node 1, left child
    assert!(matches!(VersionedDsu::load(&to_bytes(&ints)), Err(Error::Corrupt(_))));

    let mut ints = clean.clone();
    ints[4] = 2; // parent version 0 root
    assert!(matches!(VersionedDsu::load(&to_bytes(&ints)), Err(Error::Corrupt(_))));

    let mut ints = clean;
    ints[6] = 1; // sentinel with a child
    assert!(matches!(VersionedDsu::load(&to_bytes(&ints)), Err(Error::Corrupt(_))));
}

/// Corrupt values that pass structural checks surface on read, not as hangs.
#[test]
fn corrupt_values_reported_on_read() {
    let mut ints = to_ints(&VersionedDsu::new(2).unwrap().save().unwrap());
    assert_eq!(ints[4], 3); // parent root is the inner node
    ints[11] = 2; // parent[1] = 2
    ints[14] = 1; // parent[2] = 1
    let dsu = VersionedDsu::load(&to_bytes(&ints)).unwrap();
    assert!(matches!(dsu.find(1), Err(Error::Corrupt(_))));

    let mut ints = to_ints(&VersionedDsu::new(1).unwrap().save().unwrap());
    ints[29] = 5; // weight[1]
    let dsu = VersionedDsu::load(&to_bytes(&ints)).unwrap();
    assert!(matches!(dsu.weight_at(0, 1), Err(Error::Corrupt(_))));
    assert_eq!(dsu.find(1).unwrap().root, 1);
}

#[test]
fn leaf_above_bottom_level_reported() {
    let mut ints = to_ints(&VersionedDsu::new(2).unwrap().save().unwrap());
    ints[4] = 1; // parent root points at a leaf
    let dsu = VersionedDsu::load(&to_bytes(&ints)).unwrap();
    assert!(matches!(dsu.parent_at(0, 2), Err(Error::Corrupt(_))));
}

#[test]
fn arrays_out_of_lockstep_rejected() {
    let single = to_ints(&VersionedDsu::new(1).unwrap().save().unwrap());
    let mut ints = single[..3].to_vec();
    ints.extend_from_slice(&[2, 1, 1, 1, 0, 0, 0, 0, 0, 1]); // parent: two versions
    ints.extend_from_slice(&single[12..]); // rank and weight: one version
    assert!(matches!(VersionedDsu::load(&to_bytes(&ints)), Err(Error::Corrupt(_))));
}
