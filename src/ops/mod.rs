//! Tree operations, generic over [`NodeStore`](crate::store::NodeStore).

pub mod build;
pub mod query;
pub mod update;
