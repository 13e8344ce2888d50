pub mod snapshot;

pub use snapshot::Snapshot;
