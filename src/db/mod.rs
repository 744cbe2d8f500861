#[cfg(test)]
pub mod memory;
pub mod records;
pub mod source;

pub use records::SqliteRecordStore;
pub use source::RecordSource;
