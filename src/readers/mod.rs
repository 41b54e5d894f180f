pub mod record_store;
pub mod table_reader;

pub use record_store::{load, RecordStore};
pub use table_reader::{decode_text, parse_records, TableReader};
