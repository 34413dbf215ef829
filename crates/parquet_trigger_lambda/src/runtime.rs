pub use parquet_trigger_core::{contract, outcome, selection};
