//! Program-owned account records.
pub mod pool;
pub mod position;

pub use pool::{Pool, PoolStatus};
pub use position::Position;
