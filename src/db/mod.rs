mod memory;
mod pool;
mod postgres;
pub mod store;

pub use memory::MemoryStore;
pub use pool::create_pool;
pub use postgres::PgStore;
pub use store::{RecordQuery, RecordStore, Store, StreakStore};
