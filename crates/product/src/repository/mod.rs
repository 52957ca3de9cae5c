mod memory;
mod postgres;

pub use self::memory::InMemoryProductStore;
pub use self::postgres::PostgresProductStore;
