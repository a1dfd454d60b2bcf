mod postgres;
mod store;

pub use postgres::create_pool;
pub use store::{PgRentalStore, RentalStore};

#[cfg(test)]
pub use store::MockRentalStore;
