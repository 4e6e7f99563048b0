pub mod builders;
pub mod dns_server_mock;

pub use builders::QueryBuilder;
pub use dns_server_mock::{MockBehavior, MockDnsServer};
