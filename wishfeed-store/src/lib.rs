pub mod discovery;
pub mod store;

mod record;
