pub mod migrations;
pub mod migrator;
pub mod runner;

pub use migrator::Migrator;
pub use runner::run_all_migrations;
