//! Command implementations.

pub mod analyze;
pub mod init_config;
pub mod inspect;
pub mod validate;

pub use self::analyze::execute_analyze;
pub use self::init_config::execute_init_config;
pub use self::inspect::execute_inspect;
pub use self::validate::execute_validate;
