//! Command implementations.

pub mod config;
pub mod eligibility;
pub mod heat;
pub mod marketplace;
pub mod pledge;

pub use self::config::execute_config;
pub use self::eligibility::execute_eligibility;
pub use self::heat::execute_heat;
pub use self::marketplace::execute_marketplace;
pub use self::pledge::execute_pledge;
