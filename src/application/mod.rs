//! Application layer - Use cases and orchestration

pub mod dashboard;
pub mod init;
pub mod journal;
pub mod manage_config;
pub mod register;
pub mod subscribe;

pub use dashboard::{DashboardService, DashboardSummary};
pub use journal::JournalService;
pub use manage_config::ConfigService;
pub use register::RegisterService;
pub use subscribe::SubscriptionService;
