//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod audit_repo;
pub mod dashboard_repo;
pub mod equipment_repo;
pub mod labour_rate_repo;
pub mod material_repo;
pub mod notification_repo;
pub mod project_component_repo;
pub mod project_repo;
pub mod quote_repo;
pub mod system_config_repo;
pub mod user_repo;

pub use audit_repo::{AuditLogRepo, PriceChangeLogRepo};
pub use dashboard_repo::DashboardRepo;
pub use equipment_repo::EquipmentRepo;
pub use labour_rate_repo::LabourRateRepo;
pub use material_repo::MaterialRepo;
pub use notification_repo::NotificationRepo;
pub use project_component_repo::ProjectComponentRepo;
pub use project_repo::ProjectRepo;
pub use quote_repo::QuoteRepo;
pub use system_config_repo::SystemConfigRepo;
pub use user_repo::UserRepo;
