//! Dashboard module - per-user and global summaries.

mod dashboard_model;
mod dashboard_service;
mod dashboard_traits;

pub use dashboard_model::{AdminDashboard, UserDashboard};
pub use dashboard_service::DashboardService;
pub use dashboard_traits::DashboardServiceTrait;
