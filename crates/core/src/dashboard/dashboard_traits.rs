use crate::dashboard::dashboard_model::{AdminDashboard, UserDashboard};
use crate::errors::Result;
use crate::users::UserContext;

/// Trait for dashboard service operations
pub trait DashboardServiceTrait: Send + Sync {
    /// Requires the admin role.
    fn get_admin_dashboard(&self, ctx: &UserContext) -> Result<AdminDashboard>;
    fn get_user_dashboard(&self, ctx: &UserContext) -> Result<UserDashboard>;
}
