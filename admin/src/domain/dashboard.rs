//! Headline figures for the dashboard overview.

use crate::domain::binding::View;
use crate::domain::seed::ADMIN_ROLE;
use crate::domain::state::StoreState;

/// Counts shown on the overview cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    /// Every user.
    pub total_users: usize,
    /// Users with `is_active` set.
    pub active_users: usize,
    /// Every role.
    pub role_count: usize,
    /// Users assigned the `admin` role.
    pub admin_users: usize,
}

impl DashboardStats {
    /// Compute the figures from `state`.
    #[must_use]
    pub fn from_state(state: StoreState<'_>) -> Self {
        let users = state.users();
        Self {
            total_users: users.len(),
            active_users: users.iter().filter(|user| user.is_active).count(),
            role_count: state.roles().len(),
            admin_users: users.iter().filter(|user| user.role == ADMIN_ROLE).count(),
        }
    }

    /// Active share in tenths of a percent, rounded half up.
    ///
    /// Returns `None` when there are no users.
    ///
    /// ```
    /// use rbac_admin::domain::DashboardStats;
    ///
    /// let stats = DashboardStats { total_users: 3, active_users: 2, ..DashboardStats::default() };
    /// assert_eq!(stats.active_share_tenths(), Some(667));
    /// assert_eq!(stats.active_share_label().as_deref(), Some("66.7%"));
    /// ```
    #[must_use]
    pub fn active_share_tenths(&self) -> Option<usize> {
        let numerator = self
            .active_users
            .checked_mul(2000)?
            .checked_add(self.total_users)?;
        let denominator = self.total_users.checked_mul(2)?;
        numerator.checked_div(denominator)
    }

    /// Active share formatted with one decimal, such as `"75.0%"`.
    #[must_use]
    pub fn active_share_label(&self) -> Option<String> {
        self.active_share_tenths().map(|tenths| {
            format!("{}.{}%", tenths.div_euclid(10), tenths.rem_euclid(10))
        })
    }

    /// Overview lines in card order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let share = self
            .active_share_label()
            .unwrap_or_else(|| "n/a".to_owned());
        vec![
            format!(
                "Total users: {} ({} active)",
                self.total_users, self.active_users
            ),
            format!("Total roles: {}", self.role_count),
            format!("Active users: {} ({share} of total)", self.active_users),
            format!("Admin users: {}", self.admin_users),
        ]
    }
}

/// View that keeps the latest [`DashboardStats`].
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    stats: DashboardStats,
}

impl DashboardView {
    /// Figures from the most recent render.
    #[must_use]
    pub const fn stats(&self) -> DashboardStats {
        self.stats
    }
}

impl View for DashboardView {
    fn render(&mut self, state: StoreState<'_>) {
        self.stats = DashboardStats::from_state(state);
    }
}
