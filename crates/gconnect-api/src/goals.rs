// Goal endpoints. Goals are paged with a 1-based starting offset --
// an upstream convention that differs from the activity search and must
// be preserved exactly.

use serde_json::Value;
use tracing::debug;

use crate::client::ConnectClient;
use crate::endpoints::paths;
use crate::error::Error;

/// Goal filter accepted by the goal service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GoalStatus {
    #[default]
    Active,
    Future,
    Past,
}

impl GoalStatus {
    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Future => "future",
            Self::Past => "past",
        }
    }
}

impl ConnectClient {
    /// Fetch all goals with the given status.
    ///
    /// Pages through the goal service `page_size` at a time starting at
    /// index `start` (the service counts goals from 1), until an empty
    /// page is returned. Ascending sort order is requested on every page.
    pub async fn get_goals(
        &self,
        status: GoalStatus,
        start: usize,
        page_size: usize,
    ) -> Result<Vec<Value>, Error> {
        let base_params = [
            ("status", status.as_str().to_owned()),
            ("sortOrder", "asc".to_owned()),
        ];
        debug!("requesting {} goals", status.as_str());

        self.paged_get(paths::GOALS, &base_params, start, page_size)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_status_wire_names() {
        assert_eq!(GoalStatus::Active.as_str(), "active");
        assert_eq!(GoalStatus::Future.as_str(), "future");
        assert_eq!(GoalStatus::Past.as_str(), "past");
        assert_eq!(GoalStatus::default(), GoalStatus::Active);
    }
}
