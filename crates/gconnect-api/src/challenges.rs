// Badge and challenge endpoints. Challenge listings take explicit
// start/limit arguments but are single-shot calls -- the caller picks the
// window, unlike the paginating activity and goal searches.

use serde_json::Value;
use tracing::debug;

use crate::client::ConnectClient;
use crate::endpoints::paths;
use crate::error::Error;

fn window(start: usize, limit: usize) -> [(&'static str, String); 2] {
    [("start", start.to_string()), ("limit", limit.to_string())]
}

impl ConnectClient {
    /// Return the badges the current user has earned.
    pub async fn get_earned_badges(&self) -> Result<Value, Error> {
        debug!("requesting earned badges");
        self.get_json(paths::EARNED_BADGES, &[]).await
    }

    /// Return historical ad-hoc challenges.
    ///
    /// Challenge listings count from 1, like goals.
    pub async fn get_adhoc_challenges(&self, start: usize, limit: usize) -> Result<Value, Error> {
        debug!("requesting adhoc challenges");
        self.get_json(paths::ADHOC_CHALLENGES, &window(start, limit))
            .await
    }

    /// Return completed badge challenges.
    pub async fn get_badge_challenges(&self, start: usize, limit: usize) -> Result<Value, Error> {
        debug!("requesting badge challenges");
        self.get_json(paths::BADGE_CHALLENGES, &window(start, limit))
            .await
    }

    /// Return badge challenges open for joining.
    pub async fn get_available_badge_challenges(
        &self,
        start: usize,
        limit: usize,
    ) -> Result<Value, Error> {
        debug!("requesting available badge challenges");
        self.get_json(paths::AVAILABLE_BADGE_CHALLENGES, &window(start, limit))
            .await
    }

    /// Return joined but not yet completed badge challenges.
    pub async fn get_non_completed_badge_challenges(
        &self,
        start: usize,
        limit: usize,
    ) -> Result<Value, Error> {
        debug!("requesting non-completed badge challenges");
        self.get_json(paths::NON_COMPLETED_BADGE_CHALLENGES, &window(start, limit))
            .await
    }
}
