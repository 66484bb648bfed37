// Discovery control, status/statistics, and the WOL wake/test endpoints.

use crate::client::WolClient;
use crate::error::Error;
use crate::models::{
    DiscoveryStatusResponse, HostResponse, MessageResponse, StatisticsResponse, WakeResponse,
    WolTestResponse,
};

impl WolClient {
    /// `GET /discovery/status`
    pub async fn discovery_status(&self) -> Result<DiscoveryStatusResponse, Error> {
        self.get(self.api_url("discovery/status")?).await
    }

    /// `GET /discovery/statistics`
    pub async fn discovery_statistics(&self) -> Result<StatisticsResponse, Error> {
        self.get(self.api_url("discovery/statistics")?).await
    }

    /// `POST /discovery/start`: begin periodic background discovery.
    pub async fn start_discovery(&self) -> Result<MessageResponse, Error> {
        self.post_empty(self.api_url("discovery/start")?).await
    }

    /// `POST /discovery/stop`
    pub async fn stop_discovery(&self) -> Result<MessageResponse, Error> {
        self.post_empty(self.api_url("discovery/stop")?).await
    }

    /// `POST /discovery/run`: one immediate scan; returns the hosts it found.
    pub async fn run_discovery(&self) -> Result<Vec<HostResponse>, Error> {
        self.post_empty(self.api_url("discovery/run")?).await
    }

    /// `POST /discovery/discover/{ip}`: rescan one host; 404 if it did not answer.
    pub async fn discover_host(&self, ip: &str) -> Result<HostResponse, Error> {
        self.post_empty(self.api_url(&format!("discovery/discover/{ip}"))?)
            .await
    }

    /// `POST /wol/test/{ip}`: whether the backend could wake this host, and why not.
    pub async fn test_wol(&self, ip: &str) -> Result<WolTestResponse, Error> {
        self.post_empty(self.api_url(&format!("wol/test/{ip}"))?)
            .await
    }

    /// `POST /wol/wake/{ip}`
    ///
    /// The backend answers 200 with `success: false` when the packet could
    /// not be sent, so callers must check the body.
    pub async fn wake(&self, ip: &str) -> Result<WakeResponse, Error> {
        self.post_empty(self.api_url(&format!("wol/wake/{ip}"))?)
            .await
    }
}
