// Host inventory endpoints: listing, CRUD, and WOL registration.

use crate::client::WolClient;
use crate::error::Error;
use crate::models::{
    HostCreate, HostResponse, HostUpdate, WolRegistrationResponse, WolRosterResponse,
};

impl WolClient {
    /// `GET /hosts`: the full host inventory, in server order.
    pub async fn list_hosts(&self) -> Result<Vec<HostResponse>, Error> {
        self.get(self.api_url("hosts")?).await
    }

    /// `GET /hosts/wol-registered`: only hosts with WOL enabled.
    pub async fn list_wol_registered(&self) -> Result<WolRosterResponse, Error> {
        self.get(self.api_url("hosts/wol-registered")?).await
    }

    /// `GET /hosts/{ip}`
    pub async fn get_host(&self, ip: &str) -> Result<HostResponse, Error> {
        self.get(self.api_url(&format!("hosts/{ip}"))?).await
    }

    /// `POST /hosts`: 409 if the IP already exists.
    pub async fn create_host(&self, host: &HostCreate) -> Result<HostResponse, Error> {
        self.post(self.api_url("hosts")?, host).await
    }

    /// `PUT /hosts/{ip}`: partial update; absent fields are left unchanged.
    pub async fn update_host(&self, ip: &str, update: &HostUpdate) -> Result<HostResponse, Error> {
        self.put(self.api_url(&format!("hosts/{ip}"))?, update).await
    }

    /// `DELETE /hosts/{ip}`
    pub async fn delete_host(&self, ip: &str) -> Result<(), Error> {
        self.delete(self.api_url(&format!("hosts/{ip}"))?).await
    }

    /// `POST /hosts/{ip}/register-wol`: 400 if the host has no MAC address.
    pub async fn register_wol(&self, ip: &str) -> Result<WolRegistrationResponse, Error> {
        self.post_empty(self.api_url(&format!("hosts/{ip}/register-wol"))?)
            .await
    }

    /// `POST /hosts/{ip}/unregister-wol`
    pub async fn unregister_wol(&self, ip: &str) -> Result<WolRegistrationResponse, Error> {
        self.post_empty(self.api_url(&format!("hosts/{ip}/unregister-wol"))?)
            .await
    }
}
