use serde::{Deserialize, Serialize};

use crate::digitalocean::api::DigitalOceanApiClient;
use crate::digitalocean::error::Error;

pub trait DigitalOceanAccountClient: Send + Sync {
    fn get_account(&self) -> Result<Account, Error>;
}

pub struct DigitalOceanAccountClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanAccountClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanAccountClientImpl {
        DigitalOceanAccountClientImpl { api }
    }
}

impl DigitalOceanAccountClient for DigitalOceanAccountClientImpl {
    /// Get information about the account the token belongs to.
    fn get_account(&self) -> Result<Account, Error> {
        self.api.get("account", &[], "account")
    }
}

// /v2/account

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct Account {
    /// The total number of Droplets current user or team may have active at one time.
    pub droplet_limit: u32,
    /// The total number of Floating IPs the current user or team may have.
    pub floating_ip_limit: u32,
    /// The total number of volumes the current user or team may have.
    pub volume_limit: Option<u32>,
    /// The email address used by the current user to register for DigitalOcean.
    pub email: String,
    /// The unique universal identifier for the current user.
    pub uuid: String,
    /// If true, the user has verified their account via email. False otherwise.
    pub email_verified: bool,
    /// This value is one of "active", "warning" or "locked".
    pub status: String,
    /// A human-readable message giving more details about the status of the account.
    pub status_message: String,
}
