use serde::{Deserialize, Serialize};

use crate::digitalocean::api::DigitalOceanApiClient;
use crate::digitalocean::error::Error;

/// Keys are addressed either by their numeric id or by their fingerprint.
pub trait DigitalOceanSshKeyClient: Send + Sync {
    fn get_all_keys(&self) -> Result<Vec<SshKey>, Error>;

    fn create_new_key(&self, key: &SshKeyRequest) -> Result<SshKey, Error>;

    fn get_existing_key(&self, id_or_fingerprint: &str) -> Result<SshKey, Error>;

    fn update_key(&self, id_or_fingerprint: &str, name: &str) -> Result<SshKey, Error>;

    fn delete_key(&self, id_or_fingerprint: &str) -> Result<(), Error>;
}

pub struct DigitalOceanSshKeyClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanSshKeyClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanSshKeyClientImpl {
        DigitalOceanSshKeyClientImpl { api }
    }
}

impl DigitalOceanSshKeyClient for DigitalOceanSshKeyClientImpl {
    fn get_all_keys(&self) -> Result<Vec<SshKey>, Error> {
        self.api.get("account/keys", &[], "ssh_keys")
    }

    fn create_new_key(&self, key: &SshKeyRequest) -> Result<SshKey, Error> {
        self.api.post("account/keys", key, "ssh_key")
    }

    fn get_existing_key(&self, id_or_fingerprint: &str) -> Result<SshKey, Error> {
        self.api
            .get(format!("account/keys/{id_or_fingerprint}").as_str(), &[], "ssh_key")
    }

    fn update_key(&self, id_or_fingerprint: &str, name: &str) -> Result<SshKey, Error> {
        self.api.put(
            format!("account/keys/{id_or_fingerprint}").as_str(),
            &SshKeyNameBody { name },
            "ssh_key",
        )
    }

    fn delete_key(&self, id_or_fingerprint: &str) -> Result<(), Error> {
        self.api
            .delete(format!("account/keys/{id_or_fingerprint}").as_str(), &[])
    }
}

// /v2/account/keys

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct SshKey {
    pub id: u64,
    /// The fingerprint is derived from the public key and can be used in place of the id.
    pub fingerprint: String,
    pub public_key: String,
    pub name: String,
}

#[derive(Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct SshKeyRequest {
    pub name: String,
    /// Full public key in OpenSSH format.
    pub public_key: String,
}

#[derive(Serialize, Debug)]
struct SshKeyNameBody<'a> {
    name: &'a str,
}
