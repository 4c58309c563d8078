use std::sync::Arc;

use crate::digitalocean::account::{DigitalOceanAccountClient, DigitalOceanAccountClientImpl};
use crate::digitalocean::action::{DigitalOceanActionClient, DigitalOceanActionClientImpl};
use crate::digitalocean::api::DigitalOceanApiClient;
use crate::digitalocean::billing::{DigitalOceanBillingClient, DigitalOceanBillingClientImpl};
use crate::digitalocean::block_storage::{
    DigitalOceanBlockStorageActionClient, DigitalOceanBlockStorageActionClientImpl,
    DigitalOceanBlockStorageClient, DigitalOceanBlockStorageClientImpl,
};
use crate::digitalocean::cdn::{DigitalOceanCdnClient, DigitalOceanCdnClientImpl};
use crate::digitalocean::certificate::{
    DigitalOceanCertificateClient, DigitalOceanCertificateClientImpl,
};
use crate::digitalocean::dns::{DigitalOceanDnsClient, DigitalOceanDnsClientImpl};
use crate::digitalocean::droplet::{
    DigitalOceanDropletActionClient, DigitalOceanDropletActionClientImpl,
    DigitalOceanDropletClient, DigitalOceanDropletClientImpl,
};
use crate::digitalocean::error::Error;
use crate::digitalocean::firewall::{DigitalOceanFirewallClient, DigitalOceanFirewallClientImpl};
use crate::digitalocean::floating_ip::{
    DigitalOceanFloatingIpActionClient, DigitalOceanFloatingIpActionClientImpl,
    DigitalOceanFloatingIpClient, DigitalOceanFloatingIpClientImpl,
};
use crate::digitalocean::image::{
    DigitalOceanImageActionClient, DigitalOceanImageActionClientImpl, DigitalOceanImageClient,
    DigitalOceanImageClientImpl,
};
use crate::digitalocean::kubernetes::{
    DigitalOceanKubernetesClient, DigitalOceanKubernetesClientImpl,
};
use crate::digitalocean::loadbalancer::{
    DigitalOceanLoadBalancerClient, DigitalOceanLoadBalancerClientImpl,
};
use crate::digitalocean::project::{DigitalOceanProjectClient, DigitalOceanProjectClientImpl};
use crate::digitalocean::region::{DigitalOceanRegionClient, DigitalOceanRegionClientImpl};
use crate::digitalocean::size::{DigitalOceanSizeClient, DigitalOceanSizeClientImpl};
use crate::digitalocean::snapshot::{DigitalOceanSnapshotClient, DigitalOceanSnapshotClientImpl};
use crate::digitalocean::ssh_key::{DigitalOceanSshKeyClient, DigitalOceanSshKeyClientImpl};
use crate::digitalocean::tag::{DigitalOceanTagClient, DigitalOceanTagClientImpl};

pub mod account;
pub mod action;
pub mod api;
pub mod billing;
pub mod block_storage;
pub mod cdn;
pub mod certificate;
pub mod dns;
pub mod droplet;
pub mod error;
pub mod firewall;
pub mod floating_ip;
pub mod image;
pub mod kubernetes;
pub mod loadbalancer;
pub mod project;
pub mod region;
pub mod size;
pub mod snapshot;
pub mod ssh_key;
pub mod tag;

/// One handle on the whole API: every resource family is a public field sharing the same
/// transport configuration.
pub struct DigitalOceanClient {
    api: DigitalOceanApiClient,
    pub account: Arc<dyn DigitalOceanAccountClient>,
    pub actions: Arc<dyn DigitalOceanActionClient>,
    pub billing: Arc<dyn DigitalOceanBillingClient>,
    pub block_storage: Arc<dyn DigitalOceanBlockStorageClient>,
    pub block_storage_actions: Arc<dyn DigitalOceanBlockStorageActionClient>,
    pub cdn: Arc<dyn DigitalOceanCdnClient>,
    pub certificates: Arc<dyn DigitalOceanCertificateClient>,
    pub domains: Arc<dyn DigitalOceanDnsClient>,
    pub droplets: Arc<dyn DigitalOceanDropletClient>,
    pub droplet_actions: Arc<dyn DigitalOceanDropletActionClient>,
    pub firewalls: Arc<dyn DigitalOceanFirewallClient>,
    pub floating_ips: Arc<dyn DigitalOceanFloatingIpClient>,
    pub floating_ip_actions: Arc<dyn DigitalOceanFloatingIpActionClient>,
    pub images: Arc<dyn DigitalOceanImageClient>,
    pub image_actions: Arc<dyn DigitalOceanImageActionClient>,
    pub kubernetes: Arc<dyn DigitalOceanKubernetesClient>,
    pub load_balancers: Arc<dyn DigitalOceanLoadBalancerClient>,
    pub projects: Arc<dyn DigitalOceanProjectClient>,
    pub regions: Arc<dyn DigitalOceanRegionClient>,
    pub sizes: Arc<dyn DigitalOceanSizeClient>,
    pub snapshots: Arc<dyn DigitalOceanSnapshotClient>,
    pub ssh_keys: Arc<dyn DigitalOceanSshKeyClient>,
    pub tags: Arc<dyn DigitalOceanTagClient>,
}

impl DigitalOceanClient {
    pub fn new(token: &str) -> Result<DigitalOceanClient, Error> {
        Ok(DigitalOceanClient::new_for_client(DigitalOceanApiClient::new(
            token,
        )?))
    }

    pub fn new_with_base_url(token: &str, base_url: &str) -> Result<DigitalOceanClient, Error> {
        Ok(DigitalOceanClient::new_for_client(
            DigitalOceanApiClient::new_with_base_url(token, base_url)?,
        ))
    }

    fn new_for_client(api: DigitalOceanApiClient) -> DigitalOceanClient {
        DigitalOceanClient {
            account: Arc::new(DigitalOceanAccountClientImpl::new(api.clone())),
            actions: Arc::new(DigitalOceanActionClientImpl::new(api.clone())),
            billing: Arc::new(DigitalOceanBillingClientImpl::new(api.clone())),
            block_storage: Arc::new(DigitalOceanBlockStorageClientImpl::new(api.clone())),
            block_storage_actions: Arc::new(DigitalOceanBlockStorageActionClientImpl::new(
                api.clone(),
            )),
            cdn: Arc::new(DigitalOceanCdnClientImpl::new(api.clone())),
            certificates: Arc::new(DigitalOceanCertificateClientImpl::new(api.clone())),
            domains: Arc::new(DigitalOceanDnsClientImpl::new(api.clone())),
            droplets: Arc::new(DigitalOceanDropletClientImpl::new(api.clone())),
            droplet_actions: Arc::new(DigitalOceanDropletActionClientImpl::new(api.clone())),
            firewalls: Arc::new(DigitalOceanFirewallClientImpl::new(api.clone())),
            floating_ips: Arc::new(DigitalOceanFloatingIpClientImpl::new(api.clone())),
            floating_ip_actions: Arc::new(DigitalOceanFloatingIpActionClientImpl::new(
                api.clone(),
            )),
            images: Arc::new(DigitalOceanImageClientImpl::new(api.clone())),
            image_actions: Arc::new(DigitalOceanImageActionClientImpl::new(api.clone())),
            kubernetes: Arc::new(DigitalOceanKubernetesClientImpl::new(api.clone())),
            load_balancers: Arc::new(DigitalOceanLoadBalancerClientImpl::new(api.clone())),
            projects: Arc::new(DigitalOceanProjectClientImpl::new(api.clone())),
            regions: Arc::new(DigitalOceanRegionClientImpl::new(api.clone())),
            sizes: Arc::new(DigitalOceanSizeClientImpl::new(api.clone())),
            snapshots: Arc::new(DigitalOceanSnapshotClientImpl::new(api.clone())),
            ssh_keys: Arc::new(DigitalOceanSshKeyClientImpl::new(api.clone())),
            tags: Arc::new(DigitalOceanTagClientImpl::new(api.clone())),
            api,
        }
    }

    /// The transport configuration every service was built from.
    pub fn api(&self) -> &DigitalOceanApiClient {
        &self.api
    }

    #[cfg(test)]
    pub fn new_for_test(token: String, base_url: String) -> DigitalOceanClient {
        DigitalOceanClient::new_with_base_url(&token, format!("{base_url}/v2/").as_str())
            .unwrap()
    }
}
