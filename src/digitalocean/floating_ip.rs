use serde::{Deserialize, Serialize};

use crate::digitalocean::action::Action;
use crate::digitalocean::api::DigitalOceanApiClient;
use crate::digitalocean::droplet::Droplet;
use crate::digitalocean::error::Error;
use crate::digitalocean::region::Region;

pub trait DigitalOceanFloatingIpClient: Send + Sync {
    fn get_all_floating_ips(&self) -> Result<Vec<FloatingIp>, Error>;

    fn get_existing_floating_ip(&self, ip: &str) -> Result<FloatingIp, Error>;

    fn create_floating_ip_for_droplet(&self, droplet_id: u64) -> Result<FloatingIp, Error>;

    fn create_floating_ip_for_region(&self, region: &str) -> Result<FloatingIp, Error>;

    fn delete_floating_ip(&self, ip: &str) -> Result<(), Error>;
}

pub trait DigitalOceanFloatingIpActionClient: Send + Sync {
    fn assign_ip_to_droplet(&self, ip: &str, droplet_id: u64) -> Result<Action, Error>;

    fn unassign_ip(&self, ip: &str) -> Result<Action, Error>;

    fn get_all_floating_ip_actions(&self, ip: &str) -> Result<Vec<Action>, Error>;

    fn get_existing_floating_ip_action(&self, ip: &str, action_id: u64) -> Result<Action, Error>;
}

pub struct DigitalOceanFloatingIpClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanFloatingIpClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanFloatingIpClientImpl {
        DigitalOceanFloatingIpClientImpl { api }
    }
}

impl DigitalOceanFloatingIpClient for DigitalOceanFloatingIpClientImpl {
    fn get_all_floating_ips(&self) -> Result<Vec<FloatingIp>, Error> {
        self.api.get("floating_ips", &[], "floating_ips")
    }

    fn get_existing_floating_ip(&self, ip: &str) -> Result<FloatingIp, Error> {
        self.api
            .get(format!("floating_ips/{ip}").as_str(), &[], "floating_ip")
    }

    /// Reserve a new floating IP in the droplet's region and assign it straight away.
    fn create_floating_ip_for_droplet(&self, droplet_id: u64) -> Result<FloatingIp, Error> {
        self.api.post(
            "floating_ips",
            &FloatingIpPostBody {
                droplet_id: Some(droplet_id),
                region: None,
            },
            "floating_ip",
        )
    }

    /// Reserve a new floating IP in a region without assigning it.
    fn create_floating_ip_for_region(&self, region: &str) -> Result<FloatingIp, Error> {
        self.api.post(
            "floating_ips",
            &FloatingIpPostBody {
                droplet_id: None,
                region: Some(region),
            },
            "floating_ip",
        )
    }

    fn delete_floating_ip(&self, ip: &str) -> Result<(), Error> {
        self.api.delete(format!("floating_ips/{ip}").as_str(), &[])
    }
}

pub struct DigitalOceanFloatingIpActionClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanFloatingIpActionClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanFloatingIpActionClientImpl {
        DigitalOceanFloatingIpActionClientImpl { api }
    }
}

impl DigitalOceanFloatingIpActionClient for DigitalOceanFloatingIpActionClientImpl {
    fn assign_ip_to_droplet(&self, ip: &str, droplet_id: u64) -> Result<Action, Error> {
        self.api.post(
            format!("floating_ips/{ip}/actions").as_str(),
            &FloatingIpActionBody {
                typ: "assign",
                droplet_id: Some(droplet_id),
            },
            "action",
        )
    }

    fn unassign_ip(&self, ip: &str) -> Result<Action, Error> {
        self.api.post(
            format!("floating_ips/{ip}/actions").as_str(),
            &FloatingIpActionBody {
                typ: "unassign",
                droplet_id: None,
            },
            "action",
        )
    }

    fn get_all_floating_ip_actions(&self, ip: &str) -> Result<Vec<Action>, Error> {
        self.api
            .get(format!("floating_ips/{ip}/actions").as_str(), &[], "actions")
    }

    fn get_existing_floating_ip_action(&self, ip: &str, action_id: u64) -> Result<Action, Error> {
        self.api.get(
            format!("floating_ips/{ip}/actions/{action_id}").as_str(),
            &[],
            "action",
        )
    }
}

// /v2/floating_ips

#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct FloatingIp {
    /// The public IP address of the floating IP. It also serves as its identifier.
    pub ip: String,
    pub region: Region,
    /// The Droplet that the floating IP has been assigned to, if any.
    pub droplet: Option<Droplet>,
    /// A boolean value indicating whether or not the floating IP has pending actions preventing
    /// new ones from being submitted.
    pub locked: bool,
    /// The UUID of the project to which the floating IP belongs.
    pub project_id: Option<String>,
}

#[derive(Serialize, Debug)]
struct FloatingIpPostBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    droplet_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<&'a str>,
}

#[derive(Serialize, Debug)]
struct FloatingIpActionBody {
    #[serde(rename = "type")]
    typ: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    droplet_id: Option<u64>,
}
