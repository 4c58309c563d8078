use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::digitalocean::api::DigitalOceanApiClient;
use crate::digitalocean::error::Error;

pub trait DigitalOceanFirewallClient: Send + Sync {
    fn get_all_firewalls(&self) -> Result<Vec<Firewall>, Error>;

    fn get_existing_firewall(&self, id: &str) -> Result<Firewall, Error>;

    fn create_firewall(&self, firewall: &FirewallRequest) -> Result<Firewall, Error>;

    fn update_firewall(&self, id: &str, firewall: &FirewallRequest) -> Result<Firewall, Error>;

    fn delete_firewall(&self, id: &str) -> Result<(), Error>;

    fn add_droplets_to_firewall(&self, id: &str, droplet_ids: &[u64]) -> Result<(), Error>;

    fn remove_droplets_from_firewall(&self, id: &str, droplet_ids: &[u64]) -> Result<(), Error>;

    fn add_tags_to_firewall(&self, id: &str, tags: &[String]) -> Result<(), Error>;

    fn remove_tags_from_firewall(&self, id: &str, tags: &[String]) -> Result<(), Error>;

    fn add_rules_to_firewall(&self, id: &str, rules: &FirewallRules) -> Result<(), Error>;

    fn remove_rules_from_firewall(&self, id: &str, rules: &FirewallRules) -> Result<(), Error>;
}

pub struct DigitalOceanFirewallClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanFirewallClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanFirewallClientImpl {
        DigitalOceanFirewallClientImpl { api }
    }

    fn change<B: Serialize>(
        &self,
        method: Method,
        id: &str,
        member: &str,
        body: &B,
    ) -> Result<(), Error> {
        self.api.execute_no_content(
            method,
            format!("firewalls/{id}/{member}").as_str(),
            &[],
            Some(body),
        )
    }
}

impl DigitalOceanFirewallClient for DigitalOceanFirewallClientImpl {
    fn get_all_firewalls(&self) -> Result<Vec<Firewall>, Error> {
        self.api.get("firewalls", &[], "firewalls")
    }

    fn get_existing_firewall(&self, id: &str) -> Result<Firewall, Error> {
        self.api
            .get(format!("firewalls/{id}").as_str(), &[], "firewall")
    }

    fn create_firewall(&self, firewall: &FirewallRequest) -> Result<Firewall, Error> {
        self.api.post("firewalls", firewall, "firewall")
    }

    /// Replace the firewall's configuration. Anything left out of the request is removed.
    fn update_firewall(&self, id: &str, firewall: &FirewallRequest) -> Result<Firewall, Error> {
        self.api
            .put(format!("firewalls/{id}").as_str(), firewall, "firewall")
    }

    fn delete_firewall(&self, id: &str) -> Result<(), Error> {
        self.api.delete(format!("firewalls/{id}").as_str(), &[])
    }

    fn add_droplets_to_firewall(&self, id: &str, droplet_ids: &[u64]) -> Result<(), Error> {
        self.change(
            Method::POST,
            id,
            "droplets",
            &FirewallDropletsBody { droplet_ids },
        )
    }

    fn remove_droplets_from_firewall(&self, id: &str, droplet_ids: &[u64]) -> Result<(), Error> {
        self.change(
            Method::DELETE,
            id,
            "droplets",
            &FirewallDropletsBody { droplet_ids },
        )
    }

    fn add_tags_to_firewall(&self, id: &str, tags: &[String]) -> Result<(), Error> {
        self.change(Method::POST, id, "tags", &FirewallTagsBody { tags })
    }

    fn remove_tags_from_firewall(&self, id: &str, tags: &[String]) -> Result<(), Error> {
        self.change(Method::DELETE, id, "tags", &FirewallTagsBody { tags })
    }

    fn add_rules_to_firewall(&self, id: &str, rules: &FirewallRules) -> Result<(), Error> {
        self.change(Method::POST, id, "rules", rules)
    }

    fn remove_rules_from_firewall(&self, id: &str, rules: &FirewallRules) -> Result<(), Error> {
        self.change(Method::DELETE, id, "rules", rules)
    }
}

// /v2/firewalls

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct Firewall {
    pub id: String,
    /// waiting, succeeded or failed
    pub status: String,
    pub created_at: String,
    /// Details exactly which Droplets are having their security policies updated. When empty, all
    /// changes have been successfully applied.
    #[serde(default)]
    pub pending_changes: Vec<FirewallPendingChange>,
    pub name: String,
    #[serde(default)]
    pub droplet_ids: Vec<u64>,
    /// Tag names whose Droplets the firewall applies to.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub inbound_rules: Vec<FirewallInboundRule>,
    #[serde(default)]
    pub outbound_rules: Vec<FirewallOutboundRule>,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct FirewallPendingChange {
    pub droplet_id: u64,
    pub removing: bool,
    pub status: String,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct FirewallInboundRule {
    /// tcp, udp or icmp
    pub protocol: String,
    /// A single port, a range such as `8000-9000`, or `0` for all ports. Ignored for icmp.
    pub ports: String,
    pub sources: FirewallRuleTarget,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct FirewallOutboundRule {
    pub protocol: String,
    /// The ports on which traffic will be allowed, in the same format as for inbound rules.
    pub ports: String,
    pub destinations: FirewallRuleTarget,
}

#[derive(Deserialize, Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct FirewallRuleTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub droplet_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_balancer_uids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubernetes_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct FirewallRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbound_rules: Option<Vec<FirewallInboundRule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbound_rules: Option<Vec<FirewallOutboundRule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub droplet_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

// /v2/firewalls/[id]/rules

#[derive(Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct FirewallRules {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inbound_rules: Option<Vec<FirewallInboundRule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbound_rules: Option<Vec<FirewallOutboundRule>>,
}

#[derive(Serialize, Debug)]
struct FirewallDropletsBody<'a> {
    droplet_ids: &'a [u64],
}

#[derive(Serialize, Debug)]
struct FirewallTagsBody<'a> {
    tags: &'a [String],
}
