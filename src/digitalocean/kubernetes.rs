use std::collections::HashMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::digitalocean::api::DigitalOceanApiClient;
use crate::digitalocean::error::Error;

pub trait DigitalOceanKubernetesClient: Send + Sync {
    fn get_all_clusters(&self) -> Result<Vec<KubernetesCluster>, Error>;

    fn get_existing_cluster(&self, id: &str) -> Result<KubernetesCluster, Error>;

    fn create_cluster(&self, cluster: &KubernetesClusterRequest)
    -> Result<KubernetesCluster, Error>;

    fn update_cluster(
        &self,
        id: &str,
        cluster: &KubernetesClusterUpdateRequest,
    ) -> Result<KubernetesCluster, Error>;

    fn delete_cluster(&self, id: &str) -> Result<(), Error>;

    fn get_cluster_kubeconfig(&self, id: &str) -> Result<String, Error>;

    fn get_available_upgrades(&self, id: &str) -> Result<Vec<KubernetesVersion>, Error>;

    fn upgrade_cluster(&self, id: &str, version: &str) -> Result<(), Error>;

    fn get_node_pools(&self, cluster_id: &str) -> Result<Vec<KubernetesNodePool>, Error>;

    fn get_node_pool(&self, cluster_id: &str, pool_id: &str)
    -> Result<KubernetesNodePool, Error>;

    fn add_node_pool(
        &self,
        cluster_id: &str,
        pool: &KubernetesNodePoolRequest,
    ) -> Result<KubernetesNodePool, Error>;

    fn update_node_pool(
        &self,
        cluster_id: &str,
        pool_id: &str,
        pool: &KubernetesNodePoolRequest,
    ) -> Result<KubernetesNodePool, Error>;

    fn delete_node_pool(&self, cluster_id: &str, pool_id: &str) -> Result<(), Error>;

    fn recycle_node_pool(
        &self,
        cluster_id: &str,
        pool_id: &str,
        nodes: &[String],
    ) -> Result<(), Error>;

    fn get_kubernetes_options(&self) -> Result<KubernetesOptions, Error>;
}

pub struct DigitalOceanKubernetesClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanKubernetesClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanKubernetesClientImpl {
        DigitalOceanKubernetesClientImpl { api }
    }
}

impl DigitalOceanKubernetesClient for DigitalOceanKubernetesClientImpl {
    /// Get info on all kubernetes clusters.
    fn get_all_clusters(&self) -> Result<Vec<KubernetesCluster>, Error> {
        self.api
            .get("kubernetes/clusters", &[], "kubernetes_clusters")
    }

    fn get_existing_cluster(&self, id: &str) -> Result<KubernetesCluster, Error> {
        self.api.get(
            format!("kubernetes/clusters/{id}").as_str(),
            &[],
            "kubernetes_cluster",
        )
    }

    fn create_cluster(
        &self,
        cluster: &KubernetesClusterRequest,
    ) -> Result<KubernetesCluster, Error> {
        self.api
            .post("kubernetes/clusters", cluster, "kubernetes_cluster")
    }

    fn update_cluster(
        &self,
        id: &str,
        cluster: &KubernetesClusterUpdateRequest,
    ) -> Result<KubernetesCluster, Error> {
        self.api.put(
            format!("kubernetes/clusters/{id}").as_str(),
            cluster,
            "kubernetes_cluster",
        )
    }

    fn delete_cluster(&self, id: &str) -> Result<(), Error> {
        self.api
            .delete(format!("kubernetes/clusters/{id}").as_str(), &[])
    }

    /// The cluster's kubeconfig as YAML text, ready to be written to disk.
    fn get_cluster_kubeconfig(&self, id: &str) -> Result<String, Error> {
        self.api
            .get_text(format!("kubernetes/clusters/{id}/kubeconfig").as_str())
    }

    fn get_available_upgrades(&self, id: &str) -> Result<Vec<KubernetesVersion>, Error> {
        self.api.get(
            format!("kubernetes/clusters/{id}/upgrades").as_str(),
            &[],
            "available_upgrade_versions",
        )
    }

    /// Start an upgrade to `version`, one of the slugs from [`get_available_upgrades`].
    ///
    /// [`get_available_upgrades`]: DigitalOceanKubernetesClient::get_available_upgrades
    fn upgrade_cluster(&self, id: &str, version: &str) -> Result<(), Error> {
        debug!("Upgrading kubernetes cluster {} to {}", id, version);
        self.api.execute_no_content(
            Method::POST,
            format!("kubernetes/clusters/{id}/upgrade").as_str(),
            &[],
            Some(&UpgradeBody { version }),
        )
    }

    fn get_node_pools(&self, cluster_id: &str) -> Result<Vec<KubernetesNodePool>, Error> {
        self.api.get(
            format!("kubernetes/clusters/{cluster_id}/node_pools").as_str(),
            &[],
            "node_pools",
        )
    }

    fn get_node_pool(
        &self,
        cluster_id: &str,
        pool_id: &str,
    ) -> Result<KubernetesNodePool, Error> {
        self.api.get(
            format!("kubernetes/clusters/{cluster_id}/node_pools/{pool_id}").as_str(),
            &[],
            "node_pool",
        )
    }

    fn add_node_pool(
        &self,
        cluster_id: &str,
        pool: &KubernetesNodePoolRequest,
    ) -> Result<KubernetesNodePool, Error> {
        self.api.post(
            format!("kubernetes/clusters/{cluster_id}/node_pools").as_str(),
            pool,
            "node_pool",
        )
    }

    fn update_node_pool(
        &self,
        cluster_id: &str,
        pool_id: &str,
        pool: &KubernetesNodePoolRequest,
    ) -> Result<KubernetesNodePool, Error> {
        self.api.put(
            format!("kubernetes/clusters/{cluster_id}/node_pools/{pool_id}").as_str(),
            pool,
            "node_pool",
        )
    }

    fn delete_node_pool(&self, cluster_id: &str, pool_id: &str) -> Result<(), Error> {
        self.api.delete(
            format!("kubernetes/clusters/{cluster_id}/node_pools/{pool_id}").as_str(),
            &[],
        )
    }

    /// Replace the listed worker nodes with fresh ones.
    fn recycle_node_pool(
        &self,
        cluster_id: &str,
        pool_id: &str,
        nodes: &[String],
    ) -> Result<(), Error> {
        self.api.execute_no_content(
            Method::POST,
            format!("kubernetes/clusters/{cluster_id}/node_pools/{pool_id}/recycle").as_str(),
            &[],
            Some(&RecycleBody { nodes }),
        )
    }

    fn get_kubernetes_options(&self) -> Result<KubernetesOptions, Error> {
        self.api.get("kubernetes/options", &[], "options")
    }
}

// /v2/kubernetes/clusters

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct KubernetesCluster {
    pub id: String,
    pub name: String,
    pub region: String,
    /// The slug identifier for the version of Kubernetes used for the cluster.
    pub version: String,
    /// Pod network, in CIDR notation.
    pub cluster_subnet: String,
    /// Service network, in CIDR notation.
    pub service_subnet: String,
    pub vpc_uuid: Option<String>,
    pub ipv4: Option<String>,
    /// URL of the cluster's API server.
    pub endpoint: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub node_pools: Vec<KubernetesNodePool>,
    pub maintenance_policy: Option<KubernetesMaintenancePolicy>,
    /// Apply patch releases automatically during the maintenance window.
    pub auto_upgrade: bool,
    pub status: KubernetesClusterStatus,
    pub created_at: String,
    pub updated_at: String,
    /// Whether new nodes are brought up before outdated ones are destroyed during an upgrade.
    #[serde(default)]
    pub surge_upgrade: bool,
    /// Whether the control plane runs in a highly available configuration. Cannot be disabled.
    #[serde(default)]
    pub ha: bool,
    #[serde(default)]
    pub registry_enabled: bool,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct KubernetesNodePool {
    /// Droplet size slug for the workers.
    pub size: String,
    pub id: String,
    pub name: String,
    pub count: u16,
    /// All node pools are automatically tagged k8s, k8s-worker, and k8s:$K8S_CLUSTER_ID.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Labels applied to every node in the pool. Removing a label here does not delete it from
    /// existing nodes.
    pub labels: Option<HashMap<String, String>>,
    /// Taints applied to every node in the pool. Removing a taint here deletes it from all nodes.
    #[serde(default)]
    pub taints: Vec<KubernetesTaint>,
    #[serde(default)]
    pub auto_scale: bool,
    /// The minimum number of nodes that this node pool can be auto-scaled to. 0 without auto_scale.
    #[serde(default)]
    pub min_nodes: u16,
    /// The maximum number of nodes that this node pool can be auto-scaled to. 0 without auto_scale.
    #[serde(default)]
    pub max_nodes: u16,
    #[serde(default)]
    pub nodes: Vec<KubernetesNode>,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct KubernetesTaint {
    pub key: String,
    pub value: String,
    /// NoSchedule, PreferNoSchedule or NoExecute
    pub effect: String,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct KubernetesNode {
    pub id: String,
    pub name: String,
    pub status: KubernetesNodeStatus,
    pub droplet_id: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct KubernetesNodeStatus {
    /// provisioning, running, draining or deleting
    pub state: String,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct KubernetesMaintenancePolicy {
    /// UTC, as HH:MM
    pub start_time: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub duration: String,
    /// monday through sunday, or any
    pub day: String,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct KubernetesClusterStatus {
    pub state: String,
    pub message: Option<String>,
}

#[derive(Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct KubernetesClusterRequest {
    pub name: String,
    pub region: String,
    /// A version slug, a minor version such as "1.29", or "latest".
    pub version: String,
    pub node_pools: Vec<KubernetesNodePoolRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_policy: Option<KubernetesMaintenancePolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_upgrade: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surge_upgrade: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ha: Option<bool>,
}

#[derive(Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct KubernetesClusterUpdateRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_policy: Option<KubernetesMaintenancePolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_upgrade: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surge_upgrade: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ha: Option<bool>,
}

/// Body for adding or updating a node pool. `size` is only accepted when adding and is left out
/// when empty.
#[derive(Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct KubernetesNodePoolRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub size: String,
    pub name: String,
    pub count: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taints: Option<Vec<KubernetesTaint>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_nodes: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_nodes: Option<u16>,
}

#[derive(Serialize, Debug)]
struct UpgradeBody<'a> {
    version: &'a str,
}

#[derive(Serialize, Debug)]
struct RecycleBody<'a> {
    nodes: &'a [String],
}

// /v2/kubernetes/options

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct KubernetesOptions {
    pub versions: Vec<KubernetesVersion>,
    pub regions: Vec<KubernetesOption>,
    pub sizes: Vec<KubernetesOption>,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct KubernetesVersion {
    /// The slug identifier for an available version of Kubernetes, e.g. "1.29.1-do.0".
    pub slug: String,
    /// The upstream version string, e.g. "1.29.1".
    pub kubernetes_version: String,
    #[serde(default)]
    pub supported_features: Vec<String>,
}

/// A region or droplet size that clusters can be created with.
#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct KubernetesOption {
    pub name: String,
    pub slug: String,
}
