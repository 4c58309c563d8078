use serde::{Deserialize, Serialize};

use crate::digitalocean::api::{DigitalOceanApiClient, Pagination};
use crate::digitalocean::error::Error;

pub trait DigitalOceanSnapshotClient: Send + Sync {
    fn get_all_snapshots(&self, pagination: &Pagination) -> Result<Vec<Snapshot>, Error>;

    fn get_droplet_snapshots(&self, pagination: &Pagination) -> Result<Vec<Snapshot>, Error>;

    fn get_volume_snapshots(&self, pagination: &Pagination) -> Result<Vec<Snapshot>, Error>;

    fn get_snapshot_by_id(&self, id: &str) -> Result<Snapshot, Error>;

    fn delete_snapshot(&self, id: &str) -> Result<(), Error>;
}

pub struct DigitalOceanSnapshotClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanSnapshotClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanSnapshotClientImpl {
        DigitalOceanSnapshotClientImpl { api }
    }

    fn get_snapshots_of_type(
        &self,
        resource_type: &str,
        pagination: &Pagination,
    ) -> Result<Vec<Snapshot>, Error> {
        let mut query = pagination.to_query();
        query.push(("resource_type", resource_type.to_string()));
        self.api.get("snapshots", &query, "snapshots")
    }
}

impl DigitalOceanSnapshotClient for DigitalOceanSnapshotClientImpl {
    /// List one page of snapshots, of Droplets and volumes alike.
    fn get_all_snapshots(&self, pagination: &Pagination) -> Result<Vec<Snapshot>, Error> {
        self.api
            .get("snapshots", &pagination.to_query(), "snapshots")
    }

    fn get_droplet_snapshots(&self, pagination: &Pagination) -> Result<Vec<Snapshot>, Error> {
        self.get_snapshots_of_type("droplet", pagination)
    }

    fn get_volume_snapshots(&self, pagination: &Pagination) -> Result<Vec<Snapshot>, Error> {
        self.get_snapshots_of_type("volume", pagination)
    }

    fn get_snapshot_by_id(&self, id: &str) -> Result<Snapshot, Error> {
        self.api
            .get(format!("snapshots/{id}").as_str(), &[], "snapshot")
    }

    fn delete_snapshot(&self, id: &str) -> Result<(), Error> {
        self.api.delete(format!("snapshots/{id}").as_str(), &[])
    }
}

// /v2/snapshots

#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct Snapshot {
    /// The unique identifier for the snapshot. Droplet snapshots use numeric ids rendered as
    /// strings, volume snapshots use UUIDs.
    #[serde(deserialize_with = "crate::digitalocean::snapshot::string_or_number")]
    pub id: String,
    /// A human-readable name for the snapshot.
    pub name: String,
    /// A time value given in ISO8601 combined date and time format that represents when the
    /// snapshot was created.
    pub created_at: String,
    /// An array of the regions that the snapshot is available in. The regions are represented by
    /// their identifying slug values.
    pub regions: Vec<String>,
    /// The unique identifier for the resource that the snapshot originated from.
    pub resource_id: String,
    /// The type of resource that the snapshot originated from. (Enum: "droplet" "volume")
    pub resource_type: String,
    /// The minimum size in GB required for a volume or Droplet to use this snapshot.
    pub min_disk_size: u32,
    /// The billable size of the snapshot in gigabytes.
    pub size_gigabytes: f32,
    /// An array of Tags the snapshot has been tagged with.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Snapshot ids arrive as numbers from some endpoints and as strings from others.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, found {other}"
        ))),
    }
}
