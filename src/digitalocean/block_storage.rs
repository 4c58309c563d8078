use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::digitalocean::action::Action;
use crate::digitalocean::api::{DigitalOceanApiClient, Pagination};
use crate::digitalocean::error::{Error, ValidationError};
use crate::digitalocean::region::Region;
use crate::digitalocean::snapshot::Snapshot;

pub trait DigitalOceanBlockStorageClient: Send + Sync {
    fn get_all_block_storage(&self) -> Result<Vec<Volume>, Error>;

    fn get_block_storage_by_id(&self, id: &str) -> Result<Volume, Error>;

    fn get_block_storage_by_name(&self, name: &str, region: &str) -> Result<Vec<Volume>, Error>;

    fn get_snapshots_for_volume(&self, id: &str) -> Result<Vec<Snapshot>, Error>;

    fn create_block_storage(&self, volume: &VolumeRequest) -> Result<Volume, Error>;

    fn create_snapshot_from_volume(&self, id: &str, name: &str) -> Result<Snapshot, Error>;

    fn delete_block_storage_by_id(&self, id: &str) -> Result<(), Error>;

    fn delete_block_storage_by_name(&self, name: &str, region: &str) -> Result<(), Error>;
}

pub trait DigitalOceanBlockStorageActionClient: Send + Sync {
    fn attach_volume_to_droplet(
        &self,
        volume_id: &str,
        action: &VolumeActionRequest,
    ) -> Result<Action, Error>;

    fn attach_volume_to_droplet_by_name(&self, action: &VolumeActionRequest)
    -> Result<Action, Error>;

    fn detach_volume_from_droplet(
        &self,
        volume_id: &str,
        action: &VolumeActionRequest,
    ) -> Result<Action, Error>;

    fn detach_volume_from_droplet_by_name(
        &self,
        action: &VolumeActionRequest,
    ) -> Result<Action, Error>;

    fn resize_volume(&self, volume_id: &str, action: &VolumeActionRequest)
    -> Result<Action, Error>;

    fn get_all_volume_actions(
        &self,
        volume_id: &str,
        pagination: &Pagination,
    ) -> Result<Vec<Action>, Error>;

    fn get_existing_volume_action(&self, volume_id: &str, action_id: u64)
    -> Result<Action, Error>;
}

pub struct DigitalOceanBlockStorageClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanBlockStorageClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanBlockStorageClientImpl {
        DigitalOceanBlockStorageClientImpl { api }
    }
}

impl DigitalOceanBlockStorageClient for DigitalOceanBlockStorageClientImpl {
    fn get_all_block_storage(&self) -> Result<Vec<Volume>, Error> {
        self.api.get("volumes", &[], "volumes")
    }

    fn get_block_storage_by_id(&self, id: &str) -> Result<Volume, Error> {
        self.api.get(format!("volumes/{id}").as_str(), &[], "volume")
    }

    /// Volume names are only unique within a region, so both are needed to find one.
    fn get_block_storage_by_name(&self, name: &str, region: &str) -> Result<Vec<Volume>, Error> {
        self.api.get(
            "volumes",
            &[("name", name.to_string()), ("region", region.to_string())],
            "volumes",
        )
    }

    fn get_snapshots_for_volume(&self, id: &str) -> Result<Vec<Snapshot>, Error> {
        self.api
            .get(format!("volumes/{id}/snapshots").as_str(), &[], "snapshots")
    }

    fn create_block_storage(&self, volume: &VolumeRequest) -> Result<Volume, Error> {
        validate_volume_request(volume)?;
        self.api.post("volumes", volume, "volume")
    }

    fn create_snapshot_from_volume(&self, id: &str, name: &str) -> Result<Snapshot, Error> {
        self.api.post(
            format!("volumes/{id}/snapshots").as_str(),
            &VolumeSnapshotPostBody {
                name: name.to_string(),
            },
            "snapshot",
        )
    }

    fn delete_block_storage_by_id(&self, id: &str) -> Result<(), Error> {
        self.api.delete(format!("volumes/{id}").as_str(), &[])
    }

    fn delete_block_storage_by_name(&self, name: &str, region: &str) -> Result<(), Error> {
        self.api.delete(
            "volumes",
            &[("name", name.to_string()), ("region", region.to_string())],
        )
    }
}

pub struct DigitalOceanBlockStorageActionClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanBlockStorageActionClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanBlockStorageActionClientImpl {
        DigitalOceanBlockStorageActionClientImpl { api }
    }
}

impl DigitalOceanBlockStorageActionClient for DigitalOceanBlockStorageActionClientImpl {
    fn attach_volume_to_droplet(
        &self,
        volume_id: &str,
        action: &VolumeActionRequest,
    ) -> Result<Action, Error> {
        validate_attach_request(action, false)?;
        self.api.post(
            format!("volumes/{volume_id}/actions").as_str(),
            action,
            "action",
        )
    }

    fn attach_volume_to_droplet_by_name(
        &self,
        action: &VolumeActionRequest,
    ) -> Result<Action, Error> {
        validate_attach_request(action, true)?;
        self.api.post("volumes/actions", action, "action")
    }

    fn detach_volume_from_droplet(
        &self,
        volume_id: &str,
        action: &VolumeActionRequest,
    ) -> Result<Action, Error> {
        validate_attach_request(action, false)?;
        self.api.post(
            format!("volumes/{volume_id}/actions").as_str(),
            action,
            "action",
        )
    }

    fn detach_volume_from_droplet_by_name(
        &self,
        action: &VolumeActionRequest,
    ) -> Result<Action, Error> {
        validate_attach_request(action, true)?;
        self.api.post("volumes/actions", action, "action")
    }

    fn resize_volume(
        &self,
        volume_id: &str,
        action: &VolumeActionRequest,
    ) -> Result<Action, Error> {
        validate_resize_request(action)?;
        self.api.post(
            format!("volumes/{volume_id}/actions").as_str(),
            action,
            "action",
        )
    }

    fn get_all_volume_actions(
        &self,
        volume_id: &str,
        pagination: &Pagination,
    ) -> Result<Vec<Action>, Error> {
        self.api.get(
            format!("volumes/{volume_id}/actions").as_str(),
            &pagination.to_query(),
            "actions",
        )
    }

    fn get_existing_volume_action(
        &self,
        volume_id: &str,
        action_id: u64,
    ) -> Result<Action, Error> {
        self.api.get(
            format!("volumes/{volume_id}/actions/{action_id}").as_str(),
            &[],
            "action",
        )
    }
}

fn validate_volume_request(volume: &VolumeRequest) -> Result<(), ValidationError> {
    if volume.size_gigabytes == 0 || volume.name.is_empty() {
        debug!("Refusing to create volume without a name and size");
        return Err(ValidationError::MissingFields("Block Storage"));
    }
    Ok(())
}

fn validate_attach_request(
    action: &VolumeActionRequest,
    by_name: bool,
) -> Result<(), ValidationError> {
    let has_volume_name = action.volume_name.as_ref().is_some_and(|n| !n.is_empty());
    if action.typ.is_empty()
        || action.droplet_id.is_none_or(|id| id == 0)
        || (by_name && !has_volume_name)
    {
        debug!("Refusing volume {} action with missing fields", action.typ);
        return Err(ValidationError::MissingFields("Action"));
    }
    Ok(())
}

fn validate_resize_request(action: &VolumeActionRequest) -> Result<(), ValidationError> {
    if action.typ.is_empty() || action.size_gigabytes.is_none_or(|size| size == 0) {
        debug!("Refusing volume resize with missing fields");
        return Err(ValidationError::MissingFields("Action"));
    }
    Ok(())
}

// /v2/volumes

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct Volume {
    /// The unique identifier for the block storage volume.
    pub id: String,
    pub region: Region,
    /// An array containing the IDs of the Droplets the volume is attached to. Note that at this
    /// time, a volume can only be attached to a single Droplet.
    pub droplet_ids: Vec<u64>,
    /// A human-readable name for the block storage volume. Must be lowercase and be composed only
    /// of numbers, letters and "-", up to a limit of 64 characters. The name must begin with a
    /// letter.
    pub name: String,
    /// An optional free-form text field to describe a block storage volume.
    pub description: Option<String>,
    /// The size of the block storage volume in GiB (1024^3).
    pub size_gigabytes: u32,
    /// A time value given in ISO8601 combined date and time format that represents when the block
    /// storage volume was created.
    pub created_at: String,
    /// The type of filesystem currently in-use on the volume.
    pub filesystem_type: Option<String>,
    /// The label currently applied to the filesystem.
    pub filesystem_label: Option<String>,
    /// A flat array of tag names as strings applied to the resource.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Body for creating a volume. `name` and `size_gigabytes` must be set.
#[derive(Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct VolumeRequest {
    /// The size of the block storage volume in GiB (1024^3).
    pub size_gigabytes: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The slug identifier for the region where the volume will be created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// The unique identifier for the volume snapshot from which to create the volume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,
    /// The name of the filesystem type to be used on the volume, "ext4" or "xfs".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesystem_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesystem_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Serialize, Debug)]
struct VolumeSnapshotPostBody {
    name: String,
}

// /v2/volumes/[id]/actions

/// Body for a volume action: "attach", "detach" or "resize".
#[derive(Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct VolumeActionRequest {
    #[serde(rename = "type")]
    pub typ: String,
    /// The unique identifier for the Droplet the volume will be attached or detached from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub droplet_id: Option<u64>,
    /// The name of the block storage volume, for the by-name variants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_name: Option<String>,
    /// The new size of the block storage volume in GiB (1024^3), for resizes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_gigabytes: Option<u32>,
    /// The slug identifier for the region where the resource will initially be available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl VolumeActionRequest {
    pub fn attach(droplet_id: u64) -> VolumeActionRequest {
        VolumeActionRequest {
            typ: "attach".to_string(),
            droplet_id: Some(droplet_id),
            ..Default::default()
        }
    }

    pub fn detach(droplet_id: u64) -> VolumeActionRequest {
        VolumeActionRequest {
            typ: "detach".to_string(),
            droplet_id: Some(droplet_id),
            ..Default::default()
        }
    }

    pub fn resize(size_gigabytes: u32) -> VolumeActionRequest {
        VolumeActionRequest {
            typ: "resize".to_string(),
            size_gigabytes: Some(size_gigabytes),
            ..Default::default()
        }
    }
}
