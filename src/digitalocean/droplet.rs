use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::digitalocean::action::Action;
use crate::digitalocean::api::{DigitalOceanApiClient, Pagination};
use crate::digitalocean::error::Error;
use crate::digitalocean::image::Image;
use crate::digitalocean::region::Region;
use crate::digitalocean::size::Size;

pub trait DigitalOceanDropletClient: Send + Sync {
    fn get_all_droplets(&self, pagination: &Pagination) -> Result<Vec<Droplet>, Error>;

    fn get_droplets_by_tag(&self, tag: &str) -> Result<Vec<Droplet>, Error>;

    fn get_existing_droplet(&self, id: u64) -> Result<Droplet, Error>;

    fn create_new_droplet(&self, droplet: &DropletRequest) -> Result<Droplet, Error>;

    fn create_multiple_droplets(
        &self,
        droplets: &MultipleDropletRequest,
    ) -> Result<Vec<Droplet>, Error>;

    fn delete_droplet(&self, id: u64) -> Result<(), Error>;

    fn delete_droplets_by_tag(&self, tag: &str) -> Result<(), Error>;

    fn get_available_kernels_for_droplet(&self, id: u64) -> Result<Vec<Kernel>, Error>;

    fn get_snapshots_for_droplet(&self, id: u64) -> Result<Vec<Image>, Error>;

    fn get_backups_for_droplet(&self, id: u64) -> Result<Vec<Image>, Error>;

    fn get_droplet_actions(&self, id: u64) -> Result<Vec<Action>, Error>;

    fn get_neighbors_for_droplet(&self, id: u64) -> Result<Vec<Droplet>, Error>;

    fn get_droplet_neighbors(&self) -> Result<Vec<Vec<Droplet>>, Error>;
}

pub struct DigitalOceanDropletClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanDropletClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanDropletClientImpl {
        DigitalOceanDropletClientImpl { api }
    }
}

impl DigitalOceanDropletClient for DigitalOceanDropletClientImpl {
    /// Get one page of droplets.
    fn get_all_droplets(&self, pagination: &Pagination) -> Result<Vec<Droplet>, Error> {
        self.api
            .get("droplets", &pagination.to_query(), "droplets")
    }

    fn get_droplets_by_tag(&self, tag: &str) -> Result<Vec<Droplet>, Error> {
        self.api
            .get("droplets", &[("tag_name", tag.to_string())], "droplets")
    }

    fn get_existing_droplet(&self, id: u64) -> Result<Droplet, Error> {
        self.api
            .get(format!("droplets/{id}").as_str(), &[], "droplet")
    }

    fn create_new_droplet(&self, droplet: &DropletRequest) -> Result<Droplet, Error> {
        self.api.post("droplets", droplet, "droplet")
    }

    /// Create several identically configured droplets in one call, one per entry in `names`.
    fn create_multiple_droplets(
        &self,
        droplets: &MultipleDropletRequest,
    ) -> Result<Vec<Droplet>, Error> {
        self.api.post("droplets", droplets, "droplets")
    }

    fn delete_droplet(&self, id: u64) -> Result<(), Error> {
        self.api.delete(format!("droplets/{id}").as_str(), &[])
    }

    /// Delete every droplet carrying the tag.
    fn delete_droplets_by_tag(&self, tag: &str) -> Result<(), Error> {
        self.api.delete("droplets", &[("tag_name", tag.to_string())])
    }

    fn get_available_kernels_for_droplet(&self, id: u64) -> Result<Vec<Kernel>, Error> {
        self.api
            .get(format!("droplets/{id}/kernels").as_str(), &[], "kernels")
    }

    fn get_snapshots_for_droplet(&self, id: u64) -> Result<Vec<Image>, Error> {
        self.api
            .get(format!("droplets/{id}/snapshots").as_str(), &[], "snapshots")
    }

    fn get_backups_for_droplet(&self, id: u64) -> Result<Vec<Image>, Error> {
        self.api
            .get(format!("droplets/{id}/backups").as_str(), &[], "backups")
    }

    fn get_droplet_actions(&self, id: u64) -> Result<Vec<Action>, Error> {
        self.api
            .get(format!("droplets/{id}/actions").as_str(), &[], "actions")
    }

    /// Droplets sharing a physical host with the given one. Issued as a DELETE, which is what
    /// this listing has always been sent as.
    fn get_neighbors_for_droplet(&self, id: u64) -> Result<Vec<Droplet>, Error> {
        debug!("Listing neighbors of droplet {} via DELETE", id);
        self.api.execute::<(), _>(
            Method::DELETE,
            format!("droplets/{id}/neighbors").as_str(),
            &[],
            None,
            "droplets",
        )
    }

    /// Every group of the account's droplets that share a physical host. Also issued as a DELETE.
    fn get_droplet_neighbors(&self) -> Result<Vec<Vec<Droplet>>, Error> {
        debug!("Listing droplet neighbor report via DELETE");
        self.api.execute::<(), _>(
            Method::DELETE,
            "reports/droplet_neighbors",
            &[],
            None,
            "neighbors",
        )
    }
}

pub trait DigitalOceanDropletActionClient: Send + Sync {
    fn enable_backups(&self, droplet_id: u64) -> Result<Action, Error>;

    fn disable_backups(&self, droplet_id: u64) -> Result<Action, Error>;

    fn reboot(&self, droplet_id: u64) -> Result<Action, Error>;

    fn power_cycle(&self, droplet_id: u64) -> Result<Action, Error>;

    fn shutdown(&self, droplet_id: u64) -> Result<Action, Error>;

    fn power_off(&self, droplet_id: u64) -> Result<Action, Error>;

    fn power_on(&self, droplet_id: u64) -> Result<Action, Error>;

    fn restore(&self, droplet_id: u64, image: u64) -> Result<Action, Error>;

    fn password_reset(&self, droplet_id: u64) -> Result<Action, Error>;

    fn resize(&self, droplet_id: u64, size: &str, disk: bool) -> Result<Action, Error>;

    fn rebuild(&self, droplet_id: u64, image: &ImageRef) -> Result<Action, Error>;

    fn rename(&self, droplet_id: u64, name: &str) -> Result<Action, Error>;

    fn change_kernel(&self, droplet_id: u64, kernel: u64) -> Result<Action, Error>;

    fn enable_ipv6(&self, droplet_id: u64) -> Result<Action, Error>;

    fn enable_private_networking(&self, droplet_id: u64) -> Result<Action, Error>;

    fn snapshot(&self, droplet_id: u64, name: &str) -> Result<Action, Error>;

    fn enable_backups_by_tag(&self, tag: &str) -> Result<Vec<Action>, Error>;

    fn disable_backups_by_tag(&self, tag: &str) -> Result<Vec<Action>, Error>;

    fn power_cycle_by_tag(&self, tag: &str) -> Result<Vec<Action>, Error>;

    fn shutdown_by_tag(&self, tag: &str) -> Result<Vec<Action>, Error>;

    fn power_off_by_tag(&self, tag: &str) -> Result<Vec<Action>, Error>;

    fn power_on_by_tag(&self, tag: &str) -> Result<Vec<Action>, Error>;

    fn enable_ipv6_by_tag(&self, tag: &str) -> Result<Vec<Action>, Error>;

    fn enable_private_networking_by_tag(&self, tag: &str) -> Result<Vec<Action>, Error>;

    fn snapshot_by_tag(&self, tag: &str, name: &str) -> Result<Vec<Action>, Error>;

    fn get_existing_droplet_action(&self, droplet_id: u64, action_id: u64)
    -> Result<Action, Error>;
}

pub struct DigitalOceanDropletActionClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanDropletActionClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanDropletActionClientImpl {
        DigitalOceanDropletActionClientImpl { api }
    }

    fn act(&self, droplet_id: u64, body: &DropletActionBody) -> Result<Action, Error> {
        debug!("Requesting {} on droplet {}", body.typ, droplet_id);
        self.api.post(
            format!("droplets/{droplet_id}/actions").as_str(),
            body,
            "action",
        )
    }

    fn act_on_tag(&self, tag: &str, body: &DropletActionBody) -> Result<Vec<Action>, Error> {
        debug!("Requesting {} on droplets tagged {}", body.typ, tag);
        self.api.execute(
            Method::POST,
            "droplets/actions",
            &[("tag_name", tag.to_string())],
            Some(body),
            "actions",
        )
    }
}

impl DigitalOceanDropletActionClient for DigitalOceanDropletActionClientImpl {
    fn enable_backups(&self, droplet_id: u64) -> Result<Action, Error> {
        self.act(droplet_id, &DropletActionBody::of("enable_backups"))
    }

    fn disable_backups(&self, droplet_id: u64) -> Result<Action, Error> {
        self.act(droplet_id, &DropletActionBody::of("disable_backups"))
    }

    fn reboot(&self, droplet_id: u64) -> Result<Action, Error> {
        self.act(droplet_id, &DropletActionBody::of("reboot"))
    }

    fn power_cycle(&self, droplet_id: u64) -> Result<Action, Error> {
        self.act(droplet_id, &DropletActionBody::of("power_cycle"))
    }

    /// Attempt a graceful shutdown, as if the power button were pressed.
    fn shutdown(&self, droplet_id: u64) -> Result<Action, Error> {
        self.act(droplet_id, &DropletActionBody::of("shutdown"))
    }

    /// Hard power off, as if the plug were pulled.
    fn power_off(&self, droplet_id: u64) -> Result<Action, Error> {
        self.act(droplet_id, &DropletActionBody::of("power_off"))
    }

    fn power_on(&self, droplet_id: u64) -> Result<Action, Error> {
        self.act(droplet_id, &DropletActionBody::of("power_on"))
    }

    /// Restore the droplet from one of its own backups.
    fn restore(&self, droplet_id: u64, image: u64) -> Result<Action, Error> {
        self.act(
            droplet_id,
            &DropletActionBody {
                image: Some(ImageRef::Id(image)),
                ..DropletActionBody::of("restore")
            },
        )
    }

    fn password_reset(&self, droplet_id: u64) -> Result<Action, Error> {
        self.act(droplet_id, &DropletActionBody::of("password_reset"))
    }

    /// Move to a new size. With `disk` set the disk grows too, which makes the resize permanent.
    fn resize(&self, droplet_id: u64, size: &str, disk: bool) -> Result<Action, Error> {
        self.act(
            droplet_id,
            &DropletActionBody {
                size: Some(size),
                disk: Some(disk),
                ..DropletActionBody::of("resize")
            },
        )
    }

    fn rebuild(&self, droplet_id: u64, image: &ImageRef) -> Result<Action, Error> {
        self.act(
            droplet_id,
            &DropletActionBody {
                image: Some(image.clone()),
                ..DropletActionBody::of("rebuild")
            },
        )
    }

    fn rename(&self, droplet_id: u64, name: &str) -> Result<Action, Error> {
        self.act(
            droplet_id,
            &DropletActionBody {
                name: Some(name),
                ..DropletActionBody::of("rename")
            },
        )
    }

    fn change_kernel(&self, droplet_id: u64, kernel: u64) -> Result<Action, Error> {
        self.act(
            droplet_id,
            &DropletActionBody {
                kernel: Some(kernel),
                ..DropletActionBody::of("change_kernel")
            },
        )
    }

    fn enable_ipv6(&self, droplet_id: u64) -> Result<Action, Error> {
        self.act(droplet_id, &DropletActionBody::of("enable_ipv6"))
    }

    fn enable_private_networking(&self, droplet_id: u64) -> Result<Action, Error> {
        self.act(droplet_id, &DropletActionBody::of("enable_private_networking"))
    }

    fn snapshot(&self, droplet_id: u64, name: &str) -> Result<Action, Error> {
        self.act(
            droplet_id,
            &DropletActionBody {
                name: Some(name),
                ..DropletActionBody::of("snapshot")
            },
        )
    }

    fn enable_backups_by_tag(&self, tag: &str) -> Result<Vec<Action>, Error> {
        self.act_on_tag(tag, &DropletActionBody::of("enable_backups"))
    }

    fn disable_backups_by_tag(&self, tag: &str) -> Result<Vec<Action>, Error> {
        self.act_on_tag(tag, &DropletActionBody::of("disable_backups"))
    }

    fn power_cycle_by_tag(&self, tag: &str) -> Result<Vec<Action>, Error> {
        self.act_on_tag(tag, &DropletActionBody::of("power_cycle"))
    }

    fn shutdown_by_tag(&self, tag: &str) -> Result<Vec<Action>, Error> {
        self.act_on_tag(tag, &DropletActionBody::of("shutdown"))
    }

    fn power_off_by_tag(&self, tag: &str) -> Result<Vec<Action>, Error> {
        self.act_on_tag(tag, &DropletActionBody::of("power_off"))
    }

    fn power_on_by_tag(&self, tag: &str) -> Result<Vec<Action>, Error> {
        self.act_on_tag(tag, &DropletActionBody::of("power_on"))
    }

    fn enable_ipv6_by_tag(&self, tag: &str) -> Result<Vec<Action>, Error> {
        self.act_on_tag(tag, &DropletActionBody::of("enable_ipv6"))
    }

    fn enable_private_networking_by_tag(&self, tag: &str) -> Result<Vec<Action>, Error> {
        self.act_on_tag(tag, &DropletActionBody::of("enable_private_networking"))
    }

    fn snapshot_by_tag(&self, tag: &str, name: &str) -> Result<Vec<Action>, Error> {
        self.act_on_tag(
            tag,
            &DropletActionBody {
                name: Some(name),
                ..DropletActionBody::of("snapshot")
            },
        )
    }

    fn get_existing_droplet_action(
        &self,
        droplet_id: u64,
        action_id: u64,
    ) -> Result<Action, Error> {
        self.api.get(
            format!("droplets/{droplet_id}/actions/{action_id}").as_str(),
            &[],
            "action",
        )
    }
}

// /v2/droplets

#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct Droplet {
    pub id: u64,
    pub name: String,
    /// MiB
    pub memory: u32,
    /// The number of virtual CPUs.
    pub vcpus: u16,
    /// GiB
    pub disk: u32,
    /// A locked droplet refuses all actions.
    pub locked: bool,
    /// new, active, off or archive
    pub status: String,
    /// The current kernel for Droplets with externally managed kernels. Droplets created after
    /// March 2017 use internal kernels and carry null here.
    pub kernel: Option<Kernel>,
    pub created_at: String,
    #[serde(default)]
    pub features: Vec<String>,
    /// An array of backup IDs of any backups that have been taken of the Droplet instance.
    #[serde(default)]
    pub backup_ids: Vec<u64>,
    /// The start and end of the window during which the next backup will start, if backups are
    /// configured for the Droplet.
    pub next_backup_window: Option<NextBackupWindow>,
    #[serde(default)]
    pub snapshot_ids: Vec<u64>,
    pub image: Image,
    #[serde(default)]
    pub volume_ids: Vec<String>,
    pub size: Size,
    /// Slug of `size`, kept for convenience.
    pub size_slug: String,
    /// The details of the network that are configured for the Droplet instance.
    pub networks: DropletNetworks,
    pub region: Region,
    #[serde(default)]
    pub tags: Vec<String>,
    pub vpc_uuid: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct Kernel {
    pub id: u64,
    pub name: String,
    pub version: String,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct NextBackupWindow {
    pub start: String,
    pub end: String,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct DropletNetworks {
    #[serde(default)]
    pub v4: Vec<DropletNetworkV4>,
    #[serde(default)]
    pub v6: Vec<DropletNetworkV6>,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct DropletNetworkV4 {
    pub ip_address: String,
    pub netmask: String,
    /// The gateway of the specified IPv4 network interface. Private interfaces have none.
    pub gateway: Option<String>,
    /// public or private
    #[serde(rename = "type")]
    pub typ: String,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct DropletNetworkV6 {
    pub ip_address: String,
    pub netmask: u8,
    pub gateway: Option<String>,
    /// The type of the IPv6 network interface. Only "public" exists.
    #[serde(rename = "type")]
    pub typ: String,
}

/// An image given either by numeric id or by its public slug.
#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
#[serde(untagged)]
pub enum ImageRef {
    Id(u64),
    Slug(String),
}

impl Default for ImageRef {
    fn default() -> Self {
        ImageRef::Slug(String::new())
    }
}

/// Everything about a new droplet except its name.
#[derive(Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct DropletOptions {
    /// The slug identifier for the region that you wish to deploy the Droplet in.
    pub region: String,
    /// The slug identifier for the size that you wish to select for this Droplet.
    pub size: String,
    pub image: ImageRef,
    /// SSH key ids or fingerprints to embed in the Droplet's root account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssh_keys: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backups: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_networking: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitoring: Option<bool>,
    /// Cloud-init user data, at most 64 KiB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
    /// Ids of block storage volumes to attach once created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volumes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_uuid: Option<String>,
}

#[derive(Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct DropletRequest {
    pub name: String,
    #[serde(flatten)]
    pub options: DropletOptions,
}

#[derive(Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct MultipleDropletRequest {
    pub names: Vec<String>,
    #[serde(flatten)]
    pub options: DropletOptions,
}

// /v2/droplets/[id]/actions

#[derive(Serialize, Debug, Default)]
struct DropletActionBody<'a> {
    #[serde(rename = "type")]
    typ: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<ImageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    disk: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kernel: Option<u64>,
}

impl DropletActionBody<'_> {
    fn of(typ: &'static str) -> Self {
        DropletActionBody {
            typ,
            ..Default::default()
        }
    }
}
