use serde::{Deserialize, Serialize};

use crate::digitalocean::action::Action;
use crate::digitalocean::api::{DigitalOceanApiClient, Pagination};
use crate::digitalocean::error::Error;

pub trait DigitalOceanImageClient: Send + Sync {
    fn get_all_images(&self, pagination: &Pagination) -> Result<Vec<Image>, Error>;

    fn get_all_distribution_images(&self, pagination: &Pagination) -> Result<Vec<Image>, Error>;

    fn get_all_application_images(&self, pagination: &Pagination) -> Result<Vec<Image>, Error>;

    fn get_users_images(&self, pagination: &Pagination) -> Result<Vec<Image>, Error>;

    fn get_image_actions(&self, id: u64) -> Result<Vec<Action>, Error>;

    fn get_existing_image(&self, id: u64) -> Result<Image, Error>;

    fn get_existing_image_by_slug(&self, slug: &str) -> Result<Image, Error>;

    fn update_image_name(&self, id: u64, name: &str) -> Result<Image, Error>;

    fn delete_image(&self, id: u64) -> Result<(), Error>;
}

pub trait DigitalOceanImageActionClient: Send + Sync {
    fn transfer_image(&self, id: u64, region: &str) -> Result<Action, Error>;

    fn convert_image_to_snapshot(&self, id: u64) -> Result<Action, Error>;

    fn get_existing_image_action(&self, id: u64, action_id: u64) -> Result<Action, Error>;
}

pub struct DigitalOceanImageClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanImageClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanImageClientImpl {
        DigitalOceanImageClientImpl { api }
    }

    fn get_filtered_images(
        &self,
        filter: (&'static str, &str),
        pagination: &Pagination,
    ) -> Result<Vec<Image>, Error> {
        let mut query = pagination.to_query();
        query.push((filter.0, filter.1.to_string()));
        self.api.get("images", &query, "images")
    }
}

impl DigitalOceanImageClient for DigitalOceanImageClientImpl {
    /// List one page of every image visible to the account: public distributions, applications
    /// and the account's own snapshots and backups.
    fn get_all_images(&self, pagination: &Pagination) -> Result<Vec<Image>, Error> {
        self.api.get("images", &pagination.to_query(), "images")
    }

    fn get_all_distribution_images(&self, pagination: &Pagination) -> Result<Vec<Image>, Error> {
        self.get_filtered_images(("type", "distribution"), pagination)
    }

    fn get_all_application_images(&self, pagination: &Pagination) -> Result<Vec<Image>, Error> {
        self.get_filtered_images(("type", "application"), pagination)
    }

    /// List only the images private to this account.
    fn get_users_images(&self, pagination: &Pagination) -> Result<Vec<Image>, Error> {
        self.get_filtered_images(("private", "true"), pagination)
    }

    fn get_image_actions(&self, id: u64) -> Result<Vec<Action>, Error> {
        self.api
            .get(format!("images/{id}/actions").as_str(), &[], "actions")
    }

    fn get_existing_image(&self, id: u64) -> Result<Image, Error> {
        self.api.get(format!("images/{id}").as_str(), &[], "image")
    }

    fn get_existing_image_by_slug(&self, slug: &str) -> Result<Image, Error> {
        self.api.get(format!("images/{slug}").as_str(), &[], "image")
    }

    fn update_image_name(&self, id: u64, name: &str) -> Result<Image, Error> {
        self.api.put(
            format!("images/{id}").as_str(),
            &ImageNameBody { name },
            "image",
        )
    }

    fn delete_image(&self, id: u64) -> Result<(), Error> {
        self.api.delete(format!("images/{id}").as_str(), &[])
    }
}

pub struct DigitalOceanImageActionClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanImageActionClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanImageActionClientImpl {
        DigitalOceanImageActionClientImpl { api }
    }
}

impl DigitalOceanImageActionClient for DigitalOceanImageActionClientImpl {
    /// Copy an image into another region.
    fn transfer_image(&self, id: u64, region: &str) -> Result<Action, Error> {
        self.api.post(
            format!("images/{id}/actions").as_str(),
            &ImageActionBody {
                typ: "transfer",
                region: Some(region),
            },
            "action",
        )
    }

    /// Turn a backup image into a snapshot so it outlives the Droplet it was taken from.
    fn convert_image_to_snapshot(&self, id: u64) -> Result<Action, Error> {
        self.api.post(
            format!("images/{id}/actions").as_str(),
            &ImageActionBody {
                typ: "convert",
                region: None,
            },
            "action",
        )
    }

    fn get_existing_image_action(&self, id: u64, action_id: u64) -> Result<Action, Error> {
        self.api.get(
            format!("images/{id}/actions/{action_id}").as_str(),
            &[],
            "action",
        )
    }
}

// /v2/images

#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct Image {
    /// A unique number that can be used to identify and reference a specific image.
    pub id: u64,
    /// The display name that has been given to an image. This is what is shown in the control panel
    /// and is generally a descriptive title for the image in question.
    pub name: String,
    /// Describes the kind of image. It may be one of base, snapshot, backup, custom, or admin.
    /// Respectively, this specifies whether an image is a DigitalOcean base OS image,
    /// user-generated Droplet snapshot, automatically created Droplet backup, user-provided virtual
    /// machine image, or an image used for DigitalOcean managed resources (e.g. DOKS worker nodes).
    #[serde(rename = "type")]
    pub typ: String,
    /// The name of a custom image's distribution. Currently, the valid values are Arch Linux,
    /// CentOS, CoreOS, Debian, Fedora, Fedora Atomic, FreeBSD, Gentoo, openSUSE, RancherOS,
    /// Rocky Linux, Ubuntu, and Unknown.
    pub distribution: String,
    /// A uniquely identifying string that is associated with each of the DigitalOcean-provided
    /// public images. These can be used to reference a public image as an alternative to the
    /// numeric id.
    pub slug: Option<String>,
    /// This is a boolean value that indicates whether the image in question is public or not. An
    /// image that is public is available to all accounts. A non-public image is only accessible
    /// from your account.
    pub public: bool,
    /// This attribute is an array of the regions that the image is available in. The regions are
    /// represented by their identifying slug values.
    pub regions: Vec<String>,
    /// A time value given in ISO8601 combined date and time format that represents when the image
    /// was created.
    pub created_at: String,
    /// The minimum disk size in GB required for a Droplet to use this image.
    pub min_disk_size: Option<u32>,
    /// The size of the image in gigabytes.
    pub size_gigabytes: Option<f32>,
    /// An optional free-form text field to describe an image.
    pub description: Option<String>,
    /// A flat array of tag names as strings to be applied to the resource.
    #[serde(default)]
    pub tags: Vec<String>,
    /// A status string indicating the state of a custom image. This may be NEW, available, pending,
    /// deleted, or retired.
    pub status: Option<String>,
    /// A string containing information about errors that may occur when importing a custom image.
    pub error_message: Option<String>,
}

#[derive(Serialize, Debug)]
struct ImageNameBody<'a> {
    name: &'a str,
}

#[derive(Serialize, Debug)]
struct ImageActionBody<'a> {
    #[serde(rename = "type")]
    typ: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<&'a str>,
}
