use serde::{Deserialize, Serialize};

use crate::digitalocean::api::DigitalOceanApiClient;
use crate::digitalocean::error::Error;

pub trait DigitalOceanRegionClient: Send + Sync {
    fn get_all_regions(&self) -> Result<Vec<Region>, Error>;
}

pub struct DigitalOceanRegionClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanRegionClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanRegionClientImpl {
        DigitalOceanRegionClientImpl { api }
    }
}

impl DigitalOceanRegionClient for DigitalOceanRegionClientImpl {
    /// List every region, including ones where new resources cannot currently be created.
    fn get_all_regions(&self) -> Result<Vec<Region>, Error> {
        self.api.get("regions", &[], "regions")
    }
}

// /v2/regions

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct Region {
    /// The display name of the region. This will be a full name that is used in the control panel
    /// and other interfaces.
    pub name: String,
    /// A human-readable string that is used as a unique identifier for each region.
    pub slug: String,
    /// This attribute is set to an array which contains features available in this region.
    pub features: Vec<String>,
    /// This is a boolean value that represents whether new Droplets can be created in this region.
    pub available: bool,
    /// This attribute is set to an array which contains the identifying slugs for the sizes
    /// available in this region.
    pub sizes: Vec<String>,
}
