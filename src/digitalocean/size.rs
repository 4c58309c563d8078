use serde::{Deserialize, Serialize};

use crate::digitalocean::api::DigitalOceanApiClient;
use crate::digitalocean::error::Error;

pub trait DigitalOceanSizeClient: Send + Sync {
    fn get_all_sizes(&self) -> Result<Vec<Size>, Error>;
}

pub struct DigitalOceanSizeClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanSizeClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanSizeClientImpl {
        DigitalOceanSizeClientImpl { api }
    }
}

impl DigitalOceanSizeClient for DigitalOceanSizeClientImpl {
    /// List every Droplet size along with its pricing.
    fn get_all_sizes(&self) -> Result<Vec<Size>, Error> {
        self.api.get("sizes", &[], "sizes")
    }
}

// /v2/sizes

#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct Size {
    /// A human-readable string that is used to uniquely identify each size.
    pub slug: String,
    /// The amount of RAM allocated to Droplets created of this size. The value is represented in
    /// megabytes. (multiple of 8)
    pub memory: u32,
    /// The integer of number CPUs allocated to Droplets of this size.
    pub vcpus: u16,
    /// The amount of disk space set aside for Droplets of this size. The value is represented in
    /// gigabytes.
    pub disk: u16,
    /// The amount of transfer bandwidth that is available for Droplets created in this size. This
    /// only counts traffic on the public interface. The value is given in terabytes.
    pub transfer: f32,
    /// This attribute describes the monthly cost of this Droplet size if the Droplet is kept for an
    /// entire month. The value is measured in US dollars.
    pub price_monthly: f32,
    /// This describes the price of the Droplet size as measured hourly. The value is measured in US
    /// dollars.
    pub price_hourly: f32,
    /// An array containing the region slugs where this size is available for Droplet creates.
    pub regions: Vec<String>,
    /// This is a boolean value that represents whether new Droplets can be created with this size.
    pub available: bool,
    /// A string describing the class of Droplets created from this size. For example: Basic,
    /// General Purpose, CPU-Optimized, Memory-Optimized, or Storage-Optimized.
    pub description: Option<String>,
}
