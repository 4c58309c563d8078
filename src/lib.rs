#![forbid(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate serde_json;

pub mod digitalocean;

pub use crate::digitalocean::DigitalOceanClient;
pub use crate::digitalocean::api::{
    DEFAULT_BASE_URL, DigitalOceanApiClient, ErrorResponse, Pagination,
};
pub use crate::digitalocean::error::{Error, ValidationError};
