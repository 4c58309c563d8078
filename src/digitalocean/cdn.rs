use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::digitalocean::api::DigitalOceanApiClient;
use crate::digitalocean::error::{Error, ValidationError};

pub trait DigitalOceanCdnClient: Send + Sync {
    fn get_all_endpoints(&self) -> Result<Vec<CdnEndpoint>, Error>;

    fn get_existing_endpoint(&self, id: &str) -> Result<CdnEndpoint, Error>;

    fn create_endpoint(&self, endpoint: &CdnEndpointRequest) -> Result<CdnEndpoint, Error>;

    fn update_endpoint(
        &self,
        id: &str,
        endpoint: &CdnEndpointUpdateRequest,
    ) -> Result<CdnEndpoint, Error>;

    fn delete_endpoint(&self, id: &str) -> Result<(), Error>;

    fn purge_cache(&self, id: &str, files: &[String]) -> Result<(), Error>;
}

pub struct DigitalOceanCdnClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanCdnClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanCdnClientImpl {
        DigitalOceanCdnClientImpl { api }
    }
}

impl DigitalOceanCdnClient for DigitalOceanCdnClientImpl {
    fn get_all_endpoints(&self) -> Result<Vec<CdnEndpoint>, Error> {
        self.api.get("cdn/endpoints", &[], "endpoints")
    }

    fn get_existing_endpoint(&self, id: &str) -> Result<CdnEndpoint, Error> {
        self.api
            .get(format!("cdn/endpoints/{id}").as_str(), &[], "endpoint")
    }

    fn create_endpoint(&self, endpoint: &CdnEndpointRequest) -> Result<CdnEndpoint, Error> {
        if endpoint.origin.is_empty() {
            debug!("Refusing to create CDN endpoint without an origin");
            return Err(ValidationError::MissingFields("Endpoint").into());
        }
        self.api.post("cdn/endpoints", endpoint, "endpoint")
    }

    fn update_endpoint(
        &self,
        id: &str,
        endpoint: &CdnEndpointUpdateRequest,
    ) -> Result<CdnEndpoint, Error> {
        self.api
            .put(format!("cdn/endpoints/{id}").as_str(), endpoint, "endpoint")
    }

    fn delete_endpoint(&self, id: &str) -> Result<(), Error> {
        self.api.delete(format!("cdn/endpoints/{id}").as_str(), &[])
    }

    /// Purge cached content. Entries are paths relative to the origin and may use a `*`
    /// wildcard, e.g. `assets/*`.
    fn purge_cache(&self, id: &str, files: &[String]) -> Result<(), Error> {
        self.api.execute_no_content(
            Method::DELETE,
            format!("cdn/endpoints/{id}/cache").as_str(),
            &[],
            Some(&CdnPurgeBody { files }),
        )
    }
}

// /v2/cdn/endpoints

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct CdnEndpoint {
    /// A unique ID that can be used to identify and reference a CDN endpoint.
    pub id: String,
    /// The fully qualified domain name (FQDN) for the origin server which provides the content
    /// for the CDN. This is currently restricted to a Space.
    pub origin: String,
    /// The fully qualified domain name (FQDN) from which the CDN-backed content is served.
    pub endpoint: String,
    /// The amount of time the content is cached by the CDN's edge servers in seconds.
    pub ttl: u32,
    /// The ID of a DigitalOcean managed TLS certificate used for SSL when a custom subdomain is
    /// provided.
    pub certificate_id: Option<String>,
    /// The fully qualified domain name (FQDN) of the custom subdomain used with the CDN endpoint.
    pub custom_domain: Option<String>,
    /// A time value given in ISO8601 combined date and time format that represents when the CDN
    /// endpoint was created.
    pub created_at: String,
}

/// Body for creating an endpoint. `origin` must be set.
#[derive(Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct CdnEndpointRequest {
    pub origin: String,
    /// Valid values are 60, 600, 3600, 86400, and 604800. Defaults to 3600 when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_domain: Option<String>,
}

#[derive(Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct CdnEndpointUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_domain: Option<String>,
}

#[derive(Serialize, Debug)]
struct CdnPurgeBody<'a> {
    files: &'a [String],
}
