use serde::{Deserialize, Serialize};

use crate::digitalocean::api::DigitalOceanApiClient;
use crate::digitalocean::error::Error;

pub trait DigitalOceanCertificateClient: Send + Sync {
    fn get_all_certificates(&self) -> Result<Vec<Certificate>, Error>;

    fn get_existing_certificate(&self, id: &str) -> Result<Certificate, Error>;

    fn create_certificate(&self, certificate: &CertificateRequest) -> Result<Certificate, Error>;

    fn delete_certificate(&self, id: &str) -> Result<(), Error>;
}

pub struct DigitalOceanCertificateClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanCertificateClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanCertificateClientImpl {
        DigitalOceanCertificateClientImpl { api }
    }
}

impl DigitalOceanCertificateClient for DigitalOceanCertificateClientImpl {
    fn get_all_certificates(&self) -> Result<Vec<Certificate>, Error> {
        self.api.get("certificates", &[], "certificates")
    }

    fn get_existing_certificate(&self, id: &str) -> Result<Certificate, Error> {
        self.api
            .get(format!("certificates/{id}").as_str(), &[], "certificate")
    }

    /// Upload a custom certificate or ask for a Let's Encrypt one, depending on `typ`.
    fn create_certificate(&self, certificate: &CertificateRequest) -> Result<Certificate, Error> {
        self.api.post("certificates", certificate, "certificate")
    }

    fn delete_certificate(&self, id: &str) -> Result<(), Error> {
        self.api.delete(format!("certificates/{id}").as_str(), &[])
    }
}

// /v2/certificates

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct Certificate {
    /// A unique ID that can be used to identify and reference a certificate.
    pub id: String,
    /// A unique human-readable name referring to a certificate.
    pub name: String,
    /// A time value given in ISO8601 combined date and time format that represents the
    /// certificate's expiration date.
    pub not_after: String,
    /// A unique identifier generated from the SHA-1 fingerprint of the certificate.
    pub sha1_fingerprint: String,
    /// A time value given in ISO8601 combined date and time format that represents when the
    /// certificate was created.
    pub created_at: String,
    /// An array of fully qualified domain names (FQDNs) for which the certificate was issued.
    #[serde(default)]
    pub dns_names: Vec<String>,
    /// A string representing the current state of the certificate. It may be "pending",
    /// "verified", or "error".
    pub state: String,
    /// A string representing the type of the certificate. The value will be "custom" for a
    /// user-uploaded certificate or "lets_encrypt" for one automatically generated with Let's
    /// Encrypt.
    #[serde(rename = "type")]
    pub typ: String,
}

#[derive(Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct CertificateRequest {
    pub name: String,
    /// "custom" or "lets_encrypt".
    #[serde(rename = "type")]
    pub typ: String,
    /// Domains to issue a Let's Encrypt certificate for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_names: Option<Vec<String>>,
    /// The contents of a PEM-formatted private-key corresponding to the SSL certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    /// The contents of a PEM-formatted public SSL certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leaf_certificate: Option<String>,
    /// The full PEM-formatted trust chain between the certificate authority's certificate and
    /// your domain's SSL certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_chain: Option<String>,
}
