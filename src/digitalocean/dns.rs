use serde::{Deserialize, Serialize};

use crate::digitalocean::api::DigitalOceanApiClient;
use crate::digitalocean::error::Error;

pub trait DigitalOceanDnsClient: Send + Sync {
    fn get_all_domains(&self) -> Result<Vec<Domain>, Error>;

    fn get_existing_domain(&self, domain: &str) -> Result<Domain, Error>;

    fn create_domain(&self, domain: &DomainRequest) -> Result<Domain, Error>;

    fn delete_domain(&self, domain: &str) -> Result<(), Error>;

    fn get_all_domain_records(&self, domain: &str) -> Result<Vec<DomainRecord>, Error>;

    fn get_existing_domain_record(&self, domain: &str, id: u64) -> Result<DomainRecord, Error>;

    fn create_domain_record(
        &self,
        domain: &str,
        record: &DomainRecordRequest,
    ) -> Result<DomainRecord, Error>;

    fn update_domain_record(
        &self,
        domain: &str,
        id: u64,
        record: &DomainRecordRequest,
    ) -> Result<DomainRecord, Error>;

    fn delete_domain_record(&self, domain: &str, id: u64) -> Result<(), Error>;
}

pub struct DigitalOceanDnsClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanDnsClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanDnsClientImpl {
        DigitalOceanDnsClientImpl { api }
    }
}

impl DigitalOceanDnsClient for DigitalOceanDnsClientImpl {
    /// List the domains controlled by this DigitalOcean account
    fn get_all_domains(&self) -> Result<Vec<Domain>, Error> {
        self.api.get("domains", &[], "domains")
    }

    fn get_existing_domain(&self, domain: &str) -> Result<Domain, Error> {
        self.api
            .get(format!("domains/{domain}").as_str(), &[], "domain")
    }

    /// Register a domain with DigitalOcean's DNS, optionally pointing its apex at an IP address
    fn create_domain(&self, domain: &DomainRequest) -> Result<Domain, Error> {
        self.api.post("domains", domain, "domain")
    }

    fn delete_domain(&self, domain: &str) -> Result<(), Error> {
        self.api.delete(format!("domains/{domain}").as_str(), &[])
    }

    fn get_all_domain_records(&self, domain: &str) -> Result<Vec<DomainRecord>, Error> {
        self.api.get(
            format!("domains/{domain}/records").as_str(),
            &[],
            "domain_records",
        )
    }

    fn get_existing_domain_record(&self, domain: &str, id: u64) -> Result<DomainRecord, Error> {
        self.api.get(
            format!("domains/{domain}/records/{id}").as_str(),
            &[],
            "domain_record",
        )
    }

    /// Create a new DNS record of any type within the domain
    fn create_domain_record(
        &self,
        domain: &str,
        record: &DomainRecordRequest,
    ) -> Result<DomainRecord, Error> {
        self.api.post(
            format!("domains/{domain}/records").as_str(),
            record,
            "domain_record",
        )
    }

    /// Update an existing DNS record; only the fields that are set are sent
    fn update_domain_record(
        &self,
        domain: &str,
        id: u64,
        record: &DomainRecordRequest,
    ) -> Result<DomainRecord, Error> {
        self.api.put(
            format!("domains/{domain}/records/{id}").as_str(),
            record,
            "domain_record",
        )
    }

    fn delete_domain_record(&self, domain: &str, id: u64) -> Result<(), Error> {
        self.api
            .delete(format!("domains/{domain}/records/{id}").as_str(), &[])
    }
}

// /v2/domains

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct Domain {
    /// e.g. `example.com`
    pub name: String,
    /// Default TTL in seconds for records in this domain.
    pub ttl: Option<u32>,
    /// Full zone file text. The only place the generated SOA record shows up.
    pub zone_file: Option<String>,
}

#[derive(Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct DomainRequest {
    pub name: String,
    /// When provided, an A record pointing the apex of the domain at this IP address is created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

// /v2/domains/[domain]/records

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct DomainRecord {
    pub id: u64,
    /// A, AAAA, CAA, CNAME, MX, NS, SOA, SRV or TXT
    #[serde(rename = "type")]
    pub typ: String,
    /// Host part relative to the domain; `@` is the apex.
    pub name: String,
    /// Meaning depends on the record type: the address for A/AAAA, the target host for
    /// CNAME/MX/SRV, the issuing CA's domain for CAA.
    pub data: String,
    /// MX and SRV only.
    pub priority: Option<u16>,
    /// SRV only.
    pub port: Option<u16>,
    pub ttl: u32,
    /// SRV only.
    pub weight: Option<u16>,
    /// CAA only, 0-255.
    pub flags: Option<u8>,
    /// CAA only: issue, issuewild or iodef.
    pub tag: Option<String>,
}

/// Fields left as `None` are omitted, so the same struct serves create and partial update.
#[derive(Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct DomainRecordRequest {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

#[cfg(test)]
mod test {
    use mockito::Matcher;
    use reqwest::StatusCode;

    use crate::digitalocean::DigitalOceanClient;
    use crate::digitalocean::dns::{Domain, DomainRecord, DomainRecordRequest, DomainRequest};
    use crate::digitalocean::error::Error;

    fn get_record_json(id: u64, name: &str, data: &str, ttl: u32) -> serde_json::Value {
        json!({
            "id": id,
            "type": "A",
            "name": name,
            "data": data,
            "priority": null,
            "port": null,
            "ttl": ttl,
            "weight": null,
            "flags": null,
            "tag": null
        })
    }

    fn get_record_obj(id: u64, name: &str, data: &str, ttl: u32) -> DomainRecord {
        DomainRecord {
            id,
            typ: "A".to_string(),
            name: name.to_string(),
            data: data.to_string(),
            priority: None,
            port: None,
            ttl,
            weight: None,
            flags: None,
            tag: None,
        }
    }

    #[test]
    fn test_get_all_domains() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/v2/domains")
            .match_header("Authorization", "Bearer foo")
            .with_status(200)
            .with_header("Content-Type", "application/json")
            .with_body(
                serde_json::to_string(&json!({
                    "domains": [
                        {
                            "name": "google.com",
                            "ttl": 40,
                            "zone_file": "blargh!"
                        },
                        {
                            "name": "yahoo.com",
                            "ttl": 100,
                            "zone_file": "oof"
                        }
                    ],
                    "meta": {
                        "total": 2
                    },
                    "links": {}
                }))
                .unwrap(),
            )
            .create();

        let resp = DigitalOceanClient::new_for_test("foo".to_string(), server.url())
            .domains
            .get_all_domains();
        assert_eq!(
            Ok(vec![
                Domain {
                    name: "google.com".to_string(),
                    ttl: Some(40),
                    zone_file: Some("blargh!".to_string())
                },
                Domain {
                    name: "yahoo.com".to_string(),
                    ttl: Some(100),
                    zone_file: Some("oof".to_string())
                }
            ]),
            resp
        );
        _m.assert();
    }

    #[test]
    fn test_get_existing_domain() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/v2/domains/yahoo.com")
            .match_header("Authorization", "Bearer foo")
            .with_status(200)
            .with_header("Content-Type", "application/json")
            .with_body(
                serde_json::to_string(&json!({
                    "domain": {
                        "name": "yahoo.com",
                        "ttl": 100,
                        "zone_file": "oof"
                    }
                }))
                .unwrap(),
            )
            .create();

        let resp = DigitalOceanClient::new_for_test("foo".to_string(), server.url())
            .domains
            .get_existing_domain("yahoo.com");
        assert_eq!(
            Ok(Domain {
                name: "yahoo.com".to_string(),
                ttl: Some(100),
                zone_file: Some("oof".to_string())
            }),
            resp
        );
        _m.assert();
    }

    #[test]
    fn test_get_existing_domain_missing() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/v2/domains/yahoo.com")
            .with_status(404)
            .with_header("Content-Type", "application/json")
            .with_body(r#"{"id":"not_found","message":"The resource you were accessing could not be found."}"#)
            .create();

        let resp = DigitalOceanClient::new_for_test("foo".to_string(), server.url())
            .domains
            .get_existing_domain("yahoo.com");
        assert_eq!(Some(StatusCode::NOT_FOUND), resp.unwrap_err().status());
        _m.assert();
    }

    #[test]
    fn test_create_domain() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/v2/domains")
            .match_header("Content-Type", "application/json")
            .match_body(Matcher::Json(json!({
                "name": "example.com",
                "ip_address": "1.2.3.4"
            })))
            .with_status(201)
            .with_header("Content-Type", "application/json")
            .with_body(
                serde_json::to_string(&json!({
                    "domain": {
                        "name": "example.com",
                        "ttl": null,
                        "zone_file": null
                    }
                }))
                .unwrap(),
            )
            .create();

        let resp = DigitalOceanClient::new_for_test("foo".to_string(), server.url())
            .domains
            .create_domain(&DomainRequest {
                name: "example.com".to_string(),
                ip_address: Some("1.2.3.4".to_string()),
            });
        assert_eq!(
            Ok(Domain {
                name: "example.com".to_string(),
                ttl: None,
                zone_file: None
            }),
            resp
        );
        _m.assert();
    }

    #[test]
    fn test_delete_domain() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("DELETE", "/v2/domains/example.com")
            .match_header("Authorization", "Bearer foo")
            .with_status(204)
            .create();

        let resp = DigitalOceanClient::new_for_test("foo".to_string(), server.url())
            .domains
            .delete_domain("example.com");
        assert_eq!(Ok(()), resp);
        _m.assert();
    }

    #[test]
    fn test_delete_domain_forbidden() {
        let mut server = mockito::Server::new();
        let body = r#"{"id":"forbidden","message":"You do not have access for the attempted action."}"#;
        let _m = server
            .mock("DELETE", "/v2/domains/example.com")
            .with_status(403)
            .with_header("Content-Type", "application/json")
            .with_body(body)
            .create();

        let resp = DigitalOceanClient::new_for_test("foo".to_string(), server.url())
            .domains
            .delete_domain("example.com");
        assert_eq!(
            Err(Error::Api {
                status: StatusCode::FORBIDDEN,
                body: body.to_string()
            }),
            resp
        );
        _m.assert();
    }

    #[test]
    fn test_get_all_domain_records() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/v2/domains/google.com/records")
            .match_header("Authorization", "Bearer foo")
            .with_status(200)
            .with_header("Content-Type", "application/json")
            .with_body(
                serde_json::to_string(&json!({
                    "domain_records": [
                        get_record_json(123, "@", "1.2.3.4", 40),
                        get_record_json(234, "foo", "2.3.4.5", 100),
                    ],
                    "meta": {
                        "total": 2
                    },
                    "links": {}
                }))
                .unwrap(),
            )
            .create();

        let resp = DigitalOceanClient::new_for_test("foo".to_string(), server.url())
            .domains
            .get_all_domain_records("google.com");
        assert_eq!(
            Ok(vec![
                get_record_obj(123, "@", "1.2.3.4", 40),
                get_record_obj(234, "foo", "2.3.4.5", 100),
            ]),
            resp
        );
        _m.assert();
    }

    #[test]
    fn test_get_existing_domain_record() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/v2/domains/google.com/records/234")
            .with_status(200)
            .with_header("Content-Type", "application/json")
            .with_body(
                serde_json::to_string(&json!({
                    "domain_record": get_record_json(234, "foo", "2.3.4.5", 100)
                }))
                .unwrap(),
            )
            .create();

        let resp = DigitalOceanClient::new_for_test("foo".to_string(), server.url())
            .domains
            .get_existing_domain_record("google.com", 234);
        assert_eq!(Ok(get_record_obj(234, "foo", "2.3.4.5", 100)), resp);
        _m.assert();
    }

    #[test]
    fn test_update_domain_record() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("PUT", "/v2/domains/google.com/records/234")
            .match_header("Authorization", "Bearer foo")
            .match_header("Content-Type", "application/json")
            .match_body(Matcher::Json(json!({
                "data": "2.3.4.5"
            })))
            .with_status(200)
            .with_header("Content-Type", "application/json")
            .with_body(
                serde_json::to_string(&json!({
                    "domain_record": get_record_json(234, "foo", "2.3.4.5", 60)
                }))
                .unwrap(),
            )
            .create();

        let resp = DigitalOceanClient::new_for_test("foo".to_string(), server.url())
            .domains
            .update_domain_record(
                "google.com",
                234,
                &DomainRecordRequest {
                    data: Some("2.3.4.5".to_string()),
                    ..Default::default()
                },
            );
        assert_eq!(Ok(get_record_obj(234, "foo", "2.3.4.5", 60)), resp);
        _m.assert();
    }

    #[test]
    fn test_create_domain_record() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/v2/domains/google.com/records")
            .match_header("Authorization", "Bearer foo")
            .match_header("Content-Type", "application/json")
            .match_body(Matcher::Json(json!({
                "type": "A",
                "name": "foo",
                "data": "1.2.3.4",
                "ttl": 100
            })))
            .with_status(201)
            .with_header("Content-Type", "application/json")
            .with_body(
                serde_json::to_string(&json!({
                    "domain_record": get_record_json(234, "foo", "1.2.3.4", 100)
                }))
                .unwrap(),
            )
            .create();

        let resp = DigitalOceanClient::new_for_test("foo".to_string(), server.url())
            .domains
            .create_domain_record(
                "google.com",
                &DomainRecordRequest {
                    typ: Some("A".to_string()),
                    name: Some("foo".to_string()),
                    data: Some("1.2.3.4".to_string()),
                    ttl: Some(100),
                    ..Default::default()
                },
            );
        assert_eq!(Ok(get_record_obj(234, "foo", "1.2.3.4", 100)), resp);
        _m.assert();
    }

    #[test]
    fn test_delete_domain_record() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("DELETE", "/v2/domains/google.com/records/234")
            .with_status(204)
            .create();

        let resp = DigitalOceanClient::new_for_test("foo".to_string(), server.url())
            .domains
            .delete_domain_record("google.com", 234);
        assert_eq!(Ok(()), resp);
        _m.assert();
    }
}
