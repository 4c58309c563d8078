use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::digitalocean::api::DigitalOceanApiClient;
use crate::digitalocean::error::{Error, ValidationError};
use crate::digitalocean::region::Region;

pub trait DigitalOceanLoadBalancerClient: Send + Sync {
    fn get_all_load_balancers(&self) -> Result<Vec<LoadBalancer>, Error>;

    fn get_existing_load_balancer(&self, id: &str) -> Result<LoadBalancer, Error>;

    fn create_load_balancer(&self, lb: &LoadBalancerRequest) -> Result<LoadBalancer, Error>;

    fn update_load_balancer(
        &self,
        id: &str,
        lb: &LoadBalancerRequest,
    ) -> Result<LoadBalancer, Error>;

    fn delete_load_balancer(&self, id: &str) -> Result<(), Error>;

    fn add_droplets_to_load_balancer(&self, id: &str, droplet_ids: &[u64]) -> Result<(), Error>;

    fn remove_droplets_from_load_balancer(
        &self,
        id: &str,
        droplet_ids: &[u64],
    ) -> Result<(), Error>;

    fn add_forwarding_rules_to_load_balancer(
        &self,
        id: &str,
        rules: &[ForwardingRule],
    ) -> Result<(), Error>;

    fn remove_forwarding_rules_from_load_balancer(
        &self,
        id: &str,
        rules: &[ForwardingRule],
    ) -> Result<(), Error>;
}

pub struct DigitalOceanLoadBalancerClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanLoadBalancerClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanLoadBalancerClientImpl {
        DigitalOceanLoadBalancerClientImpl { api }
    }
}

impl DigitalOceanLoadBalancerClient for DigitalOceanLoadBalancerClientImpl {
    /// Get info on all load balancers.
    fn get_all_load_balancers(&self) -> Result<Vec<LoadBalancer>, Error> {
        self.api.get("load_balancers", &[], "load_balancers")
    }

    fn get_existing_load_balancer(&self, id: &str) -> Result<LoadBalancer, Error> {
        self.api
            .get(format!("load_balancers/{id}").as_str(), &[], "load_balancer")
    }

    fn create_load_balancer(&self, lb: &LoadBalancerRequest) -> Result<LoadBalancer, Error> {
        validate_load_balancer_request(lb)?;
        self.api.post("load_balancers", lb, "load_balancer")
    }

    /// Replace the load balancer's configuration. Settings left out of the request revert to
    /// their defaults.
    fn update_load_balancer(
        &self,
        id: &str,
        lb: &LoadBalancerRequest,
    ) -> Result<LoadBalancer, Error> {
        validate_load_balancer_request(lb)?;
        self.api
            .put(format!("load_balancers/{id}").as_str(), lb, "load_balancer")
    }

    fn delete_load_balancer(&self, id: &str) -> Result<(), Error> {
        self.api.delete(format!("load_balancers/{id}").as_str(), &[])
    }

    fn add_droplets_to_load_balancer(&self, id: &str, droplet_ids: &[u64]) -> Result<(), Error> {
        self.api.execute_no_content(
            Method::POST,
            format!("load_balancers/{id}/droplets").as_str(),
            &[],
            Some(&DropletIdsBody { droplet_ids }),
        )
    }

    fn remove_droplets_from_load_balancer(
        &self,
        id: &str,
        droplet_ids: &[u64],
    ) -> Result<(), Error> {
        self.api.execute_no_content(
            Method::DELETE,
            format!("load_balancers/{id}/droplets").as_str(),
            &[],
            Some(&DropletIdsBody { droplet_ids }),
        )
    }

    fn add_forwarding_rules_to_load_balancer(
        &self,
        id: &str,
        rules: &[ForwardingRule],
    ) -> Result<(), Error> {
        validate_forwarding_rules(rules)?;
        self.api.execute_no_content(
            Method::POST,
            format!("load_balancers/{id}/forwarding_rules").as_str(),
            &[],
            Some(&ForwardingRulesBody {
                forwarding_rules: rules,
            }),
        )
    }

    fn remove_forwarding_rules_from_load_balancer(
        &self,
        id: &str,
        rules: &[ForwardingRule],
    ) -> Result<(), Error> {
        validate_forwarding_rules(rules)?;
        self.api.execute_no_content(
            Method::DELETE,
            format!("load_balancers/{id}/forwarding_rules").as_str(),
            &[],
            Some(&ForwardingRulesBody {
                forwarding_rules: rules,
            }),
        )
    }
}

fn validate_load_balancer_request(lb: &LoadBalancerRequest) -> Result<(), ValidationError> {
    if lb.name.is_empty() || lb.region.is_empty() || lb.forwarding_rules.is_empty() {
        debug!("Refusing load balancer without name, region or forwarding rules");
        return Err(ValidationError::MissingFields("Load Balancer"));
    }
    validate_forwarding_rules(&lb.forwarding_rules)?;
    if let Some(health_check) = &lb.health_check {
        if health_check.protocol.is_empty() || health_check.port == 0 {
            debug!("Refusing load balancer with incomplete health check");
            return Err(ValidationError::MissingFields("Health Check"));
        }
    }
    Ok(())
}

fn validate_forwarding_rules(rules: &[ForwardingRule]) -> Result<(), ValidationError> {
    let incomplete = rules.iter().any(|rule| {
        rule.entry_protocol.is_empty()
            || rule.entry_port == 0
            || rule.target_protocol.is_empty()
            || rule.target_port == 0
    });
    if incomplete {
        debug!("Refusing incomplete forwarding rule");
        return Err(ValidationError::MissingFields("Forwarding Rule"));
    }
    Ok(())
}

// /v2/load_balancers

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct LoadBalancer {
    pub id: String,
    pub name: String,
    /// The ID of the project that the load balancer is associated with.
    pub project_id: Option<String>,
    pub ip: String,
    /// Node count, 1 to 100.
    pub size_unit: Option<u8>,
    /// The legacy size slug (lb-small, lb-medium, lb-large), only used in regions without
    /// `size_unit` support.
    pub size: Option<String>,
    /// No longer settable; still reported by older load balancers.
    pub algorithm: Option<LoadBalancerAlgorithm>,
    pub status: LoadBalancerStatus,
    pub created_at: String,
    pub forwarding_rules: Vec<ForwardingRule>,
    pub health_check: Option<HealthCheck>,
    pub sticky_sessions: Option<StickySessions>,
    #[serde(default)]
    pub redirect_http_to_https: bool,
    #[serde(default)]
    pub enable_proxy_protocol: bool,
    #[serde(default)]
    pub enable_backend_keepalive: bool,
    /// The idle timeout for HTTP requests to the target droplets. range [ 30 .. 600 ]
    pub http_idle_timeout_seconds: Option<u16>,
    pub vpc_uuid: Option<String>,
    #[serde(default)]
    pub disable_lets_encrypt_dns_records: bool,
    pub firewall: Option<LoadBalancerFirewall>,
    /// Set as a slug on requests, returned as a full region object.
    pub region: Region,
    #[serde(default)]
    pub droplet_ids: Vec<u64>,
    /// Balance every droplet carrying this tag. Mutually exclusive with `droplet_ids`.
    #[serde(default)]
    pub tag: String,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum LoadBalancerAlgorithm {
    RoundRobin,
    LeastConnections,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum LoadBalancerStatus {
    New,
    Active,
    Errored,
}

#[derive(Deserialize, Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct ForwardingRule {
    /// The protocol used for traffic to the load balancer: http, https, http2, http3, tcp, or udp.
    /// udp must be paired with a udp target protocol.
    pub entry_protocol: String,
    pub entry_port: u16,
    /// The protocol used for traffic from the load balancer to the backend Droplets.
    pub target_protocol: String,
    pub target_port: u16,
    /// Required when terminating TLS on an https or http2 entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_id: Option<String>,
    #[serde(default)]
    pub tls_passthrough: bool,
}

#[derive(Deserialize, Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct HealthCheck {
    /// The protocol used for health checks sent to the backend Droplets: http, https, or tcp.
    pub protocol: String,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_interval_seconds: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_timeout_seconds: Option<u16>,
    /// Consecutive failures before a droplet leaves the pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unhealthy_threshold: Option<u8>,
    /// Consecutive passes before it rejoins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy_threshold: Option<u8>,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct StickySessions {
    /// Either "cookies" or "none".
    #[serde(rename = "type")]
    pub typ: String,
    /// Only present with the cookies type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_name: Option<String>,
    /// Only present with the cookies type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_ttl_seconds: Option<u32>,
}

#[derive(Deserialize, Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct LoadBalancerFirewall {
    /// Rules of the form 'ip:1.2.3.4' or 'cidr:1.2.0.0/16'.
    #[serde(default)]
    pub deny: Vec<String>,
    #[serde(default)]
    pub allow: Vec<String>,
}

/// Body for creating or replacing a load balancer. `name`, `region` and at least one complete
/// forwarding rule are required.
#[derive(Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct LoadBalancerRequest {
    pub name: String,
    /// Region slug.
    pub region: String,
    pub forwarding_rules: Vec<ForwardingRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_check: Option<HealthCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky_sessions: Option<StickySessions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<LoadBalancerAlgorithm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_unit: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_http_to_https: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_proxy_protocol: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_backend_keepalive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_idle_timeout_seconds: Option<u16>,
    /// Mutually exclusive with `tag`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub droplet_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_uuid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firewall: Option<LoadBalancerFirewall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_lets_encrypt_dns_records: Option<bool>,
}

#[derive(Serialize, Debug)]
struct DropletIdsBody<'a> {
    droplet_ids: &'a [u64],
}

#[derive(Serialize, Debug)]
struct ForwardingRulesBody<'a> {
    forwarding_rules: &'a [ForwardingRule],
}

#[cfg(test)]
mod test {
    use mockito::Matcher;

    use crate::digitalocean::DigitalOceanClient;
    use crate::digitalocean::error::{Error, ValidationError};
    use crate::digitalocean::loadbalancer::{
        ForwardingRule, HealthCheck, LoadBalancer, LoadBalancerAlgorithm, LoadBalancerFirewall,
        LoadBalancerRequest, LoadBalancerStatus, StickySessions,
    };
    use crate::digitalocean::region::Region;

    fn get_http_rule() -> ForwardingRule {
        ForwardingRule {
            entry_protocol: "http".to_string(),
            entry_port: 80,
            target_protocol: "http".to_string(),
            target_port: 80,
            certificate_id: None,
            tls_passthrough: false,
        }
    }

    fn get_load_balancer_json(id: &str, name: &str, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "project_id": "9cc10173-e9ea-4176-9dbc-a4cee4c4ff30",
            "ip": "104.131.186.241",
            "size_unit": 3,
            "size": null,
            "algorithm": "round_robin",
            "status": status,
            "created_at": "2024-01-01T12:00:00Z",
            "forwarding_rules": [{
                "entry_protocol": "http",
                "entry_port": 80,
                "target_protocol": "http",
                "target_port": 80,
                "certificate_id": null,
                "tls_passthrough": false
            }],
            "health_check": {
                "protocol": "http",
                "port": 80,
                "path": "/",
                "check_interval_seconds": 10,
                "response_timeout_seconds": 5,
                "unhealthy_threshold": 3,
                "healthy_threshold": 5
            },
            "sticky_sessions": {
                "type": "none"
            },
            "redirect_http_to_https": false,
            "enable_proxy_protocol": false,
            "enable_backend_keepalive": false,
            "http_idle_timeout_seconds": 60,
            "vpc_uuid": "c33931f2-a26a-4e61-b85c-4e95a2ec431b",
            "disable_lets_encrypt_dns_records": false,
            "firewall": {
                "deny": ["ip:1.2.3.4"],
                "allow": ["cidr:0.0.0.0/0"]
            },
            "region": {
                "name": "New York 3",
                "slug": "nyc3",
                "features": ["private_networking", "backups", "load_balancers"],
                "available": true,
                "sizes": ["s-1vcpu-1gb"]
            },
            "droplet_ids": [3164444, 3164445],
            "tag": ""
        })
    }

    fn get_load_balancer_obj(id: &str, name: &str, status: LoadBalancerStatus) -> LoadBalancer {
        LoadBalancer {
            id: id.to_string(),
            name: name.to_string(),
            project_id: Some("9cc10173-e9ea-4176-9dbc-a4cee4c4ff30".to_string()),
            ip: "104.131.186.241".to_string(),
            size_unit: Some(3),
            size: None,
            algorithm: Some(LoadBalancerAlgorithm::RoundRobin),
            status,
            created_at: "2024-01-01T12:00:00Z".to_string(),
            forwarding_rules: vec![get_http_rule()],
            health_check: Some(HealthCheck {
                protocol: "http".to_string(),
                port: 80,
                path: Some("/".to_string()),
                check_interval_seconds: Some(10),
                response_timeout_seconds: Some(5),
                unhealthy_threshold: Some(3),
                healthy_threshold: Some(5),
            }),
            sticky_sessions: Some(StickySessions {
                typ: "none".to_string(),
                cookie_name: None,
                cookie_ttl_seconds: None,
            }),
            redirect_http_to_https: false,
            enable_proxy_protocol: false,
            enable_backend_keepalive: false,
            http_idle_timeout_seconds: Some(60),
            vpc_uuid: Some("c33931f2-a26a-4e61-b85c-4e95a2ec431b".to_string()),
            disable_lets_encrypt_dns_records: false,
            firewall: Some(LoadBalancerFirewall {
                deny: vec!["ip:1.2.3.4".to_string()],
                allow: vec!["cidr:0.0.0.0/0".to_string()],
            }),
            region: Region {
                name: "New York 3".to_string(),
                slug: "nyc3".to_string(),
                features: vec![
                    "private_networking".to_string(),
                    "backups".to_string(),
                    "load_balancers".to_string(),
                ],
                available: true,
                sizes: vec!["s-1vcpu-1gb".to_string()],
            },
            droplet_ids: vec![3164444, 3164445],
            tag: "".to_string(),
        }
    }

    fn get_request() -> LoadBalancerRequest {
        LoadBalancerRequest {
            name: "example-lb-01".to_string(),
            region: "nyc3".to_string(),
            forwarding_rules: vec![get_http_rule()],
            droplet_ids: Some(vec![3164444, 3164445]),
            ..Default::default()
        }
    }

    #[test]
    fn test_get_all_load_balancers() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/v2/load_balancers")
            .match_header("Authorization", "Bearer foo")
            .with_status(200)
            .with_header("Content-Type", "application/json")
            .with_body(
                serde_json::to_string(&json!({
                    "load_balancers": [
                        get_load_balancer_json("4de7ac8b", "example-lb-01", "active"),
                        get_load_balancer_json("56775c3f", "example-lb-02", "new"),
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
            .load_balancers
            .get_all_load_balancers();
        assert_eq!(
            Ok(vec![
                get_load_balancer_obj("4de7ac8b", "example-lb-01", LoadBalancerStatus::Active),
                get_load_balancer_obj("56775c3f", "example-lb-02", LoadBalancerStatus::New),
            ]),
            resp
        );
        _m.assert();
    }

    #[test]
    fn test_get_existing_load_balancer() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/v2/load_balancers/4de7ac8b")
            .with_status(200)
            .with_header("Content-Type", "application/json")
            .with_body(
                serde_json::to_string(&json!({
                    "load_balancer": get_load_balancer_json("4de7ac8b", "example-lb-01", "errored")
                }))
                .unwrap(),
            )
            .create();

        let resp = DigitalOceanClient::new_for_test("foo".to_string(), server.url())
            .load_balancers
            .get_existing_load_balancer("4de7ac8b");
        assert_eq!(
            Ok(get_load_balancer_obj(
                "4de7ac8b",
                "example-lb-01",
                LoadBalancerStatus::Errored
            )),
            resp
        );
        _m.assert();
    }

    #[test]
    fn test_create_load_balancer() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/v2/load_balancers")
            .match_header("Content-Type", "application/json")
            .match_body(Matcher::Json(json!({
                "name": "example-lb-01",
                "region": "nyc3",
                "forwarding_rules": [{
                    "entry_protocol": "http",
                    "entry_port": 80,
                    "target_protocol": "http",
                    "target_port": 80,
                    "tls_passthrough": false
                }],
                "droplet_ids": [3164444, 3164445]
            })))
            .with_status(202)
            .with_header("Content-Type", "application/json")
            .with_body(
                serde_json::to_string(&json!({
                    "load_balancer": get_load_balancer_json("4de7ac8b", "example-lb-01", "new")
                }))
                .unwrap(),
            )
            .create();

        let resp = DigitalOceanClient::new_for_test("foo".to_string(), server.url())
            .load_balancers
            .create_load_balancer(&get_request());
        assert_eq!(
            Ok(get_load_balancer_obj(
                "4de7ac8b",
                "example-lb-01",
                LoadBalancerStatus::New
            )),
            resp
        );
        _m.assert();
    }

    #[test]
    fn test_create_load_balancer_missing_fields() {
        let mut server = mockito::Server::new();
        let _m = server.mock("POST", "/v2/load_balancers").expect(0).create();
        let client = DigitalOceanClient::new_for_test("foo".to_string(), server.url());

        let no_name = LoadBalancerRequest {
            name: "".to_string(),
            ..get_request()
        };
        let no_region = LoadBalancerRequest {
            region: "".to_string(),
            ..get_request()
        };
        let no_rules = LoadBalancerRequest {
            forwarding_rules: vec![],
            ..get_request()
        };
        for request in [no_name, no_region, no_rules] {
            let resp = client.load_balancers.create_load_balancer(&request);
            assert_eq!(
                Err(Error::Validation(ValidationError::MissingFields(
                    "Load Balancer"
                ))),
                resp
            );
        }
        _m.assert();
    }

    #[test]
    fn test_create_load_balancer_incomplete_forwarding_rule() {
        let mut server = mockito::Server::new();
        let _m = server.mock("POST", "/v2/load_balancers").expect(0).create();

        let resp = DigitalOceanClient::new_for_test("foo".to_string(), server.url())
            .load_balancers
            .create_load_balancer(&LoadBalancerRequest {
                forwarding_rules: vec![
                    get_http_rule(),
                    ForwardingRule {
                        target_port: 0,
                        ..get_http_rule()
                    },
                ],
                ..get_request()
            });
        let err = resp.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            "Required fields missing from Forwarding Rule Object",
            err.to_string()
        );
        _m.assert();
    }

    #[test]
    fn test_update_load_balancer_incomplete_health_check() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("PUT", "/v2/load_balancers/4de7ac8b")
            .expect(0)
            .create();

        let resp = DigitalOceanClient::new_for_test("foo".to_string(), server.url())
            .load_balancers
            .update_load_balancer(
                "4de7ac8b",
                &LoadBalancerRequest {
                    health_check: Some(HealthCheck {
                        protocol: "http".to_string(),
                        port: 0,
                        ..Default::default()
                    }),
                    ..get_request()
                },
            );
        assert_eq!(
            Err(Error::Validation(ValidationError::MissingFields(
                "Health Check"
            ))),
            resp
        );
        _m.assert();
    }

    #[test]
    fn test_update_load_balancer() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("PUT", "/v2/load_balancers/4de7ac8b")
            .match_body(Matcher::PartialJson(json!({
                "name": "example-lb-01",
                "algorithm": "least_connections",
                "health_check": {
                    "protocol": "tcp",
                    "port": 22
                }
            })))
            .with_status(200)
            .with_header("Content-Type", "application/json")
            .with_body(
                serde_json::to_string(&json!({
                    "load_balancer": get_load_balancer_json("4de7ac8b", "example-lb-01", "active")
                }))
                .unwrap(),
            )
            .create();

        let resp = DigitalOceanClient::new_for_test("foo".to_string(), server.url())
            .load_balancers
            .update_load_balancer(
                "4de7ac8b",
                &LoadBalancerRequest {
                    algorithm: Some(LoadBalancerAlgorithm::LeastConnections),
                    health_check: Some(HealthCheck {
                        protocol: "tcp".to_string(),
                        port: 22,
                        ..Default::default()
                    }),
                    ..get_request()
                },
            );
        assert_eq!(
            Ok(get_load_balancer_obj(
                "4de7ac8b",
                "example-lb-01",
                LoadBalancerStatus::Active
            )),
            resp
        );
        _m.assert();
    }

    #[test]
    fn test_delete_load_balancer() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("DELETE", "/v2/load_balancers/4de7ac8b")
            .with_status(204)
            .create();

        let resp = DigitalOceanClient::new_for_test("foo".to_string(), server.url())
            .load_balancers
            .delete_load_balancer("4de7ac8b");
        assert_eq!(Ok(()), resp);
        _m.assert();
    }

    #[test]
    fn test_load_balancer_droplets() {
        let mut server = mockito::Server::new();
        let _m_add = server
            .mock("POST", "/v2/load_balancers/4de7ac8b/droplets")
            .match_body(Matcher::Json(json!({ "droplet_ids": [3164446] })))
            .with_status(204)
            .create();
        let _m_remove = server
            .mock("DELETE", "/v2/load_balancers/4de7ac8b/droplets")
            .match_body(Matcher::Json(json!({ "droplet_ids": [3164446] })))
            .with_status(204)
            .create();

        let client = DigitalOceanClient::new_for_test("foo".to_string(), server.url());
        assert_eq!(
            Ok(()),
            client
                .load_balancers
                .add_droplets_to_load_balancer("4de7ac8b", &[3164446])
        );
        assert_eq!(
            Ok(()),
            client
                .load_balancers
                .remove_droplets_from_load_balancer("4de7ac8b", &[3164446])
        );
        _m_add.assert();
        _m_remove.assert();
    }

    #[test]
    fn test_load_balancer_forwarding_rules() {
        let mut server = mockito::Server::new();
        let rule = ForwardingRule {
            entry_protocol: "tcp".to_string(),
            entry_port: 3306,
            target_protocol: "tcp".to_string(),
            target_port: 3306,
            certificate_id: None,
            tls_passthrough: false,
        };
        let body = json!({
            "forwarding_rules": [{
                "entry_protocol": "tcp",
                "entry_port": 3306,
                "target_protocol": "tcp",
                "target_port": 3306,
                "tls_passthrough": false
            }]
        });
        let _m_add = server
            .mock("POST", "/v2/load_balancers/4de7ac8b/forwarding_rules")
            .match_body(Matcher::Json(body.clone()))
            .with_status(204)
            .create();
        let _m_remove = server
            .mock("DELETE", "/v2/load_balancers/4de7ac8b/forwarding_rules")
            .match_body(Matcher::Json(body))
            .with_status(204)
            .create();

        let client = DigitalOceanClient::new_for_test("foo".to_string(), server.url());
        assert_eq!(
            Ok(()),
            client
                .load_balancers
                .add_forwarding_rules_to_load_balancer("4de7ac8b", &[rule.clone()])
        );
        assert_eq!(
            Ok(()),
            client
                .load_balancers
                .remove_forwarding_rules_from_load_balancer("4de7ac8b", &[rule])
        );
        _m_add.assert();
        _m_remove.assert();
    }

    #[test]
    fn test_add_incomplete_forwarding_rule() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/v2/load_balancers/4de7ac8b/forwarding_rules")
            .expect(0)
            .create();

        let resp = DigitalOceanClient::new_for_test("foo".to_string(), server.url())
            .load_balancers
            .add_forwarding_rules_to_load_balancer(
                "4de7ac8b",
                &[ForwardingRule {
                    entry_protocol: "".to_string(),
                    ..get_http_rule()
                }],
            );
        assert_eq!(
            Err(Error::Validation(ValidationError::MissingFields(
                "Forwarding Rule"
            ))),
            resp
        );
        _m.assert();
    }
}
