use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::digitalocean::api::DigitalOceanApiClient;
use crate::digitalocean::error::Error;

pub trait DigitalOceanTagClient: Send + Sync {
    fn get_all_tags(&self) -> Result<Vec<Tag>, Error>;

    fn create_tag(&self, name: &str) -> Result<Tag, Error>;

    fn get_tag(&self, name: &str) -> Result<Tag, Error>;

    fn tag_resources(&self, name: &str, resources: &[TagResource]) -> Result<(), Error>;

    fn untag_resources(&self, name: &str, resources: &[TagResource]) -> Result<(), Error>;

    fn delete_tag(&self, name: &str) -> Result<(), Error>;
}

pub struct DigitalOceanTagClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanTagClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanTagClientImpl {
        DigitalOceanTagClientImpl { api }
    }
}

impl DigitalOceanTagClient for DigitalOceanTagClientImpl {
    fn get_all_tags(&self) -> Result<Vec<Tag>, Error> {
        self.api.get("tags", &[], "tags")
    }

    fn create_tag(&self, name: &str) -> Result<Tag, Error> {
        self.api.post("tags", &TagNameBody { name }, "tag")
    }

    fn get_tag(&self, name: &str) -> Result<Tag, Error> {
        self.api.get(format!("tags/{name}").as_str(), &[], "tag")
    }

    fn tag_resources(&self, name: &str, resources: &[TagResource]) -> Result<(), Error> {
        self.api.execute_no_content(
            Method::POST,
            format!("tags/{name}/resources").as_str(),
            &[],
            Some(&TagResourcesBody { resources }),
        )
    }

    fn untag_resources(&self, name: &str, resources: &[TagResource]) -> Result<(), Error> {
        self.api.execute_no_content(
            Method::DELETE,
            format!("tags/{name}/resources").as_str(),
            &[],
            Some(&TagResourcesBody { resources }),
        )
    }

    /// Deleting a tag also untags every resource carrying it.
    fn delete_tag(&self, name: &str) -> Result<(), Error> {
        self.api.delete(format!("tags/{name}").as_str(), &[])
    }
}

// /v2/tags

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct Tag {
    pub name: String,
    pub resources: TagResources,
}

#[derive(Deserialize, Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct TagResources {
    pub count: u64,
    pub last_tagged_uri: Option<String>,
    pub droplets: Option<TagResourceCount>,
    pub images: Option<TagResourceCount>,
    pub volumes: Option<TagResourceCount>,
    pub volume_snapshots: Option<TagResourceCount>,
    pub databases: Option<TagResourceCount>,
}

#[derive(Deserialize, Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct TagResourceCount {
    pub count: u64,
    pub last_tagged_uri: Option<String>,
}

/// A resource to tag or untag, e.g. `{ "resource_id": "9569411", "resource_type": "droplet" }`.
#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct TagResource {
    pub resource_id: String,
    /// droplet, image, volume or volume_snapshot
    pub resource_type: String,
}

#[derive(Serialize, Debug)]
struct TagNameBody<'a> {
    name: &'a str,
}

#[derive(Serialize, Debug)]
struct TagResourcesBody<'a> {
    resources: &'a [TagResource],
}

#[cfg(test)]
mod test {
    use mockito::Matcher;
    use reqwest::StatusCode;

    use crate::digitalocean::DigitalOceanClient;
    use crate::digitalocean::tag::{Tag, TagResource, TagResourceCount, TagResources};

    fn get_tag_json(name: &str, count: u64) -> serde_json::Value {
        json!({
            "name": name,
            "resources": {
                "count": count,
                "last_tagged_uri": "https://api.digitalocean.com/v2/droplets/3164444",
                "droplets": {
                    "count": count,
                    "last_tagged_uri": "https://api.digitalocean.com/v2/droplets/3164444"
                }
            }
        })
    }

    fn get_tag_obj(name: &str, count: u64) -> Tag {
        Tag {
            name: name.to_string(),
            resources: TagResources {
                count,
                last_tagged_uri: Some(
                    "https://api.digitalocean.com/v2/droplets/3164444".to_string(),
                ),
                droplets: Some(TagResourceCount {
                    count,
                    last_tagged_uri: Some(
                        "https://api.digitalocean.com/v2/droplets/3164444".to_string(),
                    ),
                }),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_get_all_tags() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/v2/tags")
            .match_header("Authorization", "Bearer foo")
            .with_status(200)
            .with_header("Content-Type", "application/json")
            .with_body(
                serde_json::to_string(&json!({
                    "tags": [get_tag_json("production", 2), get_tag_json("staging", 1)],
                    "links": {},
                    "meta": { "total": 2 }
                }))
                .unwrap(),
            )
            .create();

        let resp = DigitalOceanClient::new_for_test("foo".to_string(), server.url())
            .tags
            .get_all_tags();
        assert_eq!(
            Ok(vec![get_tag_obj("production", 2), get_tag_obj("staging", 1)]),
            resp
        );
        _m.assert();
    }

    #[test]
    fn test_create_and_get_tag() {
        let mut server = mockito::Server::new();
        let _m_create = server
            .mock("POST", "/v2/tags")
            .match_body(Matcher::Json(json!({ "name": "production" })))
            .with_status(201)
            .with_header("Content-Type", "application/json")
            .with_body(
                serde_json::to_string(&json!({ "tag": get_tag_json("production", 0) })).unwrap(),
            )
            .create();
        let _m_get = server
            .mock("GET", "/v2/tags/production")
            .with_status(200)
            .with_header("Content-Type", "application/json")
            .with_body(
                serde_json::to_string(&json!({ "tag": get_tag_json("production", 2) })).unwrap(),
            )
            .create();

        let client = DigitalOceanClient::new_for_test("foo".to_string(), server.url());
        assert_eq!(
            Ok(get_tag_obj("production", 0)),
            client.tags.create_tag("production")
        );
        assert_eq!(
            Ok(get_tag_obj("production", 2)),
            client.tags.get_tag("production")
        );
        _m_create.assert();
        _m_get.assert();
    }

    #[test]
    fn test_tag_and_untag_resources() {
        let mut server = mockito::Server::new();
        let body = json!({
            "resources": [
                { "resource_id": "9569411", "resource_type": "droplet" },
                { "resource_id": "7555620", "resource_type": "image" }
            ]
        });
        let _m_tag = server
            .mock("POST", "/v2/tags/production/resources")
            .match_body(Matcher::Json(body.clone()))
            .with_status(204)
            .create();
        let _m_untag = server
            .mock("DELETE", "/v2/tags/production/resources")
            .match_body(Matcher::Json(body))
            .with_status(204)
            .create();

        let resources = vec![
            TagResource {
                resource_id: "9569411".to_string(),
                resource_type: "droplet".to_string(),
            },
            TagResource {
                resource_id: "7555620".to_string(),
                resource_type: "image".to_string(),
            },
        ];
        let client = DigitalOceanClient::new_for_test("foo".to_string(), server.url());
        assert_eq!(Ok(()), client.tags.tag_resources("production", &resources));
        assert_eq!(Ok(()), client.tags.untag_resources("production", &resources));
        _m_tag.assert();
        _m_untag.assert();
    }

    #[test]
    fn test_delete_tag() {
        let mut server = mockito::Server::new();
        let _m_ok = server
            .mock("DELETE", "/v2/tags/production")
            .with_status(204)
            .create();
        let _m_missing = server
            .mock("DELETE", "/v2/tags/nope")
            .with_status(404)
            .with_header("Content-Type", "application/json")
            .with_body(r#"{"id":"not_found","message":"The resource you were accessing could not be found."}"#)
            .create();

        let client = DigitalOceanClient::new_for_test("foo".to_string(), server.url());
        assert_eq!(Ok(()), client.tags.delete_tag("production"));

        let err = client.tags.delete_tag("nope").unwrap_err();
        assert_eq!(Some(StatusCode::NOT_FOUND), err.status());
        assert_eq!(
            Some("not_found".to_string()),
            err.error_response().map(|e| e.id)
        );
        _m_ok.assert();
        _m_missing.assert();
    }
}
