use reqwest::Method;
use reqwest::blocking::{Client, ClientBuilder, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use crate::digitalocean::error::Error;

/// Where the v2 API lives unless told otherwise.
pub const DEFAULT_BASE_URL: &str = "https://api.digitalocean.com/v2/";

const USER_AGENT: &str = concat!("digitalocean-client/", env!("CARGO_PKG_VERSION"));

/// Transport configuration shared by every service: the base URL and an HTTP client that
/// carries the bearer token on each request.
///
/// It is immutable once built. Services hold their own clone, so two clients configured with
/// different tokens can live side by side in one process.
#[derive(Clone, Debug)]
pub struct DigitalOceanApiClient {
    base_url: Url,
    http: Client,
}

impl DigitalOceanApiClient {
    pub fn new(token: &str) -> Result<DigitalOceanApiClient, Error> {
        DigitalOceanApiClient::new_with_base_url(token, DEFAULT_BASE_URL)
    }

    pub fn new_with_base_url(token: &str, base_url: &str) -> Result<DigitalOceanApiClient, Error> {
        let mut auth = HeaderValue::from_str(format!("Bearer {token}").as_str())?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = ClientBuilder::new()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(DigitalOceanApiClient {
            base_url: parse_base_url(base_url)?,
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an endpoint such as `droplets/42` against the base URL.
    pub fn get_url(&self, endpoint: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    /// Issue one request and unwrap the `key` field of the JSON envelope that comes back.
    pub fn execute<B, T>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        key: &str,
    ) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.send(method, endpoint, query, body)?;
        unwrap_envelope(resp, key)
    }

    /// Issue one request and discard whatever the provider sends back.
    pub fn execute_no_content<B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<(), Error>
    where
        B: Serialize + ?Sized,
    {
        self.send(method, endpoint, query, body).map(|_| ())
    }

    pub fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        key: &str,
    ) -> Result<T, Error> {
        self.execute::<(), T>(Method::GET, endpoint, query, None, key)
    }

    /// GET an endpoint whose body is the payload itself, with no envelope around it.
    pub fn get_bare<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, Error> {
        Ok(self.send::<()>(Method::GET, endpoint, &[], None)?.json::<T>()?)
    }

    pub fn get_text(&self, endpoint: &str) -> Result<String, Error> {
        Ok(self.send::<()>(Method::GET, endpoint, &[], None)?.text()?)
    }

    pub fn get_bytes(&self, endpoint: &str) -> Result<Vec<u8>, Error> {
        Ok(self
            .send::<()>(Method::GET, endpoint, &[], None)?
            .bytes()?
            .to_vec())
    }

    pub fn post<B, T>(&self, endpoint: &str, body: &B, key: &str) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::POST, endpoint, &[], Some(body), key)
    }

    pub fn put<B, T>(&self, endpoint: &str, body: &B, key: &str) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(Method::PUT, endpoint, &[], Some(body), key)
    }

    pub fn delete(&self, endpoint: &str, query: &[(&str, String)]) -> Result<(), Error> {
        self.execute_no_content::<()>(Method::DELETE, endpoint, query, None)
    }

    fn send<B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Response, Error>
    where
        B: Serialize + ?Sized,
    {
        let url = self.get_url(endpoint)?;
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        check_status(request.send()?)
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, Error> {
    let mut url = Url::parse(base_url)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(path.as_str());
    }
    Ok(url)
}

fn check_status(resp: Response) -> Result<Response, Error> {
    let status = resp.status();
    debug!("Received {} from {}", status, resp.url());
    if status.is_success() {
        Ok(resp)
    } else {
        let url = resp.url().to_string();
        let body = resp.text().unwrap_or_default();
        warn!("DigitalOcean rejected request to {}: {} {}", url, status, body);
        Err(Error::Api { status, body })
    }
}

fn unwrap_envelope<T: DeserializeOwned>(resp: Response, key: &str) -> Result<T, Error> {
    let mut envelope = resp.json::<Map<String, Value>>()?;
    let value = envelope
        .remove(key)
        .ok_or_else(|| Error::MissingEnvelope(key.to_string()))?;
    Ok(serde_json::from_value(value)?)
}

// paging parameters accepted by the collection endpoints that document them

#[derive(Serialize, Debug, Eq, PartialEq, Clone, Copy)]
pub struct Pagination {
    /// Which page of results to return, starting at 1.
    pub page: u32,
    /// How many items each page holds.
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Pagination {
        Pagination { page, per_page }
    }

    pub(crate) fn to_query(self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
        ]
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            page: 1,
            per_page: 25,
        }
    }
}

// common error message format

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct ErrorResponse {
    /// A short identifier for the kind of error, e.g. "not_found".
    pub id: String,
    /// A human readable description of what went wrong.
    pub message: String,
    /// Identifies the request on DigitalOcean's side, useful for support tickets.
    pub request_id: Option<String>,
}

#[cfg(test)]
mod test {
    use mockito::Matcher;
    use reqwest::StatusCode;

    use crate::digitalocean::api::{DigitalOceanApiClient, Pagination};
    use crate::digitalocean::error::Error;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let api =
            DigitalOceanApiClient::new_with_base_url("foo", "https://example.com/v2").unwrap();
        assert_eq!("https://example.com/v2/", api.base_url().as_str());
        assert_eq!(
            "https://example.com/v2/droplets/1",
            api.get_url("/droplets/1").unwrap().as_str()
        );
    }

    #[test]
    fn test_default_base_url() {
        let api = DigitalOceanApiClient::new("foo").unwrap();
        assert_eq!(
            "https://api.digitalocean.com/v2/account",
            api.get_url("account").unwrap().as_str()
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let resp = DigitalOceanApiClient::new_with_base_url("foo", "not a url");
        assert!(matches!(resp, Err(Error::Url(_))));
    }

    #[test]
    fn test_pagination_defaults() {
        assert_eq!(Pagination::new(1, 25), Pagination::default());
        assert_eq!(
            vec![("page", "3".to_string()), ("per_page", "25".to_string())],
            Pagination {
                page: 3,
                ..Default::default()
            }
            .to_query()
        );
    }

    #[test]
    fn test_execute_unwraps_envelope() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/v2/things")
            .match_header("Authorization", "Bearer foo")
            .match_header("Content-Type", "application/json")
            .with_status(200)
            .with_header("Content-Type", "application/json")
            .with_body(
                serde_json::to_string(&json!({
                    "things": ["a", "b"],
                    "meta": { "total": 2 },
                }))
                .unwrap(),
            )
            .create();

        let api = DigitalOceanApiClient::new_with_base_url("foo", &format!("{}/v2", server.url()))
            .unwrap();
        let resp = api.get::<Vec<String>>("things", &[], "things");
        assert_eq!(Ok(vec!["a".to_string(), "b".to_string()]), resp);
        _m.assert();
    }

    #[test]
    fn test_execute_missing_envelope() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/v2/things")
            .with_status(200)
            .with_header("Content-Type", "application/json")
            .with_body(r#"{"other": []}"#)
            .create();

        let api = DigitalOceanApiClient::new_with_base_url("foo", &format!("{}/v2", server.url()))
            .unwrap();
        let resp = api.get::<Vec<String>>("things", &[], "things");
        assert_eq!(Err(Error::MissingEnvelope("things".to_string())), resp);
        _m.assert();
    }

    #[test]
    fn test_execute_passes_query() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/v2/things")
            .match_query(Matcher::UrlEncoded("name".into(), "a b".into()))
            .with_status(200)
            .with_header("Content-Type", "application/json")
            .with_body(r#"{"things": []}"#)
            .create();

        let api = DigitalOceanApiClient::new_with_base_url("foo", &format!("{}/v2", server.url()))
            .unwrap();
        let resp = api.get::<Vec<String>>("things", &[("name", "a b".to_string())], "things");
        assert_eq!(Ok(vec![]), resp);
        _m.assert();
    }

    #[test]
    fn test_provider_error_passed_through() {
        let mut server = mockito::Server::new();
        let body = r#"{"id":"unauthorized","message":"Unable to authenticate you."}"#;
        let _m = server
            .mock("GET", "/v2/things")
            .with_status(401)
            .with_header("Content-Type", "application/json")
            .with_body(body)
            .create();

        let api = DigitalOceanApiClient::new_with_base_url("foo", &format!("{}/v2", server.url()))
            .unwrap();
        let resp = api.get::<Vec<String>>("things", &[], "things");
        assert_eq!(
            Err(Error::Api {
                status: StatusCode::UNAUTHORIZED,
                body: body.to_string()
            }),
            resp
        );
        _m.assert();
    }
}
