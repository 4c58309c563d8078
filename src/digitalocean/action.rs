use serde::{Deserialize, Serialize};

use crate::digitalocean::api::{DigitalOceanApiClient, Pagination};
use crate::digitalocean::error::Error;
use crate::digitalocean::region::Region;

pub trait DigitalOceanActionClient: Send + Sync {
    fn get_all_actions(&self, pagination: &Pagination) -> Result<Vec<Action>, Error>;

    fn get_existing_action(&self, id: u64) -> Result<Action, Error>;
}

pub struct DigitalOceanActionClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanActionClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanActionClientImpl {
        DigitalOceanActionClientImpl { api }
    }
}

impl DigitalOceanActionClient for DigitalOceanActionClientImpl {
    /// List one page of the actions taken on the account.
    fn get_all_actions(&self, pagination: &Pagination) -> Result<Vec<Action>, Error> {
        self.api.get("actions", &pagination.to_query(), "actions")
    }

    fn get_existing_action(&self, id: u64) -> Result<Action, Error> {
        self.api.get(format!("actions/{id}").as_str(), &[], "action")
    }
}

// /v2/actions

/// A record of an asynchronous operation performed on some resource. Actions are only ever read
/// by the client; the provider creates and advances them.
#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct Action {
    /// A unique numeric ID that can be used to identify and reference an action.
    pub id: u64,
    /// The current status of the action.
    pub status: ActionStatus,
    /// This is the type of action that the object represents. For example, this could be
    /// "transfer" to represent the state of an image transfer action.
    #[serde(rename = "type")]
    pub typ: String,
    /// A time value given in ISO8601 combined date and time format that represents when the action
    /// was initiated.
    pub started_at: Option<String>,
    /// A time value given in ISO8601 combined date and time format that represents when the action
    /// was completed.
    pub completed_at: Option<String>,
    /// A unique identifier for the resource that the action is associated with.
    pub resource_id: Option<u64>,
    /// The type of resource that the action is associated with.
    pub resource_type: String,
    pub region: Option<Region>,
    /// A human-readable string that is used as a unique identifier for each region.
    pub region_slug: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum ActionStatus {
    InProgress,
    Completed,
    Errored,
}
