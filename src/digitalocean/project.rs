use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::digitalocean::api::DigitalOceanApiClient;
use crate::digitalocean::error::{Error, ValidationError};

pub trait DigitalOceanProjectClient: Send + Sync {
    fn get_all_projects(&self) -> Result<Vec<Project>, Error>;

    fn get_existing_project(&self, id: &str) -> Result<Project, Error>;

    fn get_default_project(&self) -> Result<Project, Error>;

    fn create_project(&self, project: &ProjectRequest) -> Result<Project, Error>;

    fn update_project(&self, id: &str, project: &ProjectRequest) -> Result<Project, Error>;

    fn update_default_project(&self, project: &ProjectRequest) -> Result<Project, Error>;

    fn delete_project(&self, id: &str) -> Result<(), Error>;

    fn get_project_resources(&self, id: &str) -> Result<Vec<ProjectResource>, Error>;

    fn get_default_project_resources(&self) -> Result<Vec<ProjectResource>, Error>;

    fn assign_resources_to_project(
        &self,
        id: &str,
        urns: &[String],
    ) -> Result<Vec<ProjectResource>, Error>;

    fn assign_resources_to_default_project(
        &self,
        urns: &[String],
    ) -> Result<Vec<ProjectResource>, Error>;
}

pub struct DigitalOceanProjectClientImpl {
    api: DigitalOceanApiClient,
}

impl DigitalOceanProjectClientImpl {
    pub fn new(api: DigitalOceanApiClient) -> DigitalOceanProjectClientImpl {
        DigitalOceanProjectClientImpl { api }
    }
}

impl DigitalOceanProjectClient for DigitalOceanProjectClientImpl {
    fn get_all_projects(&self) -> Result<Vec<Project>, Error> {
        self.api.get("projects", &[], "projects")
    }

    fn get_existing_project(&self, id: &str) -> Result<Project, Error> {
        self.api
            .get(format!("projects/{id}").as_str(), &[], "project")
    }

    fn get_default_project(&self) -> Result<Project, Error> {
        self.api.get("projects/default", &[], "project")
    }

    fn create_project(&self, project: &ProjectRequest) -> Result<Project, Error> {
        validate_project_request(project, false)?;
        self.api.post("projects", project, "project")
    }

    fn update_project(&self, id: &str, project: &ProjectRequest) -> Result<Project, Error> {
        validate_project_request(project, true)?;
        self.api
            .put(format!("projects/{id}").as_str(), project, "project")
    }

    fn update_default_project(&self, project: &ProjectRequest) -> Result<Project, Error> {
        validate_project_request(project, true)?;
        self.api.put("projects/default", project, "project")
    }

    /// Only empty projects can be deleted.
    fn delete_project(&self, id: &str) -> Result<(), Error> {
        self.api.delete(format!("projects/{id}").as_str(), &[])
    }

    fn get_project_resources(&self, id: &str) -> Result<Vec<ProjectResource>, Error> {
        self.api
            .get(format!("projects/{id}/resources").as_str(), &[], "resources")
    }

    fn get_default_project_resources(&self) -> Result<Vec<ProjectResource>, Error> {
        self.api.get("projects/default/resources", &[], "resources")
    }

    /// Move resources, identified by URN, into a project.
    fn assign_resources_to_project(
        &self,
        id: &str,
        urns: &[String],
    ) -> Result<Vec<ProjectResource>, Error> {
        self.api.post(
            format!("projects/{id}/resources").as_str(),
            &AssignResourcesBody { resources: urns },
            "resources",
        )
    }

    fn assign_resources_to_default_project(
        &self,
        urns: &[String],
    ) -> Result<Vec<ProjectResource>, Error> {
        self.api.post(
            "projects/default/resources",
            &AssignResourcesBody { resources: urns },
            "resources",
        )
    }
}

fn validate_project_request(
    project: &ProjectRequest,
    requires_description: bool,
) -> Result<(), ValidationError> {
    let missing_description = requires_description
        && project
            .description
            .as_deref()
            .is_none_or(|description| description.is_empty());
    if project.name.is_empty() || project.purpose.is_empty() || missing_description {
        debug!("Refusing project request with missing fields");
        return Err(ValidationError::MissingFields("Project"));
    }
    if !is_valid_project_purpose(&project.purpose) {
        debug!("Refusing project with purpose '{}'", project.purpose);
        return Err(ValidationError::InvalidProjectPurpose);
    }
    Ok(())
}

const OTHER_PURPOSE_PREFIX: &str = "Other: ";

/// A purpose is accepted when it is one of the fixed [`ProjectPurpose`] strings, or any free text
/// prefixed with `Other: `.
pub fn is_valid_project_purpose(purpose: &str) -> bool {
    purpose.starts_with(OTHER_PURPOSE_PREFIX)
        || ProjectPurpose::ALL
            .iter()
            .any(|known| known.as_str() == purpose)
}

/// Split a `do:<resource_type>:<resource_id>` URN into its parts.
///
/// Only the shape is checked: the type segment is passed through as-is, so URNs for resource
/// types this crate does not know about still parse.
pub fn parse_project_resource_urn(urn: &str) -> Result<ProjectResourceUrn, ValidationError> {
    match urn.split(':').collect::<Vec<_>>().as_slice() {
        ["do", typ, id] => Ok(ProjectResourceUrn {
            id: id.to_string(),
            typ: typ.to_string(),
        }),
        _ => Err(ValidationError::InvalidUrn),
    }
}

// /v2/projects

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct Project {
    pub id: String,
    /// The unique universal identifier of the project owner.
    pub owner_uuid: String,
    pub owner_id: u64,
    /// The human-readable name for the project. Maximum 175 characters.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// One of the [`ProjectPurpose`] strings, or free text prefixed with `Other: `.
    pub purpose: String,
    pub environment: Option<ProjectEnvironment>,
    /// Whether this is the account's default project. Resources not explicitly assigned land
    /// here.
    #[serde(default)]
    pub is_default: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone, Copy)]
pub enum ProjectEnvironment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum ProjectPurpose {
    JustTryingOutDigitalOcean,
    ClassProject,
    WebsiteOrBlog,
    WebApplication,
    ServiceOrApi,
    MobileApplication,
    MachineLearning,
    IoT,
    OperationalTooling,
}

impl ProjectPurpose {
    pub const ALL: [ProjectPurpose; 9] = [
        ProjectPurpose::JustTryingOutDigitalOcean,
        ProjectPurpose::ClassProject,
        ProjectPurpose::WebsiteOrBlog,
        ProjectPurpose::WebApplication,
        ProjectPurpose::ServiceOrApi,
        ProjectPurpose::MobileApplication,
        ProjectPurpose::MachineLearning,
        ProjectPurpose::IoT,
        ProjectPurpose::OperationalTooling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectPurpose::JustTryingOutDigitalOcean => "Just trying out DigitalOcean",
            ProjectPurpose::ClassProject => "Class project / Educational purposes",
            ProjectPurpose::WebsiteOrBlog => "Website or blog",
            ProjectPurpose::WebApplication => "Web Application",
            ProjectPurpose::ServiceOrApi => "Service or API",
            ProjectPurpose::MobileApplication => "Mobile Application",
            ProjectPurpose::MachineLearning => "Machine learning / AI / Data processing",
            ProjectPurpose::IoT => "IoT",
            ProjectPurpose::OperationalTooling => "Operational / Developer tooling",
        }
    }
}

impl fmt::Display for ProjectPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct ProjectResource {
    /// e.g. `do:droplet:13457723`
    pub urn: String,
    pub assigned_at: Option<String>,
    pub links: Option<ProjectResourceLinks>,
    /// ok, not_found, assigned, already_assigned or service_down
    pub status: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Eq, PartialEq, Clone)]
pub struct ProjectResourceLinks {
    #[serde(rename = "self")]
    pub self_link: String,
}

#[derive(Debug, Eq, PartialEq, Clone)]
pub struct ProjectResourceUrn {
    pub id: String,
    pub typ: String,
}

/// Body for creating or updating a project. Creation needs `name` and `purpose`; updates also
/// need `description`.
#[derive(Serialize, Debug, Default, Eq, PartialEq, Clone)]
pub struct ProjectRequest {
    pub name: String,
    pub purpose: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<ProjectEnvironment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

#[derive(Serialize, Debug)]
struct AssignResourcesBody<'a> {
    resources: &'a [String],
}
