//! GraphQL-over-HTTP implementation of [`ClashBackend`].

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use clashes_shared::{Clash, CreateClashInput, CreatedClash};

use crate::backend::ClashBackend;
use crate::error::{BackendError, Result};

const CLASH_FIELDS: &str = "id title description location address date pictureUrl \
     createdByPeer { id name } participants { id name }";

fn clashes_query() -> String {
    format!("query Clashes {{ clashes {{ {CLASH_FIELDS} }} }}")
}

fn clash_query() -> String {
    format!("query Clash($id: ID!) {{ clash(id: $id) {{ {CLASH_FIELDS} }} }}")
}

const CREATE_CLASH_MUTATION: &str = "mutation CreateClash($createClashInput: CreateClashInput!) \
     { createClash(createClashInput: $createClashInput) { id title } }";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphqlRequest<'a, V> {
    operation_name: &'a str,
    query: &'a str,
    variables: V,
}

#[derive(Deserialize)]
struct GraphqlResponse<D> {
    data: Option<D>,
    #[serde(default)]
    errors: Vec<GraphqlErrorItem>,
}

#[derive(Deserialize)]
struct GraphqlErrorItem {
    message: String,
}

#[derive(Deserialize)]
struct ClashesData {
    clashes: Vec<Clash>,
}

#[derive(Deserialize)]
struct ClashData {
    clash: Option<Clash>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateClashData {
    create_clash: Option<CreatedClash>,
}

#[derive(Serialize)]
struct IdVariables<'a> {
    id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateVariables<'a> {
    create_clash_input: &'a CreateClashInput,
}

/// Client for the Clashes GraphQL service.
///
/// Constructed once at startup and handed to whoever needs it; cloning is
/// cheap because `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GraphqlClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("clashes/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn execute<V, D>(&self, operation_name: &str, query: &str, variables: V) -> Result<D>
    where
        V: Serialize + Send,
        D: DeserializeOwned,
    {
        let body = GraphqlRequest {
            operation_name,
            query,
            variables,
        };

        // Every read must see fresh data.
        let resp = self
            .http
            .post(&self.endpoint)
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(BackendError::Status(status.as_u16()));
        }

        let bytes = resp.bytes().await?;
        let parsed: GraphqlResponse<D> = serde_json::from_slice(&bytes)?;

        if !parsed.errors.is_empty() {
            let messages: Vec<String> = parsed.errors.into_iter().map(|e| e.message).collect();
            return Err(BackendError::Graphql(messages.join("; ")));
        }

        debug!(operation = operation_name, "GraphQL operation completed");
        parsed.data.ok_or(BackendError::MissingData)
    }
}

#[async_trait]
impl ClashBackend for GraphqlClient {
    fn backend_tag(&self) -> &'static str {
        "graphql"
    }

    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_clashes(&self) -> Result<Vec<Clash>> {
        let data: ClashesData = self
            .execute("Clashes", &clashes_query(), serde_json::json!({}))
            .await?;
        Ok(data.clashes)
    }

    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_clash(&self, id: &str) -> Result<Option<Clash>> {
        let data: ClashData = self
            .execute("Clash", &clash_query(), IdVariables { id })
            .await?;
        Ok(data.clash)
    }

    #[instrument(skip(self, input), fields(endpoint = %self.endpoint))]
    async fn create_clash(&self, input: &CreateClashInput) -> Result<CreatedClash> {
        let data: CreateClashData = self
            .execute(
                "CreateClash",
                CREATE_CLASH_MUTATION,
                CreateVariables {
                    create_clash_input: input,
                },
            )
            .await?;
        data.create_clash.ok_or(BackendError::MissingData)
    }
}
