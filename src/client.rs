use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::{GhError, Result};
use crate::operations::Operation;

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";

const USER_AGENT: &str = concat!("gh-issues/", env!("CARGO_PKG_VERSION"));

pub struct GitHubClient {
    http: Client,
    endpoint: Url,
    token: String,
}

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    variables: &'a serde_json::Value,
}

/// Raw GraphQL envelope. `data` and `errors` may both be present when the
/// server resolved only part of the document.
#[derive(Deserialize, Debug)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQLError>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GraphQLError {
    pub message: String,
}

impl GitHubClient {
    pub fn new(endpoint: Url, token: String) -> Self {
        Self {
            http: Client::new(),
            endpoint,
            token,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn execute<T: DeserializeOwned>(
        &self,
        operation: &Operation,
    ) -> Result<GraphQLResponse<T>> {
        debug!(operation = operation.name, "Sending GraphQL request");

        let request = GraphQLRequest {
            query: operation.query,
            variables: &operation.variables,
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .header("Authorization", format!("bearer {}", self.token))
            .header("User-Agent", USER_AGENT)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(operation = operation.name, %status, "GraphQL request rejected");
            return Err(GhError::ApiError {
                status: status.as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        let gql_response: GraphQLResponse<T> = response.json().await?;

        if !gql_response.errors.is_empty() {
            debug!(
                operation = operation.name,
                errors = gql_response.errors.len(),
                has_data = gql_response.data.is_some(),
                "GraphQL response carried errors"
            );
        }

        if gql_response.data.is_none() && gql_response.errors.is_empty() {
            return Err(GhError::EmptyResponse);
        }

        Ok(gql_response)
    }
}
