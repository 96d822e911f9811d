pub mod error;
pub mod types;

pub use error::{ExplorerError, Result};
pub use types::{Explorer, PageVariables};

use std::time::Duration;

use types::{ExplorersData, GraphQlRequest, GraphQlResponse};

pub const DEFAULT_ENDPOINT: &str = "https://graph.everipedia.org/graphql";

const EXPLORERS_QUERY: &str = r#"
query ExplorersList($offset: Int!, $limit: Int!) {
  explorers(offset: $offset, limit: $limit) {
    id
    baseUrl
    explorer
    hidden
  }
}
"#;

pub struct ExplorerClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ExplorerClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch one page of registered explorers.
    pub async fn explorers(&self, offset: u32, limit: u32) -> Result<Vec<Explorer>> {
        tracing::debug!(endpoint = %self.endpoint, offset, limit, "Fetching explorers");

        let request = GraphQlRequest {
            query: EXPLORERS_QUERY,
            variables: PageVariables { offset, limit },
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ExplorerError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        parse_explorers(&body)
    }
}

/// Decode an `ExplorersList` response body.
pub fn parse_explorers(body: &str) -> Result<Vec<Explorer>> {
    let resp: GraphQlResponse<ExplorersData> = serde_json::from_str(body)?;

    if !resp.errors.is_empty() {
        return Err(ExplorerError::GraphQl(
            resp.errors.into_iter().map(|e| e.message).collect(),
        ));
    }

    resp.data
        .map(|d| d.explorers)
        .ok_or_else(|| ExplorerError::Parse("response has no data".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_explorer_page() {
        let body = r#"{
            "data": {
                "explorers": [
                    {"id": "etherscan_profile", "baseUrl": "https://etherscan.io/", "explorer": "Etherscan", "hidden": false},
                    {"id": "solscan_profile", "baseUrl": "https://solscan.io", "explorer": "Solscan", "hidden": true}
                ]
            }
        }"#;

        let explorers = parse_explorers(body).unwrap();
        assert_eq!(explorers.len(), 2);
        assert_eq!(explorers[0].id, "etherscan_profile");
        assert_eq!(explorers[0].base_url, "https://etherscan.io/");
        assert!(explorers[1].hidden);
    }

    #[test]
    fn missing_hidden_defaults_to_false() {
        let body = r#"{"data":{"explorers":[{"id":"x","baseUrl":"https://x.io","explorer":"X"}]}}"#;
        let explorers = parse_explorers(body).unwrap();
        assert!(!explorers[0].hidden);
    }

    #[test]
    fn graphql_errors_are_surfaced() {
        let body = r#"{"data":null,"errors":[{"message":"rate limited"},{"message":"try later"}]}"#;
        match parse_explorers(body) {
            Err(ExplorerError::GraphQl(messages)) => {
                assert_eq!(messages, vec!["rate limited", "try later"])
            }
            other => panic!("expected GraphQl error, got {other:?}"),
        }
    }

    #[test]
    fn empty_data_is_a_parse_error() {
        let body = r#"{"data":null}"#;
        assert!(matches!(parse_explorers(body), Err(ExplorerError::Parse(_))));
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        assert!(matches!(
            parse_explorers("<html>bad gateway</html>"),
            Err(ExplorerError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_network_error() {
        let client =
            ExplorerClient::new("http://127.0.0.1:9/graphql", Duration::from_millis(500)).unwrap();
        let result = client.explorers(0, 30).await;
        assert!(matches!(result, Err(ExplorerError::Network(_))));
    }
}
