use serde::{Deserialize, Serialize};

/// A blockchain explorer registered with the wiki backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explorer {
    /// Metadata id the explorer is keyed under, e.g. `etherscan_profile`.
    pub id: String,
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    /// Display name of the explorer service.
    pub explorer: String,
    #[serde(default)]
    pub hidden: bool,
}

/// Pagination window for the `explorers` query.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageVariables {
    pub offset: u32,
    pub limit: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlErrorMessage {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExplorersData {
    pub explorers: Vec<Explorer>,
}
