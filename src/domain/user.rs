use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier as emitted by the preparation step. Numeric ids stay numeric on
/// the wire so the order body matches what the backend issued.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Identifier {
    Number(i64),
    Text(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Number(value) => write!(f, "{}", value),
            Identifier::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetProduct {
    #[serde(alias = "product_id")]
    pub product_id: Identifier,
    #[serde(alias = "size_id")]
    pub size_id: Identifier,
}

/// A ready-to-use authenticated user. Immutable for the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    pub user_id: Identifier,
    pub address_id: Identifier,
    #[serde(rename = "token", alias = "authToken")]
    pub auth_token: String,
    pub target_product: TargetProduct,
}
