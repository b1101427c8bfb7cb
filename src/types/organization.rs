use serde::{Deserialize, Serialize};

use super::Repository;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Organization {
    pub name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub repository: Option<Repository>,
}
