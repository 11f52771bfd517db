use crate::InsertPolicy;
use serde::{Deserialize, Serialize};

/// One bounded category
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CategoryConfig {
    pub name: String,

    pub capacity: usize,

    #[serde(default)]
    pub policy: InsertPolicy,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryConfig>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
        }
    }
}

fn default_categories() -> Vec<CategoryConfig> {
    vec![
        CategoryConfig {
            name: "main".to_string(),
            capacity: 200,
            policy: InsertPolicy::Append,
        },
        CategoryConfig {
            name: "community".to_string(),
            capacity: 500,
            policy: InsertPolicy::Append,
        },
    ]
}
