use memefeed_application::use_cases::{BlocklistUpdate, SupermodOverview};
use memefeed_domain::{BlocklistAction, BlocklistField};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder some clients send for an unset form field.
const UNSET_SENTINEL: &str = "undefined";

/// One supermod call may touch all three lists with the same action.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupermodRequest {
    #[serde(default)]
    pub password: String,
    pub action: Option<String>,
    pub word: Option<String>,
    pub url: Option<String>,
    pub users: Option<String>,
}

impl SupermodRequest {
    pub fn action(&self) -> Result<BlocklistAction, String> {
        match self.action.as_deref().map(str::trim) {
            None | Some("") | Some("add") => Ok(BlocklistAction::Add),
            Some("remove") => Ok(BlocklistAction::Remove),
            Some(other) => Err(format!("Unknown action '{}'", other)),
        }
    }

    pub fn updates(&self) -> Result<Vec<BlocklistUpdate>, String> {
        let action = self.action()?;
        let fields = [
            (BlocklistField::Keyword, &self.word),
            (BlocklistField::Url, &self.url),
            (BlocklistField::User, &self.users),
        ];

        Ok(fields
            .into_iter()
            .filter_map(|(field, value)| {
                let value = value.as_deref()?.trim();
                if value.is_empty() || value == UNSET_SENTINEL {
                    return None;
                }
                Some(BlocklistUpdate {
                    action,
                    field,
                    value: value.to_string(),
                })
            })
            .collect())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupermodResponse {
    pub keywords: Vec<String>,
    pub users: Vec<String>,
    pub urls: Vec<String>,
    /// Finalized removals per moderator.
    pub moderators: BTreeMap<String, u64>,
    pub live_counts: BTreeMap<String, usize>,
    pub changed: bool,
}

impl From<SupermodOverview> for SupermodResponse {
    fn from(overview: SupermodOverview) -> Self {
        Self {
            keywords: overview.blocklist.keywords.iter().cloned().collect(),
            users: overview.blocklist.users.iter().cloned().collect(),
            urls: overview.blocklist.urls.iter().cloned().collect(),
            moderators: overview.moderators,
            live_counts: overview.live_counts,
            changed: overview.changed,
        }
    }
}
