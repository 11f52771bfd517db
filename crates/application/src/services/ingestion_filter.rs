use chrono::{DateTime, Duration, Utc};
use memefeed_domain::config::FilterConfig;
use memefeed_domain::raw_record::RawUser;
use memefeed_domain::{
    BlocklistSnapshot, Category, DomainError, Item, ItemStatus, RawRecord, RejectionReason,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    Accepted(Item),
    Rejected(RejectionReason),
}

impl FilterOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, FilterOutcome::Accepted(_))
    }
}

/// Turns a raw upstream record into an `Item`, or says why it was dropped.
///
/// Checks run in a fixed order and the first failing one wins:
/// incomplete, too_new, no_media, is_repost, blocked_keyword, blocked_user,
/// blocked_url. The filter is pure: it reads a blocklist snapshot and the
/// supplied clock and has no side effects.
pub struct IngestionFilter {
    min_account_age: Duration,
    accepted_media: HashSet<String>,
    repost_prefix: String,
    link_base: String,
    source_label: String,
    default_category: Category,
    routes: HashMap<String, Category>,
}

impl IngestionFilter {
    pub fn from_config(config: &FilterConfig) -> Result<Self, DomainError> {
        let routes = config
            .rule_categories
            .iter()
            .map(|(tag, name)| Ok((tag.to_lowercase(), Category::new(name)?)))
            .collect::<Result<HashMap<_, _>, DomainError>>()?;

        Ok(Self {
            min_account_age: Duration::days(i64::from(config.min_account_age_days)),
            accepted_media: config
                .accepted_media_types
                .iter()
                .map(|t| t.to_lowercase())
                .collect(),
            repost_prefix: config.repost_prefix.clone(),
            link_base: config.link_base.trim_end_matches('/').to_string(),
            source_label: config.source_label.clone(),
            default_category: Category::new(&config.default_category)?,
            routes,
        })
    }

    pub fn filter(
        &self,
        raw: &RawRecord,
        blocklist: &BlocklistSnapshot,
        now: DateTime<Utc>,
    ) -> FilterOutcome {
        let (Some(post), Some(author)) = (raw.data.as_ref(), raw.author()) else {
            return FilterOutcome::Rejected(RejectionReason::Incomplete);
        };
        if post.id.is_empty() || author.username.is_empty() {
            return FilterOutcome::Rejected(RejectionReason::Incomplete);
        }
        let Some(account_created) = parse_timestamp(author) else {
            return FilterOutcome::Rejected(RejectionReason::Incomplete);
        };

        if account_created > now - self.min_account_age {
            return FilterOutcome::Rejected(RejectionReason::TooNew);
        }

        let media_url = match raw.first_media() {
            Some(media) if self.accepted_media.contains(&media.kind.to_lowercase()) => {
                match media.url.as_deref() {
                    Some(url) if !url.is_empty() => url,
                    _ => return FilterOutcome::Rejected(RejectionReason::NoMedia),
                }
            }
            _ => return FilterOutcome::Rejected(RejectionReason::NoMedia),
        };

        if self.is_repost(raw) {
            return FilterOutcome::Rejected(RejectionReason::IsRepost);
        }

        if blocklist.matches_keyword(&post.text) {
            return FilterOutcome::Rejected(RejectionReason::BlockedKeyword);
        }

        if blocklist.matches_user(&[author.username.as_str(), author.id.as_str()]) {
            return FilterOutcome::Rejected(RejectionReason::BlockedUser);
        }

        if raw.expanded_urls().any(|url| blocklist.matches_url(url)) {
            return FilterOutcome::Rejected(RejectionReason::BlockedUrl);
        }

        FilterOutcome::Accepted(Item {
            id: Arc::from(post.id.as_str()),
            author_id: Arc::from(author.id.as_str()),
            username: Arc::from(author.username.as_str()),
            display_name: author.name.clone(),
            profile_image_url: author.profile_image_url.clone(),
            text: post.text.clone(),
            created_at: Some(account_created),
            content_link: format!(
                "{}/{}/status/{}",
                self.link_base, author.username, post.id
            ),
            media_url: media_url.to_string(),
            source: self.source_label.clone(),
            category: self.route(raw),
            status: ItemStatus::Active,
            removed_by: None,
        })
    }

    fn is_repost(&self, raw: &RawRecord) -> bool {
        let Some(post) = raw.data.as_ref() else {
            return false;
        };
        if !self.repost_prefix.is_empty() && post.text.starts_with(&self.repost_prefix) {
            return true;
        }
        post.referenced_tweets
            .iter()
            .any(|r| matches!(r.kind.as_str(), "retweeted" | "quoted"))
    }

    /// Category for the record's first rule tag, or the default category.
    pub fn route(&self, raw: &RawRecord) -> Category {
        raw.rule_tag()
            .and_then(|tag| self.routes.get(&tag.to_lowercase()))
            .cloned()
            .unwrap_or_else(|| self.default_category.clone())
    }
}

fn parse_timestamp(author: &RawUser) -> Option<DateTime<Utc>> {
    let raw = author.created_at.as_deref()?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
