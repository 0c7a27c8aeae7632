//! Feed service
//!
//! Reads memo rows and assembles the view data the pages render:
//! resource URLs normalized, tags attached, heatmap counts bucketed.

use crate::config::{FEED_PAGE_SIZE, HEATMAP_DAYS};
use crate::database::{Memo, Repository, Resource, Tag, User};
use crate::error::Result;
use crate::render::heatmap::Heatmap;
use crate::render::resource::public_url;
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;

/// A memo with everything its feed item needs
#[derive(Debug, Clone)]
pub struct MemoView {
    pub memo: Memo,
    /// `filepath` already rewritten to a public URL
    pub resources: Vec<Resource>,
    pub tags: Vec<Tag>,
}

/// First page of a paginated feed
#[derive(Debug, Clone)]
pub struct FeedPage {
    pub memos: Vec<MemoView>,
    /// More public memos exist past this page
    pub has_more: bool,
}

/// Service for assembling page data
#[derive(Clone)]
pub struct FeedService {
    repo: Repository,
}

impl FeedService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Resources, then tags, for each memo in turn
    async fn assemble(&self, memos: Vec<Memo>) -> Result<Vec<MemoView>> {
        let mut views = Vec::with_capacity(memos.len());
        for memo in memos {
            views.push(self.assemble_one(memo).await?);
        }
        Ok(views)
    }

    async fn assemble_one(&self, memo: Memo) -> Result<MemoView> {
        let resources = self
            .repo
            .list_memo_resources(memo.id)
            .await?
            .into_iter()
            .map(|mut r| {
                r.filepath = public_url(r.id, &r.filepath);
                r
            })
            .collect();
        let tags = self.repo.list_memo_tags(memo.id).await?;

        Ok(MemoView {
            memo,
            resources,
            tags,
        })
    }

    /// First page of the public feed
    pub async fn public_feed(&self) -> Result<FeedPage> {
        let total = self.repo.count_public_memos().await?;
        let memos = self.repo.list_public_memos(FEED_PAGE_SIZE, 0).await?;
        let memos = self.assemble(memos).await?;

        Ok(FeedPage {
            memos,
            has_more: total > FEED_PAGE_SIZE,
        })
    }

    /// Public memos carrying the named tag
    pub async fn tag_feed(&self, name: &str) -> Result<(Tag, Vec<MemoView>)> {
        let tag = self.repo.get_tag_by_name(name).await?;
        let memos = self.repo.list_public_memos_by_tag(tag.id).await?;
        let memos = self.assemble(memos).await?;
        Ok((tag, memos))
    }

    /// A user and their public memos
    pub async fn user_feed(&self, user_id: i64) -> Result<(User, Vec<MemoView>)> {
        let user = self.repo.get_user(user_id).await?;
        let memos = self.repo.list_public_memos_by_creator(user.id).await?;
        let memos = self.assemble(memos).await?;
        Ok((user, memos))
    }

    /// A single memo with its resources and tags
    pub async fn memo_detail(&self, memo_id: i64) -> Result<MemoView> {
        let memo = self.repo.get_memo(memo_id).await?;
        self.assemble_one(memo).await
    }

    /// Heatmap for the window ending at `today` (UTC)
    pub async fn heatmap(&self, today: NaiveDate) -> Result<Heatmap> {
        let since = Heatmap::start(today)
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp();

        let counts: BTreeMap<String, u32> = self
            .repo
            .daily_public_counts(since)
            .await?
            .into_iter()
            .map(|row| (row.day, u32::try_from(row.count).unwrap_or(u32::MAX)))
            .collect();

        tracing::debug!("Heatmap: {} active days in last {}", counts.len(), HEATMAP_DAYS);
        Ok(Heatmap::from_counts(&counts, today))
    }

    /// Site title from the `site_title` setting, or the configured fallback
    pub async fn site_title(&self, fallback: &str) -> Result<String> {
        Ok(self
            .repo
            .get_setting("site_title")
            .await?
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string()))
    }
}
