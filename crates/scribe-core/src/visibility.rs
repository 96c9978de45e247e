//! Post visibility rules.
//!
//! A post is *public-visible* when all three hold: its own
//! `is_published` flag is set, its `pub_date` is not in the future, and
//! it sits under a published category. The post's author bypasses all
//! three conditions for their own posts. A location's publish flag
//! never participates.
//!
//! Every feed built here carries an exact comment count per post and is
//! ordered by `pub_date` descending - one rule for all listings,
//! including an owner's view of their own profile.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::Post;

/// A post enriched with the data visibility and listings need: the
/// comment count and the publish flag of its category (false when the
/// post has no category).
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub post: Post,
    pub comment_count: i64,
    pub category_published: bool,
}

impl FeedItem {
    /// Rule A: public visibility, no author privilege.
    pub fn is_public(&self, now: DateTime<Utc>) -> bool {
        self.post.is_published && self.post.pub_date <= now && self.category_published
    }

    /// Rule B: the author sees their own post in any state; everyone
    /// else only a public-visible one.
    pub fn visible_to(&self, viewer: Option<Uuid>, now: DateTime<Utc>) -> bool {
        viewer == Some(self.post.author_id) || self.is_public(now)
    }
}

/// Rule A over a collection: the public-visible subset, newest first.
///
/// Serves the front page and category pages; the caller pre-narrows the
/// collection (e.g. to one category) before applying this.
pub fn public_feed(items: Vec<FeedItem>, now: DateTime<Utc>) -> Vec<FeedItem> {
    let mut feed: Vec<FeedItem> = items.into_iter().filter(|i| i.is_public(now)).collect();
    order_newest_first(&mut feed);
    feed
}

/// Rule C: the feed of `owner`'s posts as seen by `viewer`.
///
/// The owner sees all of their posts regardless of publish state;
/// any other viewer (or an anonymous one) sees only the public subset.
pub fn profile_feed(
    items: Vec<FeedItem>,
    owner: Uuid,
    viewer: Option<Uuid>,
    now: DateTime<Utc>,
) -> Vec<FeedItem> {
    let owner_view = viewer == Some(owner);
    let mut feed: Vec<FeedItem> = items
        .into_iter()
        .filter(|i| i.post.author_id == owner && (owner_view || i.is_public(now)))
        .collect();
    order_newest_first(&mut feed);
    feed
}

fn order_newest_first(feed: &mut [FeedItem]) {
    feed.sort_by(|a, b| b.post.pub_date.cmp(&a.post.pub_date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn item(author: Uuid, published: bool, age_hours: i64, category_published: bool) -> FeedItem {
        let now = Utc::now();
        let mut post = Post::new(
            author,
            "title".to_owned(),
            "text".to_owned(),
            now - TimeDelta::hours(age_hours),
            Some(Uuid::new_v4()),
            None,
        );
        post.is_published = published;
        FeedItem {
            post,
            comment_count: 0,
            category_published,
        }
    }

    #[test]
    fn public_feed_keeps_only_fully_published_past_posts() {
        let author = Uuid::new_v4();
        let now = Utc::now();
        let items = vec![
            item(author, true, 1, true),    // visible
            item(author, false, 1, true),   // unpublished
            item(author, true, -1, true),   // scheduled in the future
            item(author, true, 1, false),   // hidden category
        ];

        let feed = public_feed(items, now);
        assert_eq!(feed.len(), 1);
        assert!(feed[0].is_public(now));
    }

    #[test]
    fn post_without_category_is_not_public() {
        let mut it = item(Uuid::new_v4(), true, 1, false);
        it.post.category_id = None;
        assert!(!it.is_public(Utc::now()));
    }

    #[test]
    fn location_never_gates_visibility() {
        // A feed item carries no location flag at all: only the post's
        // own flag, its date and the category flag participate.
        let mut it = item(Uuid::new_v4(), true, 1, true);
        it.post.location_id = None;
        assert!(it.is_public(Utc::now()));
        it.post.location_id = Some(Uuid::new_v4());
        assert!(it.is_public(Utc::now()));
    }

    #[test]
    fn author_sees_own_hidden_post_others_do_not() {
        let author = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let now = Utc::now();
        let hidden = item(author, false, 1, true);

        assert!(hidden.visible_to(Some(author), now));
        assert!(!hidden.visible_to(Some(stranger), now));
        assert!(!hidden.visible_to(None, now));
    }

    #[test]
    fn future_post_visible_only_to_author() {
        let author = Uuid::new_v4();
        let now = Utc::now();
        let scheduled = item(author, true, -2, true);

        assert!(scheduled.visible_to(Some(author), now));
        assert!(!scheduled.visible_to(None, now));
    }

    #[test]
    fn profile_feed_owner_sees_everything_newest_first() {
        let owner = Uuid::new_v4();
        let now = Utc::now();
        let items = vec![
            item(owner, true, 3, true),
            item(owner, false, 2, true),
            item(owner, true, -1, true),
            item(Uuid::new_v4(), true, 1, true), // someone else's
        ];

        let feed = profile_feed(items, owner, Some(owner), now);
        assert_eq!(feed.len(), 3);
        assert!(feed.windows(2).all(|w| w[0].post.pub_date >= w[1].post.pub_date));
    }

    #[test]
    fn profile_feed_stranger_sees_public_subset_only() {
        let owner = Uuid::new_v4();
        let now = Utc::now();
        let items = vec![
            item(owner, true, 3, true),
            item(owner, false, 2, true),
            item(owner, true, -1, true),
        ];

        let feed = profile_feed(items, owner, Some(Uuid::new_v4()), now);
        assert_eq!(feed.len(), 1);
        let feed = profile_feed(
            vec![item(owner, true, 3, true), item(owner, false, 2, true)],
            owner,
            None,
            now,
        );
        assert_eq!(feed.len(), 1);
    }

    #[test]
    fn public_feed_orders_by_pub_date_descending() {
        let author = Uuid::new_v4();
        let now = Utc::now();
        let items = vec![
            item(author, true, 5, true),
            item(author, true, 1, true),
            item(author, true, 3, true),
        ];

        let feed = public_feed(items, now);
        let ages: Vec<_> = feed.iter().map(|i| i.post.pub_date).collect();
        let mut sorted = ages.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(ages, sorted);
    }
}
