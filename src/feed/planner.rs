//! Configuration-driven feed planning.

use crate::config::FeedConfig;
use crate::error::Result;
use crate::feed::{
    DisplayItem, FeedCursor, FeedPage, interleave_page, interleave_with_ads_filtered,
    seeded_shuffle,
};
use crate::tracing_compat::debug;
use crate::types::Seed;

/// Builds merged feeds according to a [`FeedConfig`].
///
/// The planner only composes [`seeded_shuffle`] with
/// [`interleave_with_ads_filtered`] or [`interleave_page`]; all of them
/// remain usable on their own.
#[derive(Debug, Clone, Default)]
pub struct FeedPlanner {
    config: FeedConfig,
}

impl FeedPlanner {
    /// Creates a planner.
    #[must_use]
    pub const fn new(config: FeedConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Plans a whole feed from the top.
    pub fn plan<P, A, I, F>(
        &self,
        posts: I,
        advertisers: &[A],
        seed: Seed,
        include_post: F,
    ) -> Vec<DisplayItem<P, A>>
    where
        I: IntoIterator<Item = P>,
        A: Clone,
        F: FnMut(&P) -> bool,
    {
        let rotation = self.rotation(advertisers, seed);
        let items =
            interleave_with_ads_filtered(posts, &rotation, self.config.ad_cadence, include_post);
        debug!(
            seed = seed.get(),
            advertisers = rotation.len(),
            emitted = items.len(),
            "planned feed"
        );
        items
    }

    /// Plans one page of a feed, continuing from `cursor`.
    ///
    /// The advertiser rotation is derived from `seed` alone, so every page of
    /// a session sees the same rotation as long as the seed is stable.
    pub fn plan_page<P, A, I, F>(
        &self,
        posts: I,
        advertisers: &[A],
        seed: Seed,
        cursor: FeedCursor,
        include_post: F,
    ) -> Result<FeedPage<P, A>>
    where
        I: IntoIterator<Item = P>,
        A: Clone,
        F: FnMut(&P) -> bool,
    {
        let rotation = self.rotation(advertisers, seed);
        let page = interleave_page(
            posts,
            &rotation,
            self.config.ad_cadence,
            cursor,
            include_post,
        )?;
        debug!(
            seed = seed.get(),
            advertisers = rotation.len(),
            posts = page.next.position.saturating_sub(cursor.position),
            slots = page.next.ad_index.saturating_sub(cursor.ad_index),
            emitted = page.items.len(),
            "planned feed page"
        );
        Ok(page)
    }

    fn rotation<A: Clone>(&self, advertisers: &[A], seed: Seed) -> Vec<A> {
        if self.config.shuffle_advertisers {
            seeded_shuffle(advertisers, seed)
        } else {
            advertisers.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{Cadence, interleave_with_ads};

    fn planner(cadence: usize, shuffle: bool) -> FeedPlanner {
        FeedPlanner::new(
            FeedConfig::default()
                .with_ad_cadence(Cadence::new(cadence).expect("positive"))
                .with_shuffle_advertisers(shuffle),
        )
    }

    fn ads_of(feed: &[DisplayItem<u32, &'static str>]) -> Vec<&'static str> {
        feed.iter().filter_map(DisplayItem::as_ad).copied().collect()
    }

    #[test]
    fn unshuffled_plan_matches_interleaver() {
        let posts: Vec<u32> = (1..=8).collect();
        let ads = ["a1", "a2", "a3"];
        let planned = planner(2, false).plan(posts.clone(), &ads, Seed::new(9), |_: &u32| true);
        assert_eq!(planned, interleave_with_ads(posts, &ads, Cadence::new(2).expect("positive")));
    }

    #[test]
    fn shuffled_rotation_follows_seed() {
        let posts: Vec<u32> = (1..=8).collect();
        let ads = ["a1", "a2", "a3", "a4"];
        let planned = planner(2, true).plan(posts, &ads, Seed::new(42), |_: &u32| true);
        assert_eq!(ads_of(&planned), vec!["a1", "a4", "a2", "a3"]);
    }

    #[test]
    fn same_seed_same_feed_across_pages() {
        let ads = ["a1", "a2", "a3", "a4"];
        let planner = planner(3, true);
        let seed = Seed::from_str_hash("viewer-42");
        let whole = planner.plan(1..=12_u32, &ads, seed, |_: &u32| true);

        let first = planner
            .plan_page(1..=5_u32, &ads, seed, FeedCursor::START, |_: &u32| true)
            .expect("first page");
        let second = planner
            .plan_page(6..=12_u32, &ads, seed, first.next, |_: &u32| true)
            .expect("second page");
        let mut stitched = first.items;
        stitched.extend(second.items);
        assert_eq!(stitched, whole);
        assert_eq!(ads_of(&whole), vec!["a3", "a1", "a4", "a2"]);
    }

    #[test]
    fn overflowing_cursor_surfaces_as_crate_error() {
        let cursor = FeedCursor {
            position: usize::MAX,
            ad_index: 3,
        };
        let err = planner(3, true)
            .plan_page(1..=2_u32, &["a1", "a2"], Seed::new(1), cursor, |_: &u32| true)
            .expect_err("cursor cannot advance");
        assert!(err.is_cursor_overflow());
    }

    #[test]
    fn default_planner_uses_default_cadence() {
        let planner = FeedPlanner::default();
        assert_eq!(planner.config().ad_cadence.get(), 6);
        let feed = planner.plan(1..=6_u32, &["only"], Seed::new(0), |_: &u32| true);
        assert_eq!(feed.len(), 7);
        assert_eq!(feed[5], DisplayItem::ad("only"));
    }
}
