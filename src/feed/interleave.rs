//! Ad interleaving.
//!
//! Ads are placed by original post position: a slot goes immediately before
//! every post whose 1-based position is a multiple of the cadence. Posts
//! removed by a caller's filter still occupy their position, so ad density
//! does not change when content is hidden. Advertisers rotate in the order
//! given; callers that want a per-session random rotation shuffle the list
//! with [`seeded_shuffle`](crate::seeded_shuffle) first.

use crate::feed::{Cadence, DisplayItem};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Resume point for interleaving the next page of an infinite feed.
///
/// `position` counts original (unfiltered) posts already consumed and
/// `ad_index` counts ad slots already emitted. Interleaving a feed page by
/// page while threading the cursor yields exactly the sequence produced by
/// interleaving the whole feed at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedCursor {
    /// Original posts consumed so far.
    pub position: usize,
    /// Ad slots emitted so far.
    pub ad_index: usize,
}

impl FeedCursor {
    /// The cursor at the top of a feed.
    pub const START: Self = Self {
        position: 0,
        ad_index: 0,
    };
}

/// Error returned when a cursor's counters cannot advance any further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("feed cursor overflowed at position {position}, ad slot {ad_index}")]
pub struct CursorOverflow {
    /// Original posts consumed when the overflow happened.
    pub position: usize,
    /// Ad slots emitted when the overflow happened.
    pub ad_index: usize,
}

impl CursorOverflow {
    const fn at(cursor: FeedCursor) -> Self {
        Self {
            position: cursor.position,
            ad_index: cursor.ad_index,
        }
    }
}

/// One interleaved page and the cursor for the page after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedPage<P, A> {
    /// Merged display items for this page.
    pub items: Vec<DisplayItem<P, A>>,
    /// Cursor to pass when interleaving the following page.
    pub next: FeedCursor,
}

/// Merges `posts` with ad slots taken from `advertisers`.
///
/// # Example
///
/// ```
/// use feedweave::{Cadence, DisplayItem, interleave_with_ads};
///
/// let cadence = Cadence::new(3).unwrap();
/// let feed = interleave_with_ads(["p1", "p2", "p3", "p4"], &["a1"], cadence);
/// assert_eq!(
///     feed,
///     vec![
///         DisplayItem::post("p1"),
///         DisplayItem::post("p2"),
///         DisplayItem::ad("a1"),
///         DisplayItem::post("p3"),
///         DisplayItem::post("p4"),
///     ]
/// );
/// ```
pub fn interleave_with_ads<P, A, I>(
    posts: I,
    advertisers: &[A],
    cadence: Cadence,
) -> Vec<DisplayItem<P, A>>
where
    I: IntoIterator<Item = P>,
    A: Clone,
{
    interleave_with_ads_filtered(posts, advertisers, cadence, |_: &P| true)
}

/// Like [`interleave_with_ads`], but only posts for which `include_post`
/// returns `true` are emitted. Excluded posts still count toward cadence.
pub fn interleave_with_ads_filtered<P, A, I, F>(
    posts: I,
    advertisers: &[A],
    cadence: Cadence,
    include_post: F,
) -> Vec<DisplayItem<P, A>>
where
    I: IntoIterator<Item = P>,
    A: Clone,
    F: FnMut(&P) -> bool,
{
    let mut items = Vec::new();
    // From the top of a feed the counters only overflow after usize::MAX
    // posts; the merged feed ends there.
    let _ = merge_into(
        &mut items,
        posts,
        advertisers,
        cadence,
        FeedCursor::START,
        include_post,
    );
    items
}

/// Interleaves one page of a feed, continuing from `cursor`.
///
/// With no advertisers only the included posts are emitted; the cursor's
/// position still advances so a later page with advertisers keeps cadence.
///
/// Cursors usually come back from clients, so a cursor whose counters would
/// overflow while consuming this page is rejected with [`CursorOverflow`].
pub fn interleave_page<P, A, I, F>(
    posts: I,
    advertisers: &[A],
    cadence: Cadence,
    cursor: FeedCursor,
    include_post: F,
) -> Result<FeedPage<P, A>, CursorOverflow>
where
    I: IntoIterator<Item = P>,
    A: Clone,
    F: FnMut(&P) -> bool,
{
    let mut items = Vec::new();
    let next = merge_into(&mut items, posts, advertisers, cadence, cursor, include_post)?;
    Ok(FeedPage { items, next })
}

fn merge_into<P, A, I, F>(
    items: &mut Vec<DisplayItem<P, A>>,
    posts: I,
    advertisers: &[A],
    cadence: Cadence,
    cursor: FeedCursor,
    mut include_post: F,
) -> Result<FeedCursor, CursorOverflow>
where
    I: IntoIterator<Item = P>,
    A: Clone,
    F: FnMut(&P) -> bool,
{
    let posts = posts.into_iter();
    items.reserve(posts.size_hint().0);
    let mut next = cursor;

    for post in posts {
        next.position = next
            .position
            .checked_add(1)
            .ok_or_else(|| CursorOverflow::at(next))?;
        if !advertisers.is_empty() && cadence.is_slot(next.position) {
            let advertiser = advertisers[next.ad_index % advertisers.len()].clone();
            next.ad_index = next
                .ad_index
                .checked_add(1)
                .ok_or_else(|| CursorOverflow::at(next))?;
            items.push(DisplayItem::ad(advertiser));
        }
        if include_post(&post) {
            items.push(DisplayItem::post(post));
        }
    }

    Ok(next)
}

/// Number of ad slots a run of `post_count` posts produces from the top of a
/// feed, assuming at least one advertiser.
#[must_use]
pub const fn ad_slot_count(post_count: usize, cadence: Cadence) -> usize {
    post_count / cadence.get()
}
