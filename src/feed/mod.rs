//! Feed assembly: shuffling advertisers and interleaving them with posts.
//!
//! - [`shuffle`]: session-stable permutation of advertisers
//! - [`cadence`]: validated "one ad every N posts" setting
//! - [`display`]: the merged feed's item type
//! - [`interleave`]: ad slot placement, including paginated feeds
//! - [`planner`]: configuration-driven composition of the above

pub mod cadence;
pub mod display;
pub mod interleave;
pub mod planner;
pub mod shuffle;

pub use cadence::{Cadence, InvalidCadence};
pub use display::DisplayItem;
pub use interleave::{
    CursorOverflow, FeedCursor, FeedPage, ad_slot_count, interleave_page, interleave_with_ads,
    interleave_with_ads_filtered,
};
pub use planner::FeedPlanner;
pub use shuffle::{seeded_shuffle, shuffle_in_place};
