//! Display items: the merged post/ad sequence handed to renderers.

use serde::{Deserialize, Serialize};

/// One entry of a merged feed.
///
/// Serialized as an internally tagged object so that clients can switch on
/// `kind`:
///
/// ```
/// use feedweave::DisplayItem;
///
/// let post: DisplayItem<&str, &str> = DisplayItem::post("p1");
/// let ad: DisplayItem<&str, &str> = DisplayItem::ad("a1");
/// assert_eq!(
///     serde_json::to_string(&post).unwrap(),
///     r#"{"kind":"post","item":"p1"}"#
/// );
/// assert_eq!(
///     serde_json::to_string(&ad).unwrap(),
///     r#"{"kind":"ad","advertiser":"a1"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DisplayItem<P, A> {
    /// A content item.
    Post {
        /// The content item.
        item: P,
    },
    /// An advertiser slot.
    Ad {
        /// The advertiser filling the slot.
        advertiser: A,
    },
}

impl<P, A> DisplayItem<P, A> {
    /// Wraps a content item.
    #[inline]
    pub const fn post(item: P) -> Self {
        Self::Post { item }
    }

    /// Wraps an advertiser.
    #[inline]
    pub const fn ad(advertiser: A) -> Self {
        Self::Ad { advertiser }
    }

    /// Returns `true` for a content item.
    #[inline]
    pub const fn is_post(&self) -> bool {
        matches!(self, Self::Post { .. })
    }

    /// Returns `true` for an ad slot.
    #[inline]
    pub const fn is_ad(&self) -> bool {
        matches!(self, Self::Ad { .. })
    }

    /// Returns the content item, if this is one.
    pub const fn as_post(&self) -> Option<&P> {
        match self {
            Self::Post { item } => Some(item),
            Self::Ad { .. } => None,
        }
    }

    /// Returns the advertiser, if this is an ad slot.
    pub const fn as_ad(&self) -> Option<&A> {
        match self {
            Self::Post { .. } => None,
            Self::Ad { advertiser } => Some(advertiser),
        }
    }

    /// Borrows both payloads.
    pub const fn as_ref(&self) -> DisplayItem<&P, &A> {
        match self {
            Self::Post { item } => DisplayItem::Post { item },
            Self::Ad { advertiser } => DisplayItem::Ad { advertiser },
        }
    }

    /// Maps the payloads, keeping the variant.
    pub fn map<Q, B>(
        self,
        on_post: impl FnOnce(P) -> Q,
        on_ad: impl FnOnce(A) -> B,
    ) -> DisplayItem<Q, B> {
        match self {
            Self::Post { item } => DisplayItem::Post { item: on_post(item) },
            Self::Ad { advertiser } => DisplayItem::Ad {
                advertiser: on_ad(advertiser),
            },
        }
    }
}
