//! Review data model and its moderation state machine.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Allergen, RestaurantId, UserName};

/// Stable review identifier, assigned by the server at submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewId(Uuid);

impl ReviewId {
    /// Generate a new random [`ReviewId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID, e.g. one read back from storage.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Moderation state of a review.
///
/// `Pending` is the only initial state; `Approved` and `Rejected` are
/// terminal. Transitions out of a terminal state are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    /// Submitted, awaiting an administrator decision.
    Pending,
    /// Accepted; counts towards the restaurant's ratings.
    Approved,
    /// Declined; never counts towards ratings.
    Rejected,
}

impl ReviewStatus {
    /// Whether a review in this state may still be moderated.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        };
        f.write_str(label)
    }
}

/// An administrator's decision on a pending review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationVerdict {
    /// Accept the review; it starts counting towards ratings.
    Approve,
    /// Decline the review.
    Reject,
}

impl ModerationVerdict {
    /// The terminal status this verdict moves a pending review into.
    pub fn status(self) -> ReviewStatus {
        match self {
            Self::Approve => ReviewStatus::Approved,
            Self::Reject => ReviewStatus::Rejected,
        }
    }
}

impl From<bool> for ModerationVerdict {
    fn from(approve: bool) -> Self {
        if approve { Self::Approve } else { Self::Reject }
    }
}

/// Attributes a user supplies when submitting a review.
///
/// Any subset of the three allergen ratings may be present; none is range
/// checked. The status is never client-supplied — submission forces
/// [`ReviewStatus::Pending`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    /// Name of the submitting user; must match the path user.
    pub author: UserName,
    /// Restaurant the review targets.
    pub restaurant_id: RestaurantId,
    /// Optional free-text commentary.
    pub comment: Option<String>,
    /// Optional peanut rating.
    pub rating_peanut: Option<i32>,
    /// Optional egg rating.
    pub rating_egg: Option<i32>,
    /// Optional dairy rating.
    pub rating_dairy: Option<i32>,
}

/// A submitted review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Server-assigned identifier.
    pub id: ReviewId,
    /// Name of the submitting user.
    pub author: UserName,
    /// Restaurant the review targets (wire name `restaurantID`).
    #[serde(rename = "restaurantID")]
    pub restaurant_id: RestaurantId,
    /// Optional free-text commentary.
    pub comment: Option<String>,
    /// Optional peanut rating.
    pub rating_peanut: Option<i32>,
    /// Optional egg rating.
    pub rating_egg: Option<i32>,
    /// Optional dairy rating (wire name `ratingDiary`).
    #[serde(rename = "ratingDiary")]
    pub rating_dairy: Option<i32>,
    /// Moderation state.
    pub status: ReviewStatus,
}

impl Review {
    /// Build a freshly submitted review in the pending state.
    pub fn submit(new: NewReview) -> Self {
        Self {
            id: ReviewId::random(),
            author: new.author,
            restaurant_id: new.restaurant_id,
            comment: new.comment,
            rating_peanut: new.rating_peanut,
            rating_egg: new.rating_egg,
            rating_dairy: new.rating_dairy,
            status: ReviewStatus::Pending,
        }
    }

    /// The rating this review gave for one allergen dimension, if any.
    pub fn rating_for(&self, allergen: Allergen) -> Option<i32> {
        match allergen {
            Allergen::Peanut => self.rating_peanut,
            Allergen::Egg => self.rating_egg,
            Allergen::Dairy => self.rating_dairy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_review() -> NewReview {
        NewReview {
            author: UserName::new("ada").expect("valid name"),
            restaurant_id: RestaurantId::random(),
            comment: Some("quiet kitchen, clear labelling".to_owned()),
            rating_peanut: Some(4),
            rating_egg: None,
            rating_dairy: Some(2),
        }
    }

    #[test]
    fn submit_forces_pending_status() {
        let review = Review::submit(new_review());
        assert_eq!(review.status, ReviewStatus::Pending);
    }

    #[test]
    fn serialises_historical_wire_names() {
        let review = Review::submit(new_review());
        let value = serde_json::to_value(&review).expect("serialise review");
        assert!(value.get("restaurantID").is_some());
        assert_eq!(value.get("ratingDiary").and_then(|v| v.as_i64()), Some(2));
        assert_eq!(
            value.get("status").and_then(|v| v.as_str()),
            Some("PENDING")
        );
    }

    #[test]
    fn verdict_maps_to_terminal_status() {
        assert_eq!(ModerationVerdict::Approve.status(), ReviewStatus::Approved);
        assert_eq!(ModerationVerdict::Reject.status(), ReviewStatus::Rejected);
        assert_eq!(ModerationVerdict::from(true), ModerationVerdict::Approve);
        assert_eq!(ModerationVerdict::from(false), ModerationVerdict::Reject);
    }

    #[test]
    fn only_pending_reviews_are_moderatable() {
        assert!(ReviewStatus::Pending.is_pending());
        assert!(!ReviewStatus::Approved.is_pending());
        assert!(!ReviewStatus::Rejected.is_pending());
    }
}
