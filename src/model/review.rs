//! End-of-week review.

use crate::model::WeekNumber;
use crate::store::merge::reconcile_fields;
use serde::{Deserialize, Serialize};

/// Four free-text answers for one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReview {
    /// Week number; fixed at creation.
    pub week_number: WeekNumber,
    pub most_achieved: String,
    pub most_tiring: String,
    pub reduce_next_week: String,
    pub blessing_to_thank: String,
}

impl WeeklyReview {
    /// Empty review for `week`.
    #[must_use]
    pub fn new(week: WeekNumber) -> Self {
        Self {
            week_number: week,
            most_achieved: String::new(),
            most_tiring: String::new(),
            reduce_next_week: String::new(),
            blessing_to_thank: String::new(),
        }
    }

    /// Returns `true` once any answer has been written.
    #[must_use]
    pub fn is_started(&self) -> bool {
        [
            &self.most_achieved,
            &self.most_tiring,
            &self.reduce_next_week,
            &self.blessing_to_thank,
        ]
        .iter()
        .any(|text| !text.trim().is_empty())
    }
}

reconcile_fields!(WeeklyReview {
    most_achieved => "mostAchieved",
    most_tiring => "mostTiring",
    reduce_next_week => "reduceNextWeek",
    blessing_to_thank => "blessingToThank",
});
