//! Widget rating lookup
//!
//! Maps the six widget identifiers (`r1`..`r6`) to their configured box numbers.
//! Unknown identifiers and unset or zero entries all resolve to `0`.

use serde::Serialize;

use crate::config::RatingsConfig;

/// Widget identifiers in table order
pub const WIDGET_IDS: [&str; 6] = ["r1", "r2", "r3", "r4", "r5", "r6"];

/// Immutable widget-id to box-number table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingTable {
    box_nums: [Option<i64>; 6],
}

impl RatingTable {
    pub const fn from_config(ratings: &RatingsConfig) -> Self {
        Self {
            box_nums: [
                ratings.widget_1,
                ratings.widget_2,
                ratings.widget_3,
                ratings.widget_4,
                ratings.widget_5,
                ratings.widget_6,
            ],
        }
    }

    /// Box number for `widget_id`, or `0` when unknown, unset, or zero
    pub fn lookup(&self, widget_id: &str) -> i64 {
        WIDGET_IDS
            .iter()
            .position(|id| *id == widget_id)
            .and_then(|idx| self.box_nums[idx])
            .unwrap_or(0)
    }
}

/// `{"ResponseData":{"Box_Num":n}}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingResponse {
    #[serde(rename = "ResponseData")]
    pub response_data: BoxNum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoxNum {
    #[serde(rename = "Box_Num")]
    pub box_num: i64,
}

impl RatingResponse {
    pub const fn new(box_num: i64) -> Self {
        Self {
            response_data: BoxNum { box_num },
        }
    }
}
