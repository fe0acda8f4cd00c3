//! Availability periods
//!
//! A worker owns zero or more periods during which they can take work.
//! Periods may overlap each other; nothing merges them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dates::DateRange;
use super::id::{PeriodId, WorkerId};

/// A date range during which a worker is available
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityPeriod {
    pub id: PeriodId,

    pub worker_id: WorkerId,

    #[serde(flatten)]
    pub dates: DateRange,

    pub created_at: DateTime<Utc>,
}

impl AvailabilityPeriod {
    pub fn new(id: PeriodId, worker_id: WorkerId, dates: DateRange) -> Self {
        Self {
            id,
            worker_id,
            dates,
            created_at: Utc::now(),
        }
    }

    /// True if this period fully covers the given range
    pub fn covers(&self, range: &DateRange) -> bool {
        self.dates.contains(range)
    }
}
