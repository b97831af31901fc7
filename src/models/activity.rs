use crate::models::frame::RowOrigin;
use crate::models::utilized::Utilized;
use chrono::NaiveDate;

/// One activity row restricted to the essential attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    pub origin: RowOrigin,
    pub id: String,
    pub location: String,
    pub brand: String,
    pub department: String,
    pub kind: String,
    pub person: String,
    pub date: Option<NaiveDate>,
    pub logged_hours: f64,
}

/// Activity row with the derived columns attached.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRecord {
    pub record: ActivityRecord,
    pub week_of_year: Option<u32>,
    pub utilized: Utilized,
    pub tmp_layoff: bool,
}

impl DerivedRecord {
    /// `tmpLayoff` as it appears in tabular output: "1" or empty.
    pub fn tmp_layoff_marker(&self) -> &'static str {
        if self.tmp_layoff { "1" } else { "" }
    }
}
