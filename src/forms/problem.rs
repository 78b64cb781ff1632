use serde::Deserialize;
use validator::Validate;

use crate::domain::problem::NewTourProblem;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for reporting a problem on a purchased tour.
pub struct ReportProblemForm {
    pub tour_id: i32,
    #[validate(length(min = 3))]
    pub title: String,
    #[validate(length(min = 10))]
    pub description: String,
}

impl ReportProblemForm {
    #[must_use]
    pub fn into_new_problem(self, tourist_id: i32) -> NewTourProblem {
        NewTourProblem::new(self.tour_id, tourist_id, self.title, self.description)
    }
}
