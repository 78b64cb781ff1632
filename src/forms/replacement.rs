use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
/// Body of a guide's replacement request.
pub struct ReplacementRequestForm {
    pub tour_id: i32,
}
