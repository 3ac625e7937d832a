use serde::Deserialize;

/// Body of `POST /contact`. Missing fields deserialize as empty so the
/// validator, not the JSON extractor, reports them.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: String,
}
