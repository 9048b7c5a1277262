/// A statement fragment plus the parameters it binds, in emitted order.
/// The caller appends `query` to its statement text and binds `params`
/// positionally; params are never interpolated into the text.
#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<serde_json::Value>,
}

impl SqlResult {
    pub fn empty() -> Self {
        Self { query: String::new(), params: vec![] }
    }
}
