#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("graph contains an edge with a missing endpoint: {edge_id}")]
    MissingEndpoint { edge_id: String },
    #[error("edge {edge_id} has weight {weight}; distance-based layouts need positive weights")]
    NonPositiveWeight { edge_id: String, weight: f64 },
    #[error("invalid layout option `{option}`: {value}")]
    InvalidOption { option: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
