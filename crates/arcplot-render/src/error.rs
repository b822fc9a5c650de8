use arcplot_graphlib::EdgeKey;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no position for node {node}")]
    MissingPosition { node: String },
    #[error("edge {edge} has no `{key}` attribute")]
    MissingWeight { edge: EdgeKey, key: String },
    #[error("edge {edge} has a non-numeric `{key}` attribute: {value}")]
    NonNumericWeight {
        edge: EdgeKey,
        key: String,
        value: serde_json::Value,
    },
    #[error(transparent)]
    Layout(#[from] arcplot_layout::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
