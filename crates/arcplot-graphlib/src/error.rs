#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("adjacency matrix must be square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("adjacency matrix has {rows} rows but {labels} node labels were supplied")]
    LabelCount { rows: usize, labels: usize },
    #[error("duplicate node label: {label}")]
    DuplicateLabel { label: String },
    #[error("adjacency entry ({row}, {col}) is not a finite number")]
    NonFiniteEntry { row: usize, col: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
