//! Graph configuration options.

#[derive(Debug, Clone, Copy)]
pub struct GraphOptions {
    pub directed: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self { directed: true }
    }
}

impl GraphOptions {
    pub fn directed() -> Self {
        Self { directed: true }
    }

    pub fn undirected() -> Self {
        Self { directed: false }
    }
}
