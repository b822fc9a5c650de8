//! Build graphs from dense adjacency matrices.
//!
//! Row `i`, column `j` holds the weight of the edge `i -> j`; zero means "no edge". Node ids
//! are the row indices (`"0"`, `"1"`, ...) unless labels are supplied. Edges are inserted
//! row-major, so the graph's native edge order is `(0,0), (0,1), ..., (1,0), ...` restricted
//! to the non-zero entries.

use crate::attrs::number;
use crate::error::{Error, Result};
use crate::{AttrGraph, Attrs, Graph, GraphOptions};
use std::collections::HashSet;

impl Graph<Attrs> {
    /// Builds a graph whose node ids are the row indices.
    ///
    /// For undirected graphs only the upper triangle (diagonal included) is read, matching how
    /// a symmetric matrix describes each edge twice.
    pub fn from_adjacency_matrix<R>(matrix: &[R], options: GraphOptions) -> Result<AttrGraph>
    where
        R: AsRef<[f64]>,
    {
        let labels: Vec<String> = (0..matrix.len()).map(|i| i.to_string()).collect();
        Self::from_labeled_adjacency_matrix(&labels, matrix, options)
    }

    /// Builds a graph whose node ids are taken from `labels` (one per row, in row order).
    pub fn from_labeled_adjacency_matrix<L, R>(
        labels: &[L],
        matrix: &[R],
        options: GraphOptions,
    ) -> Result<AttrGraph>
    where
        L: AsRef<str>,
        R: AsRef<[f64]>,
    {
        let n = matrix.len();
        if labels.len() != n {
            return Err(Error::LabelCount {
                rows: n,
                labels: labels.len(),
            });
        }
        let mut seen: HashSet<&str> = HashSet::with_capacity(n);
        for label in labels {
            if !seen.insert(label.as_ref()) {
                return Err(Error::DuplicateLabel {
                    label: label.as_ref().to_string(),
                });
            }
        }
        for (row, entries) in matrix.iter().enumerate() {
            let len = entries.as_ref().len();
            if len != n {
                return Err(Error::NotSquare {
                    row,
                    len,
                    expected: n,
                });
            }
        }

        let mut g: AttrGraph = Graph::new(options);
        for label in labels {
            g.ensure_node(label.as_ref());
        }

        for (i, entries) in matrix.iter().enumerate() {
            let start = if options.directed { 0 } else { i };
            for (j, &value) in entries.as_ref().iter().enumerate().skip(start) {
                if !value.is_finite() {
                    return Err(Error::NonFiniteEntry { row: i, col: j });
                }
                if value == 0.0 {
                    continue;
                }
                let mut attrs = Attrs::new();
                attrs.insert("weight".to_string(), number(value));
                g.set_edge_with_label(labels[i].as_ref(), labels[j].as_ref(), attrs);
            }
        }

        Ok(g)
    }
}
