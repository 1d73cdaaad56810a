use html::NodeId;
use style_engine::StyleError;
use thiserror::Error;

/// Why a reflow produced nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("unusable style on node {node:?}")]
    Style {
        node: NodeId,
        #[source]
        source: StyleError,
    },
    #[error("node {0:?} is not part of the document")]
    MissingNode(NodeId),
}
