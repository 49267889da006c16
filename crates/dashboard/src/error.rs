use crate::graph::Node;
use thiserror::Error;
use tokio::task::JoinError;

/// Failure of a single panel. The other panels of the same update are
/// unaffected and still published.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    #[error("{node} panel panicked: {message}")]
    Panicked { node: Node, message: String },

    #[error("{node} panel task was cancelled")]
    Cancelled { node: Node },
}

impl PanelError {
    pub(crate) fn from_join(node: Node, err: JoinError) -> Self {
        if !err.is_panic() {
            return PanelError::Cancelled { node };
        }
        let payload = err.into_panic();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        PanelError::Panicked { node, message }
    }

    pub fn node(&self) -> Node {
        match self {
            PanelError::Panicked { node, .. } | PanelError::Cancelled { node } => *node,
        }
    }
}
