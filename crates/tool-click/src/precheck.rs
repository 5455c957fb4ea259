use action_locator::ElementLocator;
use tool_scroll::{RevealReport, RevealTarget, ViewportReconciler};
use tracing::{debug, warn};

use crate::errors::ClickError;
use crate::model::{ClickParams, ClickPath};

/// Result of bringing the target into a clickable state.
#[derive(Clone, Debug)]
pub(crate) struct Preparation {
    pub path: ClickPath,
    pub reveal: Option<RevealReport>,
}

impl Preparation {
    fn direct() -> Self {
        Self {
            path: ClickPath::Direct,
            reveal: None,
        }
    }
}

pub(crate) async fn prepare(
    locator: &dyn ElementLocator,
    reconciler: &dyn ViewportReconciler,
    params: &ClickParams,
) -> Result<Preparation, ClickError> {
    if let Some(hint) = params.hint.as_ref().filter(|hint| hint.is_visible) {
        debug!(identifier = %hint.identifier, "caller snapshot visible");
        return Ok(Preparation::direct());
    }

    match locator.locate(&params.descriptor).await {
        Ok(snapshot) if snapshot.is_visible => {
            debug!(identifier = %snapshot.identifier, "target visible");
            Ok(Preparation::direct())
        }
        Ok(snapshot) => {
            debug!(identifier = %snapshot.identifier, "target hidden; reconciling");
            match reconciler.ensure_visible(RevealTarget::Snapshot(snapshot)).await {
                Ok(report) => Ok(Preparation {
                    path: ClickPath::Reconciled,
                    reveal: Some(report),
                }),
                Err(err) if err.is_never_found() => Err(ClickError::TargetNotFound(err.to_string())),
                Err(err) => {
                    // The taps re-resolve, so a partial reveal may still land.
                    warn!(error = %err, "reconcile incomplete; clicking anyway");
                    Ok(Preparation {
                        path: ClickPath::Reconciled,
                        reveal: None,
                    })
                }
            }
        }
        Err(err) => {
            debug!(error = %err, "target not located; searching");
            match reconciler.search(&params.descriptor).await {
                Ok(report) => Ok(Preparation {
                    path: ClickPath::Searched,
                    reveal: Some(report),
                }),
                Err(err) => Err(ClickError::TargetNotFound(err.to_string())),
            }
        }
    }
}
