use action_locator::ElementLocator;
use action_primitives::GestureActuator;
use tool_scroll::ViewportReconciler;
use tracing::{debug, info, instrument, warn};

use crate::errors::ClickError;
use crate::model::{ClickAttemptState, ClickParams, ClickReport, ExecCtx};
use crate::policy::ClickPolicy;
use crate::precheck;

pub struct RuntimeDeps<'a> {
    pub locator: &'a dyn ElementLocator,
    pub reconciler: &'a dyn ViewportReconciler,
    pub actuator: &'a dyn GestureActuator,
    pub policy: &'a ClickPolicy,
}

#[instrument(skip_all, fields(action = %ctx.action_id, descriptor = %params.descriptor))]
pub async fn execute(ctx: &ExecCtx, params: ClickParams, deps: RuntimeDeps<'_>) -> ClickReport {
    let mut report = ClickReport::new(ctx.action_id.clone());

    if !deps.policy.enabled {
        return report.fail(&ClickError::Disabled);
    }
    if params.descriptor.is_blank() {
        return report.fail(&ClickError::InvalidTarget("empty identifier".into()));
    }

    info!("click started");
    let preparation = match precheck::prepare(deps.locator, deps.reconciler, &params).await {
        Ok(preparation) => preparation,
        Err(err) => {
            warn!(error = %err, "click aborted before tapping");
            return report.fail(&err);
        }
    };
    report.path = Some(preparation.path);
    report.reveal = preparation.reveal;

    let mut state = ClickAttemptState::new(params.descriptor.clone());
    let max_attempts = deps.policy.max_retry_attempts.max(1);
    while !state.exhausted(max_attempts) {
        let attempt = state.begin_attempt();
        report.attempts = attempt;

        match deps.locator.locate(&state.target).await {
            Ok(snapshot) => {
                let at = snapshot.center();
                report.taps += 1;
                report.tapped_at = Some(at);
                match deps.actuator.tap(at).await {
                    Ok(ack) => {
                        info!(attempt, %at, "click completed");
                        return report.succeed(format!("click completed at {at}: {}", ack.detail));
                    }
                    Err(err) => {
                        warn!(attempt, %at, error = %err, "tap failed");
                        state.record_failure(err.to_string());
                    }
                }
            }
            Err(err) => {
                warn!(attempt, error = %err, "re-resolve failed");
                state.record_failure(err.to_string());
            }
        }

        if !state.exhausted(max_attempts) {
            debug!(attempt, delay_ms = deps.policy.retry_delay_ms, "retrying click");
            tokio::time::sleep(deps.policy.retry_delay()).await;
        }
    }

    let err = ClickError::RetriesExhausted {
        attempts: state.attempt_count,
        last_failure: state.last_failure.unwrap_or_else(|| "unknown failure".into()),
    };
    warn!(error = %err, "click failed");
    report.fail(&err)
}
