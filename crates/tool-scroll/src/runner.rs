use action_locator::{ElementLocator, LocatorError};
use action_primitives::{
    decode, GestureActuator, PageQuery, PageQueryChannel, SettleStrategy, SurfaceMetrics,
};
use autoweb_core_types::{ElementDescriptor, PageScrollSnapshot};
use tracing::{debug, info, instrument, warn};

use crate::errors::RevealError;
use crate::model::{RevealPath, RevealReport, RevealTarget};
use crate::planner::{
    is_near_viewport, plan_exploratory, plan_precise, plan_step, ExploreDirection, ScrollPlan,
};
use crate::policy::ScrollPolicy;

#[derive(Clone, Copy)]
pub(crate) struct RuntimeDeps<'a> {
    pub locator: &'a dyn ElementLocator,
    pub channel: &'a dyn PageQueryChannel,
    pub actuator: &'a dyn GestureActuator,
    pub surface: &'a dyn SurfaceMetrics,
    pub settle: &'a dyn SettleStrategy,
    pub policy: &'a ScrollPolicy,
}

#[instrument(skip_all)]
pub(crate) async fn ensure_visible(
    deps: RuntimeDeps<'_>,
    target: RevealTarget,
) -> Result<RevealReport, RevealError> {
    let snapshot = match target {
        RevealTarget::Snapshot(snapshot) => snapshot,
        RevealTarget::Descriptor(descriptor) => match deps.locator.locate(&descriptor).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                debug!(descriptor = %descriptor, error = %err, "target not located; searching");
                return search(deps, &descriptor).await;
            }
        },
    };

    if snapshot.is_visible {
        debug!(identifier = %snapshot.identifier, "already visible");
        return Ok(RevealReport::new(
            RevealPath::AlreadyVisible,
            0,
            "element already visible",
        ));
    }

    let viewport = deps.surface.viewport();
    if !is_near_viewport(snapshot.center(), &viewport, deps.policy) {
        debug!(
            identifier = %snapshot.identifier,
            x = snapshot.x,
            y = snapshot.y,
            "target far from viewport; stepped search"
        );
        return search(deps, &snapshot.descriptor()).await;
    }

    let Some(plan) = plan_precise(snapshot.center(), &viewport, deps.policy) else {
        debug!(identifier = %snapshot.identifier, "inside dead zone");
        return Ok(RevealReport::new(RevealPath::NoScroll, 0, "no scroll needed"));
    };

    debug!(axis = ?plan.axis, distance = plan.distance, "precise scroll");
    deps.actuator
        .swipe(&plan.swipe)
        .await
        .map_err(|err| RevealError::Gesture(err.to_string()))?;
    deps.settle.settle(deps.channel).await;

    Ok(RevealReport::new(
        RevealPath::Precise,
        1,
        format!("precise scroll of {}px", plan.distance),
    ))
}

/// Bounded stepped search. Each iteration re-locates the target, then issues
/// at most one swipe and waits for lazy content.
#[instrument(skip_all, fields(descriptor = %descriptor))]
pub(crate) async fn search(
    deps: RuntimeDeps<'_>,
    descriptor: &ElementDescriptor,
) -> Result<RevealReport, RevealError> {
    let baseline = capture_baseline(deps.channel).await;
    let max_steps = deps.policy.max_scroll_steps;
    let mut swipes = 0;
    let mut ever_located = false;
    let mut last_error = None;

    for step in 0..max_steps {
        let viewport = deps.surface.viewport();
        let plan: ScrollPlan = match deps.locator.locate(descriptor).await {
            Ok(snapshot) if snapshot.is_visible => {
                info!(step, swipes, "target visible");
                return Ok(RevealReport {
                    path: RevealPath::Stepped,
                    swipes,
                    steps: step,
                    baseline: Some(baseline),
                    detail: format!("element visible after {swipes} swipe(s)"),
                });
            }
            Ok(snapshot) => {
                ever_located = true;
                let plan = plan_step(snapshot.center(), &viewport, deps.policy);
                debug!(step, axis = ?plan.axis, distance = plan.distance, "step scroll");
                plan
            }
            Err(err) => {
                if let LocatorError::Query(reason) = &err {
                    last_error = Some(reason.clone());
                }
                let direction = ExploreDirection::for_step(step);
                debug!(step, ?direction, error = %err, "target not located; exploring");
                plan_exploratory(direction, &viewport, deps.policy)
            }
        };

        if let Err(err) = deps.actuator.swipe(&plan.swipe).await {
            warn!(step, error = %err, "scroll gesture failed");
        }
        swipes += 1;
        deps.settle.settle(deps.channel).await;
    }

    warn!(steps = max_steps, swipes, ever_located, "step limit reached");
    Err(if ever_located {
        RevealError::StepLimit { steps: max_steps }
    } else {
        RevealError::NeverFound {
            steps: max_steps,
            last_error,
        }
    })
}

async fn capture_baseline(channel: &dyn PageQueryChannel) -> PageScrollSnapshot {
    let sampled = match channel.evaluate(&PageQuery::ScrollInfo).await {
        Ok(raw) => decode::<PageScrollSnapshot>(&raw),
        Err(err) => Err(err),
    };
    match sampled {
        Ok(baseline) => {
            debug!(
                scroll_top = baseline.scroll_top,
                scroll_height = baseline.scroll_height,
                "scroll baseline"
            );
            baseline
        }
        Err(err) => {
            debug!(error = %err, "scroll baseline unavailable; using defaults");
            PageScrollSnapshot::default()
        }
    }
}
