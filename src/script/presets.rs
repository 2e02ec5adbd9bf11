use crate::animator::options::AnimationOptions;
use crate::animator::stage::Stage;
use crate::foundation::core::Secs;

/// Fade nodes in one after another, then draw the arrows between them the same way.
///
/// Nodes fade over 0.5s staggered by 0.2s; arrows draw over 1s staggered by 0.3s.
pub fn sequential_reveal<'s, S: Stage>(
    stage: &'s mut S,
    nodes: &str,
    arrows: &str,
    node_delay: Secs,
    arrow_delay: Secs,
) -> &'s mut S {
    stage
        .fade_in(
            nodes,
            AnimationOptions::new()
                .duration(0.5)
                .stagger(0.2)
                .delay(node_delay),
        )
        .draw_path(
            arrows,
            AnimationOptions::new()
                .duration(1.0)
                .stagger(0.3)
                .delay(arrow_delay),
        )
}

/// Pulse the elements along a flow, 0.8s unless `opts` says otherwise.
pub fn highlight_flow<'s, S: Stage>(
    stage: &'s mut S,
    flow: &str,
    opts: AnimationOptions,
) -> &'s mut S {
    let opts = AnimationOptions {
        duration: opts.duration.or(Some(0.8)),
        ..opts
    };
    stage.pulse(flow, opts)
}

#[cfg(test)]
#[path = "../../tests/unit/script/presets.rs"]
mod tests;
