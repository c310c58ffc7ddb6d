//! Topological ordering of draw targets by inter-target dependency.
//!
//! A draw target's output texture can be sampled by geometry rendered into
//! another draw target, so targets must be drawn in dependency order. The
//! dependency relation is inferred, not authored: target X is assumed to
//! depend on target Y when X's geometry collection contains Y's path. The
//! collection includes the geometry that *samples* Y's texture, and that
//! geometry usually lives next to Y in the namespace, so path containment is
//! a workable stand-in for true data dependency. A collection can in theory
//! include sampling geometry without including the sampled target itself;
//! that false negative is a known limit of the heuristic.

use std::collections::HashSet;
use std::sync::Arc;

use crate::scene::DrawTarget;

/// A draw target scheduled by the topological sort.
#[derive(Debug, Clone)]
pub(crate) struct DrawTargetEntry {
    /// Index in the draw target vector produced by namespace traversal.
    pub original_index: usize,
    /// The draw target.
    pub draw_target: Arc<DrawTarget>,
    /// Do other draw targets depend on this one?
    pub has_dependent_draw_targets: bool,
}

/// Whether `draw_target`'s rendered geometry may sample `other`'s output.
fn is_dependent_on(draw_target: &DrawTarget, other: &DrawTarget) -> bool {
    draw_target.path() != other.path()
        && draw_target.collection().contains_path(other.path())
}

/// Topologically sort draw targets.
///
/// Every input target appears in the result exactly once. Targets with no
/// dependencies come first in discovery order; each remaining target follows
/// all targets it depends on. Members of a dependency cycle cannot be
/// ordered and are appended at the end in discovery order, with their
/// dependent flags left unset.
pub(crate) fn sort_draw_targets(draw_targets: &[Arc<DrawTarget>]) -> Vec<DrawTargetEntry> {
    if draw_targets.is_empty() {
        return Vec::new();
    }

    let n = draw_targets.len();

    // Index of draw target to indices of draw targets it depends on.
    let mut dependencies: Vec<HashSet<usize>> = vec![HashSet::new(); n];
    // Index of draw target to indices of draw targets that depend on it.
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];

    for dependent in 0..n {
        for dependency in 0..n {
            if is_dependent_on(&draw_targets[dependent], &draw_targets[dependency]) {
                dependencies[dependent].insert(dependency);
                dependents[dependency].push(dependent);
            }
        }
    }

    // Start by scheduling draw targets that do not depend on any other.
    let mut result: Vec<DrawTargetEntry> = Vec::with_capacity(n);
    for index in 0..n {
        if dependencies[index].is_empty() {
            result.push(DrawTargetEntry {
                original_index: index,
                draw_target: draw_targets[index].clone(),
                has_dependent_draw_targets: false,
            });
        }
    }

    // Iterate through scheduled targets while scheduling new ones: once a
    // target is scheduled it stops counting as a dependency, which may make
    // its dependents schedulable.
    let mut i = 0;
    while i < result.len() {
        let dependency = result[i].original_index;
        for d in 0..dependents[dependency].len() {
            let dependent = dependents[dependency][d];
            dependencies[dependent].remove(&dependency);
            if dependencies[dependent].is_empty() {
                result.push(DrawTargetEntry {
                    original_index: dependent,
                    draw_target: draw_targets[dependent].clone(),
                    has_dependent_draw_targets: false,
                });
            }
        }
        result[i].has_dependent_draw_targets = !dependents[dependency].is_empty();
        i += 1;
    }

    // Infinite mirrors: members of a cycle never reached an empty dependency
    // set above. Schedule them now in the order they were given originally.
    if result.len() < n {
        for index in 0..n {
            if !dependencies[index].is_empty() {
                result.push(DrawTargetEntry {
                    original_index: index,
                    draw_target: draw_targets[index].clone(),
                    has_dependent_draw_targets: false,
                });
            }
        }
    }

    if result.len() != n {
        log::error!(
            "draw target sort scheduled {} of {} targets",
            result.len(),
            n
        );
    }

    result
}
