//! Nearest-color candidate selection for a single cell
//!
//! A candidate is eligible when it is free (or reuse is allowed) and belongs to
//! the target's color class. The class restriction is waived when the class has
//! no eligible member, so the grid never becomes unfillable while free
//! candidates remain anywhere in the pool. Among eligible candidates the one
//! with the smallest Euclidean distance to the target wins; ties go to the
//! earliest candidate in cache order.

use crate::cache::{CandidateTile, TileCache};
use crate::color::statistics::color_distance;
use crate::color::{Color, ColorClassId};

/// The candidate chosen for a cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    /// Position of the candidate in the cache
    pub index: usize,
    /// Distance between the candidate's mean color and the target
    pub distance: f64,
    /// Whether the candidate came from outside the target's class
    pub class_waived: bool,
}

/// Result of matching one cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MatchOutcome {
    /// A candidate tile was selected
    Tile(Selection),
    /// Nothing was eligible; the cell gets a black placeholder
    Placeholder,
}

impl MatchOutcome {
    /// Cache index of the selected candidate, if any
    pub const fn candidate_index(&self) -> Option<usize> {
        match self {
            Self::Tile(selection) => Some(selection.index),
            Self::Placeholder => None,
        }
    }

    /// Test if the cell fell back to a placeholder
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

/// Check the reuse rule and, unless waived, the class rule for one candidate
pub fn is_eligible(
    candidate: &CandidateTile,
    target_class: Option<ColorClassId>,
    allow_reuse: bool,
) -> bool {
    let available = allow_reuse || !candidate.is_used();
    let in_class = target_class.is_none_or(|class| candidate.class_id() == class);
    available && in_class
}

/// Closest eligible candidate, restricted to `class` when given
pub fn closest_eligible(
    candidates: &[CandidateTile],
    target: Color,
    class: Option<ColorClassId>,
    allow_reuse: bool,
) -> Option<(usize, f64)> {
    candidates
        .iter()
        .enumerate()
        .filter(|(_, candidate)| is_eligible(candidate, class, allow_reuse))
        .map(|(index, candidate)| (index, color_distance(candidate.mean_color(), target)))
        .fold(None, |best, (index, distance)| match best {
            Some((_, best_distance)) if best_distance <= distance => best,
            _ => Some((index, distance)),
        })
}

/// Find the best candidate for a target without touching any `used` flag
pub fn find_best_candidate(
    cache: &TileCache,
    target: Color,
    target_class: ColorClassId,
    allow_reuse: bool,
) -> Option<Selection> {
    if cache.is_class_occupied(target_class) {
        if let Some((index, distance)) =
            closest_eligible(cache.candidates(), target, Some(target_class), allow_reuse)
        {
            return Some(Selection {
                index,
                distance,
                class_waived: false,
            });
        }
        log::trace!("{target_class} exhausted, searching every class");
    }

    closest_eligible(cache.candidates(), target, None, allow_reuse).map(|(index, distance)| {
        Selection {
            index,
            distance,
            class_waived: true,
        }
    })
}

/// Select a candidate for a target color and claim it when reuse is off
///
/// With `allow_reuse` set, `used` flags are neither read nor written.
pub fn match_tile(
    cache: &mut TileCache,
    target: Color,
    target_class: ColorClassId,
    allow_reuse: bool,
) -> MatchOutcome {
    let Some(selection) = find_best_candidate(cache, target, target_class, allow_reuse) else {
        return MatchOutcome::Placeholder;
    };

    if !allow_reuse {
        if let Some(candidate) = cache.candidates_mut().get_mut(selection.index) {
            candidate.mark_used();
        }
    }
    MatchOutcome::Tile(selection)
}
