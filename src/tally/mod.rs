use std::fmt::Display;

use serde::Serialize;

#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq)]
pub enum Phase {
    Accumulating,
    Settling,
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            Self::Accumulating => "Accumulating",
            Self::Settling => "Settling",
        };
        write!(f, "{}", str)
    }
}

/// Running pip total carried from one frame to the next.
///
/// While accumulating, the frame sum is added to the total. While settling,
/// the frame sum is taken off the previous total; anything left over means
/// the scene changed and counting starts again. `previous_total` is always
/// overwritten with `current_total` at the end of a frame, so the settling
/// comparison is against the displayed total rather than the previous frame
/// sum.
#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq)]
pub struct TallyState {
    pub current_total: i64,
    pub previous_total: i64,
    pub accumulating: bool,
}

impl TallyState {
    pub const INITIAL: Self = TallyState {
        current_total: 0,
        previous_total: 0,
        accumulating: true,
    };

    pub fn phase(&self) -> Phase {
        if self.accumulating {
            Phase::Accumulating
        } else {
            Phase::Settling
        }
    }

    /// The value shown to the user.
    pub fn total(&self) -> i64 {
        self.current_total
    }
}

impl Default for TallyState {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// One frame's transition.
pub fn advance(state: TallyState, frame_sum: i64) -> TallyState {
    let mut next = state;

    if next.accumulating {
        next.current_total += frame_sum;
        next.accumulating = false;
    } else {
        next.previous_total -= frame_sum;
        if next.previous_total != 0 {
            next.current_total = 0;
            next.accumulating = true;
        }
    }
    next.previous_total = next.current_total;

    if next.phase() != state.phase() {
        log::debug!("Tally: {} -> {}", state.phase(), next.phase());
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn displayed(sums: &[i64]) -> Vec<i64> {
        let mut state = TallyState::INITIAL;
        sums.iter()
            .map(|&sum| {
                state = advance(state, sum);
                state.total()
            })
            .collect()
    }

    #[test]
    fn starts_accumulating_from_zero() {
        let state = TallyState::default();
        assert_eq!(state, TallyState::INITIAL);
        assert_eq!(state.phase(), Phase::Accumulating);
        assert_eq!(state.total(), 0);
    }

    #[test]
    fn stable_then_empty_scene() {
        let s0 = TallyState::INITIAL;

        let s1 = advance(s0, 5);
        assert_eq!(
            s1,
            TallyState {
                current_total: 5,
                previous_total: 5,
                accumulating: false
            }
        );

        let s2 = advance(s1, 5);
        assert_eq!(
            s2,
            TallyState {
                current_total: 5,
                previous_total: 5,
                accumulating: false
            }
        );

        let s3 = advance(s2, 0);
        assert_eq!(
            s3,
            TallyState {
                current_total: 0,
                previous_total: 0,
                accumulating: true
            }
        );

        assert_eq!(displayed(&[5, 5, 0]), vec![5, 5, 0]);
    }

    #[test]
    fn changed_sum_restarts_the_count() {
        // 3 then 4: 3 - 4 leaves -1, so the total is cleared
        assert_eq!(displayed(&[3, 4, 4, 4]), vec![3, 0, 4, 4]);
    }

    #[test]
    fn empty_scene_stays_settled_at_zero() {
        let mut state = TallyState::INITIAL;
        for _ in 0..4 {
            state = advance(state, 0);
            assert_eq!(state.total(), 0);
        }
        assert_eq!(state.phase(), Phase::Settling);
    }

    #[test]
    fn alternates_when_the_scene_keeps_changing() {
        assert_eq!(displayed(&[2, 6, 2, 6]), vec![2, 0, 2, 0]);
    }

    #[test]
    fn phase_names() {
        assert_eq!(Phase::Accumulating.to_string(), "Accumulating");
        assert_eq!(Phase::Settling.to_string(), "Settling");
    }
}
