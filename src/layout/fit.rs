//! Auto-fit: pick the largest ladder size whose wrapped block fits the height budget.

use log::debug;
use std::iter;

use super::measure::TextMeasurer;
use super::types::{FitBudget, FitResult, LINE_HEIGHT_FACTOR, StyleSpec};
use super::wrap::wrap;

/// Candidate sizes in the order they are tried.
///
/// `initial, initial - step, ...` while above the floor, then the floor
/// itself, so `min_size_px` is tried even when the step overshoots it.
/// Sizes are produced lazily.
pub fn size_ladder(budget: &FitBudget) -> impl Iterator<Item = u32> + use<> {
    ladder_below(budget, u32::MAX)
}

/// The ladder with every rung above `cap` skipped, jumping straight to the
/// first rung at or below it. The floor is always kept.
fn ladder_below(budget: &FitBudget, cap: u32) -> impl Iterator<Item = u32> + use<> {
    let step = budget.step_px.max(1);
    let min = budget.min_size_px;
    let mut start = budget.initial_size_px;
    if start > cap {
        let rungs = (start - cap).div_ceil(step);
        start = start.saturating_sub(rungs.saturating_mul(step));
    }
    iter::successors(Some(start), move |&size| size.checked_sub(step))
        .take_while(move |&size| size > min)
        .chain(iter::once(min))
}

/// Largest size whose single line can still fit `max_height_px`, plus one
/// pixel of float slack.
fn tallest_possible(max_height_px: f64) -> u32 {
    ((max_height_px / LINE_HEIGHT_FACTOR).floor() as u32).saturating_add(1)
}

/// First-fit-descending search over [`size_ladder`].
///
/// The first size with `total_height_px <= max_height_px` wins, even if a
/// smaller one would pack tighter. Sizes whose single line is already taller
/// than the budget are never measured. When nothing fits, the text is
/// wrapped once more at `min_size_px` and returned as is; the block then
/// overflows the zone, which callers accept.
pub fn fit<M: TextMeasurer>(
    text: &str,
    budget: &FitBudget,
    measurer: &M,
    base_style: &StyleSpec,
) -> Result<FitResult, M::Error> {
    for size in ladder_below(budget, tallest_possible(budget.max_height_px)) {
        let style = base_style.with_size(size);
        let wrapped = wrap(text, budget.max_width_px, measurer, &style)?;
        debug!(
            "fit candidate {}px: {} line(s), {:.1}px of {:.1}px",
            size,
            wrapped.lines.len(),
            wrapped.total_height_px,
            budget.max_height_px
        );
        if wrapped.total_height_px <= budget.max_height_px {
            return Ok(FitResult::from_wrap(wrapped, size));
        }
    }

    let floor = budget.min_size_px;
    debug!("no candidate fits, forcing {}px", floor);
    let wrapped = wrap(
        text,
        budget.max_width_px,
        measurer,
        &base_style.with_size(floor),
    )?;
    Ok(FitResult::from_wrap(wrapped, floor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::measure::EstimateMeasurer;
    use crate::layout::types::line_height_px;
    use std::cell::RefCell;
    use std::convert::Infallible;

    fn mono() -> EstimateMeasurer {
        EstimateMeasurer::with_ratio(0.5)
    }

    fn base() -> StyleSpec {
        StyleSpec::new("mono", 100, false)
    }

    #[test]
    fn default_ladder() {
        let ladder: Vec<u32> = size_ladder(&FitBudget::default()).collect();
        assert_eq!(ladder.first(), Some(&100));
        assert_eq!(ladder.last(), Some(&20));
        assert_eq!(ladder.len(), 17);
        assert!(ladder.windows(2).all(|w| w[0] - w[1] == 5));
    }

    #[test]
    fn ladder_includes_floor_on_overshoot() {
        let budget = FitBudget {
            initial_size_px: 33,
            ..FitBudget::default()
        };
        assert_eq!(size_ladder(&budget).collect::<Vec<_>>(), vec![33, 28, 23, 20]);
    }

    #[test]
    fn ladder_below_floor_is_just_floor() {
        let budget = FitBudget {
            initial_size_px: 12,
            ..FitBudget::default()
        };
        assert_eq!(size_ladder(&budget).collect::<Vec<_>>(), vec![20]);
    }

    #[test]
    fn ladder_zero_step_terminates() {
        let budget = FitBudget {
            initial_size_px: 23,
            step_px: 0,
            ..FitBudget::default()
        };
        assert_eq!(size_ladder(&budget).collect::<Vec<_>>(), vec![23, 22, 21, 20]);
    }

    #[test]
    fn short_word_accepted_at_initial_size() {
        let out = fit("HELLO", &FitBudget::default(), &mono(), &base()).unwrap();
        assert_eq!(out.lines, vec!["HELLO"]);
        assert_eq!(out.size_px, 100);
        assert_eq!(out.line_height_px, 120.0);
    }

    #[test]
    fn picks_largest_fitting_size() {
        let budget = FitBudget::default();
        let text = "A".repeat(40);
        let out = fit(&text, &budget, &mono(), &base()).unwrap();
        assert_eq!(out.size_px, 80);
        assert_eq!(out.lines.len(), 2);
        for larger in [100, 95, 90, 85] {
            let w = wrap(&text, budget.max_width_px, &mono(), &base().with_size(larger)).unwrap();
            assert!(w.total_height_px > budget.max_height_px, "{larger}px should not fit");
        }
        // a smaller size also fits but is never preferred
        let smaller = wrap(&text, budget.max_width_px, &mono(), &base().with_size(75)).unwrap();
        assert!(smaller.total_height_px <= budget.max_height_px);
    }

    #[test]
    fn height_boundary_is_inclusive() {
        let budget = FitBudget {
            max_height_px: 2.0 * line_height_px(100),
            ..FitBudget::default()
        };
        let out = fit("LINE ONE\nLINE TWO", &budget, &mono(), &base()).unwrap();
        assert_eq!(out.size_px, 100);
        assert_eq!(out.total_height_px(), budget.max_height_px);
        assert!(!out.overflows(&budget));
    }

    #[test]
    fn falls_back_to_floor_and_overflows() {
        let budget = FitBudget::default();
        let text = "W".repeat(2000);
        let out = fit(&text, &budget, &mono(), &base()).unwrap();
        assert_eq!(out.size_px, 20);
        // 10px per char at 20px -> 80 chars per line
        assert_eq!(out.lines.len(), 25);
        assert!(out.lines.iter().all(|l| l.len() == 80));
        assert_eq!(out.total_height_px(), 25.0 * line_height_px(20));
        assert!(out.overflows(&budget));
    }

    #[test]
    fn too_many_paragraphs_fall_back() {
        let text = vec!["x"; 20].join("\n");
        let out = fit(&text, &FitBudget::default(), &mono(), &base()).unwrap();
        assert_eq!(out.size_px, 20);
        assert_eq!(out.lines.len(), 20);
    }

    #[test]
    fn deterministic() {
        let text = "Same input\nsame output, every time";
        let budget = FitBudget::starting_at(90);
        let a = fit(text, &budget, &mono(), &base()).unwrap();
        let b = fit(text, &budget, &mono(), &base()).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    struct Recording {
        sizes: RefCell<Vec<u32>>,
    }

    impl TextMeasurer for Recording {
        type Error = Infallible;

        fn measure_width(&self, text: &str, style: &StyleSpec) -> Result<f64, Infallible> {
            let mut sizes = self.sizes.borrow_mut();
            if sizes.last() != Some(&style.font_size_px) {
                sizes.push(style.font_size_px);
            }
            Ok(text.chars().count() as f64 * f64::from(style.font_size_px))
        }
    }

    #[test]
    fn stops_at_first_fit() {
        let m = Recording {
            sizes: RefCell::new(Vec::new()),
        };
        let out = fit("hi", &FitBudget::default(), &m, &base()).unwrap();
        assert_eq!(out.size_px, 100);
        assert_eq!(*m.sizes.borrow(), vec![100]);
    }

    #[test]
    fn forced_pass_runs_at_floor() {
        let m = Recording {
            sizes: RefCell::new(Vec::new()),
        };
        let budget = FitBudget {
            initial_size_px: 30,
            max_height_px: 1.0,
            ..FitBudget::default()
        };
        let out = fit("hi", &budget, &m, &base()).unwrap();
        assert_eq!(out.size_px, 20);
        // no line can be 1px tall, so only the floor is measured
        assert_eq!(*m.sizes.borrow(), vec![20]);
    }

    #[test]
    fn huge_initial_size_is_produced_lazily() {
        let budget = FitBudget::starting_at(u32::MAX);
        let head: Vec<u32> = size_ladder(&budget).take(3).collect();
        assert_eq!(head, vec![u32::MAX, u32::MAX - 5, u32::MAX - 10]);
    }

    #[test]
    fn ladder_below_cap_stays_on_rungs() {
        let budget = FitBudget::starting_at(1003);
        let sizes: Vec<u32> = ladder_below(&budget, 251).take(2).collect();
        assert_eq!(sizes, vec![248, 243]);
        let all: Vec<u32> = ladder_below(&budget, 5).collect();
        assert_eq!(all, vec![20]);
    }

    #[test]
    fn huge_initial_size_starts_at_tallest_fitting_rung() {
        let m = Recording {
            sizes: RefCell::new(Vec::new()),
        };
        let out = fit("hi", &FitBudget::starting_at(4_000_000_000), &m, &base()).unwrap();
        // 1.2 * 250 = 300, the full zone height
        assert_eq!(out.size_px, 250);
        assert_eq!(*m.sizes.borrow(), vec![250]);
    }
}
