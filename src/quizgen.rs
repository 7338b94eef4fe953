//! Dynamic quiz generation: builds questions with crop options from an
//! artwork's learning points, picking "near-miss" distractors and shuffling
//! option order.
//!
//! The RNG is passed in as a closure returning [0, 1) so the whole module is
//! deterministic under test; production call sites hand in
//! `js_sys::Math::random`.

use crate::config::CanvasTuning;
use crate::geometry::{euclidean_distance, Circle, Point, Rect};
use crate::model::{CropSpec, Hotspot, OptionSource, QuizOption, QuizQuestion};

/// Pick up to 3 distractor focal points for a question. Sibling learning
/// points are used first; remaining slots are filled with random points in
/// the 10-90% band, rejecting candidates within `min_distance`
/// percentage-points of the correct point or an already accepted one. A
/// randomized escape valve accepts a rejected candidate ~10% of the time so
/// the loop terminates even when the rejection condition cannot be met.
pub fn generate_distractors(
    correct: Point,
    siblings: &[Point],
    min_distance: f64,
    rng: &mut dyn FnMut() -> f64,
) -> Vec<Point> {
    let mut distractors: Vec<Point> = siblings.iter().copied().take(3).collect();

    while distractors.len() < 3 {
        let candidate = Point {
            x: (rng() * 80.0).floor() + 10.0,
            y: (rng() * 80.0).floor() + 10.0,
        };
        let too_close = distractors
            .iter()
            .chain(std::iter::once(&correct))
            .any(|p| euclidean_distance(*p, candidate) < min_distance);
        if !too_close || rng() > 0.9 {
            distractors.push(candidate);
        }
    }
    distractors
}

/// In-place Fisher-Yates shuffle (uniform permutation).
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn FnMut() -> f64) {
    for i in (1..items.len()).rev() {
        let j = (rng() * (i as f64 + 1.0)).floor() as usize;
        items.swap(i, j);
    }
}

/// Build one quiz question per learning point: the correct option crops the
/// point itself, three distractors crop elsewhere, and the four options are
/// shuffled so the correct slot is unpredictable.
pub fn build_quiz_questions(
    points: &[Hotspot],
    tuning: &CanvasTuning,
    rng: &mut dyn FnMut() -> f64,
) -> Vec<QuizQuestion> {
    points
        .iter()
        .map(|point| {
            let center = point.click_area.center();
            let siblings: Vec<Point> = points
                .iter()
                .filter(|p| p.id != point.id)
                .map(|p| p.click_area.center())
                .collect();
            let distractors =
                generate_distractors(center, &siblings, tuning.distractor_min_distance, rng);

            let crop_at = |p: Point| {
                OptionSource::Crop(CropSpec {
                    x: p.x,
                    y: p.y,
                    zoom: tuning.default_crop_zoom,
                })
            };
            let mut options = vec![QuizOption {
                id: "a".into(),
                source: crop_at(center),
                filter: None,
                is_correct: true,
            }];
            for (slot, d) in ["b", "c", "d"].iter().zip(distractors) {
                options.push(QuizOption {
                    id: (*slot).into(),
                    source: crop_at(d),
                    filter: None,
                    is_correct: false,
                });
            }
            shuffle(&mut options, rng);

            QuizQuestion {
                id: point.id.clone(),
                learning_point_id: point.id.clone(),
                question_text: format!("Which is the correct {}?", point.label.to_lowercase()),
                white_circle: Circle {
                    x: center.x,
                    y: center.y,
                    radius: point.click_area.radius,
                },
                overlay_position: Rect {
                    x: center.x - 4.0,
                    y: center.y - 4.0,
                    width: 8.0,
                    height: 8.0,
                },
                options,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Tooltip, TooltipPosition};

    /// Small deterministic LCG mapped to [0, 1).
    fn lcg(seed: u64) -> impl FnMut() -> f64 {
        let mut state = seed.max(1);
        move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 11) as f64 / (1u64 << 53) as f64
        }
    }

    fn hotspot(id: &str, x: f64, y: f64) -> Hotspot {
        Hotspot {
            id: id.to_string(),
            label: id.to_string(),
            click_area: Circle { x, y, radius: 5.0 },
            highlight_circle: Circle { x, y, radius: 5.0 },
            tooltip: Tooltip {
                text: format!("about {id}"),
                position: TooltipPosition::Bottom,
            },
        }
    }

    #[test]
    fn siblings_are_used_first() {
        let mut rng = lcg(7);
        let correct = Point { x: 50.0, y: 50.0 };
        let siblings = [
            Point { x: 10.0, y: 10.0 },
            Point { x: 90.0, y: 10.0 },
            Point { x: 10.0, y: 90.0 },
            Point { x: 90.0, y: 90.0 },
        ];
        let out = generate_distractors(correct, &siblings, 15.0, &mut rng);
        assert_eq!(out, siblings[..3].to_vec());
    }

    #[test]
    fn lone_point_still_yields_three_distractors() {
        // No siblings at all: every slot comes from rejection sampling.
        for seed in 1..40 {
            let mut rng = lcg(seed);
            let correct = Point { x: 50.0, y: 50.0 };
            let out = generate_distractors(correct, &[], 15.0, &mut rng);
            assert_eq!(out.len(), 3);
            for p in &out {
                assert!(p.x >= 10.0 && p.x <= 90.0);
                assert!(p.y >= 10.0 && p.y <= 90.0);
            }
        }
    }

    #[test]
    fn impossible_rejection_terminates_via_escape_valve() {
        // A threshold larger than the whole canvas makes every candidate
        // "too close"; only the escape valve can finish the loop.
        let mut rng = lcg(3);
        let correct = Point { x: 50.0, y: 50.0 };
        let out = generate_distractors(correct, &[], 1_000.0, &mut rng);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn shuffle_is_roughly_uniform_over_slots() {
        let mut rng = lcg(99);
        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            let mut items = [0, 1, 2, 3];
            shuffle(&mut items, &mut rng);
            let correct_slot = items.iter().position(|&v| v == 0).unwrap();
            counts[correct_slot] += 1;
        }
        // Each slot should hold the "correct" item near 25% of the time.
        for c in counts {
            assert!(c > 800 && c < 1200, "skewed slot distribution: {counts:?}");
        }
    }

    #[test]
    fn built_questions_have_one_correct_of_four() {
        let mut rng = lcg(11);
        let points = [hotspot("cap", 30.0, 40.0), hotspot("dog", 70.0, 60.0)];
        let questions = build_quiz_questions(&points, &CanvasTuning::default(), &mut rng);
        assert_eq!(questions.len(), 2);
        for q in &questions {
            assert_eq!(q.options.len(), 4);
            assert_eq!(q.options.iter().filter(|o| o.is_correct).count(), 1);
            let correct = q.options.iter().find(|o| o.is_correct).unwrap();
            let OptionSource::Crop(spec) = &correct.source else {
                panic!("generated options are always crops");
            };
            let point = points.iter().find(|p| p.id == q.learning_point_id).unwrap();
            assert_eq!(spec.x, point.click_area.x);
            assert_eq!(spec.y, point.click_area.y);
        }
    }
}
