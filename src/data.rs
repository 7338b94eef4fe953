//! Built-in artwork catalog. The host normally resolves artwork records from
//! a backend; this fixture set stands in for it and doubles as demo content.

use crate::config::CanvasTuning;
use crate::model::Artwork;
use crate::quizgen;

const ARTWORKS_JSON: &str = include_str!("../data/artworks.json");

/// Parse the embedded catalog. A malformed fixture yields an empty catalog
/// (the UI shows its empty state) instead of a panic.
pub fn builtin_artworks() -> Vec<Artwork> {
    serde_json::from_str(ARTWORKS_JSON).unwrap_or_default()
}

pub fn artwork_by_id(id: &str) -> Option<Artwork> {
    builtin_artworks().into_iter().find(|a| a.id == id)
}

/// Fill in a generated quiz for catalog entries that only author learning
/// points. Entries with hand-written questions are left untouched.
pub fn ensure_quiz(
    mut artwork: Artwork,
    tuning: &CanvasTuning,
    rng: &mut dyn FnMut() -> f64,
) -> Artwork {
    if artwork.quiz_questions.is_empty() && !artwork.learning_points.is_empty() {
        artwork.quiz_questions =
            quizgen::build_quiz_questions(&artwork.learning_points, tuning, rng);
    }
    artwork
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_rng() -> impl FnMut() -> f64 {
        let mut state: u64 = 42;
        move || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (state >> 11) as f64 / (1u64 << 53) as f64
        }
    }

    #[test]
    fn catalog_parses_and_ids_are_unique() {
        let artworks = builtin_artworks();
        assert!(artworks.len() >= 4);
        let mut ids: Vec<&str> = artworks.iter().map(|a| a.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), artworks.len());
    }

    #[test]
    fn authored_questions_have_exactly_one_correct_option() {
        for artwork in builtin_artworks() {
            for q in &artwork.quiz_questions {
                assert_eq!(
                    q.options.iter().filter(|o| o.is_correct).count(),
                    1,
                    "artwork {} question {}",
                    artwork.id,
                    q.id
                );
                assert!(artwork.hotspot(&q.learning_point_id).is_some());
            }
        }
    }

    #[test]
    fn ensure_quiz_fills_empty_catalogs_only() {
        let mut rng = seeded_rng();
        let tuning = CanvasTuning::default();

        let night_watch = artwork_by_id("night-watch").unwrap();
        assert!(night_watch.quiz_questions.is_empty());
        let filled = ensure_quiz(night_watch, &tuning, &mut rng);
        assert_eq!(filled.quiz_questions.len(), filled.learning_points.len());

        let pearl = artwork_by_id("girl-pearl-earring").unwrap();
        let authored = pearl.quiz_questions.clone();
        let unchanged = ensure_quiz(pearl, &tuning, &mut rng);
        assert_eq!(unchanged.quiz_questions, authored);
    }
}
