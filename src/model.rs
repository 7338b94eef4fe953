//! Core data model for Masterstrokes: artwork content records plus the
//! per-level session state and its reducer actions.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

use crate::geometry::{euclidean_distance, Circle, Point, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TooltipPosition {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub text: String,
    pub position: TooltipPosition,
}

/// A discoverable learning point on the artwork. `click_area` and
/// `highlight_circle` share a center but carry independent radii.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub id: String,
    pub label: String,
    pub click_area: Circle,
    pub highlight_circle: Circle,
    pub tooltip: Tooltip,
}

impl Hotspot {
    /// Generous hit test: a percentage-space point counts as a hit within
    /// `click_area.radius * radius_multiplier` of the center.
    pub fn is_hit(&self, point: Point, radius_multiplier: f64) -> bool {
        euclidean_distance(point, self.click_area.center())
            <= self.click_area.radius * radius_multiplier
    }
}

/// Dynamic crop descriptor: focal point in percentage-space plus a zoom
/// percentage (300 = the crop covers a third of the image width).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropSpec {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

/// Where an option's tile image comes from. Exactly one variant per option,
/// dispatched explicitly instead of probing for optional fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum OptionSource {
    Static { image_url: String },
    Crop(CropSpec),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: String,
    pub source: OptionSource,
    /// Decorative CSS filter applied to the tile, if any.
    pub filter: Option<String>,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub learning_point_id: String,
    pub question_text: String,
    /// Masking circle hiding the true detail until answered.
    pub white_circle: Circle,
    /// Where the chosen answer image lands on the artwork.
    pub overlay_position: Rect,
    pub options: Vec<QuizOption>,
}

impl QuizQuestion {
    pub fn option(&self, option_id: &str) -> Option<&QuizOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// The unit of content. Immutable once loaded; components borrow it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub image_url: String,
    pub era: String,
    pub learning_points: Vec<Hotspot>,
    pub quiz_questions: Vec<QuizQuestion>,
}

impl Artwork {
    pub fn hotspot(&self, id: &str) -> Option<&Hotspot> {
        self.learning_points.iter().find(|p| p.id == id)
    }

    pub fn question(&self, id: &str) -> Option<&QuizQuestion> {
        self.quiz_questions.iter().find(|q| q.id == id)
    }
}

// ---------------- Session state -----------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Learning,
    Quiz,
    Results,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Overview,
    Exploration,
}

/// A committed answer overlay. Never removed; both the quiz view and the
/// results view replay the full history to reconstruct the artwork.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayRecord {
    pub question_id: String,
    pub source: OptionSource,
    pub position: Rect,
}

/// Ephemeral per-level state. Created when a level starts, mutated only
/// through [`SessionAction`], discarded wholesale on reset.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub phase: GamePhase,
    pub view_mode: ViewMode,
    /// Visited hotspot ids, in discovery order. Append-only, no duplicates.
    pub found_hotspots: Vec<String>,
    /// At most one open tooltip; panning/zooming lock while it is open.
    pub active_tooltip: Option<String>,
    pub current_question_index: usize,
    /// question id -> chosen option id, in answer order.
    pub user_answers: Vec<(String, String)>,
    pub overlays: Vec<OverlayRecord>,
    pub start_time_ms: Option<f64>,
    pub end_time_ms: Option<f64>,
    /// Bumped on every accepted action; the canvas redraw effect keys on it.
    pub revision: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: GamePhase::Learning,
            view_mode: ViewMode::Overview,
            found_hotspots: Vec::new(),
            active_tooltip: None,
            current_question_index: 0,
            user_answers: Vec::new(),
            overlays: Vec::new(),
            start_time_ms: None,
            end_time_ms: None,
            revision: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub enum SessionAction {
    Start { now_ms: f64 },
    EnterExploration,
    MarkFound { id: String },
    SetActiveTooltip(Option<String>),
    BeginQuiz,
    SubmitAnswer {
        question_id: String,
        option_id: String,
        source: OptionSource,
        position: Rect,
    },
    NextQuestion,
    FinishQuiz { now_ms: f64 },
    Reset,
}

impl SessionState {
    pub fn start(&mut self, now_ms: f64) {
        *self = SessionState::default();
        self.start_time_ms = Some(now_ms);
    }

    pub fn enter_exploration(&mut self) {
        // One-way within a level; only Reset goes back.
        self.view_mode = ViewMode::Exploration;
    }

    /// Idempotent: marking an already-found hotspot leaves the list unchanged.
    pub fn mark_found(&mut self, id: &str) {
        if !self.found_hotspots.iter().any(|h| h == id) {
            self.found_hotspots.push(id.to_string());
        }
    }

    pub fn is_found(&self, id: &str) -> bool {
        self.found_hotspots.iter().any(|h| h == id)
    }

    pub fn set_active_tooltip(&mut self, id: Option<String>) {
        self.active_tooltip = id;
    }

    pub fn begin_quiz(&mut self) {
        self.phase = GamePhase::Quiz;
        self.current_question_index = 0;
    }

    pub fn submit_answer(
        &mut self,
        question_id: &str,
        option_id: &str,
        source: OptionSource,
        position: Rect,
    ) {
        // Terminal per question: a second submission for the same question
        // is ignored rather than overwriting the committed record.
        if self.user_answers.iter().any(|(q, _)| q == question_id) {
            return;
        }
        self.user_answers
            .push((question_id.to_string(), option_id.to_string()));
        self.overlays.push(OverlayRecord {
            question_id: question_id.to_string(),
            source,
            position,
        });
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&str> {
        self.user_answers
            .iter()
            .find(|(q, _)| q == question_id)
            .map(|(_, o)| o.as_str())
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.answer_for(question_id).is_some()
    }

    pub fn next_question(&mut self) {
        self.current_question_index += 1;
    }

    pub fn finish_quiz(&mut self, now_ms: f64) {
        self.phase = GamePhase::Results;
        self.end_time_ms = Some(now_ms);
    }

    // ---------------- Scoring -----------------

    /// Answers whose chosen option is correct. An answer that no longer
    /// resolves to a question or option counts as incorrect.
    pub fn correct_count(&self, artwork: &Artwork) -> usize {
        self.user_answers
            .iter()
            .filter(|(question_id, option_id)| {
                artwork
                    .question(question_id)
                    .and_then(|q| q.option(option_id))
                    .map(|o| o.is_correct)
                    .unwrap_or(false)
            })
            .count()
    }

    pub fn score_percentage(&self, artwork: &Artwork) -> u32 {
        let total = artwork.quiz_questions.len();
        if total == 0 {
            return 0;
        }
        let correct = self.correct_count(artwork);
        (correct as f64 / total as f64 * 100.0).round() as u32
    }

    pub fn elapsed_secs(&self) -> u64 {
        match (self.start_time_ms, self.end_time_ms) {
            (Some(start), Some(end)) if end >= start => ((end - start) / 1000.0) as u64,
            _ => 0,
        }
    }
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        match action {
            SessionAction::Start { now_ms } => new.start(now_ms),
            SessionAction::EnterExploration => new.enter_exploration(),
            SessionAction::MarkFound { id } => new.mark_found(&id),
            SessionAction::SetActiveTooltip(id) => new.set_active_tooltip(id),
            SessionAction::BeginQuiz => new.begin_quiz(),
            SessionAction::SubmitAnswer {
                question_id,
                option_id,
                source,
                position,
            } => new.submit_answer(&question_id, &option_id, source, position),
            SessionAction::NextQuestion => new.next_question(),
            SessionAction::FinishQuiz { now_ms } => new.finish_quiz(now_ms),
            SessionAction::Reset => new = SessionState::default(),
        }
        new.revision = self.revision.wrapping_add(1);
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(x: f64, y: f64, radius: f64) -> Circle {
        Circle { x, y, radius }
    }

    fn rect(x: f64, y: f64) -> Rect {
        Rect { x, y, width: 8.0, height: 8.0 }
    }

    fn crop_option(id: &str, x: f64, y: f64, is_correct: bool) -> QuizOption {
        QuizOption {
            id: id.to_string(),
            source: OptionSource::Crop(CropSpec { x, y, zoom: 300.0 }),
            filter: None,
            is_correct,
        }
    }

    fn question(id: &str, correct: &str) -> QuizQuestion {
        QuizQuestion {
            id: id.to_string(),
            learning_point_id: id.to_string(),
            question_text: format!("where is {id}?"),
            white_circle: circle(50.0, 50.0, 10.0),
            overlay_position: rect(46.0, 46.0),
            options: ["a", "b", "c", "d"]
                .iter()
                .map(|o| crop_option(o, 30.0, 30.0, *o == correct))
                .collect(),
        }
    }

    fn artwork(question_count: usize) -> Artwork {
        Artwork {
            id: "test".into(),
            title: "Test".into(),
            artist: "Nobody".into(),
            image_url: "/artworks/test.jpg".into(),
            era: "test-era".into(),
            learning_points: Vec::new(),
            quiz_questions: (0..question_count)
                .map(|i| question(&format!("q{i}"), "a"))
                .collect(),
        }
    }

    #[test]
    fn hit_test_scales_with_radius_multiplier() {
        let hotspot = Hotspot {
            id: "spot".into(),
            label: "Spot".into(),
            click_area: circle(50.0, 50.0, 4.0),
            highlight_circle: circle(50.0, 50.0, 6.0),
            tooltip: Tooltip {
                text: "a spot".into(),
                position: TooltipPosition::Bottom,
            },
        };
        let near = Point { x: 55.0, y: 50.0 }; // 5 away, outside radius 4
        assert!(!hotspot.is_hit(near, 1.0));
        assert!(hotspot.is_hit(near, 2.0));
        let boundary = Point { x: 58.0, y: 50.0 }; // exactly radius * 2
        assert!(hotspot.is_hit(boundary, 2.0));
        let far = Point { x: 60.0, y: 50.0 };
        assert!(!hotspot.is_hit(far, 2.0));
    }

    #[test]
    fn mark_found_is_idempotent() {
        let mut s = SessionState::default();
        s.mark_found("spot");
        s.mark_found("spot");
        s.mark_found("other");
        assert_eq!(s.found_hotspots, vec!["spot".to_string(), "other".to_string()]);
    }

    #[test]
    fn submit_answer_is_terminal_per_question() {
        let mut s = SessionState::default();
        let src = OptionSource::Crop(CropSpec { x: 10.0, y: 10.0, zoom: 300.0 });
        s.submit_answer("q0", "a", src.clone(), rect(1.0, 1.0));
        s.submit_answer("q0", "b", src.clone(), rect(2.0, 2.0));
        assert_eq!(s.user_answers.len(), 1);
        assert_eq!(s.answer_for("q0"), Some("a"));
        assert_eq!(s.overlays.len(), 1);
    }

    #[test]
    fn overlays_persist_in_answer_order() {
        let mut s = SessionState::default();
        let src = OptionSource::Crop(CropSpec { x: 10.0, y: 10.0, zoom: 300.0 });
        s.submit_answer("q0", "b", src.clone(), rect(1.0, 1.0));
        s.submit_answer("q1", "a", src, rect(2.0, 2.0));
        assert_eq!(s.overlays.len(), 2);
        assert_eq!(s.overlays[0].question_id, "q0");
        assert_eq!(s.overlays[1].question_id, "q1");
        assert_eq!(s.overlays[1].position, rect(2.0, 2.0));
    }

    #[test]
    fn scoring_two_of_three() {
        let art = artwork(3);
        let mut s = SessionState::default();
        let src = OptionSource::Crop(CropSpec { x: 0.0, y: 0.0, zoom: 300.0 });
        s.submit_answer("q0", "a", src.clone(), rect(0.0, 0.0));
        s.submit_answer("q1", "a", src.clone(), rect(0.0, 0.0));
        s.submit_answer("q2", "c", src, rect(0.0, 0.0));
        assert_eq!(s.correct_count(&art), 2);
        assert_eq!(s.score_percentage(&art), 67);
    }

    #[test]
    fn unresolved_answer_scores_as_incorrect() {
        let art = artwork(1);
        let mut s = SessionState::default();
        let src = OptionSource::Crop(CropSpec { x: 0.0, y: 0.0, zoom: 300.0 });
        s.submit_answer("missing-question", "a", src.clone(), rect(0.0, 0.0));
        s.submit_answer("q0", "missing-option", src, rect(0.0, 0.0));
        assert_eq!(s.correct_count(&art), 0);
        assert_eq!(s.score_percentage(&art), 0);
    }

    #[test]
    fn elapsed_floors_to_seconds() {
        let mut s = SessionState::default();
        s.start(1_000.0);
        s.finish_quiz(83_900.0);
        assert_eq!(s.elapsed_secs(), 82);
        // Missing endpoints read as zero, never panic.
        assert_eq!(SessionState::default().elapsed_secs(), 0);
    }

    #[test]
    fn start_resets_previous_session() {
        let mut s = SessionState::default();
        s.mark_found("spot");
        s.enter_exploration();
        s.start(5_000.0);
        assert!(s.found_hotspots.is_empty());
        assert_eq!(s.view_mode, ViewMode::Overview);
        assert_eq!(s.start_time_ms, Some(5_000.0));
    }
}
