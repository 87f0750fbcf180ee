//! Attempt scoring: correctness, accuracy, XP and badge computation.
//!
//! Pure functions over an already-fetched quiz; all persistence happens in the
//! submit handler so a failed write can never leave a half-scored attempt.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::entity::QuizQuestion;

pub const BADGE_TOP_SCORER: &str = "Top Scorer";
pub const BADGE_FAST_SOLVER: &str = "Fast Solver";

/// Per-question XP for a correct answer.
const XP_PER_CORRECT: i32 = 10;
/// Flat bonus when the whole quiz is finished under 60s per question.
const XP_SPEED_BONUS: i32 = 20;
/// Bonus for accuracy of 90% or better.
const XP_ACCURACY_BONUS: i32 = 30;

/// Accuracy threshold (percent) for both the XP bonus and the "Top Scorer" badge.
const ACCURACY_THRESHOLD: i32 = 90;
/// Seconds-per-question budget for the speed XP bonus.
const SPEED_BONUS_SECS_PER_QUESTION: i64 = 60;
/// Seconds-per-question budget for the "Fast Solver" badge. Deliberately a
/// tighter bar than the XP bonus.
const FAST_SOLVER_SECS_PER_QUESTION: i64 = 45;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttemptScore {
    pub correct_count: i32,
    pub total_questions: i32,
    /// Integer percent, rounded half-up. Always in 0..=100.
    pub accuracy: i32,
    pub xp_earned: i32,
    /// Badges this attempt qualifies for. May repeat badges the student
    /// already holds; the aggregate update deduplicates.
    pub new_badges: Vec<String>,
}

/// Scores one submitted attempt.
///
/// `answers` maps question index to the chosen option index. Missing entries
/// and out-of-range choices count as incorrect, never as an error: a
/// partially answered quiz is scoreable.
pub fn score_attempt(
    questions: &[QuizQuestion],
    answers: &BTreeMap<u32, i64>,
    time_taken_seconds: i64,
) -> AttemptScore {
    let total_questions = questions.len() as i32;

    let correct_count = questions
        .iter()
        .enumerate()
        .filter(|(i, q)| answers.get(&(*i as u32)) == Some(&(q.correct_index as i64)))
        .count() as i32;

    let accuracy = if total_questions == 0 {
        0
    } else {
        (100.0 * correct_count as f64 / total_questions as f64).round() as i32
    };

    let mut xp_earned = correct_count * XP_PER_CORRECT;
    if time_taken_seconds < total_questions as i64 * SPEED_BONUS_SECS_PER_QUESTION {
        xp_earned += XP_SPEED_BONUS;
    }
    if accuracy >= ACCURACY_THRESHOLD {
        xp_earned += XP_ACCURACY_BONUS;
    }

    let mut new_badges = Vec::new();
    if accuracy >= ACCURACY_THRESHOLD {
        new_badges.push(BADGE_TOP_SCORER.to_string());
    }
    if time_taken_seconds < total_questions as i64 * FAST_SOLVER_SECS_PER_QUESTION {
        new_badges.push(BADGE_FAST_SOLVER.to_string());
    }

    AttemptScore {
        correct_count,
        total_questions,
        accuracy,
        xp_earned,
        new_badges,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::entity::{Difficulty, QuizQuestion};

    fn quiz(correct: &[usize]) -> Vec<QuizQuestion> {
        correct
            .iter()
            .enumerate()
            .map(|(i, &c)| QuizQuestion {
                id: format!("q{}", i + 1),
                question_text: format!("question {}", i + 1),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                correct_index: c,
                difficulty: Difficulty::Medium,
            })
            .collect()
    }

    fn answers(pairs: &[(u32, i64)]) -> BTreeMap<u32, i64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn partial_answers_in_ninety_seconds() {
        // 4 questions, 3 correct, one wrong, 90s: base XP only.
        let q = quiz(&[0, 1, 2, 3]);
        let a = answers(&[(0, 0), (1, 1), (2, 0), (3, 3)]);

        let score = score_attempt(&q, &a, 90);
        assert_eq!(score.correct_count, 3);
        assert_eq!(score.accuracy, 75);
        assert_eq!(score.xp_earned, 30);
        assert!(score.new_badges.is_empty());
    }

    #[test]
    fn perfect_fast_run_earns_both_badges() {
        let q = quiz(&[0, 1, 2, 3]);
        let a = answers(&[(0, 0), (1, 1), (2, 2), (3, 3)]);

        let score = score_attempt(&q, &a, 50);
        assert_eq!(score.correct_count, 4);
        assert_eq!(score.accuracy, 100);
        // 40 base + 20 speed + 30 accuracy
        assert_eq!(score.xp_earned, 90);
        assert_eq!(
            score.new_badges,
            vec![BADGE_TOP_SCORER.to_string(), BADGE_FAST_SOLVER.to_string()]
        );
    }

    #[test]
    fn missing_answers_count_as_incorrect() {
        let q = quiz(&[0, 0, 0]);
        let a = answers(&[(1, 0)]);

        let score = score_attempt(&q, &a, 10_000);
        assert_eq!(score.correct_count, 1);
        assert_eq!(score.total_questions, 3);
        assert_eq!(score.accuracy, 33);
        assert_eq!(score.xp_earned, 10);
    }

    #[test]
    fn out_of_range_choice_is_just_wrong() {
        let q = quiz(&[1, 1]);
        let a = answers(&[(0, 99), (1, -3)]);

        let score = score_attempt(&q, &a, 10_000);
        assert_eq!(score.correct_count, 0);
        assert_eq!(score.accuracy, 0);
        assert_eq!(score.xp_earned, 0);
        assert!(score.new_badges.is_empty());
    }

    #[test]
    fn accuracy_rounds_half_up() {
        // 2/3 = 66.67 -> 67, 1/3 = 33.33 -> 33, 1/8 = 12.5 -> 13
        let q = quiz(&[0, 0, 0]);
        let a = answers(&[(0, 0), (1, 0)]);
        assert_eq!(score_attempt(&q, &a, 10_000).accuracy, 67);

        let q = quiz(&[0; 8]);
        let a = answers(&[(0, 0)]);
        assert_eq!(score_attempt(&q, &a, 10_000).accuracy, 13);
    }

    #[test]
    fn speed_bonus_threshold_is_strict() {
        let q = quiz(&[0, 0]);
        let a = answers(&[(0, 0)]);

        // 2 questions -> bonus under 120s, badge under 90s
        assert_eq!(score_attempt(&q, &a, 120).xp_earned, 10);
        assert_eq!(score_attempt(&q, &a, 119).xp_earned, 30);
        assert!(score_attempt(&q, &a, 90).new_badges.is_empty());
        assert_eq!(
            score_attempt(&q, &a, 89).new_badges,
            vec![BADGE_FAST_SOLVER.to_string()]
        );
    }

    #[test]
    fn ninety_percent_boundary() {
        // 9/10 correct is exactly 90: bonus and badge apply.
        let q = quiz(&[0; 10]);
        let mut a = BTreeMap::new();
        for i in 0..9u32 {
            a.insert(i, 0);
        }

        let score = score_attempt(&q, &a, 10_000);
        assert_eq!(score.accuracy, 90);
        assert_eq!(score.xp_earned, 9 * 10 + 30);
        assert_eq!(score.new_badges, vec![BADGE_TOP_SCORER.to_string()]);
    }

    #[test]
    fn empty_quiz_scores_nothing() {
        let score = score_attempt(&[], &BTreeMap::new(), 0);
        assert_eq!(score.total_questions, 0);
        assert_eq!(score.accuracy, 0);
        assert_eq!(score.xp_earned, 0);
        assert!(score.new_badges.is_empty());
    }

    #[test]
    fn xp_never_negative() {
        let q = quiz(&[0]);
        let score = score_attempt(&q, &BTreeMap::new(), i64::MAX);
        assert_eq!(score.xp_earned, 0);
    }
}
