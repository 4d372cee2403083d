//! The first-aid quiz: a two-phase state machine.
//!
//! ```text
//! Answering(0, none) --select--> Answering(i, some)      (only while selection is none)
//! Answering(i, _)    --advance-> Answering(i + 1, none)  (i < last)
//! Answering(last, _) --advance-> Results
//! any                --restart-> Answering(0, none)
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::QuizQuestion;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum QuizPhase {
    Answering {
        index: usize,
        selection: Option<String>,
    },
    Results,
}

impl QuizPhase {
    fn initial() -> Self {
        QuizPhase::Answering {
            index: 0,
            selection: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizAction {
    Select(String),
    Advance,
    Restart,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    questions: Vec<QuizQuestion>,
    phase: QuizPhase,
    score: usize,
}

impl Quiz {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            phase: QuizPhase::initial(),
            score: 0,
        }
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match &self.phase {
            QuizPhase::Answering { index, .. } => self.questions.get(*index),
            QuizPhase::Results => None,
        }
    }

    pub fn selection(&self) -> Option<&str> {
        match &self.phase {
            QuizPhase::Answering { selection, .. } => selection.as_deref(),
            QuizPhase::Results => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == QuizPhase::Results
    }

    pub fn is_last_question(&self) -> bool {
        matches!(&self.phase, QuizPhase::Answering { index, .. } if index + 1 >= self.questions.len())
    }

    pub fn apply(&mut self, action: QuizAction) {
        match action {
            QuizAction::Select(option) => self.select(option),
            QuizAction::Advance => self.advance(),
            QuizAction::Restart => {
                self.phase = QuizPhase::initial();
                self.score = 0;
            }
        }
    }

    fn select(&mut self, option: String) {
        let QuizPhase::Answering { index, selection } = &mut self.phase else {
            return;
        };
        if selection.is_some() {
            return;
        }
        let Some(question) = self.questions.get(*index) else {
            return;
        };
        if !question.offers(&option) {
            tracing::warn!(%option, question = *index, "answer is not one of the offered options");
            return;
        }

        if option == question.correct_answer {
            self.score += 1;
        }
        *selection = Some(option);
    }

    fn advance(&mut self) {
        let QuizPhase::Answering { index, .. } = self.phase else {
            return;
        };

        self.phase = if index + 1 < self.questions.len() {
            QuizPhase::Answering {
                index: index + 1,
                selection: None,
            }
        } else {
            QuizPhase::Results
        };
    }
}

#[cfg(test)]
mod tests {
    use super::{Quiz, QuizAction, QuizPhase};
    use crate::seed;

    const CORRECT: [&str; 4] = [
        "Check for Danger",
        "30:2",
        "Run under cool water for 20 mins",
        "Apply direct, firm pressure",
    ];
    const WRONG: [&str; 4] = ["Check Airway", "15:2", "Apply ice directly", "Elevate the limb"];

    fn play(answers: &[&str]) -> Quiz {
        let mut quiz = Quiz::new(seed::quiz_questions());
        for answer in answers {
            quiz.apply(QuizAction::Select(answer.to_string()));
            quiz.apply(QuizAction::Advance);
        }
        quiz
    }

    #[test]
    fn all_correct_answers_score_four() {
        let quiz = play(&CORRECT);
        assert_eq!(quiz.phase(), &QuizPhase::Results);
        assert_eq!(quiz.score(), 4);
    }

    #[test]
    fn all_wrong_answers_score_zero() {
        let quiz = play(&WRONG);
        assert!(quiz.is_finished());
        assert_eq!(quiz.score(), 0);
    }

    #[test]
    fn first_answer_is_final() {
        let mut quiz = Quiz::new(seed::quiz_questions());
        quiz.apply(QuizAction::Select(WRONG[0].to_string()));
        let before = quiz.clone();
        quiz.apply(QuizAction::Select(CORRECT[0].to_string()));
        assert_eq!(quiz, before);
        assert_eq!(quiz.selection(), Some(WRONG[0]));
        assert_eq!(quiz.score(), 0);
    }

    #[test]
    fn unoffered_option_is_ignored() {
        let mut quiz = Quiz::new(seed::quiz_questions());
        quiz.apply(QuizAction::Select("Call a friend".to_string()));
        assert_eq!(quiz.selection(), None);
    }

    #[test]
    fn advance_clears_the_selection_and_results_are_terminal() {
        let mut quiz = Quiz::new(seed::quiz_questions());
        quiz.apply(QuizAction::Select(CORRECT[0].to_string()));
        quiz.apply(QuizAction::Advance);
        assert_eq!(
            quiz.phase(),
            &QuizPhase::Answering {
                index: 1,
                selection: None
            }
        );

        let mut finished = play(&CORRECT);
        finished.apply(QuizAction::Advance);
        finished.apply(QuizAction::Select(CORRECT[0].to_string()));
        assert!(finished.is_finished());
        assert_eq!(finished.score(), 4);
    }

    #[test]
    fn restart_returns_to_the_initial_state() {
        let mut quiz = play(&CORRECT);
        quiz.apply(QuizAction::Restart);
        assert_eq!(quiz, Quiz::new(seed::quiz_questions()));
        assert_eq!(quiz.current_question().map(|q| q.correct_answer.as_str()), Some(CORRECT[0]));
    }

    #[test]
    fn last_question_is_flagged() {
        let quiz = play(&CORRECT[..3]);
        assert!(quiz.is_last_question());
    }
}
