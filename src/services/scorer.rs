//! 评分服务 - 业务能力层
//!
//! 纯函数：同样的题目和答案总是得到同样的结果，不读存储

use crate::error::ScoringError;
use crate::models::question::Question;
use crate::models::submission::{AnswerEntry, AnswerOutcome, SubmissionResult};

/// 评分器
#[derive(Debug, Default, Clone, Copy)]
pub struct Scorer;

impl Scorer {
    pub fn new() -> Self {
        Self
    }

    /// 对一次提交评分
    ///
    /// # 参数
    /// - `questions`: 题目集合
    /// - `answers`: 按题目顺序的选择，`None` 表示未作答；比题目少时缺少的部分视为未作答
    ///
    /// # 返回
    /// 题目为空或答案多于题目时返回错误
    pub fn score(
        &self,
        questions: &[Question],
        answers: &[Option<usize>],
    ) -> Result<SubmissionResult, ScoringError> {
        if questions.is_empty() {
            return Err(ScoringError::EmptyQuestionSet);
        }
        if answers.len() > questions.len() {
            return Err(ScoringError::TooManyAnswers {
                answers: answers.len(),
                questions: questions.len(),
            });
        }

        let mut result = SubmissionResult {
            score: 0,
            correct_count: 0,
            incorrect_count: 0,
            unanswered_count: 0,
            answers: Vec::with_capacity(questions.len()),
        };

        for (idx, question) in questions.iter().enumerate() {
            let selected = answers.get(idx).copied().flatten();
            let outcome = match selected {
                Some(choice) if choice == question.correct_option_index => AnswerOutcome::Correct,
                Some(_) => AnswerOutcome::Incorrect,
                None => AnswerOutcome::Unanswered,
            };

            match outcome {
                AnswerOutcome::Correct => result.correct_count += 1,
                AnswerOutcome::Incorrect => result.incorrect_count += 1,
                AnswerOutcome::Unanswered => result.unanswered_count += 1,
            }

            result.answers.push(AnswerEntry {
                question_id: question.id,
                selected_option: selected,
                correct_option: question.correct_option_index,
                is_correct: outcome == AnswerOutcome::Correct,
                outcome,
            });
        }

        result.score = percentage(result.correct_count, questions.len());
        Ok(result)
    }
}

/// `round(part / total * 100)`，半数向上取整
fn percentage(part: usize, total: usize) -> u32 {
    ((part * 200 + total) / (total * 2)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: usize, correct: usize) -> Question {
        Question::new(
            id,
            format!("q{id}"),
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct,
        )
        .unwrap()
    }

    fn five_questions() -> Vec<Question> {
        [0, 1, 2, 3, 0]
            .iter()
            .enumerate()
            .map(|(idx, correct)| question(idx + 1, *correct))
            .collect()
    }

    #[test]
    fn scores_mixed_submission() {
        let result = Scorer::new()
            .score(&five_questions(), &[Some(0), None, Some(2), Some(2), None])
            .unwrap();
        assert_eq!(result.correct_count, 2);
        assert_eq!(result.incorrect_count, 1);
        assert_eq!(result.unanswered_count, 2);
        assert_eq!(result.score, 40);
        assert_eq!(result.answers[3].outcome, AnswerOutcome::Incorrect);
        assert_eq!(result.answers[3].correct_option, 3);
        assert_eq!(result.answers[1].selected_option, None);
    }

    #[test]
    fn short_answer_list_counts_missing_as_unanswered() {
        let result = Scorer::new().score(&five_questions(), &[Some(0)]).unwrap();
        assert_eq!(result.correct_count, 1);
        assert_eq!(result.unanswered_count, 4);
        assert_eq!(result.total(), 5);
        assert_eq!(result.score, 20);
    }

    #[test]
    fn empty_question_set_is_rejected() {
        let err = Scorer::new().score(&[], &[]).unwrap_err();
        assert_eq!(err, ScoringError::EmptyQuestionSet);
    }

    #[test]
    fn too_many_answers_are_rejected() {
        let err = Scorer::new()
            .score(&[question(1, 0)], &[Some(0), Some(1)])
            .unwrap_err();
        assert_eq!(
            err,
            ScoringError::TooManyAnswers {
                answers: 2,
                questions: 1
            }
        );
    }

    #[test]
    fn selection_outside_options_is_incorrect() {
        let result = Scorer::new().score(&[question(1, 0)], &[Some(9)]).unwrap();
        assert_eq!(result.incorrect_count, 1);
        assert!(!result.answers[0].is_correct);
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(0, 4), 0);
        assert_eq!(percentage(4, 4), 100);
    }

    #[test]
    fn scoring_is_repeatable() {
        let questions = five_questions();
        let answers = [Some(1), Some(1), None, Some(3), Some(0)];
        let first = Scorer::new().score(&questions, &answers).unwrap();
        let second = Scorer::new().score(&questions, &answers).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.total(), questions.len());
    }
}
