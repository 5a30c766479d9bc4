//! 内置的默认测验
//!
//! 没有上传文件时使用的五道代数题

use crate::models::question::{Question, QuestionSet};

/// 默认测验标题
pub const DEFAULT_QUIZ_TITLE: &str = "آزمون پیش‌فرض";

const DEFAULT_QUESTIONS: [(&str, [&str; 4], usize); 5] = [
    ("اگر ٣ - س = ٥، مقدار س کدام است؟", ["٨", "-٨", "-٢", "٢"], 3),
    ("حاصل عبارت ٢^٣ × ٣^٢ کدام است؟", ["٧٢", "٣٦", "١٨", "١٠٨"], 0),
    (
        "اگر محیط مربعی ٢٠ سانتی‌متر باشد، مساحت آن چند سانتی‌متر مربع است؟",
        ["٢٥", "١٠٠", "٤٠٠", "٢٠"],
        0,
    ),
    ("کدام گزینه مضرب ٧ است؟", ["٢١", "١٦", "٢٥", "٣٢"], 0),
    ("اگر ٥ = ٢x - ٣، مقدار x کدام است؟", ["١", "٤", "٨", "-١"], 1),
];

/// 构建默认题目集合
pub fn default_question_set() -> QuestionSet {
    DEFAULT_QUESTIONS
        .iter()
        .enumerate()
        .filter_map(|(idx, (text, options, correct))| {
            let options = options.iter().map(|opt| opt.to_string()).collect();
            Question::new(idx + 1, *text, options, *correct).ok()
        })
        .collect::<Vec<_>>()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_quiz_is_valid() {
        let set = default_question_set();
        assert_eq!(set.len(), 5);
        for (idx, question) in set.iter().enumerate() {
            assert_eq!(question.id, idx + 1);
            assert!(question.validate().is_ok());
        }
        assert_eq!(
            set.questions()[0].correct_option().map(|o| o.text.as_str()),
            Some("٢")
        );
    }
}
