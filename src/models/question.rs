use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 题目中的一个选项
///
/// `id` 是选项在题目中的位置（从0开始），同时作为选项的身份
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: usize,
    pub text: String,
}

impl AnswerOption {
    pub fn new(id: usize, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// 单选题
///
/// 反序列化时同样经过校验，不合法的题目无法构造出来
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "QuestionFields")]
pub struct Question {
    /// 在源文档中的序号（从1开始）
    pub id: usize,
    pub text: String,
    pub options: Vec<AnswerOption>,
    pub correct_option_index: usize,
}

/// 反序列化用的未校验字段
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionFields {
    id: usize,
    text: String,
    options: Vec<AnswerOption>,
    correct_option_index: usize,
}

impl TryFrom<QuestionFields> for Question {
    type Error = QuestionError;

    fn try_from(fields: QuestionFields) -> Result<Self, Self::Error> {
        let question = Self {
            id: fields.id,
            text: fields.text,
            options: fields.options,
            correct_option_index: fields.correct_option_index,
        };
        question.validate()?;
        Ok(question)
    }
}

/// 题目校验错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("题目 {id} 没有任何选项")]
    NoOptions { id: usize },

    #[error("题目 {id} 的正确选项 {index} 超出范围 (共 {option_count} 个选项)")]
    CorrectIndexOutOfRange {
        id: usize,
        index: usize,
        option_count: usize,
    },
}

impl Question {
    /// 创建并校验题目
    ///
    /// 选项按传入顺序编号，`correct_option_index` 必须落在选项范围内
    pub fn new(
        id: usize,
        text: impl Into<String>,
        option_texts: Vec<String>,
        correct_option_index: usize,
    ) -> Result<Self, QuestionError> {
        let options = option_texts
            .into_iter()
            .enumerate()
            .map(|(idx, text)| AnswerOption::new(idx, text))
            .collect();

        let question = Self {
            id,
            text: text.into(),
            options,
            correct_option_index,
        };
        question.validate()?;
        Ok(question)
    }

    /// 检查题目不变量
    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.options.is_empty() {
            return Err(QuestionError::NoOptions { id: self.id });
        }
        if self.correct_option_index >= self.options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                id: self.id,
                index: self.correct_option_index,
                option_count: self.options.len(),
            });
        }
        Ok(())
    }

    /// 正确选项，字段被直接改坏时返回 `None`
    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.options.get(self.correct_option_index)
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}

/// 一份文档解析出的题目集合，顺序即出题顺序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn into_inner(self) -> Vec<Question> {
        self.questions
    }

    /// 序列化为持久化用的 JSON 文本
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.questions)
    }

    /// 从 JSON 文本恢复，并重新校验每道题
    pub fn from_json(json: &str) -> crate::error::AppResult<Self> {
        let questions: Vec<Question> = serde_json::from_str(json).map_err(|source| {
            crate::error::StoreError::Serialization(source)
        })?;
        for question in &questions {
            question.validate()?;
        }
        Ok(Self { questions })
    }
}

impl From<Vec<Question>> for QuestionSet {
    fn from(questions: Vec<Question>) -> Self {
        Self::new(questions)
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn question_numbers_options_in_order() {
        let q = Question::new(1, "2+2=?", texts(&["3", "4"]), 1).unwrap();
        assert_eq!(q.options[0], AnswerOption::new(0, "3"));
        assert_eq!(q.options[1], AnswerOption::new(1, "4"));
        assert_eq!(q.correct_option().map(|o| o.text.as_str()), Some("4"));
    }

    #[test]
    fn question_without_options_is_rejected() {
        let err = Question::new(3, "empty", Vec::new(), 0).unwrap_err();
        assert_eq!(err, QuestionError::NoOptions { id: 3 });
    }

    #[test]
    fn question_with_out_of_range_answer_is_rejected() {
        let err = Question::new(1, "q", texts(&["a", "b"]), 2).unwrap_err();
        assert!(matches!(err, QuestionError::CorrectIndexOutOfRange { index: 2, .. }));
    }

    #[test]
    fn json_uses_camel_case_field_names() {
        let set = QuestionSet::new(vec![Question::new(1, "q", texts(&["a"]), 0).unwrap()]);
        let json = set.to_json().unwrap();
        assert!(json.contains("\"correctOptionIndex\":0"));
        assert!(json.starts_with('['));
    }

    #[test]
    fn from_json_revalidates_questions() {
        let json = r#"[{"id":1,"text":"q","options":[{"id":0,"text":"a"}],"correctOptionIndex":4}]"#;
        assert!(QuestionSet::from_json(json).is_err());

        let json = r#"[{"id":1,"text":"q","options":[{"id":0,"text":"a"}],"correctOptionIndex":0}]"#;
        let set = QuestionSet::from_json(json).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn deserializing_a_broken_question_fails() {
        let json = r#"{"id":1,"text":"q","options":[],"correctOptionIndex":0}"#;
        assert!(serde_json::from_str::<Question>(json).is_err());

        let json = r#"{"id":1,"text":"q","options":[{"id":0,"text":"a"}],"correctOptionIndex":3}"#;
        assert!(serde_json::from_str::<Question>(json).is_err());
    }

    #[test]
    fn correct_option_does_not_panic_on_mutated_question() {
        let mut q = Question::new(1, "q", texts(&["a", "b"]), 1).unwrap();
        q.options.pop();
        assert!(q.correct_option().is_none());
        assert!(q.validate().is_err());
    }
}
