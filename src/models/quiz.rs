use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppResult;
use crate::models::question::QuestionSet;

/// 测验标识，由存储分配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizId(u64);

impl QuizId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuizId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(QuizId)
    }
}

/// 待保存的测验
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuiz {
    pub title: String,
    /// 题目集合的 JSON 文本
    pub questions: String,
    pub created_at: String,
}

impl NewQuiz {
    /// 以当前时间构建
    pub fn from_question_set(title: impl Into<String>, questions: &QuestionSet) -> AppResult<Self> {
        Ok(Self {
            title: title.into(),
            questions: questions
                .to_json()
                .map_err(crate::error::StoreError::Serialization)?,
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}

/// 已保存的测验记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizRecord {
    pub id: QuizId,
    pub title: String,
    pub questions: String,
    pub created_at: String,
}

impl QuizRecord {
    pub fn from_new(id: QuizId, new_quiz: NewQuiz) -> Self {
        Self {
            id,
            title: new_quiz.title,
            questions: new_quiz.questions,
            created_at: new_quiz.created_at,
        }
    }

    /// 解码保存的题目集合
    pub fn question_set(&self) -> AppResult<QuestionSet> {
        QuestionSet::from_json(&self.questions)
    }
}
