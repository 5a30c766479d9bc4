use serde::{Deserialize, Serialize};

/// 单题作答结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
    Unanswered,
}

/// 一次提交中某道题的作答记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    pub question_id: usize,
    /// `None` 表示未作答
    pub selected_option: Option<usize>,
    pub correct_option: usize,
    pub is_correct: bool,
    pub outcome: AnswerOutcome,
}

/// 一次提交的评分汇总
///
/// 完全由 (题目集合, 答案列表) 推导，不持久化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    /// 百分制得分（四舍五入）
    pub score: u32,
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub unanswered_count: usize,
    pub answers: Vec<AnswerEntry>,
}

impl SubmissionResult {
    pub fn total(&self) -> usize {
        self.correct_count + self.incorrect_count + self.unanswered_count
    }
}

impl std::fmt::Display for SubmissionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "得分 {}% [正确 {} / 错误 {} / 未答 {}]",
            self.score, self.correct_count, self.incorrect_count, self.unanswered_count
        )
    }
}
