//! 连续文本题目解析 - 业务能力层
//!
//! 文本约定：
//!
//! ```text
//! 1. 2+2=?
//! ا) 3
//! ب) 4
//! پاسخ: ب
//! ```
//!
//! 题号后跟 `.` 或 `:`；选项以波斯字母加 `)` 或 `.` 再加空白开头；可选的答案行
//! 以 `پاسخ:` 或 `pasokh:` 开头。按行扫描，没有回溯。

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::models::question::{Question, QuestionSet};
use crate::services::answer_key::{clamp_index, letter_to_index};

static QUESTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\s*[.:](?:\s+(.*))?$").unwrap());
static OPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:الف|[\p{Arabic}&&\p{L}])\s*[).](?:\s+(.*))?$").unwrap());
static ANSWER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i:pasokh|پاسخ)\s*:\s*(\S*)").unwrap());
static SEPARATOR_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:#{3,}|\*{3,})$").unwrap());

/// 单行的分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    Question(&'a str),
    Option(&'a str),
    Answer(&'a str),
    Separator,
    Blank,
    Text(&'a str),
}

fn is_layout_mark(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{200e}' | '\u{200f}' | '\u{202a}'..='\u{202e}' | '\u{feff}')
}

fn classify(line: &str) -> LineKind<'_> {
    let line = line.trim_matches(is_layout_mark);
    if line.is_empty() {
        return LineKind::Blank;
    }
    if let Some(caps) = QUESTION_LINE.captures(line) {
        return LineKind::Question(caps.get(1).map_or("", |m| m.as_str()));
    }
    if let Some(caps) = ANSWER_LINE.captures(line) {
        return LineKind::Answer(caps.get(1).map_or("", |m| m.as_str()));
    }
    if let Some(caps) = OPTION_LINE.captures(line) {
        return LineKind::Option(caps.get(1).map_or("", |m| m.as_str()));
    }
    if SEPARATOR_LINE.is_match(line) {
        return LineKind::Separator;
    }
    LineKind::Text(line)
}

/// 扫描状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// 等待第一个题号
    SeekQuestion,
    /// 题干（题号之后、第一个选项之前）
    InQuestionBody,
    /// 选项列表
    InOptions,
    /// 选项已结束，只等下一个题号
    SeekAnswer,
}

/// 正在构建的题块
#[derive(Debug, Default)]
struct BlockDraft {
    prompt: Vec<String>,
    options: Vec<String>,
    /// 第一个选项所在行号，答案从这里开始向后查找
    first_option_line: Option<usize>,
}

impl BlockDraft {
    fn start(first_line: &str) -> Self {
        let mut draft = Self::default();
        if !first_line.is_empty() {
            draft.prompt.push(first_line.to_string());
        }
        draft
    }

    fn push_option(&mut self, line_no: usize, text: &str) {
        self.first_option_line.get_or_insert(line_no);
        self.options.push(text.to_string());
    }

    fn extend_option(&mut self, text: &str) {
        if let Some(last) = self.options.last_mut() {
            if !last.is_empty() {
                last.push('\n');
            }
            last.push_str(text);
        }
    }
}

/// 已闭合且有选项的题块
#[derive(Debug)]
struct ClosedBlock {
    prompt: String,
    options: Vec<String>,
    first_option_line: usize,
}

/// 连续文本格式解析器
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFormatParser;

impl TextFormatParser {
    pub fn new() -> Self {
        Self
    }

    /// 解析文本中的全部题目
    ///
    /// 没有选项的题块直接丢弃，保留下来的题目按出现顺序从1开始重新编号。
    /// 结果为空不算错误，由调用方决定如何处理。
    pub fn parse(&self, text: &str) -> QuestionSet {
        let mut state = ScanState::SeekQuestion;
        let mut draft: Option<BlockDraft> = None;
        let mut closed: Vec<ClosedBlock> = Vec::new();
        let mut answers: Vec<(usize, usize)> = Vec::new();
        let mut dropped = 0usize;

        for (line_no, line) in text.lines().enumerate() {
            let kind = classify(line);

            if let LineKind::Answer(letter) = kind {
                answers.push((line_no, letter_to_index(letter.trim_matches(['(', ')', '.']))));
            }

            state = match (state, kind) {
                (_, LineKind::Question(first_line)) => {
                    if let Some(done) = draft.replace(BlockDraft::start(first_line)) {
                        close_block(done, &mut closed, &mut dropped);
                    }
                    ScanState::InQuestionBody
                }
                (ScanState::SeekQuestion, _) => ScanState::SeekQuestion,

                (ScanState::InQuestionBody | ScanState::InOptions, LineKind::Option(option)) => {
                    if let Some(d) = draft.as_mut() {
                        d.push_option(line_no, option);
                    }
                    ScanState::InOptions
                }
                (ScanState::InQuestionBody, LineKind::Text(more)) => {
                    if let Some(d) = draft.as_mut() {
                        d.prompt.push(more.to_string());
                    }
                    ScanState::InQuestionBody
                }
                (ScanState::InOptions, LineKind::Text(more)) => {
                    if let Some(d) = draft.as_mut() {
                        d.extend_option(more);
                    }
                    ScanState::InOptions
                }
                (current, LineKind::Blank) => current,
                (_, LineKind::Answer(_) | LineKind::Separator) => ScanState::SeekAnswer,
                (ScanState::SeekAnswer, _) => ScanState::SeekAnswer,
            };
        }

        if let Some(done) = draft.take() {
            close_block(done, &mut closed, &mut dropped);
        }

        let questions: Vec<Question> = closed
            .into_iter()
            .enumerate()
            .filter_map(|(idx, block)| {
                let correct = answers
                    .iter()
                    .find(|(line_no, _)| *line_no >= block.first_option_line)
                    .map_or(0, |(_, index)| *index);
                let correct = clamp_index(correct, block.options.len());
                Question::new(idx + 1, block.prompt, block.options, correct).ok()
            })
            .collect();

        debug!(
            "文本解析完成: 保留 {} 道题, 丢弃 {} 个无选项题块, 答案标记 {} 个",
            questions.len(),
            dropped,
            answers.len()
        );

        QuestionSet::new(questions)
    }
}

fn close_block(draft: BlockDraft, closed: &mut Vec<ClosedBlock>, dropped: &mut usize) {
    let options: Vec<String> = draft
        .options
        .into_iter()
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();

    match draft.first_option_line {
        Some(first_option_line) if !options.is_empty() => closed.push(ClosedBlock {
            prompt: draft.prompt.join("\n").trim().to_string(),
            options,
            first_option_line,
        }),
        _ => *dropped += 1,
    }
}
