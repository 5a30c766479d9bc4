//! 表格题目解析 - 业务能力层
//!
//! 每行一道题，列名通过 [`COLUMN_RESOLVERS`] 表识别

use tracing::debug;

use crate::models::document::RowRecord;
use crate::models::question::{Question, QuestionSet};
use crate::services::answer_key::{clamp_index, classify_indicator};

/// 行中需要识别的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Question,
    OptionA,
    OptionB,
    OptionC,
    OptionD,
    CorrectAnswer,
}

/// 列解析器：一个字段及其可接受的列名（按优先级排列，小写）
#[derive(Debug, Clone, Copy)]
pub struct ColumnResolver {
    pub field: Field,
    pub spellings: &'static [&'static str],
}

impl ColumnResolver {
    /// 按顺序尝试每个列名，返回第一个非空值
    pub fn resolve(&self, row: &RowRecord) -> Option<String> {
        self.spellings
            .iter()
            .find_map(|spelling| row.text_for(spelling))
    }
}

pub static COLUMN_RESOLVERS: [ColumnResolver; 6] = [
    ColumnResolver {
        field: Field::Question,
        spellings: &["question", "سوال", "سؤال"],
    },
    ColumnResolver {
        field: Field::OptionA,
        spellings: &["optiona", "option_a", "option a", "گزینه الف", "گزینه ۱"],
    },
    ColumnResolver {
        field: Field::OptionB,
        spellings: &["optionb", "option_b", "option b", "گزینه ب", "گزینه ۲"],
    },
    ColumnResolver {
        field: Field::OptionC,
        spellings: &["optionc", "option_c", "option c", "گزینه ج", "گزینه ۳"],
    },
    ColumnResolver {
        field: Field::OptionD,
        spellings: &["optiond", "option_d", "option d", "گزینه د", "گزینه ۴"],
    },
    ColumnResolver {
        field: Field::CorrectAnswer,
        spellings: &[
            "correctanswer",
            "correct_answer",
            "correct answer",
            "پاسخ صحیح",
            "پاسخ درست",
        ],
    },
];

const OPTION_FIELDS: [Field; 4] = [Field::OptionA, Field::OptionB, Field::OptionC, Field::OptionD];

/// 查找字段对应的解析器
pub fn resolver_for(field: Field) -> &'static ColumnResolver {
    COLUMN_RESOLVERS
        .iter()
        .find(|r| r.field == field)
        .unwrap_or(&COLUMN_RESOLVERS[0])
}

/// 表格格式解析器
#[derive(Debug, Default, Clone, Copy)]
pub struct TableFormatParser;

impl TableFormatParser {
    pub fn new() -> Self {
        Self
    }

    /// 解析全部行
    ///
    /// 没有题干或没有任何选项的行被跳过；保留的题目用其在所有行中的位置
    /// （从1开始）作为编号，跳过的行会留下空号。
    pub fn parse(&self, rows: &[RowRecord]) -> QuestionSet {
        let questions: Vec<Question> = rows
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| self.parse_row(idx + 1, row))
            .collect();

        debug!(
            "表格解析完成: {} 行 → {} 道题",
            rows.len(),
            questions.len()
        );

        QuestionSet::new(questions)
    }

    /// 解析单行，不可用时返回 `None`
    pub fn parse_row(&self, id: usize, row: &RowRecord) -> Option<Question> {
        let text = resolver_for(Field::Question).resolve(row)?;

        let options: Vec<String> = OPTION_FIELDS
            .iter()
            .filter_map(|field| resolver_for(*field).resolve(row))
            .collect();
        if options.is_empty() {
            debug!("第 {} 行没有选项，跳过", id);
            return None;
        }

        let correct = resolver_for(Field::CorrectAnswer)
            .resolve(row)
            .and_then(|value| classify_indicator(&value))
            .unwrap_or(0);
        let correct = clamp_index(correct, options.len());

        Question::new(id, text, options, correct).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::CellValue;

    fn option_texts(q: &Question) -> Vec<&str> {
        q.options.iter().map(|o| o.text.as_str()).collect()
    }

    #[test]
    fn every_field_has_a_resolver() {
        for field in [
            Field::Question,
            Field::OptionA,
            Field::OptionB,
            Field::OptionC,
            Field::OptionD,
            Field::CorrectAnswer,
        ] {
            assert_eq!(resolver_for(field).field, field);
        }
    }

    #[test]
    fn parses_latin_columns() {
        let row = RowRecord::new()
            .with("Question", "1+1=?")
            .with("OptionA", "1")
            .with("OptionB", "2")
            .with("CorrectAnswer", "b");
        let set = TableFormatParser::new().parse(&[row]);
        assert_eq!(set.len(), 1);
        let q = &set.questions()[0];
        assert_eq!(q.id, 1);
        assert_eq!(q.text, "1+1=?");
        assert_eq!(option_texts(q), vec!["1", "2"]);
        assert_eq!(q.correct_option_index, 1);
    }

    #[test]
    fn parses_persian_columns() {
        let row = RowRecord::new()
            .with("سوال", "۲ × ۳ = ?")
            .with("گزینه الف", "۵")
            .with("گزینه ب", "۶")
            .with("گزینه ج", "۷")
            .with("پاسخ صحیح", "ب");
        let q = TableFormatParser::new().parse_row(1, &row).unwrap();
        assert_eq!(q.options.len(), 3);
        assert_eq!(q.correct_option_index, 1);
    }

    #[test]
    fn column_labels_are_case_insensitive() {
        let row = RowRecord::new()
            .with("QUESTION", "q")
            .with("Option A", "x")
            .with("option_b", "y")
            .with("Correct Answer", CellValue::Number(2.0));
        let q = TableFormatParser::new().parse_row(1, &row).unwrap();
        assert_eq!(option_texts(&q), vec!["x", "y"]);
        assert_eq!(q.correct_option_index, 1);
    }

    #[test]
    fn rows_keep_their_position_as_id() {
        let rows = vec![
            RowRecord::new().with("Question", "a").with("OptionA", "1"),
            RowRecord::new().with("Question", "no options"),
            RowRecord::new().with("OptionA", "no question"),
            RowRecord::new().with("Question", "d").with("OptionB", "2"),
        ];
        let set = TableFormatParser::new().parse(&rows);
        let ids: Vec<usize> = set.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn out_of_range_indicator_is_clamped() {
        let row = RowRecord::new()
            .with("Question", "q")
            .with("OptionA", "a")
            .with("OptionB", "b")
            .with("OptionC", "c")
            .with("CorrectAnswer", "5");
        let q = TableFormatParser::new().parse_row(1, &row).unwrap();
        assert_eq!(q.correct_option_index, 2);
    }

    #[test]
    fn unrecognized_indicator_defaults_to_first() {
        let row = RowRecord::new()
            .with("Question", "q")
            .with("OptionA", "a")
            .with("OptionB", "b")
            .with("CorrectAnswer", "second");
        let q = TableFormatParser::new().parse_row(1, &row).unwrap();
        assert_eq!(q.correct_option_index, 0);
    }

    #[test]
    fn missing_slots_shift_options_down() {
        let row = RowRecord::new()
            .with("Question", "q")
            .with("OptionA", "a")
            .with("OptionC", "c")
            .with("CorrectAnswer", "2");
        let q = TableFormatParser::new().parse_row(7, &row).unwrap();
        assert_eq!(q.id, 7);
        assert_eq!(option_texts(&q), vec!["a", "c"]);
        assert_eq!(q.options[1].id, 1);
        assert_eq!(q.correct_option_index, 1);
    }

    #[test]
    fn empty_cell_falls_through_to_next_spelling() {
        let row = RowRecord::new()
            .with("Question", "")
            .with("سوال", "fallback")
            .with("OptionA", "a");
        let q = TableFormatParser::new().parse_row(1, &row).unwrap();
        assert_eq!(q.text, "fallback");
    }
}
