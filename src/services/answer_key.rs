//! 答案标记解析
//!
//! 两种格式共用的字母序号表和答案指示值分类

use std::sync::LazyLock;

use phf::phf_map;
use regex::Regex;

/// 波斯字母序号 → 选项位置
static ORDINAL_LETTERS: phf::Map<&'static str, usize> = phf_map! {
    "الف" => 0,
    "ا" => 0,
    "ب" => 1,
    "ج" => 2,
    "د" => 3,
};

static SINGLE_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]$").unwrap());
static SINGLE_ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:الف|[\p{Arabic}&&\p{L}])$").unwrap());
static SINGLE_LATIN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-dA-D]$").unwrap());

/// 字母序号对应的位置，未知字母返回 `None`
pub fn ordinal_index(letter: &str) -> Option<usize> {
    ORDINAL_LETTERS.get(letter.trim()).copied()
}

/// 文本格式的答案字母：未知字母默认第一个选项
pub fn letter_to_index(letter: &str) -> usize {
    ordinal_index(letter).unwrap_or(0)
}

/// 表格格式"正确答案"列的值分类
///
/// - 单个数字：从1开始的序号（`0` 视为第一个选项）
/// - 单个波斯字母：查字母表，未知字母为 0
/// - 单个拉丁字母 a-d：按字母偏移
///
/// 其它值返回 `None`，由调用方使用默认值
pub fn classify_indicator(value: &str) -> Option<usize> {
    let value = value.trim();

    if SINGLE_DIGIT.is_match(value) {
        let digit = value.parse::<usize>().ok()?;
        return Some(digit.saturating_sub(1));
    }
    if SINGLE_ORDINAL.is_match(value) {
        return Some(letter_to_index(value));
    }
    if SINGLE_LATIN.is_match(value) {
        let c = value.chars().next()?.to_ascii_lowercase();
        return Some((c as u8 - b'a') as usize);
    }
    None
}

/// 把序号限制在 `[0, option_count)` 内
pub fn clamp_index(index: usize, option_count: usize) -> usize {
    index.min(option_count.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinal_letters_map_to_positions() {
        assert_eq!(letter_to_index("الف"), 0);
        assert_eq!(letter_to_index("ا"), 0);
        assert_eq!(letter_to_index("ب"), 1);
        assert_eq!(letter_to_index("ج"), 2);
        assert_eq!(letter_to_index("د"), 3);
        assert_eq!(letter_to_index("ه"), 0);
        assert_eq!(ordinal_index("ه"), None);
    }

    #[test]
    fn digits_are_one_based() {
        assert_eq!(classify_indicator("1"), Some(0));
        assert_eq!(classify_indicator(" 3 "), Some(2));
        assert_eq!(classify_indicator("0"), Some(0));
        assert_eq!(classify_indicator("12"), None);
    }

    #[test]
    fn latin_letters_use_alphabet_offset() {
        assert_eq!(classify_indicator("a"), Some(0));
        assert_eq!(classify_indicator("B"), Some(1));
        assert_eq!(classify_indicator("d"), Some(3));
        assert_eq!(classify_indicator("e"), None);
    }

    #[test]
    fn persian_letters_use_ordinal_table() {
        assert_eq!(classify_indicator("ج"), Some(2));
        assert_eq!(classify_indicator("الف"), Some(0));
        assert_eq!(classify_indicator("ی"), Some(0));
    }

    #[test]
    fn unrecognized_values_are_none() {
        assert_eq!(classify_indicator("گزینه ب"), None);
        assert_eq!(classify_indicator(""), None);
        assert_eq!(classify_indicator("۲"), None);
    }

    #[test]
    fn clamp_keeps_index_in_range() {
        assert_eq!(clamp_index(4, 3), 2);
        assert_eq!(clamp_index(1, 3), 1);
        assert_eq!(clamp_index(0, 1), 0);
    }
}
