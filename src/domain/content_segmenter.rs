//! 内容分段器
//!
//! 按内容类型把项目文本切分为片段：
//! - 诗歌 (poem): 每个非空行为一个片段（Verse）
//! - 故事 (story): 每个非空段落为一个片段（Paragraph），段落之间至少两个换行

use std::sync::LazyLock;

use regex::Regex;

use super::project::ContentType;

/// 段落分隔：两个及以上连续换行
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("paragraph break pattern is valid"));

/// 诗歌片段之间的规范分隔符
pub const VERSE_SEPARATOR: &str = "\n";

/// 故事片段之间的规范分隔符
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// 对文本进行分段
///
/// 分段策略：
/// 1. 诗歌按单个 `\n` 切分，故事按连续两个以上 `\n` 切分
/// 2. 每个片段去掉首尾空白
/// 3. 丢弃空白片段，保持原有顺序
///
/// 空文本返回空列表，永不出错。
pub fn tokenize(content: &str, content_type: ContentType) -> Vec<String> {
    if content.is_empty() {
        return Vec::new();
    }

    if content_type.is_poem() {
        keep_non_blank(content.split('\n'))
    } else {
        keep_non_blank(PARAGRAPH_BREAK.split(content))
    }
}

/// 空白之外还去掉 BOM（U+FEFF）
fn trim_segment(piece: &str) -> &str {
    piece.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

fn keep_non_blank<'a>(pieces: impl Iterator<Item = &'a str>) -> Vec<String> {
    pieces
        .map(trim_segment)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// 片段数量
pub fn segment_count(content: &str, content_type: ContentType) -> usize {
    tokenize(content, content_type).len()
}

/// 内容类型对应的规范分隔符
pub fn separator(content_type: ContentType) -> &'static str {
    if content_type.is_poem() {
        VERSE_SEPARATOR
    } else {
        PARAGRAPH_SEPARATOR
    }
}

/// 用规范分隔符重新拼接片段
///
/// `tokenize(join_segments(tokenize(x)))` 与 `tokenize(x)` 相同。
pub fn join_segments<S: AsRef<str>>(segments: &[S], content_type: ContentType) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(separator(content_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poem_splits_on_single_newline() {
        let segments = tokenize("Roses are red\nViolets are blue\n\nSugar is sweet", ContentType::Poem);
        assert_eq!(
            segments,
            vec!["Roses are red", "Violets are blue", "Sugar is sweet"]
        );
    }

    #[test]
    fn test_poem_trims_lines_and_drops_blank_ones() {
        let segments = tokenize("  first  \n   \n\tsecond\r\n", ContentType::Poem);
        assert_eq!(segments, vec!["first", "second"]);
    }

    #[test]
    fn test_bom_only_lines_are_blank() {
        assert_eq!(tokenize("a\n\u{feff}\nb", ContentType::Poem), vec!["a", "b"]);
        assert_eq!(
            tokenize("\u{feff}Once upon a time\n\n \u{feff} ", ContentType::Story),
            vec!["Once upon a time"]
        );
    }

    #[test]
    fn test_story_splits_on_paragraph_breaks_only() {
        let text = "It was a dark night.\nThe wind howled.\n\nMorning came.\n\n\n\nThe end.";
        let segments = tokenize(text, ContentType::Story);
        assert_eq!(
            segments,
            vec![
                "It was a dark night.\nThe wind howled.",
                "Morning came.",
                "The end."
            ]
        );
    }

    #[test]
    fn test_story_excludes_whitespace_only_paragraphs() {
        assert_eq!(tokenize("a\n\n   \n\nb", ContentType::Story), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_content_yields_no_segments() {
        assert!(tokenize("", ContentType::Story).is_empty());
        assert!(tokenize("", ContentType::Poem).is_empty());
        assert!(tokenize("  \n\n \n", ContentType::Story).is_empty());
    }

    #[test]
    fn test_rejoin_is_idempotent() {
        let samples = [
            ("one\n\n\ntwo  \n\n three\nstill three", ContentType::Story),
            ("\n line a\n\n\nline b \n  \nline c\n", ContentType::Poem),
        ];

        for (text, content_type) in samples {
            let first = tokenize(text, content_type);
            let rejoined = join_segments(&first, content_type);
            assert_eq!(tokenize(&rejoined, content_type), first);
        }
    }

    #[test]
    fn test_segment_count_matches_tokenize() {
        let text = "a\nb\nc";
        assert_eq!(segment_count(text, ContentType::Poem), 3);
        assert_eq!(segment_count(text, ContentType::Story), 1);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let text = String::from("keep\n\nme");
        let _ = tokenize(&text, ContentType::Story);
        assert_eq!(text, "keep\n\nme");
    }
}
