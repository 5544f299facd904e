//! Markdown and HTML decoration removal.

use std::borrow::Cow;

use super::patterns::{
    BOLD, BOLD_UNDERSCORE, HEADING_MARKER, HTML_TAG, INLINE_CODE, ITALIC, ITALIC_UNDERSCORE,
    LIST_MARKER, MAILTO, MARKDOWN_LINK, STRIKETHROUGH, WHITESPACE,
};

/// Strip Markdown/HTML decoration and collapse whitespace.
///
/// Markers are removed lexically in a fixed order (code, bold, italic,
/// underscore variants, strikethrough, links, `mailto:`, heading and list
/// markers, tags, pipes). The pass repeats until the text is stable, so the
/// function is idempotent.
pub fn sanitize(text: &str) -> String {
    let mut current = sanitize_once(text);
    loop {
        let next = sanitize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn sanitize_once(text: &str) -> String {
    let text = INLINE_CODE.replace_all(text, "${1}");
    let text = BOLD.replace_all(&text, "${1}");
    let text = ITALIC.replace_all(&text, "${1}");
    let text = BOLD_UNDERSCORE.replace_all(&text, "${1}");
    let text = ITALIC_UNDERSCORE.replace_all(&text, "${1}");
    let text = STRIKETHROUGH.replace_all(&text, "${1}");
    let text = MARKDOWN_LINK.replace_all(&text, "${1} ${2}");
    let text = MAILTO.replace_all(&text, "");
    let text = HEADING_MARKER.replace_all(text.trim(), "");
    let text = LIST_MARKER.replace_all(&text, "");
    let text = HTML_TAG.replace_all(&text, "");
    let text: Cow<'_, str> = if text.contains('|') {
        Cow::Owned(text.replace('|', " "))
    } else {
        text
    };
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_emphasis() {
        assert_eq!(sanitize("**ACME** *Inc*"), "ACME Inc");
        assert_eq!(sanitize("__王小明__ _經理_"), "王小明 經理");
        assert_eq!(sanitize("~~舊公司~~ `新公司`"), "舊公司 新公司");
        assert_eq!(sanitize("***粗斜體***"), "粗斜體");
    }

    #[test]
    fn test_links_and_mailto() {
        assert_eq!(
            sanitize("[官網](https://acme.tw)"),
            "官網 https://acme.tw"
        );
        assert_eq!(
            sanitize("[ivy@acme.tw](MAILTO: ivy@acme.tw)"),
            "ivy@acme.tw ivy@acme.tw"
        );
    }

    #[test]
    fn test_line_markers_and_tables() {
        let text = "### 公司資訊\n- 台北市\n2. 信義區\n| 欄位 | 值 |";
        assert_eq!(sanitize(text), "公司資訊 台北市 信義區 欄位 值");
        assert_eq!(sanitize("<b>ACME</b><br/>"), "ACME");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(sanitize("  台北市\n\n  信義區\t一段　"), "台北市 信義區 一段");
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize(" \n "), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "- - 雙重清單",
            "# - 標題清單",
            "- # 清單標題",
            "**_巢狀_**",
            "a_b_c@x.com",
            "| **公司** | [ACME](http://acme.tw) |",
            "1. 2. 三",
        ];
        for sample in samples {
            let once = sanitize(sample);
            assert_eq!(sanitize(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
