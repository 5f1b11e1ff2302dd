//! `<pre><code>` to Confluence code macro conversion.
//!
//! Match grammar: `<pre><code ATTRS>BODY</code></pre>`, tags matched
//! case-insensitively, `ATTRS` anything up to the first `>`, `BODY` the shortest
//! run (across lines) up to the next `</code></pre>`. Each match is replaced by
//! a pure function of its own text, so byte-identical blocks become identical
//! macros.
//!
//! Known false negatives: `<pre>` and `<code>` separated by whitespace or
//! carrying attributes on `<pre>`. Neither shape is emitted by the Markdown pass;
//! hand-written HTML in that shape is left as-is.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConvertError;

static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<pre><code(?P<attrs>[^>]*)>(?P<body>.*?)</code></pre>")
        .expect("invalid code block regex")
});

static CODE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<pre><code\b").expect("invalid code open regex"));

static LANGUAGE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"class="language-([^"]*)""#).expect("invalid language class regex")
});

/// Language parameter used when the block has no `language-*` class.
const NO_LANGUAGE: &str = "none";

/// Visual settings written into every code macro.
#[derive(Debug, Clone)]
pub(crate) struct CodeMacroStyle {
    pub(crate) theme: String,
    pub(crate) line_numbers: bool,
}

impl Default for CodeMacroStyle {
    fn default() -> Self {
        Self {
            theme: "Midnight".to_owned(),
            line_numbers: true,
        }
    }
}

/// Replace every code block with a Confluence code macro.
pub(crate) fn convert_code_blocks(
    html: &str,
    style: &CodeMacroStyle,
) -> Result<String, ConvertError> {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;

    for caps in CODE_BLOCK.captures_iter(html) {
        let Some(whole) = caps.get(0) else { continue };
        let (attrs, body) = (&caps["attrs"], &caps["body"]);

        ensure_no_opening(&html[last..whole.start()], last)?;
        // An opening tag inside the body means an earlier block never closed
        // and the match swallowed the next one.
        if CODE_OPEN.is_match(body) {
            return Err(ConvertError::UnclosedCodeBlock {
                offset: whole.start(),
            });
        }

        let language = LANGUAGE_CLASS
            .captures(attrs)
            .and_then(|c| c.get(1))
            .map_or(NO_LANGUAGE, |m| m.as_str());

        out.push_str(&html[last..whole.start()]);
        out.push_str(&code_macro(language, body, style));
        last = whole.end();
    }

    ensure_no_opening(&html[last..], last)?;
    out.push_str(&html[last..]);
    Ok(out)
}

fn ensure_no_opening(gap: &str, offset: usize) -> Result<(), ConvertError> {
    match CODE_OPEN.find(gap) {
        Some(m) => Err(ConvertError::UnclosedCodeBlock {
            offset: offset + m.start(),
        }),
        None => Ok(()),
    }
}

/// Build a code macro around escaped HTML code content.
fn code_macro(language: &str, escaped_body: &str, style: &CodeMacroStyle) -> String {
    let mut out = String::with_capacity(escaped_body.len() + 320);
    out.push_str("<ac:structured-macro ac:name=\"code\">\n");
    writeln!(
        out,
        r#"<ac:parameter ac:name="theme">{}</ac:parameter>"#,
        style.theme
    )
    .unwrap();
    writeln!(
        out,
        r#"<ac:parameter ac:name="linenumbers">{}</ac:parameter>"#,
        style.line_numbers
    )
    .unwrap();
    writeln!(
        out,
        r#"<ac:parameter ac:name="language">{}</ac:parameter>"#,
        unescape(language)
    )
    .unwrap();
    writeln!(
        out,
        "<ac:plain-text-body><![CDATA[{}]]></ac:plain-text-body>",
        cdata_safe(&unescape(escaped_body))
    )
    .unwrap();
    out.push_str("</ac:structured-macro>");
    out
}

/// Undo the entity escaping applied by the Markdown pass.
///
/// `&amp;` goes last so `&amp;lt;` becomes the literal text `&lt;`.
fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

/// Split a CDATA terminator inside code so the section stays well-formed.
fn cdata_safe(text: &str) -> String {
    text.replace("]]>", "]]]]><![CDATA[>")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn convert(html: &str) -> Result<String, ConvertError> {
        convert_code_blocks(html, &CodeMacroStyle::default())
    }

    #[test]
    fn test_python_block() {
        let html = "<pre><code class=\"language-python\">print(1)\n</code></pre>\n";
        assert_eq!(
            convert(html).unwrap(),
            "<ac:structured-macro ac:name=\"code\">\n\
             <ac:parameter ac:name=\"theme\">Midnight</ac:parameter>\n\
             <ac:parameter ac:name=\"linenumbers\">true</ac:parameter>\n\
             <ac:parameter ac:name=\"language\">python</ac:parameter>\n\
             <ac:plain-text-body><![CDATA[print(1)\n]]></ac:plain-text-body>\n\
             </ac:structured-macro>\n"
        );
    }

    #[test]
    fn test_language_defaults_to_none() {
        let out = convert("<pre><code>x = 1\n</code></pre>").unwrap();
        assert!(out.contains(r#"<ac:parameter ac:name="language">none</ac:parameter>"#));
    }

    #[test]
    fn test_entities_unescaped_inside_macro_only() {
        let html = "<p>a &lt; b</p>\n<pre><code class=\"language-c\">if (a &lt; b &amp;&amp; c &gt; &quot;d&quot;)\n</code></pre>";
        let out = convert(html).unwrap();
        assert!(out.starts_with("<p>a &lt; b</p>\n"));
        assert!(out.contains(r#"<![CDATA[if (a < b && c > "d")"#));
    }

    #[test]
    fn test_double_escaped_entity_round_trips() {
        let out = convert("<pre><code>&amp;lt;br&amp;gt;</code></pre>").unwrap();
        assert!(out.contains("<![CDATA[&lt;br&gt;]]>"));
    }

    #[test]
    fn test_multiple_blocks_replaced_independently() {
        let html = "<pre><code class=\"language-rust\">fn a() {}\n</code></pre>\n<p>mid</p>\n<pre><code class=\"language-go\">func b() {}\n</code></pre>";
        let out = convert(html).unwrap();
        assert!(out.contains(r#"<ac:parameter ac:name="language">rust</ac:parameter>"#));
        assert!(out.contains(r#"<ac:parameter ac:name="language">go</ac:parameter>"#));
        assert!(out.contains("<p>mid</p>"));
        assert!(!out.contains("<pre>"));
    }

    #[test]
    fn test_identical_blocks_become_identical_macros() {
        let block = "<pre><code class=\"language-sh\">ls\n</code></pre>";
        let out = convert(&format!("{block}\n<p>x</p>\n{block}")).unwrap();
        let (first, second) = out.split_once("\n<p>x</p>\n").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_uppercase_tags_matched() {
        let out = convert("<PRE><CODE>X</CODE></PRE>").unwrap();
        assert!(out.contains("<![CDATA[X]]>"));
    }

    #[test]
    fn test_cdata_terminator_split() {
        let out = convert("<pre><code>a]]&gt;b</code></pre>").unwrap();
        assert!(out.contains("<![CDATA[a]]]]><![CDATA[>b]]>"));
    }

    #[test]
    fn test_unclosed_block_is_error() {
        let html = "<p>x</p><pre><code>never closed";
        assert_eq!(
            convert(html),
            Err(ConvertError::UnclosedCodeBlock { offset: 8 })
        );
    }

    #[test]
    fn test_unclosed_block_before_closed_block_is_error() {
        let html = "<pre><code>open\n<pre><code>inner</code></pre>";
        assert!(matches!(
            convert(html),
            Err(ConvertError::UnclosedCodeBlock { .. })
        ));
    }

    #[test]
    fn test_custom_style() {
        let style = CodeMacroStyle {
            theme: "Eclipse".to_owned(),
            line_numbers: false,
        };
        let out = convert_code_blocks("<pre><code>x</code></pre>", &style).unwrap();
        assert!(out.contains(r#"<ac:parameter ac:name="theme">Eclipse</ac:parameter>"#));
        assert!(out.contains(r#"<ac:parameter ac:name="linenumbers">false</ac:parameter>"#));
    }
}
