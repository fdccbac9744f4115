//! logos-based markup tokenizer.
//!
//! Markup is lexed in two modes that the tokenizer switches between with
//! [`Lexer::morph`]:
//!
//! - [`ContentToken`] between tags: text runs, comments, closing tags, and the
//!   start of an opening tag (`<name`).
//! - [`TagToken`] inside an opening tag: attribute names, `=`, quoted or bare
//!   values, and the `>` / `/>` terminators.
//!
//! The flattened output is a list of [`MarkupToken`]s the parser turns into
//! light-DOM nodes.

use logos::{Lexer, Logos};

use super::MarkupError;

// ---------------------------------------------------------------------------
// Content mode
// ---------------------------------------------------------------------------

/// Token produced between tags.
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum ContentToken {
    /// `<!-- ... -->`, consumed whole by the callback.
    #[token("<!--", skip_comment)]
    Comment,

    /// `</name>` with optional trailing whitespace before `>`.
    #[regex(r"</[a-zA-Z][a-zA-Z0-9-]*[ \t\n\r\f]*>")]
    CloseTag,

    /// `<name`: switches the lexer into tag mode.
    #[regex(r"<[a-zA-Z][a-zA-Z0-9-]*")]
    OpenTagStart,

    /// A run of character data.
    #[regex(r"[^<]+")]
    Text,
}

fn skip_comment(lex: &mut Lexer<ContentToken>) -> bool {
    match lex.remainder().find("-->") {
        Some(end) => {
            lex.bump(end + 3);
            true
        }
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Tag mode
// ---------------------------------------------------------------------------

/// Token produced inside an opening tag.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum TagToken {
    /// `/>`
    #[token("/>")]
    SelfClose,

    /// `>`
    #[token(">")]
    End,

    /// `=`
    #[token("=")]
    Equals,

    /// `"value"`
    #[regex(r#""[^"]*""#)]
    DoubleQuoted,

    /// `'value'`
    #[regex(r"'[^']*'")]
    SingleQuoted,

    /// Attribute name or unquoted value.
    #[regex(r#"[^ \t\n\r\f"'=<>/]+"#)]
    Word,
}

// ---------------------------------------------------------------------------
// Flattened tokens
// ---------------------------------------------------------------------------

/// A lexed markup construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupToken {
    /// Character data with entities decoded.
    Text(String),
    /// An opening tag with its attributes in source order.
    Open {
        name: String,
        attributes: Vec<(String, String)>,
        self_closing: bool,
    },
    /// A closing tag.
    Close(String),
}

/// Tokenize a markup fragment.
pub fn tokenize(input: &str) -> Result<Vec<MarkupToken>, MarkupError> {
    let mut tokens = Vec::new();
    let mut content = ContentToken::lexer(input);

    while let Some(result) = content.next() {
        match result {
            Ok(ContentToken::Comment) => {}
            Ok(ContentToken::Text) => tokens.push(MarkupToken::Text(decode_entities(content.slice()))),
            Ok(ContentToken::CloseTag) => {
                let name = content.slice()[2..]
                    .trim_end_matches('>')
                    .trim_end()
                    .to_ascii_lowercase();
                tokens.push(MarkupToken::Close(name));
            }
            Ok(ContentToken::OpenTagStart) => {
                let name = content.slice()[1..].to_ascii_lowercase();
                let mut tag: Lexer<TagToken> = content.morph();
                let (attributes, self_closing) = lex_tag(&mut tag, &name)?;
                tokens.push(MarkupToken::Open { name, attributes, self_closing });
                content = tag.morph();
            }
            Err(()) => {
                if content.slice().starts_with("<!--") {
                    return Err(MarkupError::UnterminatedComment);
                }
                // A lone `<` that does not start a tag is character data.
                tokens.push(MarkupToken::Text(content.slice().to_owned()));
            }
        }
    }

    Ok(merge_text(tokens))
}

/// Lex attributes until `>` or `/>`.
fn lex_tag(
    lex: &mut Lexer<TagToken>,
    tag: &str,
) -> Result<(Vec<(String, String)>, bool), MarkupError> {
    let mut attributes: Vec<(String, String)> = Vec::new();
    let mut pending: Option<String> = None;
    let mut awaiting_value = false;

    while let Some(result) = lex.next() {
        match result {
            Ok(TagToken::Word) => {
                if awaiting_value {
                    let name = pending.take().unwrap_or_default();
                    attributes.push((name, decode_entities(lex.slice())));
                    awaiting_value = false;
                } else {
                    if let Some(flag) = pending.take() {
                        attributes.push((flag, String::new()));
                    }
                    pending = Some(lex.slice().to_ascii_lowercase());
                }
            }
            Ok(TagToken::Equals) => {
                if pending.is_none() || awaiting_value {
                    return Err(MarkupError::StrayEquals(tag.to_owned()));
                }
                awaiting_value = true;
            }
            Ok(TagToken::DoubleQuoted | TagToken::SingleQuoted) => {
                let slice = lex.slice();
                let inner = &slice[1..slice.len() - 1];
                if awaiting_value {
                    let name = pending.take().unwrap_or_default();
                    attributes.push((name, decode_entities(inner)));
                    awaiting_value = false;
                } else {
                    tracing::warn!(tag, value = inner, "skipping quoted value without attribute name");
                }
            }
            Ok(terminator @ (TagToken::End | TagToken::SelfClose)) => {
                if let Some(name) = pending.take() {
                    attributes.push((name, String::new()));
                }
                return Ok((attributes, terminator == TagToken::SelfClose));
            }
            Err(()) => {
                tracing::warn!(tag, token = lex.slice(), "skipping unrecognized token in tag");
            }
        }
    }

    Err(MarkupError::UnterminatedTag(tag.to_owned()))
}

/// Join adjacent text tokens (a stray `<` splits a text run in two).
fn merge_text(tokens: Vec<MarkupToken>) -> Vec<MarkupToken> {
    let mut out: Vec<MarkupToken> = Vec::with_capacity(tokens.len());
    for token in tokens {
        match (out.last_mut(), token) {
            (Some(MarkupToken::Text(prev)), MarkupToken::Text(next)) => prev.push_str(&next),
            (_, token) => out.push(token),
        }
    }
    out
}

/// Decode the handful of character references markup authors actually use.
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_owned();
    }
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after.find(';').and_then(|semi| {
            let name = &after[..semi];
            let ch = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" | "#39" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ if name.starts_with("#x") || name.starts_with("#X") => {
                    u32::from_str_radix(&name[2..], 16).ok().and_then(char::from_u32)
                }
                _ if name.starts_with('#') => name[1..].parse().ok().and_then(char::from_u32),
                _ => None,
            };
            ch.map(|c| (c, semi))
        });
        match decoded {
            Some((ch, semi)) => {
                out.push(ch);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn open(name: &str, attrs: &[(&str, &str)], self_closing: bool) -> MarkupToken {
        MarkupToken::Open {
            name: name.to_owned(),
            attributes: attrs
                .iter()
                .map(|(n, v)| ((*n).to_owned(), (*v).to_owned()))
                .collect(),
            self_closing,
        }
    }

    #[test]
    fn simple_element() {
        let tokens = tokenize(r#"<aui-button variant="primary">Save</aui-button>"#).unwrap();
        assert_eq!(
            tokens,
            vec![
                open("aui-button", &[("variant", "primary")], false),
                MarkupToken::Text("Save".into()),
                MarkupToken::Close("aui-button".into()),
            ]
        );
    }

    #[test]
    fn boolean_and_unquoted_attributes() {
        let tokens = tokenize("<aui-carousel loop autoplay interval=3000 index='1'>").unwrap();
        assert_eq!(
            tokens,
            vec![open(
                "aui-carousel",
                &[("loop", ""), ("autoplay", ""), ("interval", "3000"), ("index", "1")],
                false
            )]
        );
    }

    #[test]
    fn self_closing_tag() {
        let tokens = tokenize(r#"<aui-tab value="a" />"#).unwrap();
        assert_eq!(tokens, vec![open("aui-tab", &[("value", "a")], true)]);
    }

    #[test]
    fn names_are_lowercased() {
        let tokens = tokenize(r#"<AUI-Tab Value="A"></AUI-TAB >"#).unwrap();
        assert_eq!(
            tokens,
            vec![open("aui-tab", &[("value", "A")], false), MarkupToken::Close("aui-tab".into())]
        );
    }

    #[test]
    fn comments_are_dropped() {
        let tokens = tokenize("<p><!-- note -->hi</p>").unwrap();
        assert_eq!(
            tokens,
            vec![open("p", &[], false), MarkupToken::Text("hi".into()), MarkupToken::Close("p".into())]
        );
    }

    #[test]
    fn unterminated_comment_is_error() {
        assert_eq!(tokenize("<!-- oops"), Err(MarkupError::UnterminatedComment));
    }

    #[test]
    fn unterminated_tag_is_error() {
        assert_eq!(
            tokenize(r#"<aui-menu open"#),
            Err(MarkupError::UnterminatedTag("aui-menu".into()))
        );
    }

    #[test]
    fn stray_equals_is_error() {
        assert_eq!(tokenize("<p =x>"), Err(MarkupError::StrayEquals("p".into())));
    }

    #[test]
    fn lone_less_than_is_text() {
        let tokens = tokenize("a < b").unwrap();
        assert_eq!(tokens, vec![MarkupToken::Text("a < b".into())]);
    }

    #[test]
    fn json_attribute_in_single_quotes() {
        let tokens = tokenize(r#"<aui-table columns='[{"key":"name"}]'></aui-table>"#).unwrap();
        assert_eq!(tokens[0], open("aui-table", &[("columns", r#"[{"key":"name"}]"#)], false));
    }

    #[test]
    fn entities_decoded() {
        assert_eq!(decode_entities("a &amp; b &lt;c&gt; &#65;&#x42; &bogus;"), "a & b <c> AB &bogus;");
        assert_eq!(decode_entities("plain"), "plain");
    }
}
