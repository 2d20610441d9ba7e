//! Directive tokenizer.
//!
//! A line may contain any number of bracket directives (`[name key=value]`)
//! and may itself be an at-directive (`@name key=value`). Attribute values are
//! `"double"`, `'single'` or bare tokens that end at whitespace or `]`.
//!
//! Tokenizing never fails. Text that does not follow the grammar yields fewer
//! attributes or no directive at all: an unterminated quoted value drops that
//! attribute and everything after it, and an unterminated bracket runs to the
//! end of the line.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeValue<'a> {
    pub text: &'a str,
    pub quoted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub key: &'a str,
    pub value: Option<AttributeValue<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    pub name: &'a str,
    pub attributes: Vec<Attribute<'a>>,
}

impl<'a> Directive<'a> {
    pub fn attribute(&self, key: &str) -> Option<&Attribute<'a>> {
        self.attributes.iter().find(|attribute| attribute.key == key)
    }

    /// Non-empty value of `key`, quoted or bare.
    pub fn value(&self, key: &str) -> Option<&'a str> {
        self.attribute(key)
            .and_then(|attribute| attribute.value)
            .map(|value| value.text)
            .filter(|text| !text.is_empty())
    }

    /// Non-empty value of `key`, only when it was written in quotes.
    pub fn quoted_value(&self, key: &str) -> Option<&'a str> {
        self.attribute(key)
            .and_then(|attribute| attribute.value)
            .filter(|value| value.quoted)
            .map(|value| value.text)
            .filter(|text| !text.is_empty())
    }
}

pub fn parse_directives(content: &str) -> Vec<Directive<'_>> {
    let mut directives = Vec::new();
    let mut offset = 0usize;

    if let Some(body) = content.strip_prefix('@') {
        let (directive, consumed) = parse_directive(body);
        directives.extend(directive);
        offset = 1 + consumed;
    }

    while let Some(found) = content[offset..].find('[') {
        let start = offset + found + 1;
        let (directive, consumed) = parse_directive(&content[start..]);
        directives.extend(directive);
        offset = start + consumed;
    }

    directives
}

/// Parses one directive body (the text after `[` or `@`). Returns the
/// directive, if it has a name, and the number of bytes consumed including a
/// closing `]`.
fn parse_directive(text: &str) -> (Option<Directive<'_>>, usize) {
    let bytes = text.as_bytes();
    let len = bytes.len();

    let mut pos = skip_whitespace(bytes, 0);
    let name_start = pos;
    while pos < len && !is_name_terminator(bytes[pos]) {
        pos += 1;
    }
    let name = &text[name_start..pos];
    if name.is_empty() {
        return (None, 0);
    }

    let mut directive = Directive {
        name,
        attributes: Vec::new(),
    };

    loop {
        pos = skip_whitespace(bytes, pos);
        if pos >= len {
            return (Some(directive), len);
        }
        match bytes[pos] {
            b']' => return (Some(directive), pos + 1),
            // Another directive starts before this one was closed.
            b'[' => return (Some(directive), pos),
            _ => {}
        }

        let key_start = pos;
        while pos < len && !is_key_terminator(bytes[pos]) {
            pos += 1;
        }
        let key = &text[key_start..pos];
        if key.is_empty() {
            // stray '='
            pos += 1;
            continue;
        }

        if pos >= len || bytes[pos] != b'=' {
            directive.attributes.push(Attribute { key, value: None });
            continue;
        }
        pos += 1;

        if pos < len && (bytes[pos] == b'"' || bytes[pos] == b'\'') {
            let quote = bytes[pos] as char;
            let value_start = pos + 1;
            let Some(found) = text[value_start..].find(quote) else {
                return (Some(directive), len);
            };
            directive.attributes.push(Attribute {
                key,
                value: Some(AttributeValue {
                    text: &text[value_start..value_start + found],
                    quoted: true,
                }),
            });
            pos = value_start + found + 1;
        } else {
            let value_start = pos;
            while pos < len && !bytes[pos].is_ascii_whitespace() && bytes[pos] != b']' {
                pos += 1;
            }
            directive.attributes.push(Attribute {
                key,
                value: Some(AttributeValue {
                    text: &text[value_start..pos],
                    quoted: false,
                }),
            });
        }
    }
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

fn is_name_terminator(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == b']' || byte == b'['
}

fn is_key_terminator(byte: u8) -> bool {
    is_name_terminator(byte) || byte == b'='
}
