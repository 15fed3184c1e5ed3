//! Inline style reduction for `span` elements.
//!
//! Rich-text surfaces express formatting as inline styles
//! (`<span style="font-weight: 700">`). Only four flags survive sanitization;
//! every other declaration is discarded.

use cssparser::{ParseError, Parser, ParserInput, Token};

/// Formatting carried by a `span`'s `style` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
}

impl SpanStyle {
    /// Parse a `style` attribute value.
    ///
    /// Unknown properties and malformed declarations are skipped. Later
    /// declarations override earlier ones, as in the cascade.
    ///
    /// ```
    /// use panelmark::SpanStyle;
    ///
    /// let style = SpanStyle::parse("color: red; font-weight: 700; font-style: italic");
    /// assert!(style.bold && style.italic);
    /// assert!(!style.underline);
    /// ```
    pub fn parse(style_attr: &str) -> Self {
        let mut input = ParserInput::new(style_attr);
        let mut parser = Parser::new(&mut input);
        parse_declarations(&mut parser)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// `text-decoration` value, if any decoration is set.
    fn decoration(&self) -> Option<&'static str> {
        match (self.underline, self.strikethrough) {
            (true, true) => Some("underline line-through"),
            (true, false) => Some("underline"),
            (false, true) => Some("line-through"),
            (false, false) => None,
        }
    }

    /// Canonical declaration list, in a fixed order.
    pub fn to_css(&self) -> String {
        let mut decls = Vec::with_capacity(3);
        if self.bold {
            decls.push("font-weight: bold".to_string());
        }
        if self.italic {
            decls.push("font-style: italic".to_string());
        }
        if let Some(decoration) = self.decoration() {
            decls.push(format!("text-decoration: {decoration}"));
        }
        decls.join("; ")
    }

    /// Semantic tags equivalent to this style, outermost first.
    pub fn semantic_tags(&self) -> Vec<&'static str> {
        [
            (self.bold, "b"),
            (self.italic, "i"),
            (self.underline, "u"),
            (self.strikethrough, "s"),
        ]
        .into_iter()
        .filter_map(|(set, tag)| set.then_some(tag))
        .collect()
    }
}

fn parse_declarations<'i>(input: &mut Parser<'i, '_>) -> SpanStyle {
    let mut style = SpanStyle::default();

    loop {
        input.skip_whitespace();
        if input.is_exhausted() {
            break;
        }

        let result: Result<(), ParseError<'i, ()>> = input.try_parse(|i| {
            let property = match i.next()? {
                Token::Ident(name) => name.to_ascii_lowercase(),
                _ => return Err(i.new_custom_error(())),
            };

            i.skip_whitespace();
            match i.next()? {
                Token::Colon => {}
                _ => return Err(i.new_custom_error(())),
            }

            let mut values: Vec<Token<'i>> = Vec::new();
            loop {
                match i.next() {
                    Ok(Token::Semicolon) => break,
                    Ok(t) => values.push(t.clone()),
                    Err(_) => break,
                }
            }

            apply_property(&mut style, &property, &values);
            Ok(())
        });

        if result.is_err() {
            // Skip to the next semicolon to recover
            loop {
                match input.next() {
                    Ok(Token::Semicolon) | Err(_) => break,
                    Ok(_) => continue,
                }
            }
        }
    }

    style
}

fn apply_property(style: &mut SpanStyle, property: &str, values: &[Token<'_>]) {
    match property {
        "font-weight" => {
            if let Some(bold) = values.first().and_then(is_bold) {
                style.bold = bold;
            }
        }
        "font-style" => {
            if let Some(Token::Ident(value)) = values.first() {
                match value.to_ascii_lowercase().as_str() {
                    "italic" | "oblique" => style.italic = true,
                    "normal" => style.italic = false,
                    _ => {}
                }
            }
        }
        "text-decoration" | "text-decoration-line" => {
            let mut underline = false;
            let mut strikethrough = false;
            let mut recognized = false;
            for value in values {
                if let Token::Ident(ident) = value {
                    match ident.to_ascii_lowercase().as_str() {
                        "underline" => underline = true,
                        "line-through" => strikethrough = true,
                        "none" => {}
                        _ => continue,
                    }
                    recognized = true;
                }
            }
            if recognized {
                style.underline = underline;
                style.strikethrough = strikethrough;
            }
        }
        _ => {}
    }
}

fn is_bold(token: &Token<'_>) -> Option<bool> {
    match token {
        Token::Ident(ident) => match ident.to_ascii_lowercase().as_str() {
            "bold" | "bolder" => Some(true),
            "normal" | "lighter" => Some(false),
            _ => None,
        },
        Token::Number {
            int_value: Some(v), ..
        } => Some(*v >= 600),
        _ => None,
    }
}
