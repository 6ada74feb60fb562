//! Lexical scanner for RTF markup.
//!
//! The scanner never fails: malformed escapes come out as
//! [`Token::Truncated`] and scanning continues with the next character.

/// A lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `{`
    GroupOpen,
    /// `}`
    GroupClose,
    /// `\name` or `\name-123`
    ControlWord { name: &'a str, param: Option<i32> },
    /// `\` followed by a single non-letter, e.g. `\~` or `\*`
    ControlSymbol(char),
    /// `\'hh`
    HexByte(u8),
    /// Literal text, including escaped `\\`, `\{` and `\}`
    Text(&'a str),
    /// An escape cut short by the end of input or a bad hex digit
    Truncated,
}

/// Iterator over the tokens of an RTF source.
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Byte offset of the next unread character.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Consume the rest of the current group, including its closing brace.
    ///
    /// Nested groups are counted and escaped braces are ignored. Returns
    /// `false` if the input ended before the group was closed.
    pub fn skip_group(&mut self) -> bool {
        let bytes = self.input.as_bytes();
        let mut depth = 1usize;

        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b'\\' => {
                    // Skip the escaped character so `\{` and `\}` don't count
                    self.pos += 2;
                }
                b'{' => {
                    depth += 1;
                    self.pos += 1;
                }
                b'}' => {
                    depth -= 1;
                    self.pos += 1;
                    if depth == 0 {
                        return true;
                    }
                }
                _ => self.pos += 1,
            }
        }

        self.pos = bytes.len();
        false
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn scan_escape(&mut self) -> Token<'a> {
        // self.pos points at the backslash
        let start = self.pos + 1;
        let Some(next) = self.input[start..].chars().next() else {
            self.pos = start;
            return Token::Truncated;
        };

        match next {
            '\\' | '{' | '}' => {
                self.pos = start + 1;
                Token::Text(&self.input[start..start + 1])
            }
            '\'' => self.scan_hex(start + 1),
            c if c.is_ascii_alphabetic() => self.scan_control_word(start),
            // Escaped line endings are paragraph breaks in old writers
            '\r' | '\n' => {
                self.pos = start + 1;
                Token::ControlWord {
                    name: "par",
                    param: None,
                }
            }
            c => {
                self.pos = start + c.len_utf8();
                Token::ControlSymbol(c)
            }
        }
    }

    fn scan_hex(&mut self, digits_start: usize) -> Token<'a> {
        let bytes = self.input.as_bytes();
        let hex = bytes.get(digits_start..digits_start + 2);

        let value = hex.and_then(|h| {
            let hi = (h[0] as char).to_digit(16)?;
            let lo = (h[1] as char).to_digit(16)?;
            Some((hi * 16 + lo) as u8)
        });

        match value {
            Some(byte) => {
                self.pos = digits_start + 2;
                Token::HexByte(byte)
            }
            None => {
                log::debug!("truncated hex escape at byte {}", digits_start - 2);
                self.pos = digits_start;
                Token::Truncated
            }
        }
    }

    fn scan_control_word(&mut self, name_start: usize) -> Token<'a> {
        let bytes = self.input.as_bytes();
        let mut end = name_start;
        while end < bytes.len() && bytes[end].is_ascii_alphabetic() {
            end += 1;
        }
        let name = &self.input[name_start..end];

        let mut param_end = end;
        let negative = bytes.get(param_end) == Some(&b'-');
        if negative {
            param_end += 1;
        }
        let digits_start = param_end;
        while param_end < bytes.len() && bytes[param_end].is_ascii_digit() {
            param_end += 1;
        }

        let param = if param_end > digits_start {
            let magnitude = self.input[digits_start..param_end]
                .parse::<i64>()
                .unwrap_or(i64::MAX);
            let value = if negative { -magnitude } else { magnitude };
            Some(value.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
        } else {
            // A lone '-' is not part of the word
            param_end = end;
            None
        };

        // One delimiting space belongs to the control word
        if bytes.get(param_end) == Some(&b' ') {
            param_end += 1;
        }

        self.pos = param_end;
        Token::ControlWord { name, param }
    }

    fn scan_text(&mut self) -> Token<'a> {
        let rest = self.rest();
        let len = rest
            .find(['{', '}', '\\', '\r', '\n'])
            .unwrap_or(rest.len());
        let start = self.pos;
        self.pos += len;
        Token::Text(&self.input[start..start + len])
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            let byte = *self.input.as_bytes().get(self.pos)?;
            return Some(match byte {
                b'{' => {
                    self.pos += 1;
                    Token::GroupOpen
                }
                b'}' => {
                    self.pos += 1;
                    Token::GroupClose
                }
                b'\\' => self.scan_escape(),
                // Source line endings carry no content
                b'\r' | b'\n' => {
                    self.pos += 1;
                    continue;
                }
                _ => self.scan_text(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token<'_>> {
        Scanner::new(input).collect()
    }

    #[test]
    fn test_groups_and_text() {
        assert_eq!(
            tokens("{ab}c"),
            vec![
                Token::GroupOpen,
                Token::Text("ab"),
                Token::GroupClose,
                Token::Text("c")
            ]
        );
    }

    #[test]
    fn test_control_word_with_parameter_and_delimiter() {
        assert_eq!(
            tokens("\\fs24 Hi"),
            vec![
                Token::ControlWord {
                    name: "fs",
                    param: Some(24)
                },
                Token::Text("Hi")
            ]
        );
        assert_eq!(
            tokens("\\u-3913?"),
            vec![
                Token::ControlWord {
                    name: "u",
                    param: Some(-3913)
                },
                Token::Text("?")
            ]
        );
    }

    #[test]
    fn test_only_one_space_is_consumed() {
        assert_eq!(
            tokens("\\b  x"),
            vec![
                Token::ControlWord {
                    name: "b",
                    param: None
                },
                Token::Text(" x")
            ]
        );
    }

    #[test]
    fn test_lone_minus_is_text() {
        assert_eq!(
            tokens("\\b-x"),
            vec![
                Token::ControlWord {
                    name: "b",
                    param: None
                },
                Token::Text("-x")
            ]
        );
    }

    #[test]
    fn test_escaped_delimiters() {
        assert_eq!(
            tokens("\\{\\}\\\\"),
            vec![Token::Text("{"), Token::Text("}"), Token::Text("\\")]
        );
    }

    #[test]
    fn test_hex_escape() {
        assert_eq!(tokens("\\'e9"), vec![Token::HexByte(0xE9)]);
        assert_eq!(tokens("\\'4"), vec![Token::Truncated, Token::Text("4")]);
        assert_eq!(tokens("\\'zz"), vec![Token::Truncated, Token::Text("zz")]);
    }

    #[test]
    fn test_trailing_backslash_is_truncated() {
        assert_eq!(tokens("ab\\"), vec![Token::Text("ab"), Token::Truncated]);
    }

    #[test]
    fn test_control_symbols() {
        assert_eq!(
            tokens("\\~\\*"),
            vec![Token::ControlSymbol('~'), Token::ControlSymbol('*')]
        );
    }

    #[test]
    fn test_line_endings_are_dropped() {
        assert_eq!(
            tokens("a\r\nb"),
            vec![Token::Text("a"), Token::Text("b")]
        );
    }

    #[test]
    fn test_non_ascii_text() {
        assert_eq!(
            tokens("héllo\\par"),
            vec![
                Token::Text("héllo"),
                Token::ControlWord {
                    name: "par",
                    param: None,
                },
            ]
        );
    }

    #[test]
    fn test_skip_group() {
        let mut scanner = Scanner::new("\\*\\generator x {nested \\} } y}tail");
        assert_eq!(scanner.next(), Some(Token::ControlSymbol('*')));
        assert!(scanner.skip_group());
        assert_eq!(scanner.next(), Some(Token::Text("tail")));

        let mut unterminated = Scanner::new("{never closed");
        assert!(!unterminated.skip_group());
        assert_eq!(unterminated.next(), None);
    }

    #[test]
    fn test_offset_through_mutable_reference() {
        fn advance(scanner: &mut Scanner<'_>) -> usize {
            scanner.next();
            scanner.offset()
        }

        let mut scanner = Scanner::new("\\b bold");
        assert_eq!(scanner.offset(), 0);
        assert_eq!(advance(&mut scanner), 3);
    }
}
