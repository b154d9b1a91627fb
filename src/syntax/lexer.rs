use crate::syntax::source::SourceFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Number,
    Str,
    Char,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Dot,
    /// Any other single punctuation byte (`=`, `<`, `>`, `+`, ...).
    Op,
}

/// An atomic lexical unit, identified by its byte span in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn text<'a>(&self, source: &'a SourceFile) -> &'a [u8] {
        &source.as_bytes()[self.start..self.end]
    }

    /// The single punctuation byte of an `Op` token.
    pub fn op_byte(&self, source: &SourceFile) -> u8 {
        source.as_bytes()[self.start]
    }
}

/// Tokenize C# source. Comments and whitespace are skipped; string, char,
/// and interpolated-string literals are single opaque tokens, so delimiters
/// inside them never leak into the token stream. The scanner never fails:
/// unterminated literals and comments extend to end of input, and bytes it
/// does not recognize become `Op` tokens.
pub fn tokenize(source: &SourceFile) -> Vec<Token> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        // Comments
        if b == b'/' && i + 1 < bytes.len() {
            match bytes[i + 1] {
                b'/' => {
                    while i < bytes.len() && bytes[i] != b'\n' {
                        i += 1;
                    }
                    continue;
                }
                b'*' => {
                    i += 2;
                    while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                        i += 1;
                    }
                    i = (i + 2).min(bytes.len());
                    continue;
                }
                _ => {}
            }
        }

        // String prefixes: @"...", $"...", $@"...", @$"..."
        if b == b'@' || b == b'$' {
            let mut j = i + 1;
            let mut verbatim = b == b'@';
            if j < bytes.len() && (bytes[j] == b'@' || bytes[j] == b'$') && bytes[j] != b {
                verbatim = verbatim || bytes[j] == b'@';
                j += 1;
            }
            if j < bytes.len() && bytes[j] == b'"' {
                let end = if verbatim {
                    scan_verbatim_string(bytes, j + 1)
                } else {
                    scan_quoted(bytes, j + 1, b'"')
                };
                tokens.push(Token {
                    kind: TokenKind::Str,
                    start: i,
                    end,
                });
                i = end;
                continue;
            }
            // @identifier (verbatim identifier); a lone $ falls through to Op
            if b == b'@' && j < bytes.len() && is_ident_start(bytes[j]) {
                let end = scan_ident(bytes, j);
                tokens.push(Token {
                    kind: TokenKind::Ident,
                    start: i,
                    end,
                });
                i = end;
                continue;
            }
        }

        if b == b'"' {
            let end = scan_quoted(bytes, i + 1, b'"');
            tokens.push(Token {
                kind: TokenKind::Str,
                start: i,
                end,
            });
            i = end;
            continue;
        }

        if b == b'\'' {
            let end = scan_quoted(bytes, i + 1, b'\'');
            tokens.push(Token {
                kind: TokenKind::Char,
                start: i,
                end,
            });
            i = end;
            continue;
        }

        if is_ident_start(b) {
            let end = scan_ident(bytes, i);
            tokens.push(Token {
                kind: TokenKind::Ident,
                start: i,
                end,
            });
            i = end;
            continue;
        }

        if b.is_ascii_digit() {
            let end = scan_number(bytes, i);
            tokens.push(Token {
                kind: TokenKind::Number,
                start: i,
                end,
            });
            i = end;
            continue;
        }

        let kind = match b {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b'.' => TokenKind::Dot,
            _ => TokenKind::Op,
        };
        tokens.push(Token {
            kind,
            start: i,
            end: i + 1,
        });
        i += 1;
    }

    tokens
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn scan_ident(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len() && is_ident_continue(bytes[i]) {
        i += 1;
    }
    i
}

/// Digits plus letters and underscores (hex, suffixes, separators). A `.` is
/// consumed only when followed by a digit, so `1.Equals` lexes as a number,
/// a dot, and an identifier.
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_alphanumeric() || b == b'_' {
            i += 1;
        } else if b == b'.' && i + 1 < bytes.len() && bytes[i + 1].is_ascii_digit() {
            i += 1;
        } else {
            break;
        }
    }
    i
}

/// Scan a `\`-escaped literal from just past the opening quote to just past
/// the closing one.
fn scan_quoted(bytes: &[u8], mut i: usize, quote: u8) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i = (i + 2).min(bytes.len()),
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    i
}

/// Verbatim strings escape `"` by doubling it; backslash is literal.
fn scan_verbatim_string(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() {
        if bytes[i] == b'"' {
            if i + 1 < bytes.len() && bytes[i + 1] == b'"' {
                i += 2;
            } else {
                return i + 1;
            }
        } else {
            i += 1;
        }
    }
    i
}
