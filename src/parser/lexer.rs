use anyhow::{Result, anyhow};
use std::fmt;

/// Represents different types of tokens in the rill language
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Number(String),  // 42, 1000 (parsed to an integer by the parser, not here)
    CharLit(char),   // 'a', '\u0041'
    StrLit(String),  // "hello" (exploded into chars when materialized)
    Ident(String),   // fib, ls, acc

    // Keywords
    If,
    Then,
    Else,
    Let,
    Fn,
    For,
    In,
    True,
    False,

    // Delimiters
    LParen,   // (
    RParen,   // )
    LBracket, // [
    RBracket, // ]
    Comma,    // ,

    // Operators
    Plus,     // +
    Minus,    // -
    Star,     // *
    Slash,    // /
    Percent,  // %
    Lt,       // <
    Gt,       // >
    EqEq,     // ==
    Assign,   // =
    Arrow,    // =>
    DotDot,   // ..
    AmpAmp,   // &&
    PipePipe, // ||
    Caret,    // ^ (head)
    Dollar,   // $ (tail)

    // End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(text) => write!(f, "{}", text),
            Token::CharLit(c) => write!(f, "'{}'", c),
            Token::StrLit(s) => write!(f, "\"{}\"", s),
            Token::Ident(name) => write!(f, "{}", name),
            Token::If => write!(f, "if"),
            Token::Then => write!(f, "then"),
            Token::Else => write!(f, "else"),
            Token::Let => write!(f, "let"),
            Token::Fn => write!(f, "fn"),
            Token::For => write!(f, "for"),
            Token::In => write!(f, "in"),
            Token::True => write!(f, "true"),
            Token::False => write!(f, "false"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Comma => write!(f, ","),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Percent => write!(f, "%"),
            Token::Lt => write!(f, "<"),
            Token::Gt => write!(f, ">"),
            Token::EqEq => write!(f, "=="),
            Token::Assign => write!(f, "="),
            Token::Arrow => write!(f, "=>"),
            Token::DotDot => write!(f, ".."),
            Token::AmpAmp => write!(f, "&&"),
            Token::PipePipe => write!(f, "||"),
            Token::Caret => write!(f, "^"),
            Token::Dollar => write!(f, "$"),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// Tokenizes input strings into tokens
///
/// Only the space character is skipped between tokens; anything else that no
/// rule matches (tabs and newlines included) is an error.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    current_char: Option<char>,
}

impl Lexer {
    /// Create a new lexer for the given input
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let current_char = chars.first().copied();

        Lexer {
            input: chars,
            position: 0,
            current_char,
        }
    }

    /// Advance to the next character
    fn advance(&mut self) {
        self.position += 1;
        self.current_char = self.input.get(self.position).copied();
    }

    /// Peek at the next character without advancing
    fn peek(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    /// Read an identifier or keyword: alphabetic start, then
    /// alphanumerics/underscores
    fn read_identifier(&mut self) -> String {
        let mut result = String::new();

        while let Some(ch) = self.current_char {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        result
    }

    /// Read a run of digits; the text is kept verbatim in the token
    fn read_number(&mut self) -> String {
        let mut result = String::new();

        while let Some(ch) = self.current_char {
            if ch.is_ascii_digit() {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        result
    }

    /// Resolve one escape sequence; the leading backslash is already consumed.
    ///
    /// `\uXXXX` (four hex digits) resolves to that code point; any other
    /// escaped character resolves to the character itself.
    fn read_escape(&mut self) -> Result<char> {
        let ch = self
            .current_char
            .ok_or_else(|| anyhow!("unterminated escape sequence"))?;
        self.advance();

        if ch != 'u' {
            return Ok(ch);
        }

        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self
                .current_char
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| anyhow!("expected 4 hex digits after '\\u'"))?;
            code = code * 16 + digit;
            self.advance();
        }

        char::from_u32(code).ok_or_else(|| anyhow!("invalid unicode escape '\\u{:04x}'", code))
    }

    /// Read the contents of a quoted literal up to the closing delimiter
    fn read_delimited(&mut self, delimiter: char) -> Result<String> {
        let mut result = String::new();

        loop {
            match self.current_char {
                None => {
                    return Err(anyhow!(
                        "unterminated literal, expected a closing {}",
                        delimiter
                    ));
                }
                Some(ch) if ch == delimiter => {
                    self.advance();
                    return Ok(result);
                }
                Some('\\') => {
                    self.advance();
                    result.push(self.read_escape()?);
                }
                Some(ch) => {
                    result.push(ch);
                    self.advance();
                }
            }
        }
    }

    fn read_char_literal(&mut self) -> Result<Token> {
        let contents = self.read_delimited('\'')?;
        let mut chars = contents.chars();

        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Token::CharLit(c)),
            (None, _) => Err(anyhow!("empty character literal")),
            _ => Err(anyhow!(
                "character literal '{}' contains more than one character",
                contents
            )),
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Result<Token> {
        loop {
            match self.current_char {
                None => return Ok(Token::Eof),

                Some(' ') => self.advance(),

                Some('(') => {
                    self.advance();
                    return Ok(Token::LParen);
                }
                Some(')') => {
                    self.advance();
                    return Ok(Token::RParen);
                }
                Some('[') => {
                    self.advance();
                    return Ok(Token::LBracket);
                }
                Some(']') => {
                    self.advance();
                    return Ok(Token::RBracket);
                }
                Some(',') => {
                    self.advance();
                    return Ok(Token::Comma);
                }
                Some('+') => {
                    self.advance();
                    return Ok(Token::Plus);
                }
                Some('-') => {
                    self.advance();
                    return Ok(Token::Minus);
                }
                Some('*') => {
                    self.advance();
                    return Ok(Token::Star);
                }
                Some('/') => {
                    self.advance();
                    return Ok(Token::Slash);
                }
                Some('%') => {
                    self.advance();
                    return Ok(Token::Percent);
                }
                Some('<') => {
                    self.advance();
                    return Ok(Token::Lt);
                }
                Some('>') => {
                    self.advance();
                    return Ok(Token::Gt);
                }
                Some('^') => {
                    self.advance();
                    return Ok(Token::Caret);
                }
                Some('$') => {
                    self.advance();
                    return Ok(Token::Dollar);
                }

                Some('.') => {
                    if self.peek() == Some('.') {
                        self.advance();
                        self.advance();
                        return Ok(Token::DotDot);
                    } else {
                        return Err(anyhow!("found a single '.', did you mean '..'?"));
                    }
                }

                Some('=') => {
                    self.advance();
                    match self.current_char {
                        Some('=') => {
                            self.advance();
                            return Ok(Token::EqEq);
                        }
                        Some('>') => {
                            self.advance();
                            return Ok(Token::Arrow);
                        }
                        _ => return Ok(Token::Assign),
                    }
                }

                Some('&') => {
                    if self.peek() == Some('&') {
                        self.advance();
                        self.advance();
                        return Ok(Token::AmpAmp);
                    } else {
                        return Err(anyhow!("found a single '&', did you mean '&&'?"));
                    }
                }

                Some('|') => {
                    if self.peek() == Some('|') {
                        self.advance();
                        self.advance();
                        return Ok(Token::PipePipe);
                    } else {
                        return Err(anyhow!("found a single '|', did you mean '||'?"));
                    }
                }

                Some('\'') => {
                    self.advance();
                    return self.read_char_literal();
                }

                Some('"') => {
                    self.advance();
                    return Ok(Token::StrLit(self.read_delimited('"')?));
                }

                Some(ch) if ch.is_alphabetic() => {
                    let lexeme = self.read_identifier();
                    return Ok(match lexeme.as_str() {
                        "if" => Token::If,
                        "then" => Token::Then,
                        "else" => Token::Else,
                        "let" => Token::Let,
                        "fn" => Token::Fn,
                        "for" => Token::For,
                        "in" => Token::In,
                        "true" => Token::True,
                        "false" => Token::False,
                        _ => Token::Ident(lexeme),
                    });
                }

                Some(ch) if ch.is_ascii_digit() => {
                    return Ok(Token::Number(self.read_number()));
                }

                Some(ch) => {
                    return Err(anyhow!("Unexpected character: '{}'", ch));
                }
            }
        }
    }

    /// Tokenize the entire input into a vector of tokens (ending with `Eof`)
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token, Token::Eof);
            tokens.push(token);

            if is_eof {
                break;
            }
        }

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize().unwrap()
    }

    #[test]
    fn test_single_char_tokens() {
        assert_eq!(
            tokenize("( ) [ ] + - * / % < > , ^ $"),
            vec![
                Token::LParen,
                Token::RParen,
                Token::LBracket,
                Token::RBracket,
                Token::Plus,
                Token::Minus,
                Token::Star,
                Token::Slash,
                Token::Percent,
                Token::Lt,
                Token::Gt,
                Token::Comma,
                Token::Caret,
                Token::Dollar,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_two_char_operators() {
        assert_eq!(
            tokenize("== => = .. && ||"),
            vec![
                Token::EqEq,
                Token::Arrow,
                Token::Assign,
                Token::DotDot,
                Token::AmpAmp,
                Token::PipePipe,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            tokenize("if then else let fn for in true false fib ls_2"),
            vec![
                Token::If,
                Token::Then,
                Token::Else,
                Token::Let,
                Token::Fn,
                Token::For,
                Token::In,
                Token::True,
                Token::False,
                Token::Ident("fib".to_string()),
                Token::Ident("ls_2".to_string()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_numbers_keep_lexeme_text() {
        assert_eq!(
            tokenize("0 42 1000"),
            vec![
                Token::Number("0".to_string()),
                Token::Number("42".to_string()),
                Token::Number("1000".to_string()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_range_expression_token_sequence() {
        let tokens = tokenize("for x in [10..12]");
        assert_eq!(
            tokens,
            vec![
                Token::For,
                Token::Ident("x".to_string()),
                Token::In,
                Token::LBracket,
                Token::Number("10".to_string()),
                Token::DotDot,
                Token::Number("12".to_string()),
                Token::RBracket,
                Token::Eof,
            ]
        );

        let lexemes: Vec<String> = tokens[..tokens.len() - 1]
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(lexemes, vec!["for", "x", "in", "[", "10", "..", "12", "]"]);
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(
            tokenize("'a' '\\'' '\\u0041'"),
            vec![
                Token::CharLit('a'),
                Token::CharLit('\''),
                Token::CharLit('A'),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(
            tokenize("\"hello\" \"a\\\"b\" \"\\u0041BC\""),
            vec![
                Token::StrLit("hello".to_string()),
                Token::StrLit("a\"b".to_string()),
                Token::StrLit("ABC".to_string()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_escape_resolves_to_literal_character() {
        // anything that isn't \uXXXX resolves to the escaped character itself
        assert_eq!(tokenize("\"a\\nb\""), vec![
            Token::StrLit("anb".to_string()),
            Token::Eof
        ]);
    }

    #[test]
    fn test_lone_dot_is_an_error() {
        let result = Lexer::new("1 . 2").tokenize();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("did you mean '..'"));
    }

    #[test]
    fn test_lone_ampersand_and_pipe_are_errors() {
        assert!(Lexer::new("true & false").tokenize().is_err());
        assert!(Lexer::new("true | false").tokenize().is_err());
    }

    #[test]
    fn test_unterminated_literals() {
        assert!(Lexer::new("'a").tokenize().is_err());
        assert!(Lexer::new("\"abc").tokenize().is_err());
    }

    #[test]
    fn test_bad_char_literals() {
        assert!(Lexer::new("''").tokenize().is_err());
        assert!(Lexer::new("'ab'").tokenize().is_err());
    }

    #[test]
    fn test_only_spaces_are_skipped() {
        assert!(Lexer::new("1\t2").tokenize().is_err());
        assert!(Lexer::new("1\n2").tokenize().is_err());
    }

    #[test]
    fn test_invalid_character() {
        let result = Lexer::new("1 @ 2").tokenize();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Unexpected character")
        );
    }
}
