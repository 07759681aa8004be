//! Character decoding and tokenizing of SGF input.

use std::io::{self, Read};

use encoding_rs::{Decoder, Encoding};

use super::error::{Location, SgfError};

const CHUNK_SIZE: usize = 8192;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Open,
    Close,
    Semicolon,
    /// Property identifier, uppercased.
    Ident(String),
    Other(char),
    Eof,
}

/// Decodes a byte stream chunk by chunk and splits it into tokens,
/// tracking the exact line and column.
pub(crate) struct Lexer<R> {
    input: R,
    decoder: Decoder,
    raw: Vec<u8>,
    text: String,
    pos: usize,
    finished: bool,
    bytes_read: u64,
    name: Option<String>,
    line: u32,
    column: u32,
    peeked: Option<Token>,
}

impl<R: Read> Lexer<R> {
    pub fn new(input: R, encoding: &'static Encoding, name: Option<String>) -> Self {
        Lexer {
            input,
            decoder: encoding.new_decoder(),
            raw: vec![0; CHUNK_SIZE],
            text: String::new(),
            pos: 0,
            finished: false,
            bytes_read: 0,
            name,
            line: 1,
            column: 0,
            peeked: None,
        }
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    pub fn location(&self) -> Location {
        Location {
            name: self.name.clone(),
            line: self.line,
            column: self.column.max(1),
        }
    }

    pub fn structural(&self, message: impl Into<String>) -> SgfError {
        SgfError::Structural {
            location: self.location(),
            message: message.into(),
        }
    }

    pub fn semantic(&self, message: impl Into<String>) -> SgfError {
        SgfError::Semantic {
            location: self.location(),
            message: message.into(),
        }
    }

    pub fn next_token(&mut self) -> Result<Token, SgfError> {
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }
        self.skip_whitespace()?;
        let Some(c) = self.next_char()? else {
            return Ok(Token::Eof);
        };
        let token = match c {
            '(' => Token::Open,
            ')' => Token::Close,
            ';' => Token::Semicolon,
            c if c.is_ascii_alphabetic() => {
                let mut ident = String::new();
                ident.push(c.to_ascii_uppercase());
                while let Some(c) = self.peek_char()?
                    && c.is_ascii_alphabetic()
                {
                    self.next_char()?;
                    ident.push(c.to_ascii_uppercase());
                }
                Token::Ident(ident)
            }
            c => Token::Other(c),
        };
        Ok(token)
    }

    pub fn peek_token(&mut self) -> Result<Token, SgfError> {
        let token = self.next_token()?;
        self.peeked = Some(token.clone());
        Ok(token)
    }

    /// Read the bracketed values following a property identifier.
    pub fn read_values(&mut self) -> Result<Vec<String>, SgfError> {
        debug_assert!(self.peeked.is_none());
        let mut values = Vec::new();
        loop {
            self.skip_whitespace()?;
            if self.peek_char()? != Some('[') {
                return Ok(values);
            }
            self.next_char()?;
            values.push(self.read_value()?);
        }
    }

    /// Content up to the closing bracket. A backslash keeps the next
    /// character, whatever it is.
    fn read_value(&mut self) -> Result<String, SgfError> {
        let mut value = String::new();
        loop {
            let c = self
                .next_char()?
                .ok_or_else(|| self.structural("Property value incomplete"))?;
            match c {
                ']' => return Ok(value),
                '\\' => {
                    let escaped = self
                        .next_char()?
                        .ok_or_else(|| self.structural("Property value incomplete"))?;
                    value.push(escaped);
                }
                c => value.push(c),
            }
        }
    }

    fn skip_whitespace(&mut self) -> Result<(), SgfError> {
        while let Some(c) = self.peek_char()?
            && c.is_whitespace()
        {
            self.next_char()?;
        }
        Ok(())
    }

    fn peek_char(&mut self) -> Result<Option<char>, SgfError> {
        if !self.fill()? {
            return Ok(None);
        }
        Ok(self.text[self.pos..].chars().next())
    }

    fn next_char(&mut self) -> Result<Option<char>, SgfError> {
        if !self.fill()? {
            return Ok(None);
        }
        let Some(c) = self.text[self.pos..].chars().next() else {
            return Ok(None);
        };
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Ok(Some(c))
    }

    /// Make sure decoded text is available. Returns false at end of input.
    fn fill(&mut self) -> Result<bool, SgfError> {
        while self.pos >= self.text.len() {
            if self.finished {
                return Ok(false);
            }
            let n = loop {
                match self.input.read(&mut self.raw) {
                    Ok(n) => break n,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(SgfError::Io(e)),
                }
            };
            self.bytes_read += n as u64;
            let last = n == 0;
            self.text.clear();
            self.pos = 0;
            let needed = self
                .decoder
                .max_utf8_buffer_length(n)
                .ok_or(SgfError::OutOfMemory)?;
            self.text
                .try_reserve(needed)
                .map_err(|_| SgfError::OutOfMemory)?;
            let _ = self
                .decoder
                .decode_to_string(&self.raw[..n], &mut self.text, last);
            self.finished = last;
        }
        Ok(true)
    }
}
