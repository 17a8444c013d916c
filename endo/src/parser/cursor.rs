/// Byte cursor over a single statement.
///
/// Every lexical class it recognises is ASCII, so slicing at the positions it
/// stops on always lands on a char boundary.
#[derive(Debug, Clone)]
pub(super) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Cursor { src, pos: 0 }
    }

    pub fn at_end(&self) -> bool {
        self.pos == self.src.len()
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        &self.src[start..self.pos]
    }

    pub fn skip_whitespace(&mut self) {
        self.take_while(is_space);
    }

    /// Consume `byte` if it is next.
    pub fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    pub fn eat_str(&mut self, s: &str) -> bool {
        if self.src[self.pos..].starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    /// `[A-Za-z0-9_]+`
    pub fn ident(&mut self) -> Option<&'a str> {
        non_empty(self.take_while(is_word))
    }

    /// `[0-9]+`
    pub fn digits(&mut self) -> Option<&'a str> {
        non_empty(self.take_while(|b| b.is_ascii_digit()))
    }

    /// A `quote`-delimited run with no embedded `quote`. Returns the contents.
    pub fn quoted(&mut self, quote: u8) -> Option<&'a str> {
        let save = self.pos;
        if !self.eat(quote) {
            return None;
        }
        let body = self.take_while(|b| b != quote);
        if self.eat(quote) {
            Some(body)
        } else {
            self.pos = save;
            None
        }
    }

    /// `ws* '=' ws*`
    pub fn equals(&mut self) -> bool {
        self.skip_whitespace();
        if !self.eat(b'=') {
            return false;
        }
        self.skip_whitespace();
        true
    }

    /// `'[' digits ']'`
    pub fn subscript(&mut self) -> Option<&'a str> {
        if !self.eat(b'[') {
            return None;
        }
        let index = self.digits()?;
        self.eat(b']').then_some(index)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}
