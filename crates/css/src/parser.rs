//! Recovering stylesheet parser.
//!
//! Grammar:
//!
//! ```text
//! stylesheet   := (selector '{' declarations '}')*
//! selector     := word (ws word)*
//! declarations := (word ':' word ';')*
//! ```
//!
//! A word is a run of ASCII alphanumerics and `# - . %`. Comments (`/* ... */`) are
//! skipped wherever whitespace is. Syntax errors never escape: a broken declaration
//! is skipped up to the next `;` (or the body ends at `}`), a broken rule is skipped
//! past the next `}`.

use crate::selector::Selector;
use crate::types::{Declarations, Rule};
use log::{debug, trace};

/// Where parsing stopped and what it wanted there. Only used for recovery logging.
#[derive(Debug)]
struct SyntaxError {
    position: usize,
    expected: &'static str,
}

type ParseResult<T> = Result<T, SyntaxError>;

struct CssParser<'src> {
    input: &'src str,
    index: usize,
}

impl<'src> CssParser<'src> {
    const fn new(input: &'src str) -> Self {
        Self { input, index: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.index).copied()
    }

    fn error(&self, expected: &'static str) -> SyntaxError {
        SyntaxError {
            position: self.index,
            expected,
        }
    }

    /// Skip whitespace and comments. An unterminated comment runs to the end of input.
    fn whitespace(&mut self) {
        loop {
            while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
                self.index = self.index.saturating_add(1);
            }
            let rest = self.input.get(self.index..).unwrap_or_default();
            if !rest.starts_with("/*") {
                return;
            }
            self.index = rest
                .get(2..)
                .and_then(|body| body.find("*/"))
                .map_or(self.input.len(), |end| self.index + 2 + end + 2);
        }
    }

    fn word(&mut self) -> ParseResult<&'src str> {
        let start = self.index;
        while self
            .peek()
            .is_some_and(|byte| byte.is_ascii_alphanumeric() || b"#-.%".contains(&byte))
        {
            self.index = self.index.saturating_add(1);
        }
        if self.index == start {
            return Err(self.error("word"));
        }
        Ok(self.input.get(start..self.index).unwrap_or_default())
    }

    fn literal(&mut self, expected: u8) -> ParseResult<()> {
        if self.peek() != Some(expected) {
            return Err(self.error(match expected {
                b':' => "':'",
                b';' => "';'",
                b'{' => "'{'",
                _ => "'}'",
            }));
        }
        self.index = self.index.saturating_add(1);
        Ok(())
    }

    fn pair(&mut self) -> ParseResult<(String, String)> {
        let property = self.word()?.to_ascii_lowercase();
        self.whitespace();
        self.literal(b':')?;
        self.whitespace();
        let value = self.word()?.to_owned();
        Ok((property, value))
    }

    /// Advance to the first byte in `stops` without consuming it.
    fn ignore_until(&mut self, stops: &[u8]) -> Option<u8> {
        while let Some(byte) = self.peek() {
            if stops.contains(&byte) {
                return Some(byte);
            }
            self.index = self.index.saturating_add(1);
        }
        None
    }

    /// Skip past the next `;` and following whitespace. Stays put on `}` or end.
    fn recover_declaration(&mut self, error: &SyntaxError) -> bool {
        debug!(
            "css: skipping declaration, expected {} at byte {}",
            error.expected, error.position
        );
        if self.ignore_until(b";}") == Some(b';') {
            self.index = self.index.saturating_add(1);
            self.whitespace();
            return true;
        }
        false
    }

    fn body(&mut self) -> Declarations {
        let mut declarations = Declarations::new();
        while self.peek().is_some_and(|byte| byte != b'}') {
            // A pair counts even if its terminating `;` is missing.
            let outcome = self.pair().and_then(|(property, value)| {
                trace!("css: {property}: {value}");
                declarations.insert(property, value);
                self.whitespace();
                self.literal(b';')?;
                self.whitespace();
                Ok(())
            });
            if let Err(error) = outcome
                && !self.recover_declaration(&error)
            {
                break;
            }
        }
        declarations
    }

    fn selector(&mut self) -> ParseResult<Selector> {
        let mut out = Selector::Tag(self.word()?.to_ascii_lowercase());
        self.whitespace();
        while self.peek().is_some_and(|byte| byte != b'{') {
            let descendant = Selector::Tag(self.word()?.to_ascii_lowercase());
            out = Selector::descendant(out, descendant);
            self.whitespace();
        }
        Ok(out)
    }

    fn rule(&mut self, source_order: u32) -> ParseResult<Rule> {
        self.whitespace();
        let selector = self.selector()?;
        self.literal(b'{')?;
        self.whitespace();
        let declarations = self.body();
        self.literal(b'}')?;
        Ok(Rule {
            selector,
            declarations,
            source_order,
        })
    }

    fn parse(&mut self, mut next_order: u32) -> (Vec<Rule>, u32) {
        let mut rules = Vec::new();
        while self.index < self.input.len() {
            match self.rule(next_order) {
                Ok(rule) => {
                    trace!("css: rule {rule}");
                    rules.push(rule);
                    next_order = next_order.saturating_add(1);
                }
                Err(error) => {
                    if self.index >= self.input.len() {
                        break;
                    }
                    debug!(
                        "css: skipping rule, expected {} at byte {}",
                        error.expected, error.position
                    );
                    if self.ignore_until(b"}").is_none() {
                        break;
                    }
                    self.index = self.index.saturating_add(1);
                    self.whitespace();
                }
            }
        }
        (rules, next_order)
    }
}

/// Parse a stylesheet. Rules are numbered from zero in source order.
pub fn parse_stylesheet(text: &str) -> Vec<Rule> {
    parse_stylesheet_with_next(text, 0).0
}

/// Parse a stylesheet numbering rules from `base_order`, returning the rules together
/// with the order the next stylesheet should start from.
pub fn parse_stylesheet_with_next(text: &str, base_order: u32) -> (Vec<Rule>, u32) {
    let (rules, next) = CssParser::new(text).parse(base_order);
    debug!("css: parsed {} rules", rules.len());
    (rules, next)
}

/// Parse the inside of a rule body, or the value of a `style` attribute.
pub fn parse_declaration_block(text: &str) -> Declarations {
    let mut parser = CssParser::new(text);
    parser.whitespace();
    parser.body()
}

/// Parse a whole string as one selector. `None` if anything is left over.
pub fn parse_selector(text: &str) -> Option<Selector> {
    let mut parser = CssParser::new(text);
    parser.whitespace();
    let selector = parser.selector().ok()?;
    (parser.index >= parser.input.len()).then_some(selector)
}

#[cfg(test)]
mod tests {
    use super::CssParser;

    #[test]
    fn comments_count_as_whitespace() {
        let mut parser = CssParser::new("  /* a */ /* b */word");
        parser.whitespace();
        assert_eq!(parser.word().ok(), Some("word"));

        let mut unterminated = CssParser::new("/* never closed");
        unterminated.whitespace();
        assert_eq!(unterminated.peek(), None);
    }
}
