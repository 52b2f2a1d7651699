//! Word-by-word reveal of a fixed text.
//!
//! The text is cut into alternating runs of non-whitespace and whitespace.
//! Word runs wait [`WORD_DELAY_MS`] (or the configured delay) before showing;
//! whitespace runs show with no delay so the cadence is one beat per word.

pub const WORD_DELAY_MS: u32 = 250;

/// Whitespace as a browser regex `\s` sees it: Unicode `White_Space` plus
/// the byte-order mark, minus NEL (U+0085).
pub fn is_space(c: char) -> bool {
    c == '\u{FEFF}' || (c != '\u{85}' && c.is_whitespace())
}

/// Split `text` into maximal whitespace / non-whitespace runs.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_ws = false;
    for c in text.chars() {
        let ws = is_space(c);
        if !current.is_empty() && ws != current_ws {
            tokens.push(std::mem::take(&mut current));
        }
        current_ws = ws;
        current.push(c);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn is_blank(token: &str) -> bool {
    token.chars().all(is_space)
}

#[derive(Clone, Debug)]
pub struct Typewriter {
    text: String,
    tokens: Vec<String>,
    revealed: usize,
    delay_ms: u32,
    completion_reported: bool,
    generation: u32,
}

impl Typewriter {
    pub fn new(text: &str, delay_ms: u32) -> Self {
        Self {
            text: text.to_string(),
            tokens: tokenize(text),
            revealed: 0,
            delay_ms,
            completion_reported: false,
            generation: 0,
        }
    }

    /// Replace the text. A different text restarts the reveal from the first
    /// token and bumps the generation so timers queued for the old text are
    /// recognisably stale. Returns whether a restart happened.
    pub fn set_text(&mut self, text: &str) -> bool {
        if text == self.text {
            return false;
        }
        self.text = text.to_string();
        self.tokens = tokenize(text);
        self.revealed = 0;
        self.completion_reported = false;
        self.generation = self.generation.wrapping_add(1);
        true
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn revealed(&self) -> &[String] {
        &self.tokens[..self.revealed]
    }

    pub fn revealed_len(&self) -> usize {
        self.revealed
    }

    pub fn is_done(&self) -> bool {
        self.revealed >= self.tokens.len()
    }

    /// Delay before the next token may be revealed, or `None` when done.
    pub fn next_delay(&self) -> Option<u32> {
        let token = self.tokens.get(self.revealed)?;
        Some(if is_blank(token) { 0 } else { self.delay_ms })
    }

    /// Reveal the next token, but only if the caller's view of the reveal
    /// (`generation`, `index`) is current. Stale or repeated calls are no-ops.
    pub fn reveal(&mut self, generation: u32, index: usize) -> Option<&str> {
        if generation != self.generation || index != self.revealed || self.is_done() {
            return None;
        }
        self.revealed += 1;
        Some(self.tokens[index].as_str())
    }

    /// `true` exactly once, the first time it is asked after the last token
    /// has been revealed.
    pub fn take_completion(&mut self) -> bool {
        if self.is_done() && !self.completion_reported {
            self.completion_reported = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_keeps_whitespace_runs() {
        assert_eq!(tokenize("Merry Christmas"), vec!["Merry", " ", "Christmas"]);
        assert_eq!(tokenize("a  b\n"), vec!["a", "  ", "b", "\n"]);
        assert_eq!(tokenize(" lead"), vec![" ", "lead"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn tokenize_uses_browser_whitespace() {
        assert_eq!(tokenize("a\u{FEFF}b"), vec!["a", "\u{FEFF}", "b"]);
        assert_eq!(tokenize("a\u{85}b"), vec!["a\u{85}b"]);
        assert_eq!(tokenize("a\u{A0}\u{3000}b"), vec!["a", "\u{A0}\u{3000}", "b"]);
    }

    #[test]
    fn whitespace_has_no_delay() {
        let mut tw = Typewriter::new("Merry Christmas", 250);
        assert_eq!(tw.next_delay(), Some(250));
        assert_eq!(tw.reveal(0, 0), Some("Merry"));
        assert_eq!(tw.next_delay(), Some(0));
        assert_eq!(tw.reveal(0, 1), Some(" "));
        assert_eq!(tw.next_delay(), Some(250));
        assert_eq!(tw.reveal(0, 2), Some("Christmas"));
        assert_eq!(tw.next_delay(), None);
    }

    #[test]
    fn stale_reveals_are_ignored() {
        let mut tw = Typewriter::new("one two", 10);
        assert_eq!(tw.reveal(0, 0), Some("one"));
        // same step delivered twice
        assert_eq!(tw.reveal(0, 0), None);
        // old generation
        assert_eq!(tw.reveal(7, 1), None);
        assert_eq!(tw.revealed(), ["one"]);
    }

    #[test]
    fn new_text_restarts_from_empty() {
        let mut tw = Typewriter::new("first text", 10);
        tw.reveal(0, 0);
        assert!(!tw.set_text("first text"));
        assert_eq!(tw.revealed_len(), 1);
        assert!(tw.set_text("second"));
        assert!(tw.revealed().is_empty());
        assert_eq!(tw.generation(), 1);
        assert_eq!(tw.reveal(0, 0), None);
        assert_eq!(tw.reveal(1, 0), Some("second"));
    }

    #[test]
    fn completion_reported_once() {
        let mut tw = Typewriter::new("hi", 10);
        assert!(!tw.take_completion());
        tw.reveal(0, 0);
        assert!(tw.take_completion());
        assert!(!tw.take_completion());
    }

    #[test]
    fn empty_text_is_immediately_done() {
        let mut tw = Typewriter::new("", 10);
        assert!(tw.is_done());
        assert!(tw.take_completion());
    }
}
