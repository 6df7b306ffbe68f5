// Answer entry buffer

/// Text shown when nothing has been typed
const EMPTY_ANSWER: &str = "0";

/// Digits typed so far for the current problem
///
/// Mirrors a calculator display: it never shows an empty string and a lone
/// leading zero is replaced by the first digit typed.
#[derive(Debug, Clone)]
pub struct AnswerBuffer {
    text: String,
    max_digits: usize,
}

impl AnswerBuffer {
    /// Create a new answer buffer accepting at most `max_digits` digits
    pub fn new(max_digits: usize) -> Self {
        Self {
            text: EMPTY_ANSWER.to_string(),
            max_digits: max_digits.max(1),
        }
    }

    /// Current display text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Type a digit, returns true if the display changed
    pub fn push_digit(&mut self, digit: u8) -> bool {
        if digit > 9 {
            return false;
        }
        let ch = char::from(b'0' + digit);

        if self.text == EMPTY_ANSWER {
            self.text.clear();
            self.text.push(ch);
            return ch != '0';
        }

        if self.text.len() >= self.max_digits {
            return false;
        }
        self.text.push(ch);
        true
    }

    /// Remove the last digit, returns true if the display changed
    pub fn backspace(&mut self) -> bool {
        if self.text == EMPTY_ANSWER {
            return false;
        }
        self.text.pop();
        if self.text.is_empty() {
            self.text.push_str(EMPTY_ANSWER);
        }
        true
    }

    /// Parse the display as an integer
    ///
    /// Anything unparsable (overflow included) is `None`, which callers treat
    /// as a wrong answer.
    pub fn parse(&self) -> Option<i64> {
        self.text.parse().ok()
    }

    /// Take the typed answer and reset the display
    pub fn take(&mut self) -> Option<i64> {
        let value = self.parse();
        self.clear();
        value
    }

    /// Reset the display to "0"
    pub fn clear(&mut self) {
        self.text.clear();
        self.text.push_str(EMPTY_ANSWER);
    }

    #[cfg(test)]
    /// Check if nothing has been typed
    pub fn is_empty(&self) -> bool {
        self.text == EMPTY_ANSWER
    }
}

impl Default for AnswerBuffer {
    fn default() -> Self {
        Self::new(9)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_creation() {
        let buffer = AnswerBuffer::new(4);
        assert_eq!(buffer.text(), "0");
        assert!(buffer.is_empty());
        assert_eq!(buffer.parse(), Some(0));
    }

    #[test]
    fn test_first_digit_replaces_zero() {
        let mut buffer = AnswerBuffer::new(4);
        assert!(buffer.push_digit(4));
        assert!(buffer.push_digit(2));
        assert_eq!(buffer.text(), "42");
        assert_eq!(buffer.parse(), Some(42));
    }

    #[test]
    fn test_zero_on_empty_is_noop() {
        let mut buffer = AnswerBuffer::new(4);
        assert!(!buffer.push_digit(0));
        assert_eq!(buffer.text(), "0");
    }

    #[test]
    fn test_max_digits() {
        let mut buffer = AnswerBuffer::new(3);
        for d in [1, 2, 3, 4] {
            buffer.push_digit(d);
        }
        assert_eq!(buffer.text(), "123");
    }

    #[test]
    fn test_invalid_digit_rejected() {
        let mut buffer = AnswerBuffer::new(3);
        assert!(!buffer.push_digit(12));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_backspace() {
        let mut buffer = AnswerBuffer::new(4);
        buffer.push_digit(5);
        buffer.push_digit(6);
        assert!(buffer.backspace());
        assert_eq!(buffer.text(), "5");
        assert!(buffer.backspace());
        assert_eq!(buffer.text(), "0");
        assert!(!buffer.backspace());
    }

    #[test]
    fn test_take_resets() {
        let mut buffer = AnswerBuffer::new(4);
        buffer.push_digit(9);
        assert_eq!(buffer.take(), Some(9));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_overflow_parses_as_none() {
        let mut buffer = AnswerBuffer::new(40);
        for _ in 0..30 {
            buffer.push_digit(9);
        }
        assert_eq!(buffer.parse(), None);
        assert_eq!(buffer.take(), None);
        assert_eq!(buffer.text(), "0");
    }
}
