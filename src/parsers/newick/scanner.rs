use super::NewickError;
use std::io::BufRead;

/// Splits a NEWICK input stream into semicolon-terminated tree statements.
///
/// One statement is extracted per [advance](Self::advance) call; its raw
/// text, including the trailing `;`, stays available through
/// [current_text](Self::current_text) until the next call. The scanner
/// assumes sequential single-caller use: one statement is fully consumed
/// before the next is requested.
#[derive(Debug)]
pub struct TreeScanner<R> {
    reader: R,
    current: String,
}

impl<R: BufRead> TreeScanner<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, current: String::new() }
    }

    /// Extracts the next statement.
    ///
    /// Returns `Ok(true)` when a statement was extracted and `Ok(false)`
    /// at clean end-of-input. Trailing non-whitespace data with no
    /// terminating `;` is an
    /// [UnterminatedStatement](NewickError::UnterminatedStatement) error.
    pub fn advance(&mut self) -> Result<bool, NewickError> {
        let mut buffer: Vec<u8> = Vec::new();
        let bytes_read = self.reader.read_until(b';', &mut buffer)?;
        if bytes_read == 0 {
            return Ok(false);
        }

        let text = String::from_utf8_lossy(&buffer).into_owned();
        if !text.ends_with(';') {
            if text.trim().is_empty() {
                return Ok(false);
            }
            return Err(NewickError::UnterminatedStatement(text));
        }

        self.current = text;
        Ok(true)
    }

    /// Raw text of the statement extracted by the most recent successful
    /// [advance](Self::advance), including the trailing `;`.
    pub fn current_text(&self) -> &str {
        &self.current
    }
}
