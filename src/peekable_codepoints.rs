use std::io::{
    self,
    Bytes,
    Read,
};

use unicode_reader::CodePoints;

/// Code point reader with arbitrary lookahead.
///
/// Characters are decoded from UTF-8 lazily and buffered only as far as the
/// caller peeks. `offset` counts code points consumed so far.
pub struct PeekableCodePoints<R>
    where R: Read
{
    codepoints: CodePoints<Bytes<R>>,
    buffer: Vec<char>,
    offset: usize,
}

impl<R: Read> PeekableCodePoints<R> {
    pub fn new(reader: R) -> Self {
        PeekableCodePoints {
            codepoints: CodePoints::from(reader),
            buffer: Vec::new(),
            offset: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    fn feed_buffer(&mut self, count: usize) -> io::Result<usize> {
        for i in 0..count {
            match self.codepoints.next() {
                None => return Ok(i),
                Some(Err(e)) => return Err(e),
                Some(Ok(c)) => self.buffer.push(c),
            }
        }

        Ok(count)
    }

    pub fn peek_char(&mut self, index: usize) -> io::Result<Option<char>> {
        if index >= self.buffer.len() {
            self.feed_buffer(index + 1 - self.buffer.len())?;
        }

        Ok(self.buffer.get(index).copied())
    }

    /// Drops up to `count` characters, returning how many were dropped.
    pub fn skip(&mut self, count: usize) -> io::Result<usize> {
        if count > self.buffer.len() {
            self.feed_buffer(count - self.buffer.len())?;
        }

        let actual_count = count.min(self.buffer.len());
        self.buffer.drain(0..actual_count);
        self.offset += actual_count;

        Ok(actual_count)
    }

    /// Removes up to `count` characters and returns them as a string.
    pub fn pop(&mut self, count: usize) -> io::Result<String> {
        if count > self.buffer.len() {
            self.feed_buffer(count - self.buffer.len())?;
        }

        let actual_count = count.min(self.buffer.len());
        let pop_str = self.buffer.drain(0..actual_count).collect();
        self.offset += actual_count;

        Ok(pop_str)
    }
}
