//! Output buffering.
//!
//! Rendering writes into the innermost of a stack of text buffers. A caller
//! pushes a fresh buffer, renders a child, pops it back as a `String` and
//! decides whether to keep the text, how to frame it, or to drop it.
//! While output is disabled every write is discarded, which is how the
//! region between a macro marker and its end marker disappears.


pub struct OutputStack {
    /// Buffers, innermost last. The first one is the root and is never popped.
    buffers: Vec<String>,
    enabled: bool,
    indent: usize,
    indent_width: usize,
}

impl OutputStack {
    pub fn new(indent_width: usize) -> Self {
        OutputStack {
            buffers: vec![String::with_capacity(4096)],
            enabled: true,
            indent: 0,
            indent_width,
        }
    }

    /// Write a string to the innermost buffer.
    pub fn write(&mut self, s: &str) {
        if !self.enabled {
            return;
        }
        if let Some(buffer) = self.buffers.last_mut() {
            buffer.push_str(s);
        }
    }

    pub fn write_char(&mut self, c: char) {
        if !self.enabled {
            return;
        }
        if let Some(buffer) = self.buffers.last_mut() {
            buffer.push(c);
        }
    }

    pub fn newline(&mut self) {
        self.write_char('\n');
    }

    /// Indentation for the current level.
    pub fn indent_str(&self) -> String {
        " ".repeat(self.indent * self.indent_width)
    }

    pub fn write_indent(&mut self) {
        let indent = self.indent_str();
        self.write(&indent);
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    /// Start capturing into a fresh buffer.
    pub fn push(&mut self) {
        self.buffers.push(String::new());
    }

    /// Finish the innermost capture and return its text.
    pub fn pop(&mut self) -> String {
        debug_assert!(self.buffers.len() > 1, "pop called on the root buffer");
        if self.buffers.len() > 1 {
            self.buffers.pop().unwrap_or_default()
        } else {
            String::new()
        }
    }

    /// Number of open captures above the root.
    pub fn depth(&self) -> usize {
        self.buffers.len() - 1
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Consume the stack and return the root text.
    pub fn into_output(mut self) -> String {
        debug_assert_eq!(self.buffers.len(), 1, "unbalanced output captures");
        self.buffers.truncate(1);
        self.buffers.pop().unwrap_or_default()
    }
}

/// Writes nothing before the first item and `sep` before each later one.
pub struct Separator {
    sep: &'static str,
    first: bool,
}

impl Separator {
    pub fn new(sep: &'static str) -> Self {
        Separator { sep, first: true }
    }

    pub fn is_first(&self) -> bool {
        self.first
    }

    pub fn next(&mut self, out: &mut OutputStack) {
        if self.first {
            self.first = false;
        } else {
            out.write(self.sep);
        }
    }

    pub fn reset(&mut self) {
        self.first = true;
    }
}
