//! Character-by-character text reveal

use std::rc::Rc;

use crate::platform::Timer;

/// Fixed text plus how much of it has been typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typewriter {
    text: Vec<char>,
    index: usize,
}

impl Typewriter {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            index: 0,
        }
    }

    /// Next character to type, or None once the whole text is out
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.text.get(self.index).copied()?;
        self.index += 1;
        Some(ch)
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.text.len()
    }

    /// Characters typed so far
    pub fn typed(&self) -> String {
        self.text[..self.index].iter().collect()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Where typed characters go
pub trait TextSink {
    fn append(&mut self, ch: char);
}

impl TextSink for String {
    fn append(&mut self, ch: char) {
        self.push(ch);
    }
}

impl<T: TextSink> TextSink for Rc<std::cell::RefCell<T>> {
    fn append(&mut self, ch: char) {
        self.borrow_mut().append(ch);
    }
}

#[cfg(target_arch = "wasm32")]
impl TextSink for web_sys::Element {
    fn append(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        if let Err(e) = self.insert_adjacent_text("beforeend", ch.encode_utf8(&mut buf)) {
            log::warn!("typewriter append failed: {:?}", e);
        }
    }
}

/// Type the first character now, then one more every `delay_ms`.
///
/// A tick is scheduled only after the previous character has been appended,
/// and nothing is scheduled once the text is complete.
pub fn start_typewriter<S, T>(typewriter: Typewriter, sink: S, timer: Rc<T>, delay_ms: i32)
where
    S: TextSink + 'static,
    T: Timer + 'static,
{
    type_next(typewriter, sink, timer, delay_ms);
}

fn type_next<S, T>(mut typewriter: Typewriter, mut sink: S, timer: Rc<T>, delay_ms: i32)
where
    S: TextSink + 'static,
    T: Timer + 'static,
{
    let Some(ch) = typewriter.advance() else {
        return;
    };
    sink.append(ch);
    if typewriter.is_finished() {
        log::debug!("typewriter finished ({} chars)", typewriter.len());
        return;
    }

    let next_timer = timer.clone();
    timer.set_timeout(
        delay_ms,
        Box::new(move || type_next(typewriter, sink, next_timer, delay_ms)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{TYPEWRITER_DELAY_MS, TYPEWRITER_TEXT};
    use crate::platform::ManualTimer;
    use std::cell::RefCell;

    #[test]
    fn test_advance_in_order_then_stops() {
        let mut tw = Typewriter::new("abc");
        assert_eq!(tw.advance(), Some('a'));
        assert_eq!(tw.advance(), Some('b'));
        assert!(!tw.is_finished());
        assert_eq!(tw.advance(), Some('c'));
        assert!(tw.is_finished());
        assert_eq!(tw.advance(), None);
        assert_eq!(tw.typed(), "abc");
    }

    #[test]
    fn test_multibyte_text() {
        let mut tw = Typewriter::new("héllo ✓");
        let out: String = std::iter::from_fn(|| tw.advance()).collect();
        assert_eq!(out, "héllo ✓");
    }

    #[test]
    fn test_scheduled_ticks_type_prefix() {
        let timer = Rc::new(ManualTimer::new());
        let out = Rc::new(RefCell::new(String::new()));
        start_typewriter(
            Typewriter::new(TYPEWRITER_TEXT),
            out.clone(),
            timer.clone(),
            TYPEWRITER_DELAY_MS,
        );

        // First character goes out immediately
        assert_eq!(*out.borrow(), "H");
        assert_eq!(timer.pending(), 1);

        for n in 2..=10 {
            assert_eq!(timer.fire_next(), Some(TYPEWRITER_DELAY_MS));
            let expected: String = TYPEWRITER_TEXT.chars().take(n).collect();
            assert_eq!(*out.borrow(), expected);
            assert_eq!(timer.pending(), 1);
        }
    }

    #[test]
    fn test_no_scheduling_after_completion() {
        let timer = Rc::new(ManualTimer::new());
        let out = Rc::new(RefCell::new(String::new()));
        start_typewriter(Typewriter::new("Hey"), out.clone(), timer.clone(), 100);

        assert_eq!(timer.run(100), 2);
        assert_eq!(*out.borrow(), "Hey");
        assert_eq!(timer.pending(), 0);
        assert_eq!(timer.fire_next(), None);
    }

    #[test]
    fn test_empty_text_schedules_nothing() {
        let timer = Rc::new(ManualTimer::new());
        let out = Rc::new(RefCell::new(String::new()));
        start_typewriter(Typewriter::new(""), out.clone(), timer.clone(), 100);
        assert!(out.borrow().is_empty());
        assert_eq!(timer.pending(), 0);
    }
}
