//! Animated tagline frames.
//!
//! [`Typewriter`] is an endless iterator: each phrase types in one character
//! at a time, holds, deletes back to empty, then the next phrase starts.
//! After the last phrase it wraps to the first.

use std::time::Duration;

/// The landing page taglines, in display order.
pub const TAGLINES: &[&str] = &[
    "exclusive insights to top events",
    "event sold out? here's your second chance",
    "can't make it anymore? sell your ticket quick",
    "connect with like-minded people",
    "innercircle: the home for event lovers",
];

/// Per-character delays for the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterTiming {
    pub type_delay: Duration,
    pub delete_delay: Duration,
    /// How long a fully typed phrase stays on screen.
    pub hold: Duration,
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            type_delay: Duration::from_millis(50),
            delete_delay: Duration::from_millis(30),
            hold: Duration::from_millis(1500),
        }
    }
}

/// One rendered step: show `text`, then wait `delay`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterFrame {
    pub text: String,
    pub delay: Duration,
}

/// Endless typing/deleting animation over a fixed list of phrases.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<String>,
    timing: TypewriterTiming,
    index: usize,
    visible: usize,
    deleting: bool,
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(TAGLINES.iter().copied(), TypewriterTiming::default())
    }
}

impl Typewriter {
    pub fn new<I, S>(phrases: I, timing: TypewriterTiming) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            phrases: phrases.into_iter().map(Into::into).collect(),
            timing,
            index: 0,
            visible: 0,
            deleting: false,
        }
    }

    /// Start over from an empty first phrase.
    pub fn restart(&mut self) {
        self.index = 0;
        self.visible = 0;
        self.deleting = false;
    }

    /// Index of the phrase currently being animated.
    pub fn phrase_index(&self) -> usize {
        self.index
    }

    fn frame(&self, delay: Duration) -> TypewriterFrame {
        TypewriterFrame {
            text: self.phrases[self.index].chars().take(self.visible).collect(),
            delay,
        }
    }
}

impl Iterator for Typewriter {
    type Item = TypewriterFrame;

    fn next(&mut self) -> Option<Self::Item> {
        if self.phrases.is_empty() {
            return None;
        }

        let len = self.phrases[self.index].chars().count();

        if !self.deleting {
            self.visible = (self.visible + 1).min(len);
            if self.visible == len {
                self.deleting = true;
                return Some(self.frame(self.timing.hold));
            }
            return Some(self.frame(self.timing.type_delay));
        }

        self.visible = self.visible.saturating_sub(1);
        let frame = self.frame(self.timing.delete_delay);
        if self.visible == 0 {
            self.deleting = false;
            self.index = (self.index + 1) % self.phrases.len();
        }
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(writer: &mut Typewriter, n: usize) -> Vec<String> {
        writer.take(n).map(|f| f.text).collect()
    }

    #[test]
    fn test_types_holds_and_deletes() {
        let mut writer = Typewriter::new(["ab", "c"], TypewriterTiming::default());
        let frames: Vec<_> = writer.by_ref().take(4).collect();

        assert_eq!(frames[0].text, "a");
        assert_eq!(frames[0].delay, Duration::from_millis(50));
        assert_eq!(frames[1].text, "ab");
        assert_eq!(frames[1].delay, Duration::from_millis(1500));
        assert_eq!(frames[2].text, "a");
        assert_eq!(frames[2].delay, Duration::from_millis(30));
        assert_eq!(frames[3].text, "");
        assert_eq!(writer.phrase_index(), 1);
    }

    #[test]
    fn test_loops_forever() {
        let mut writer = Typewriter::new(["ab", "c"], TypewriterTiming::default());
        // "a" "ab" "a" "" | "c" "" | "a" ...
        assert_eq!(texts(&mut writer, 7), vec!["a", "ab", "a", "", "c", "", "a"]);
    }

    #[test]
    fn test_restart() {
        let mut writer = Typewriter::default();
        let first: Vec<_> = texts(&mut writer, 3);
        let _ = texts(&mut writer, 500);

        writer.restart();
        assert_eq!(texts(&mut writer, 3), first);
        assert_eq!(first, vec!["e", "ex", "exc"]);
    }

    #[test]
    fn test_every_tagline_reaches_full_text() {
        let writer = Typewriter::default();
        let shown: Vec<String> = writer
            .filter(|f| f.delay == TypewriterTiming::default().hold)
            .take(TAGLINES.len())
            .map(|f| f.text)
            .collect();
        assert_eq!(shown, TAGLINES);
    }

    #[test]
    fn test_empty_phrase_list_ends() {
        let mut writer = Typewriter::new(Vec::<String>::new(), TypewriterTiming::default());
        assert_eq!(writer.next(), None);
    }

    #[test]
    fn test_empty_phrase_does_not_stall() {
        let mut writer = Typewriter::new(["", "x"], TypewriterTiming::default());
        let frames = texts(&mut writer, 4);
        assert_eq!(frames, vec!["", "", "x", ""]);
    }
}
