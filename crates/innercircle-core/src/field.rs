//! Floating label placement for text inputs.

/// Where an input's label is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPosition {
    /// Inside the field, where a placeholder would be.
    Placeholder,
    /// Shrunk above the entered text.
    Floating,
}

impl LabelPosition {
    /// CSS modifier class for the label.
    pub fn css_class(&self) -> &'static str {
        match self {
            LabelPosition::Placeholder => "floating-label-rest",
            LabelPosition::Floating => "floating-label-raised",
        }
    }
}

/// Display state of a floating label.
///
/// Tracks only focus and whether the field has content. It never holds or
/// changes the field's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FloatingLabel {
    is_focused: bool,
    has_value: bool,
}

impl FloatingLabel {
    /// State for a field that starts out holding `value`.
    pub fn for_value(value: &str) -> Self {
        Self {
            is_focused: false,
            has_value: !value.is_empty(),
        }
    }

    pub fn focus(&mut self) {
        self.is_focused = true;
    }

    pub fn blur(&mut self, value: &str) {
        self.is_focused = false;
        self.has_value = !value.is_empty();
    }

    pub fn input(&mut self, value: &str) {
        self.has_value = !value.is_empty();
    }

    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    pub fn has_value(&self) -> bool {
        self.has_value
    }

    pub fn position(&self) -> LabelPosition {
        if self.is_focused || self.has_value {
            LabelPosition::Floating
        } else {
            LabelPosition::Placeholder
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rests_when_unfocused_and_empty() {
        let label = FloatingLabel::default();
        assert_eq!(label.position(), LabelPosition::Placeholder);
    }

    #[test]
    fn test_focus_raises_and_empty_blur_lowers() {
        let mut label = FloatingLabel::default();
        label.focus();
        assert_eq!(label.position(), LabelPosition::Floating);

        label.blur("");
        assert_eq!(label.position(), LabelPosition::Placeholder);
    }

    #[test]
    fn test_value_keeps_label_raised_after_blur() {
        let mut label = FloatingLabel::default();
        label.focus();
        label.input("ada");
        label.blur("ada");
        assert!(!label.is_focused());
        assert_eq!(label.position(), LabelPosition::Floating);

        label.input("");
        assert_eq!(label.position(), LabelPosition::Placeholder);
    }

    #[test]
    fn test_prefilled_value_starts_raised() {
        assert_eq!(FloatingLabel::for_value("ADA123").position(), LabelPosition::Floating);
        assert_eq!(FloatingLabel::for_value("").position(), LabelPosition::Placeholder);
    }

    #[test]
    fn test_placement_rule_exhaustive() {
        for focused in [false, true] {
            for value in ["", "x"] {
                let mut label = FloatingLabel::for_value(value);
                if focused {
                    label.focus();
                }
                let resting = !focused && value.is_empty();
                assert_eq!(label.position() == LabelPosition::Placeholder, resting);
            }
        }
    }
}
