use learn_core::model::LessonStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterLabel {
    Reveal,
    Check,
    Continue,
    Finish,
}

impl FooterLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FooterLabel::Reveal => "Reveal",
            FooterLabel::Check => "Check",
            FooterLabel::Continue => "Continue",
            FooterLabel::Finish => "Finish",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterButton {
    pub label: FooterLabel,
    pub disabled: bool,
}

/// Label and enabled state of the primary footer button.
#[must_use]
pub fn footer_button(
    step: &LessonStep,
    is_last_step: bool,
    is_continue_enabled: bool,
    is_action_enabled: bool,
) -> FooterButton {
    let is_summary = step.is_summary();
    let label = if is_summary {
        FooterLabel::Finish
    } else if is_continue_enabled {
        FooterLabel::Continue
    } else if step.kind().is_info() && step.full_screen() {
        FooterLabel::Reveal
    } else if step.is_assessment() || is_action_enabled {
        FooterLabel::Check
    } else {
        FooterLabel::Continue
    };

    FooterButton {
        label,
        disabled: !is_continue_enabled && !is_action_enabled && !is_last_step && !is_summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learn_core::model::StepKind;

    #[test]
    fn full_screen_info_asks_for_reveal() {
        let step = LessonStep::info("intro").with_full_screen(true);
        let button = footer_button(&step, false, false, true);
        assert_eq!(button.label, FooterLabel::Reveal);
        assert!(!button.disabled);

        let revealed = footer_button(&step, false, true, false);
        assert_eq!(revealed.label, FooterLabel::Continue);
    }

    #[test]
    fn unresolved_assessment_asks_for_check() {
        let step = LessonStep::assessment("q1", StepKind::Order);
        let waiting = footer_button(&step, false, false, false);
        assert_eq!(waiting.label, FooterLabel::Check);
        assert!(waiting.disabled);

        let ready = footer_button(&step, false, false, true);
        assert_eq!(ready.label, FooterLabel::Check);
        assert!(!ready.disabled);
    }

    #[test]
    fn summary_is_finish_and_never_disabled() {
        let step = LessonStep::summary("end");
        let button = footer_button(&step, true, false, false);
        assert_eq!(button, FooterButton { label: FooterLabel::Finish, disabled: false });
    }

    #[test]
    fn last_step_is_never_disabled() {
        let step = LessonStep::assessment("review-q1", StepKind::Mcq);
        assert!(!footer_button(&step, true, false, false).disabled);
    }

    #[test]
    fn labels_render_as_text() {
        assert_eq!(FooterLabel::Reveal.as_str(), "Reveal");
        assert_eq!(FooterLabel::Finish.as_str(), "Finish");
    }
}
