use super::*;

#[test]
fn action_error_text_matches_prompts() {
    assert_eq!(ActionError::MissingUsername.to_string(), "Enter your username first!");
    assert_eq!(ActionError::MissingJoinFields.to_string(), "Enter both fields!");
    assert_eq!(ActionError::MissingQuestionFields.to_string(), "Please fill both fields!");
    assert_eq!(ActionError::NoAttemptsLeft.to_string(), "No attempts left!");
}

#[test]
fn action_error_becomes_warning_notice() {
    let notice = Notice::from(ActionError::NoAttemptsLeft);
    assert_eq!(notice.kind, NoticeKind::Warning);
    assert_eq!(notice.message, "No attempts left!");
}

#[test]
fn notice_constructors_set_kind() {
    assert_eq!(Notice::info("a").kind, NoticeKind::Info);
    assert_eq!(Notice::error("b").kind, NoticeKind::Error);
}
