use super::common::*;

#[test]
fn session_identity_fills_empty_fields_once() {
    let (mut wizard, _, _) = wizard();
    wizard.apply_session_identity(Some("Jane Doe"), Some("jane@example.com"));

    assert_eq!(wizard.draft().name, "Jane Doe");
    assert_eq!(wizard.draft().email, "jane@example.com");
}

#[test]
fn prefill_never_clobbers_a_user_edit() {
    let (mut wizard, _, _) = wizard();
    wizard.apply_session_identity(Some("Jane Doe"), None);
    wizard.set_name("Jane D.");

    // The same session value arrives again on re-entry.
    wizard.apply_session_identity(Some("Jane Doe"), None);
    assert_eq!(wizard.draft().name, "Jane D.", "edit wins over re-prefill");
}

#[test]
fn a_differing_session_value_applies_when_the_field_is_untouched() {
    let (mut wizard, _, _) = wizard();
    wizard.apply_session_identity(Some("Jane"), None);
    assert_eq!(wizard.draft().name, "Jane");

    // Session name changed upstream; the field still holds the old
    // prefill, so the new value applies.
    wizard.apply_session_identity(Some("Jane Doe"), None);
    assert_eq!(wizard.draft().name, "Jane Doe");
}

#[test]
fn a_differing_session_value_does_not_overwrite_an_edited_field() {
    let (mut wizard, _, _) = wizard();
    wizard.apply_session_identity(Some("Jane"), None);
    wizard.set_name("J. Doe");

    wizard.apply_session_identity(Some("Jane Doe"), None);
    assert_eq!(wizard.draft().name, "J. Doe");
}

#[test]
fn repeated_identical_prefill_is_a_no_op() {
    let (mut wizard, saver, _) = wizard();
    wizard.apply_session_identity(Some("Jane"), Some("jane@example.com"));
    let saves_after_first = saver.queued.lock().expect("saver mutex poisoned").len();

    wizard.apply_session_identity(Some("Jane"), Some("jane@example.com"));
    let saves_after_second = saver.queued.lock().expect("saver mutex poisoned").len();
    assert_eq!(saves_after_first, saves_after_second);
}
