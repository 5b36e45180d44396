use super::common::*;
use crate::onboarding::domain::WizardStep;
use crate::onboarding::wizard::{CommitFailure, NextOutcome, WizardError};

#[test]
fn completes_all_twelve_steps_and_commits() {
    let (mut wizard, saver, committer) = wizard();
    fill_valid_draft(&mut wizard);

    for _ in 0..WizardStep::COUNT - 1 {
        match wizard.next().expect("valid draft advances") {
            NextOutcome::Advanced { .. } => {}
            other => panic!("unexpected early commit: {other:?}"),
        }
    }
    assert_eq!(wizard.current_step(), WizardStep::Template);

    match wizard.next().expect("terminal commit succeeds") {
        NextOutcome::Committed { slug } => assert_eq!(slug, "jane-doe"),
        other => panic!("expected commit, got {other:?}"),
    }

    let committed = committer.committed.lock().expect("committer mutex poisoned");
    assert_eq!(committed.len(), 1);
    assert_eq!(committed[0].city, "Hyderabad");
    assert_eq!(committed[0].area, "Madhapur");
    assert_eq!(committed[0].phone, "+919876543210");
    assert_eq!(committed[0].template, "skyline");
    assert_eq!(saver.clear_count(), 1, "persisted draft cleared on commit");
}

#[test]
fn commit_rejection_keeps_the_draft_on_the_last_step() {
    let saver = RecordingSaver::default();
    let mut wizard = wizard_with(
        FixedDirectory::with_taken(&[]),
        RejectingCommitter,
        saver.clone(),
    );
    fill_valid_draft(&mut wizard);
    for _ in 0..WizardStep::COUNT - 1 {
        wizard.next().expect("valid draft advances");
    }

    match wizard.next() {
        Err(WizardError::Commit(CommitFailure::Rejected(reason))) => {
            assert!(reason.contains("bio"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(wizard.current_step(), WizardStep::Template);
    assert_eq!(wizard.draft().slug, "jane-doe", "draft intact");
    assert_eq!(saver.clear_count(), 0, "draft not cleared on failure");
}

#[test]
fn storage_failure_at_commit_is_distinguishable_from_rejection() {
    let saver = RecordingSaver::default();
    let mut wizard = wizard_with(FixedDirectory::with_taken(&[]), OfflineCommitter, saver);
    fill_valid_draft(&mut wizard);
    for _ in 0..WizardStep::COUNT - 1 {
        wizard.next().expect("valid draft advances");
    }

    match wizard.next() {
        Err(WizardError::Commit(CommitFailure::Unavailable(_))) => {}
        other => panic!("expected storage failure, got {other:?}"),
    }
    assert_eq!(wizard.current_step(), WizardStep::Template);
}

#[test]
fn back_decrements_without_revalidating_and_saturates_at_welcome() {
    let (mut wizard, _, _) = wizard();
    fill_valid_draft(&mut wizard);
    wizard.next().expect("welcome");
    wizard.next().expect("name");

    assert_eq!(wizard.back(), WizardStep::Name);
    // Blank out the name; going back past it must not re-validate.
    wizard.set_name("");
    assert_eq!(wizard.back(), WizardStep::Welcome);
    assert_eq!(wizard.back(), WizardStep::Welcome, "saturates at the start");
}

#[test]
fn every_mutation_queues_an_autosave_with_the_full_draft() {
    let (mut wizard, saver, _) = wizard();
    wizard.set_name("Jane");
    wizard.set_city("Hyderabad");

    let queued = saver.queued.lock().expect("saver mutex poisoned").len();
    assert_eq!(queued, 2);
    let last = saver.last().expect("draft queued");
    assert_eq!(last.name, "Jane");
    assert_eq!(last.city, "Hyderabad");
}

#[test]
fn reset_discards_the_draft_and_clears_the_store() {
    let (mut wizard, saver, _) = wizard();
    fill_valid_draft(&mut wizard);
    wizard.next().expect("welcome");

    wizard.reset();
    assert_eq!(wizard.current_step(), WizardStep::Welcome);
    assert!(wizard.draft().name.is_empty());
    assert_eq!(saver.clear_count(), 1);
}

#[test]
fn resume_restores_step_and_fields() {
    let (mut wizard, _, _) = wizard();
    fill_valid_draft(&mut wizard);
    wizard.next().expect("welcome");
    wizard.next().expect("name");
    let persisted = wizard.draft().clone();

    let resumed = crate::onboarding::OnboardingWizard::resume(
        persisted,
        crate::profiles::guard::ProfilePolicy::default(),
        Box::new(FixedDirectory::with_taken(&[])),
        Box::new(RecordingCommitter::default()),
        Box::new(RecordingSaver::default()),
    );
    assert_eq!(resumed.current_step(), WizardStep::Email);
    assert_eq!(resumed.draft().name, "Jane Doe");
}
