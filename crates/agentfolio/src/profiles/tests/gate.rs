use super::common::*;

use chrono::Duration;

use crate::profiles::publication::{
    gate_reasons, is_publicly_visible, resolve_view, GateReason, ProfileView, ViewerContext,
};

#[test]
fn an_active_published_profile_is_visible() {
    let agent = stored_profile("jane-doe");
    assert!(is_publicly_visible(&agent, gate_time()));
    assert_eq!(
        resolve_view(&agent, ViewerContext::public(), gate_time()),
        ProfileView::Live
    );
}

#[test]
fn expiry_is_evaluated_against_the_supplied_now() {
    let mut agent = stored_profile("jane-doe");
    agent.subscription.ends_at = gate_time() + Duration::seconds(1);

    assert!(is_publicly_visible(&agent, gate_time()));
    // One second later the same record is gated; nothing was cached.
    assert!(!is_publicly_visible(
        &agent,
        gate_time() + Duration::seconds(1)
    ));
}

#[test]
fn an_unsubscribed_profile_shows_the_placeholder_to_visitors() {
    let mut agent = stored_profile("jane-doe");
    agent.subscription.is_subscribed = false;

    assert_eq!(
        resolve_view(&agent, ViewerContext::public(), gate_time()),
        ProfileView::Placeholder
    );
}

#[test]
fn the_owner_sees_a_preview_with_the_gate_reasons() {
    let mut agent = stored_profile("jane-doe");
    agent.subscription.ends_at = gate_time() - Duration::days(3);
    agent.is_published = false;

    match resolve_view(&agent, ViewerContext::owner(), gate_time()) {
        ProfileView::OwnerPreview { reasons } => {
            assert_eq!(
                reasons,
                vec![GateReason::SubscriptionExpired, GateReason::Unpublished]
            );
        }
        other => panic!("expected owner preview, got {other:?}"),
    }
}

#[test]
fn the_owner_can_force_the_public_rendition() {
    let mut agent = stored_profile("jane-doe");
    agent.is_published = false;

    let viewer = ViewerContext {
        is_owner: true,
        force_public: true,
    };
    assert_eq!(
        resolve_view(&agent, viewer, gate_time()),
        ProfileView::Placeholder
    );
}

#[test]
fn not_subscribed_shadows_the_expiry_reason() {
    let mut agent = stored_profile("jane-doe");
    agent.subscription.is_subscribed = false;
    agent.subscription.ends_at = gate_time() - Duration::days(3);

    assert_eq!(
        gate_reasons(&agent, gate_time()),
        vec![GateReason::NotSubscribed]
    );
}
