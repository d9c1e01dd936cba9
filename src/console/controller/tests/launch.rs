use super::*;
use crate::training_api::StartAccepted;

#[test]
fn launch_requires_a_successful_save() {
    let (mut controller, _api, _clock) = controller_with_fake();
    assert!(!controller.can_request_launch());
    assert_eq!(controller.request_launch(), Err(TransitionError::NotAuthorized));
    assert!(controller.run_status().is_idle());
}

#[test]
fn decline_returns_to_idle_without_starting() {
    let (mut controller, api, _clock) = controller_with_fake();
    authorize_launch(&mut controller);
    controller.request_launch().unwrap();
    assert!(controller.run_status().awaiting_confirmation());

    controller.decline_launch().unwrap();
    settle(&mut controller);
    assert!(controller.run_status().is_idle());
    assert!(controller.launch_authorized());
    assert_eq!(api.start_calls(), 0);
}

#[test]
fn confirm_without_prompt_is_refused() {
    let (mut controller, api, _clock) = controller_with_fake();
    authorize_launch(&mut controller);
    assert_eq!(
        controller.confirm_launch(),
        Err(TransitionError::NotAwaitingConfirmation)
    );
    assert_eq!(
        controller.decline_launch(),
        Err(TransitionError::NotAwaitingConfirmation)
    );
    settle(&mut controller);
    assert_eq!(api.start_calls(), 0);
}

#[test]
fn pending_start_cannot_be_declined_or_confirmed_again() {
    let (mut controller, api, _clock) = controller_with_fake();
    authorize_launch(&mut controller);
    controller.request_launch().unwrap();
    controller.confirm_launch().unwrap();
    assert_eq!(
        controller.run_status(),
        &RunStatus::AwaitingConfirmation { starting: true }
    );
    assert!(controller.launch_authorized());
    assert_eq!(controller.decline_launch(), Err(TransitionError::StartInFlight));
    assert_eq!(controller.confirm_launch(), Err(TransitionError::StartInFlight));

    settle(&mut controller);
    assert_eq!(api.start_calls(), 1);
    assert!(controller.run_status().is_running());
}

#[test]
fn accepted_start_runs_and_clears_authorization() {
    let (mut controller, api, _clock) = controller_with_fake();
    authorize_launch(&mut controller);
    controller.request_launch().unwrap();
    controller.confirm_launch().unwrap();
    settle(&mut controller);

    assert_eq!(api.start_calls(), 1);
    assert_eq!(controller.run_status().progress(), Some(0.0));
    assert!(!controller.launch_authorized());
    assert_eq!(controller.request_launch(), Err(TransitionError::NotAuthorized));
}

#[test]
fn rejected_start_returns_to_idle_and_keeps_authorization() {
    let (mut controller, api, _clock) = controller_with_fake();
    authorize_launch(&mut controller);
    api.script_start(Err(ApiError::Rejected {
        status: 409,
        detail: Some("A run is already in progress".into()),
    }));
    controller.request_launch().unwrap();
    controller.confirm_launch().unwrap();
    settle(&mut controller);

    assert!(controller.run_status().is_idle());
    assert!(controller.launch_authorized());
    let status = controller.status_message().unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.text, "A run is already in progress");

    // Retry goes straight back through confirmation.
    controller.request_launch().unwrap();
    controller.confirm_launch().unwrap();
    settle(&mut controller);
    assert_eq!(api.start_calls(), 2);
    assert!(controller.run_status().is_running());
}

#[test]
fn unreachable_backend_on_start_uses_generic_message() {
    let (mut controller, api, _clock) = controller_with_fake();
    authorize_launch(&mut controller);
    api.script_start(Err(ApiError::Transport("timed out".into())));
    controller.request_launch().unwrap();
    controller.confirm_launch().unwrap();
    settle(&mut controller);

    assert!(controller.run_status().is_idle());
    assert!(controller.launch_authorized());
    assert_eq!(
        controller.status_message().map(|m| m.text.as_str()),
        Some(crate::training_api::UNREACHABLE_MESSAGE)
    );
}

#[test]
fn start_rejection_without_reason_uses_generic_message() {
    let (mut controller, api, _clock) = controller_with_fake();
    authorize_launch(&mut controller);
    api.script_start(Err(ApiError::Rejected {
        status: 400,
        detail: None,
    }));
    controller.request_launch().unwrap();
    controller.confirm_launch().unwrap();
    settle(&mut controller);
    assert_eq!(
        controller.status_message().map(|m| m.text.as_str()),
        Some("Failed to start training")
    );
}

#[test]
fn start_acknowledgement_metrics_are_reported_on_completion() {
    let (mut controller, api, clock) = controller_with_fake();
    authorize_launch(&mut controller);
    let reported = RunMetrics {
        accuracy: 0.75,
        map50: 0.6,
        precision: 0.7,
        recall: 0.65,
    };
    api.script_start(Ok(StartAccepted {
        metrics: Some(reported),
    }));
    controller.request_launch().unwrap();
    controller.confirm_launch().unwrap();
    settle(&mut controller);
    run_to_completion(&mut controller, &clock);

    assert_eq!(controller.run_status().metrics(), Some(&reported));
}
