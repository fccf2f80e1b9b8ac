use dynaform_core::{FormError, SubmissionStatus, SubmitOutcome};
use dynaform_integration_tests::utils::{fill_newsletter, newsletter};
use dynaform_test_utils::assertions::{
    assert_field_errors, assert_no_errors, assert_status, assert_value,
};
use dynaform_test_utils::{FailingHandler, GatedHandler, MockSubmitHandler, RecordingHandler};
use futures::future::join_all;
use pretty_assertions::assert_eq;
use serde_json::json;

#[tokio::test]
async fn test_blank_form_is_not_submitted() -> anyhow::Result<()> {
    let form = newsletter();
    let mut handler = MockSubmitHandler::new();
    handler.expect_submit().never();

    let outcome = form.validate_and_submit(&handler).await?;
    let errors = match outcome {
        SubmitOutcome::Invalid(errors) => errors,
        other => panic!("expected validation to block submission, got {:?}", other),
    };

    // email is hidden until subscribe is checked
    assert_eq!(errors.paths().collect::<Vec<_>>(), vec!["name"]);
    assert_field_errors(&form, "name", &["required"])?;
    assert_status(&form, SubmissionStatus::Idle)?;
    Ok(())
}

#[tokio::test]
async fn test_subscribing_makes_email_required() -> anyhow::Result<()> {
    let form = newsletter();
    form.set("name", "Ada")?;
    form.set("subscribe", true)?;

    let outcome = form.validate_and_submit(&RecordingHandler::new()).await?;
    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
    assert_field_errors(&form, "email", &["required"])?;

    form.set("email", "not-an-address")?;
    form.revalidate();
    assert_field_errors(&form, "email", &["must be a valid email address"])?;
    Ok(())
}

#[tokio::test]
async fn test_successful_submission() -> anyhow::Result<()> {
    let form = newsletter();
    fill_newsletter(&form);
    let handler = RecordingHandler::new();

    let outcome = form.validate_and_submit(&handler).await?;
    assert_eq!(outcome, SubmitOutcome::Success);
    assert_status(&form, SubmissionStatus::Success)?;
    assert_no_errors(&form)?;

    let delivered = handler.last().expect("handler received the data");
    assert_eq!(
        serde_json::Value::Object(delivered),
        json!({ "name": "Ada", "subscribe": true, "email": "ada@example.com" })
    );
    Ok(())
}

#[tokio::test]
async fn test_handler_fault_then_retry() -> anyhow::Result<()> {
    let form = newsletter();
    fill_newsletter(&form);

    let outcome = form.validate_and_submit(&FailingHandler::new("backend down")).await?;
    assert_eq!(outcome, SubmitOutcome::Failed("backend down".to_string()));
    assert_status(&form, SubmissionStatus::Failed)?;
    assert_eq!(form.last_error().as_deref(), Some("backend down"));

    let handler = RecordingHandler::new();
    assert!(form.validate_and_submit(&handler).await?.is_success());
    assert_eq!(form.last_error(), None);
    assert_eq!(handler.count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_only_one_submission_in_flight() -> anyhow::Result<()> {
    let form = newsletter();
    fill_newsletter(&form);
    let gate = GatedHandler::new();

    let attempts = join_all((0..3).map(|_| form.submit(&gate)));
    let (results, ()) = tokio::join!(attempts, async {
        gate.wait_started().await;
        assert!(form.is_submitting());
        assert!(matches!(form.reset(), Err(FormError::AlreadySubmitting)));
        gate.release();
    });

    let succeeded = results.iter().filter(|r| matches!(r, Ok(SubmitOutcome::Success))).count();
    let rejected = results
        .iter()
        .filter(|r| matches!(r, Err(FormError::AlreadySubmitting)))
        .count();
    assert_eq!((succeeded, rejected), (1, 2));
    assert_eq!(gate.recorder().count(), 1);
    assert_status(&form, SubmissionStatus::Success)?;
    Ok(())
}

#[tokio::test]
async fn test_reset_after_submission() -> anyhow::Result<()> {
    let form = newsletter();
    fill_newsletter(&form);
    form.validate_and_submit(&RecordingHandler::new()).await?;

    form.reset()?;
    assert_status(&form, SubmissionStatus::Idle)?;
    assert_value(&form, "name", &json!(""))?;
    assert_value(&form, "subscribe", &json!(false))?;
    assert_no_errors(&form)?;
    Ok(())
}
