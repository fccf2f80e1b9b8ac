// Dynaform Integration Tests
//
// This crate contains end-to-end tests that drive a form through the public
// API of dynaform-core, using the doubles from dynaform-test-utils.

/// Shared setup for the integration tests
pub mod utils {
    use dynaform_core::FormController;
    use dynaform_test_utils::{data_generators, init_test_tracing};

    /// A newsletter form with tracing initialized
    pub fn newsletter() -> FormController {
        init_test_tracing();
        FormController::from_yaml(&data_generators::create_newsletter_yaml("newsletter"))
            .expect("newsletter form should load")
    }

    /// The nested profile form with tracing initialized
    pub fn profile() -> FormController {
        init_test_tracing();
        FormController::from_json(&data_generators::create_nested_form_json())
            .expect("profile form should load")
    }

    /// Fill the newsletter form with a valid subscription
    pub fn fill_newsletter(form: &FormController) {
        form.set("name", "Ada").expect("name exists");
        form.set("subscribe", true).expect("subscribe exists");
        form.set("email", "ada@example.com").expect("email exists");
        tracing::debug!("Filled newsletter form");
    }
}
