// Dynaform Tests
//
// This is a meta-package that organizes the test structure.
// It doesn't contain test code itself.

#[cfg(feature = "integrations")]
pub use dynaform_integration_tests;
