/// Form controller: the host-facing facade over one form instance
pub mod controller;

/// Loading form configurations from files and URLs
pub mod loader;
