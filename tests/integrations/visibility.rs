use dynaform_integration_tests::utils::profile;
use dynaform_test_utils::assertions::{assert_field_errors, assert_visible};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

#[test]
fn test_initial_visibility() {
    let form = profile();
    let expected: BTreeMap<String, bool> = [
        ("kind", true),
        ("company", false),
        ("company.name", false),
        ("company.employees", false),
        ("contacts", true),
        ("contacts.0.email", true),
        ("contacts.0.primary", true),
        ("contacts.0.phone", false),
    ]
    .into_iter()
    .map(|(path, visible)| (path.to_string(), visible))
    .collect();

    assert_eq!(form.visibility(), expected);
}

#[test]
fn test_outer_value_reveals_group() -> anyhow::Result<()> {
    let form = profile();
    form.set("kind", "company")?;
    assert_visible(&form, "company.name", true)?;

    form.set("company.employees", 0)?;
    let errors = form.revalidate();
    assert_eq!(
        errors.paths().collect::<Vec<_>>(),
        vec!["company.employees", "company.name", "contacts.0.email"]
    );
    assert_field_errors(&form, "company.employees", &["must be at least 1"])?;

    form.set("kind", "person")?;
    let errors = form.revalidate();
    assert_eq!(errors.paths().collect::<Vec<_>>(), vec!["contacts.0.email"]);
    Ok(())
}

#[test]
fn test_list_items_are_independent() -> anyhow::Result<()> {
    let form = profile();
    assert_eq!(form.add_list_item("contacts")?, 1);
    form.set("contacts.1.primary", true)?;

    assert_visible(&form, "contacts.0.phone", false)?;
    assert_visible(&form, "contacts.1.phone", true)?;
    Ok(())
}

#[test]
fn test_removing_an_item_clears_list_errors() -> anyhow::Result<()> {
    let form = profile();
    form.add_list_item("contacts")?;
    form.set("kind", "person")?;

    let errors = form.revalidate();
    assert!(errors.contains("contacts.0.email"));
    assert!(errors.contains("contacts.1.email"));

    let removed = form.remove_list_item("contacts", 1)?;
    assert_eq!(removed["email"], serde_json::json!(""));
    assert!(form.errors().paths().all(|path| !path.starts_with("contacts")));
    Ok(())
}
