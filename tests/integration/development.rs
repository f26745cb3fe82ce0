//! Integration tests for development-mode resolution.
//!
//! These tests verify that:
//! - Folders are searched in order and the first match wins
//! - Edits on disk show up on the next resolution without a restart
//! - Nothing is cached
//! - Packaged resources are never consulted

use anyhow::Result;
use fragview::core::ViewError;
use fragview::test_utils::{ViewFixture, init_test_logging};
use serde_json::json;
use std::sync::Arc;

#[test]
fn test_first_folder_wins() -> Result<()> {
    init_test_logging(None);

    let mut fixture = ViewFixture::new()?;
    let d1 = fixture.add_dev_folder()?;
    let d2 = fixture.add_dev_folder()?;
    fixture.write_dev_view(d1, "patientHeader", "from d1")?;
    fixture.write_dev_view(d2, "patientHeader", "from d2")?;
    fixture.write_dev_view(d2, "visitList", "only in d2")?;
    let resolver = fixture.development_resolver()?;

    let header = resolver.resolve("patientHeader")?.expect("view should exist");
    let visits = resolver.resolve("visitList")?.expect("view should exist");

    assert_eq!(header.render(&json!({}))?, "from d1");
    assert_eq!(visits.render(&json!({}))?, "only in d2");
    assert!(resolver.resolve("doesNotExist")?.is_none());
    Ok(())
}

#[test]
fn test_edits_are_picked_up_without_restart() -> Result<()> {
    let mut fixture = ViewFixture::new()?;
    let dir = fixture.add_dev_folder()?;
    fixture.write_dev_view(dir, "patientHeader", "Hello {{ name }}")?;
    let resolver = fixture.development_resolver()?;

    let before = resolver.resolve("patientHeader")?.expect("view should exist");
    fixture.write_dev_view(dir, "patientHeader", "Goodbye {{ name }}")?;
    let after = resolver.resolve("patientHeader")?.expect("view should exist");

    let context = json!({ "name": "Amy" });
    assert_eq!(before.render(&context)?, "Hello Amy");
    assert_eq!(after.render(&context)?, "Goodbye Amy");
    Ok(())
}

#[test]
fn test_new_file_in_earlier_folder_takes_over() -> Result<()> {
    let mut fixture = ViewFixture::new()?;
    let d1 = fixture.add_dev_folder()?;
    let d2 = fixture.add_dev_folder()?;
    fixture.write_dev_view(d2, "banner", "fallback")?;
    let resolver = fixture.development_resolver()?;

    let first = resolver.resolve("banner")?.expect("view should exist");
    fixture.write_dev_view(d1, "banner", "override")?;
    let second = resolver.resolve("banner")?.expect("view should exist");

    assert_eq!(first.render(&json!({}))?, "fallback");
    assert_eq!(second.render(&json!({}))?, "override");
    Ok(())
}

#[test]
fn test_repeated_resolution_builds_new_instances() -> Result<()> {
    let mut fixture = ViewFixture::new()?;
    let dir = fixture.add_dev_folder()?;
    fixture.write_dev_view(dir, "banner", "{{ title }}")?;
    let resolver = fixture.development_resolver()?;

    let first = resolver.resolve("banner")?.expect("view should exist");
    let second = resolver.resolve("banner")?.expect("view should exist");

    assert!(!Arc::ptr_eq(&first, &second));
    let context = json!({ "title": "Vitals" });
    assert_eq!(first.render(&context)?, second.render(&context)?);
    assert_eq!(resolver.cache_stats().entries, 0);
    Ok(())
}

#[test]
fn test_packaged_resources_are_ignored() -> Result<()> {
    let mut fixture = ViewFixture::new()?;
    fixture.add_dev_folder()?;
    fixture.add_resource("patientHeader", "packaged")?;
    let config = fixture.development_config().with_resource_root(fixture.resource_root());
    let resolver = fragview::view::ViewResolver::new(config)?;

    assert!(resolver.is_development());
    assert!(resolver.resolve("patientHeader")?.is_none());
    Ok(())
}

#[test]
fn test_fixed_extension_only() -> Result<()> {
    let mut fixture = ViewFixture::new()?;
    let dir = fixture.add_dev_folder()?;
    std::fs::write(fixture.dev_folder(dir).join("patientHeader.html"), "wrong extension")?;
    std::fs::write(fixture.dev_folder(dir).join("patientHeader"), "no extension")?;
    let resolver = fixture.development_resolver()?;

    assert!(resolver.resolve("patientHeader")?.is_none());
    Ok(())
}

#[test]
fn test_missing_folder_is_skipped() -> Result<()> {
    let mut fixture = ViewFixture::new()?;
    let dir = fixture.add_dev_folder()?;
    fixture.write_dev_view(dir, "banner", "found")?;

    let mut folders = vec![fixture.resource_root().join("does-not-exist")];
    folders.extend(fixture.dev_folders());
    let config = fragview::config::ResolverConfig::default().with_development_folders(folders);
    let resolver = fragview::view::ViewResolver::new(config)?;

    let view = resolver.resolve("banner")?.expect("view should exist");
    assert_eq!(view.render(&json!({}))?, "found");
    Ok(())
}

#[test]
fn test_syntax_error_in_dev_file_is_fatal() -> Result<()> {
    let mut fixture = ViewFixture::new()?;
    let dir = fixture.add_dev_folder()?;
    fixture.write_dev_view(dir, "broken", "{% if %}")?;
    let resolver = fixture.development_resolver()?;

    let err = resolver.resolve("broken").unwrap_err();
    assert!(matches!(err, ViewError::Compile { .. }));
    assert_eq!(err.view_name(), Some("broken"));
    Ok(())
}

#[test]
#[cfg(unix)]
fn test_unreadable_dev_file_is_fatal() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut fixture = ViewFixture::new()?;
    let dir = fixture.add_dev_folder()?;
    let path = fixture.write_dev_view(dir, "locked", "secret")?;
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000))?;

    // Running as root bypasses permission bits; nothing to test then.
    if std::fs::read_to_string(&path).is_ok() {
        return Ok(());
    }

    let resolver = fixture.development_resolver()?;
    let err = resolver.resolve("locked").unwrap_err();
    assert!(matches!(err, ViewError::SourceRead { .. }));
    assert!(err.is_resolution_failure());
    Ok(())
}
