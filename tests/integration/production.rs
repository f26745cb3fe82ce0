//! Integration tests for production-mode resolution.
//!
//! These tests verify that:
//! - Views are read from `<prefix><name>.tera` under the resource root
//! - Compiled views are cached and returned by identity
//! - Missing views resolve to `None`
//! - Broken views fail loudly and are never cached

use anyhow::Result;
use fragview::config::ResolverConfig;
use fragview::core::ViewError;
use fragview::resource::MemoryLoader;
use fragview::test_utils::{ViewFixture, init_test_logging};
use fragview::view::ViewResolver;
use serde_json::json;
use std::sync::Arc;

#[test]
fn test_patient_header_is_compiled_once_and_rendered() -> Result<()> {
    init_test_logging(None);

    let fixture = ViewFixture::new()?;
    fixture.add_resource("patientHeader", "Hello {{ name }}")?;
    let resolver = fixture.production_resolver()?;

    let first = resolver.resolve("patientHeader")?.expect("view should exist");
    let second = resolver.resolve("patientHeader")?.expect("view should exist");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.render(&json!({ "name": "Amy" }))?, "Hello Amy");

    let stats = resolver.cache_stats();
    assert_eq!(stats.entries, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
    Ok(())
}

#[test]
fn test_cached_view_survives_source_edits() -> Result<()> {
    let fixture = ViewFixture::new()?;
    let path = fixture.add_resource("banner", "v1")?;
    let resolver = fixture.production_resolver()?;

    let before = resolver.resolve("banner")?.expect("view should exist");
    std::fs::write(&path, "v2")?;
    let after = resolver.resolve("banner")?.expect("view should exist");

    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(after.render(&json!({}))?, "v1");
    Ok(())
}

#[test]
fn test_cached_view_is_not_found_once_source_is_removed() -> Result<()> {
    let fixture = ViewFixture::new()?;
    let path = fixture.add_resource("banner", "v1")?;
    let resolver = fixture.production_resolver()?;

    assert!(resolver.resolve("banner")?.is_some());
    std::fs::remove_file(&path)?;

    assert!(resolver.resolve("banner")?.is_none());
    assert!(resolver.is_cached("banner"));

    // Restoring the source serves the original compile again.
    std::fs::write(&path, "v2")?;
    let restored = resolver.resolve("banner")?.expect("view should exist");
    assert_eq!(restored.render(&json!({}))?, "v1");
    Ok(())
}

#[test]
fn test_does_not_exist_is_none() -> Result<()> {
    let fixture = ViewFixture::new()?;
    let resolver = fixture.production_resolver()?;

    assert!(resolver.resolve("doesNotExist")?.is_none());
    assert!(resolver.resolve("doesNotExist")?.is_none());
    assert_eq!(resolver.cache_stats().entries, 0);
    Ok(())
}

#[test]
fn test_custom_prefix() -> Result<()> {
    let loader = MemoryLoader::new()
        .with_resource("views/shared/footer.tera", "custom")
        .with_resource("web/module/fragments/footer.tera", "default");
    let config = ResolverConfig::default().with_resource_prefix("views/shared/");
    let resolver = ViewResolver::builder(config).loader(loader).build()?;

    assert_eq!(resolver.resource_path("footer"), "views/shared/footer.tera");
    let view = resolver.resolve("footer")?.expect("view should exist");
    assert_eq!(view.render(&json!({}))?, "custom");
    Ok(())
}

#[test]
fn test_prefix_is_concatenated_verbatim() -> Result<()> {
    let loader = MemoryLoader::new().with_resource("fragments_footer.tera", "joined");
    let config = ResolverConfig::default().with_resource_prefix("fragments_");
    let resolver = ViewResolver::builder(config).loader(loader).build()?;

    let view = resolver.resolve("footer")?.expect("view should exist");
    assert_eq!(view.render(&json!({}))?, "joined");
    Ok(())
}

#[test]
fn test_syntax_error_is_fatal_and_uncached() -> Result<()> {
    let fixture = ViewFixture::new()?;
    fixture.add_resource("broken", "Hello {{ name")?;
    let resolver = fixture.production_resolver()?;

    for _ in 0..2 {
        let err = resolver.resolve("broken").unwrap_err();
        assert!(err.is_resolution_failure());
        assert!(matches!(err, ViewError::Compile { .. }));
        assert!(err.format_with_context().contains("View: broken"));
    }
    assert!(!resolver.is_cached("broken"));
    Ok(())
}

#[test]
fn test_broken_view_does_not_affect_others() -> Result<()> {
    let fixture = ViewFixture::new()?;
    fixture.add_resource("broken", "{% for %}")?;
    fixture.add_resource("healthy", "ok")?;
    let resolver = fixture.production_resolver()?;

    assert!(resolver.resolve("broken").is_err());
    let view = resolver.resolve("healthy")?.expect("view should exist");
    assert_eq!(view.render(&json!({}))?, "ok");
    Ok(())
}

#[test]
fn test_render_error_after_resolution() -> Result<()> {
    let fixture = ViewFixture::new()?;
    fixture.add_resource("patientHeader", "Hello {{ patient.name }}")?;
    let resolver = fixture.production_resolver()?;

    let view = resolver.resolve("patientHeader")?.expect("view should exist");
    let err = view.render(&json!({})).unwrap_err();

    assert!(matches!(err, ViewError::Render { .. }));
    assert!(!err.is_resolution_failure());
    assert!(resolver.is_cached("patientHeader"));
    Ok(())
}
