//! Integration tests for configuration loaded from files and the environment.
//!
//! Environment variables are process-wide, so every test here runs serially
//! and clears the variables it touched before asserting.

use anyhow::Result;
use fragview::config::ResolverConfig;
use fragview::constants::{ENV_CONFIG_PATH, ENV_DEV_FOLDERS, ENV_RESOURCE_PREFIX};
use fragview::test_utils::ViewFixture;
use fragview::view::ViewResolver;
use serde_json::json;
use serial_test::serial;

fn clear_env() {
    unsafe {
        std::env::remove_var(ENV_CONFIG_PATH);
        std::env::remove_var(ENV_RESOURCE_PREFIX);
        std::env::remove_var(ENV_DEV_FOLDERS);
    }
}

#[test]
#[serial]
fn test_dev_folders_from_environment_select_development_mode() -> Result<()> {
    clear_env();
    let mut fixture = ViewFixture::new()?;
    let dir = fixture.add_dev_folder()?;
    fixture.write_dev_view(dir, "patientHeader", "dev {{ name }}")?;

    let folders = std::env::join_paths(fixture.dev_folders())?;
    unsafe {
        std::env::set_var(ENV_DEV_FOLDERS, &folders);
    }
    let config = ResolverConfig::load();
    clear_env();

    let resolver = ViewResolver::new(config?)?;
    assert!(resolver.is_development());
    let view = resolver.resolve("patientHeader")?.expect("view should exist");
    assert_eq!(view.render(&json!({ "name": "Amy" }))?, "dev Amy");
    Ok(())
}

#[test]
#[serial]
fn test_config_file_selects_production_settings() -> Result<()> {
    clear_env();
    let fixture = ViewFixture::new()?;
    let views = fixture.resource_root().join("views");
    std::fs::create_dir_all(&views)?;
    std::fs::write(views.join("banner.tera"), "packaged banner")?;

    let config_path = fixture.resource_root().join("fragview.toml");
    std::fs::write(
        &config_path,
        format!(
            "resource_prefix = \"views/\"\nresource_root = {:?}\n",
            fixture.resource_root().display().to_string()
        ),
    )?;

    unsafe {
        std::env::set_var(ENV_CONFIG_PATH, &config_path);
    }
    let config = ResolverConfig::load();
    clear_env();

    let resolver = ViewResolver::new(config?)?;
    assert!(!resolver.is_development());
    assert_eq!(resolver.resource_path("banner"), "views/banner.tera");
    let view = resolver.resolve("banner")?.expect("view should exist");
    assert_eq!(view.render(&json!({}))?, "packaged banner");
    Ok(())
}

#[test]
#[serial]
fn test_environment_overrides_config_file() -> Result<()> {
    clear_env();
    let fixture = ViewFixture::new()?;
    let config_path = fixture.resource_root().join("fragview.toml");
    std::fs::write(
        &config_path,
        "resource_prefix = \"from-file/\"\ndevelopment_folders = [\"/app/dev/frags\"]\n",
    )?;

    unsafe {
        std::env::set_var(ENV_CONFIG_PATH, &config_path);
        std::env::set_var(ENV_RESOURCE_PREFIX, "from-env/");
        std::env::set_var(ENV_DEV_FOLDERS, "");
    }
    let config = ResolverConfig::load();
    clear_env();

    let config = config?;
    assert_eq!(config.resource_prefix, "from-env/");
    assert!(!config.is_development());
    Ok(())
}

#[test]
#[serial]
fn test_missing_config_file_is_an_error() -> Result<()> {
    clear_env();
    let fixture = ViewFixture::new()?;

    unsafe {
        std::env::set_var(ENV_CONFIG_PATH, fixture.resource_root().join("absent.toml"));
    }
    let result = ResolverConfig::load();
    clear_env();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
    Ok(())
}
