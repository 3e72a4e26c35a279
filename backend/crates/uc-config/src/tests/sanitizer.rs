use crate::Config;
use crate::tests::{EnvGuard, STATIC_SECRET_TOML, setup_config_dir, write_config};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, elements_are, eq, err, ok};
use serial_test::serial;

#[test]
#[serial]
fn given_sanitizer_fields_env_when_load_then_reads_additional_fields() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _fields = EnvGuard::set("UC_SANITIZER_FIELDS", "ssn, dob,");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(
        config.sanitizer.sensitive_fields,
        elements_are![eq("ssn"), eq("dob")]
    );
}

#[test]
#[serial]
fn given_empty_sensitive_fields_when_validate_then_ok() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(
        temp.path(),
        &format!("{}\n[sanitizer]\nsensitive_fields = []\n", STATIC_SECRET_TOML),
    );

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_blank_sensitive_field_when_validate_then_error() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(
        temp.path(),
        &format!(
            "{}\n[sanitizer]\nsensitive_fields = [\"ssn\", \"  \"]\n",
            STATIC_SECRET_TOML
        ),
    );

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("blank"));
}
