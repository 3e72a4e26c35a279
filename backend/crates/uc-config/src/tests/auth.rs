use crate::tests::{EnvGuard, setup_config_dir, write_config};
use crate::{AuthMode, Config};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err, ok};
use serial_test::serial;

const SECRET_32: &str = "12345678901234567890123456789012";

// =========================================================================
// Validation Tests - Auth
// =========================================================================

#[test]
#[serial]
fn given_jwt_secret_too_short_when_validate_then_error_mentions_32_chars() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::set("UC_AUTH_JWT_SECRET", "tooshort");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("32 characters"));
}

#[test]
#[serial]
fn given_jwt_secret_exactly_32_chars_when_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::set("UC_AUTH_JWT_SECRET", SECRET_32);

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
    assert_that!(
        config.auth.mode().unwrap(),
        eq(AuthMode::StaticSecret { secret: SECRET_32 })
    );
}

#[test]
#[serial]
fn given_issuer_and_secret_when_validate_then_mutually_exclusive_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _issuer = EnvGuard::set("UC_AUTH_ISSUER_URL", "https://id.example.com/realms/acme");
    let _secret = EnvGuard::set("UC_AUTH_JWT_SECRET", SECRET_32);

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("mutually exclusive"));
}

#[test]
#[serial]
fn given_issuer_without_scheme_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _issuer = EnvGuard::set("UC_AUTH_ISSUER_URL", "id.example.com/realms/acme");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("http(s) URL"));
}

#[test]
#[serial]
fn given_issuer_with_client_id_when_mode_then_oidc_with_audience() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(
        temp.path(),
        r#"
            [auth]
            issuer_url = "https://id.example.com/realms/acme"
            client_id = "orders-api"
        "#,
    );

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), ok(anything()));
    assert_that!(
        config.auth.mode().unwrap(),
        eq(AuthMode::Oidc {
            issuer_url: "https://id.example.com/realms/acme",
            client_id: Some("orders-api"),
        })
    );
}

#[test]
#[serial]
fn given_jwks_refresh_below_minimum_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _issuer = EnvGuard::set("UC_AUTH_ISSUER_URL", "https://id.example.com/realms/acme");
    let _refresh = EnvGuard::set("UC_AUTH_JWKS_REFRESH_SECS", "5");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("jwks_refresh_secs"));
}

#[test]
#[serial]
fn given_short_exempt_route_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::set("UC_AUTH_JWT_SECRET", SECRET_32);
    let _routes = EnvGuard::set("UC_AUTH_EXEMPT_ROUTES", "Check");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
    let err_msg = format!("{}", result.unwrap_err());
    assert_that!(err_msg, contains_substring("'Check'"));
}

#[test]
#[serial]
fn given_fully_qualified_exempt_routes_when_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _secret = EnvGuard::set("UC_AUTH_JWT_SECRET", SECRET_32);
    let _routes = EnvGuard::set(
        "UC_AUTH_EXEMPT_ROUTES",
        "/grpc.health.v1.Health/Check,/acme.auth.v1.LoginService/SignIn",
    );

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), ok(anything()));
}
