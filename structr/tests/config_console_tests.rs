//! Configuration console flows: login, service control, settings updates

#[path = "testutils/mod.rs"]
mod testutils;

use serial_test::serial;
use structr::config::settings::{
    APPLICATION_TITLE, HTTP_PORT, MISC_GROUP, SERVER_GROUP, SUPERUSER_PASSWORD,
};
use structr::config::SettingValue;
use structr::console::{ConsoleRequest, ConsoleResponse, CONFIG_URL};
use structr::services::NODE_SERVICE;
use testutils::console_fixture::{ConsoleFixture, PASSWORD};

fn redirect(location: &str) -> ConsoleResponse {
    ConsoleResponse::Redirect(location.to_string())
}

fn services_redirect() -> ConsoleResponse {
    redirect(&format!("{}#services", CONFIG_URL))
}

fn session(id: &str) -> ConsoleRequest {
    ConsoleRequest::new(Some(id.to_string()))
}

#[test]
#[serial]
fn test_unauthenticated_start_is_ignored() {
    let fixture = ConsoleFixture::configured().unwrap();
    let services = fixture.instance().services();
    assert!(!services.is_ready(NODE_SERVICE));

    let response = fixture.get(session("anonymous").with_param("start", NODE_SERVICE));
    assert_eq!(response, services_redirect());
    assert!(!services.is_ready(NODE_SERVICE));

    let response = fixture.get(ConsoleRequest::new(None).with_param("start", NODE_SERVICE));
    assert_eq!(response, services_redirect());
    assert!(!services.is_ready(NODE_SERVICE));
}

#[test]
#[serial]
fn test_authenticated_start_and_stop() {
    let fixture = ConsoleFixture::configured().unwrap();
    let services = fixture.instance().services();

    assert_eq!(fixture.login("s1"), redirect(CONFIG_URL));

    let response = fixture.get(session("s1").with_param("start", NODE_SERVICE));
    assert_eq!(response, services_redirect());
    assert!(services.is_ready(NODE_SERVICE));
    assert!(fixture.instance().graph_store().is_some());

    match fixture.get(session("s1")) {
        ConsoleResponse::Html(html) => {
            assert!(html.contains(&format!("{}?stop={}", CONFIG_URL, NODE_SERVICE)));
        }
        other => panic!("expected console page, got {:?}", other),
    }

    let response = fixture.get(session("s1").with_param("stop", NODE_SERVICE));
    assert_eq!(response, services_redirect());
    assert!(!services.is_ready(NODE_SERVICE));
}

#[test]
#[serial]
fn test_unknown_service_redirects() {
    let fixture = ConsoleFixture::configured().unwrap();
    fixture.login("s1");

    assert_eq!(
        fixture.get(session("s1").with_param("start", "NoSuchService")),
        services_redirect()
    );
    assert_eq!(
        fixture.get(session("s1").with_param("stop", "NoSuchService")),
        services_redirect()
    );
}

#[test]
#[serial]
fn test_login_and_logout() {
    let fixture = ConsoleFixture::configured().unwrap();

    match fixture.get(session("s1")) {
        ConsoleResponse::Html(html) => {
            assert!(html.starts_with("<!DOCTYPE html>"));
            assert!(html.contains("usernameField"));
            assert!(html.contains("passwordField"));
            assert!(html.contains("loginButton"));
            assert!(!html.contains("configTabs"));
        }
        other => panic!("expected login page, got {:?}", other),
    }

    fixture.login("s1");
    assert!(fixture.sees_console(Some("s1")));
    assert!(!fixture.sees_console(Some("s2")));

    match fixture.get(session("s1")) {
        ConsoleResponse::Html(html) => assert!(html.contains("logout-form")),
        other => panic!("expected console page, got {:?}", other),
    }

    let response = fixture.post(session("s1").with_param("action", "logout"));
    assert_eq!(response, redirect(CONFIG_URL));
    assert!(!fixture.sees_console(Some("s1")));
}

#[test]
#[serial]
fn test_wrong_credentials_rejected() {
    let fixture = ConsoleFixture::configured().unwrap();

    fixture.post(
        session("s1")
            .with_param("action", "login")
            .with_param("username", "superadmin")
            .with_param("password", "wrong"),
    );
    assert!(!fixture.sees_console(Some("s1")));

    fixture.post(
        session("s1")
            .with_param("action", "login")
            .with_param("username", "admin")
            .with_param("password", PASSWORD),
    );
    assert!(!fixture.sees_console(Some("s1")));
}

#[test]
#[serial]
fn test_login_without_session_is_ignored() {
    let fixture = ConsoleFixture::configured().unwrap();

    let response = fixture.post(
        ConsoleRequest::new(None)
            .with_param("action", "login")
            .with_param("username", "superadmin")
            .with_param("password", PASSWORD),
    );
    assert_eq!(response, redirect(CONFIG_URL));
    assert!(!fixture.sees_console(None));
}

#[test]
#[serial]
fn test_first_run_bypasses_login() {
    let fixture = ConsoleFixture::first_run().unwrap();
    assert!(!fixture.instance().services().is_configured());

    assert!(fixture.sees_console(None));
    match fixture.get(ConsoleRequest::new(None)) {
        ConsoleResponse::Html(html) => assert!(!html.contains("logout-form")),
        other => panic!("expected console page, got {:?}", other),
    }

    // no password configured: login is refused
    fixture.post(
        session("s1")
            .with_param("action", "login")
            .with_param("username", "superadmin")
            .with_param("password", ""),
    );

    // saving creates the configuration file and ends the first run
    fixture.post(ConsoleRequest::new(None).with_param(APPLICATION_TITLE, "Demo"));
    assert!(fixture.instance().services().is_configured());
    assert!(fixture.config_text().contains("\"application.title\" = \"Demo\""));
    assert!(!fixture.sees_console(Some("s1")));
}

#[test]
#[serial]
fn test_bulk_update_writes_configuration() {
    let fixture = ConsoleFixture::configured().unwrap();
    fixture.login("s1");
    let settings = fixture.instance().settings();

    let response = fixture.post(
        session("s1")
            .with_param(HTTP_PORT, "9090")
            .with_param(format!("{}._settings_group", HTTP_PORT), SERVER_GROUP)
            .with_param("custom.flag", "true")
            .with_param("custom.flag._settings_group", "nonexistent")
            .with_param("custom.limit", "25")
            .with_param("custom.limit._settings_group", SERVER_GROUP)
            .with_param("custom.multi", "a")
            .with_param("custom.multi", "b"),
    );
    assert_eq!(response, redirect(CONFIG_URL));

    assert_eq!(settings.get_integer(HTTP_PORT), Some(9090));

    let flag = settings.get_setting("custom.flag").expect("flag created");
    assert_eq!(flag.group, MISC_GROUP);
    assert_eq!(flag.value(), &SettingValue::Boolean(true));

    let limit = settings.get_setting("custom.limit").expect("limit created");
    assert_eq!(limit.group, SERVER_GROUP);
    assert_eq!(limit.value(), &SettingValue::Integer(25));

    assert!(settings.get_setting("custom.multi").is_none());
    assert!(settings
        .get_setting("custom.flag._settings_group")
        .is_none());

    let text = fixture.config_text();
    assert!(text.contains("\"application.http.port\" = 9090"));
    assert!(text.contains("\"custom.flag\" = true"));
    assert!(text.contains("\"custom.limit\" = 25"));
    assert!(!text.contains("custom.multi"));
}

#[test]
#[serial]
fn test_update_requires_authentication() {
    let fixture = ConsoleFixture::configured().unwrap();
    let before = fixture.config_text();

    fixture.post(session("intruder").with_param(HTTP_PORT, "1"));
    assert_ne!(fixture.instance().settings().get_integer(HTTP_PORT), Some(1));
    assert_eq!(fixture.config_text(), before);
}

#[test]
#[serial]
fn test_reset_builtin_and_dynamic_settings() {
    let fixture = ConsoleFixture::configured().unwrap();
    fixture.login("s1");
    let settings = fixture.instance().settings();
    let default_port = settings.get_integer(HTTP_PORT);

    fixture.post(
        session("s1")
            .with_param(HTTP_PORT, "9191")
            .with_param("custom.key", "value"),
    );
    assert_eq!(settings.get_integer(HTTP_PORT), Some(9191));
    assert!(settings.get_setting("custom.key").is_some());

    let response = fixture.get(ConsoleRequest::new(None).with_param("reset", HTTP_PORT));
    assert_eq!(response, redirect(CONFIG_URL));
    assert_eq!(settings.get_integer(HTTP_PORT), default_port);
    assert!(settings.get_setting(HTTP_PORT).is_some());

    fixture.get(ConsoleRequest::new(None).with_param("reset", "custom.key"));
    assert!(settings.get_setting("custom.key").is_none());

    let text = fixture.config_text();
    assert!(!text.contains("application.http.port"));
    assert!(!text.contains("custom.key"));
}

#[test]
#[serial]
fn test_reload_reads_file() {
    let fixture = ConsoleFixture::configured().unwrap();
    let mut text = fixture.config_text();
    text.push_str("\"application.title\" = \"Reloaded\"\n");
    std::fs::write(fixture.config_path(), text).unwrap();

    let response = fixture.get(ConsoleRequest::new(None).with_param("reload", ""));
    assert_eq!(response, redirect(CONFIG_URL));
    assert_eq!(
        fixture.instance().settings().get_string(APPLICATION_TITLE),
        Some("Reloaded".to_string())
    );
}

#[test]
#[serial]
fn test_reset_link_encodes_key() {
    let fixture = ConsoleFixture::configured().unwrap();
    fixture.login("s1");
    let settings = fixture.instance().settings();
    let key = "odd&key#with+100%";

    fixture.post(session("s1").with_param(key, "value"));
    assert!(settings.get_setting(key).is_some());

    match fixture.get(session("s1")) {
        ConsoleResponse::Html(html) => {
            assert!(html.contains(&format!(
                "{}?reset=odd%26key%23with%2B100%25",
                CONFIG_URL
            )));
        }
        other => panic!("expected console page, got {:?}", other),
    }

    // the transport hands the decoded key to the console
    fixture.get(ConsoleRequest::new(None).with_param("reset", key));
    assert!(settings.get_setting(key).is_none());
}

#[test]
#[serial]
fn test_password_is_not_rendered() {
    let fixture = ConsoleFixture::configured().unwrap();
    fixture.login("s1");

    match fixture.get(session("s1")) {
        ConsoleResponse::Html(html) => {
            assert!(html.contains(SUPERUSER_PASSWORD));
            assert!(!html.contains(PASSWORD));
        }
        other => panic!("expected console page, got {:?}", other),
    }

    // submitting the form with the blank password field keeps the password
    fixture.post(
        session("s1")
            .with_param(SUPERUSER_PASSWORD, "")
            .with_param(APPLICATION_TITLE, "Renamed"),
    );
    let settings = fixture.instance().settings();
    assert_eq!(settings.get_string(APPLICATION_TITLE).as_deref(), Some("Renamed"));
    assert_eq!(settings.get_string(SUPERUSER_PASSWORD).as_deref(), Some(PASSWORD));

    fixture.login("s2");
    assert!(fixture.sees_console(Some("s2")));
}
