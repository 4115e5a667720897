// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Configuration console request handling
//!
//! Transport-independent GET/POST handling for `/structr/config`. The HTTP
//! binding converts requests into [`ConsoleRequest`] values and maps
//! [`ConsoleResponse`] back to redirects or HTML pages.

use super::html::{Document, Tag};
use super::session_store::SessionStore;
use crate::config::settings::{GROUP_FIELD_SUFFIX, SUPERUSER_PASSWORD, SUPERUSER_USERNAME};
use crate::config::{Setting, Settings, CONFIG_FILE_NAME};
use crate::services::Services;
use log::{debug, error, info, warn};
use std::sync::Arc;

/// Path the console is served under
pub const CONFIG_URL: &str = "/structr/config";

const SERVICES_ANCHOR: &str = "#services";

/// One console request: the caller's session and its query or form fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsoleRequest {
    pub session_id: Option<String>,
    /// Fields in submission order; a key may repeat
    pub params: Vec<(String, String)>,
}

impl ConsoleRequest {
    pub fn new(session_id: Option<String>) -> Self {
        Self {
            session_id,
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// First value of a field
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All values of a field, in order
    pub fn values(&self, key: &str) -> Vec<&str> {
        self.params
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Distinct field names in first-seen order
    fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for (key, _) in &self.params {
            if !keys.contains(&key.as_str()) {
                keys.push(key);
            }
        }
        keys
    }
}

/// Console answer
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleResponse {
    /// Redirect to the given location
    Redirect(String),
    /// `text/html; charset=utf-8` page
    Html(String),
}

/// The configuration console
pub struct ConfigConsole {
    settings: Arc<Settings>,
    services: Arc<Services>,
    sessions: Arc<dyn SessionStore>,
}

impl ConfigConsole {
    pub fn new(
        settings: Arc<Settings>,
        services: Arc<Services>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            settings,
            services,
            sessions,
        }
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    pub fn services(&self) -> &Arc<Services> {
        &self.services
    }

    pub fn handle_get(&self, request: &ConsoleRequest) -> ConsoleResponse {
        if request.param("reload").is_some() {
            self.reload();
            return redirect(CONFIG_URL);
        }

        if let Some(key) = request.param("reset") {
            if self.settings.reset(key) {
                debug!("Reset setting {}", key);
            }
            self.store();
            return redirect(CONFIG_URL);
        }

        if let Some(name) = request.param("start") {
            if self.is_authenticated(request) {
                if let Err(e) = self.services.start_service(name) {
                    warn!("Unable to start service {}: {}", name, e);
                }
            }
            return redirect(&format!("{}{}", CONFIG_URL, SERVICES_ANCHOR));
        }

        if let Some(name) = request.param("stop") {
            if self.is_authenticated(request) {
                if let Err(e) = self.services.shutdown_service(name) {
                    warn!("Unable to stop service {}: {}", name, e);
                }
            }
            return redirect(&format!("{}{}", CONFIG_URL, SERVICES_ANCHOR));
        }

        let authenticated = self.is_authenticated(request);
        let document = if authenticated {
            self.config_document(authenticated)
        } else {
            self.login_document()
        };

        let mut html = document.render();
        html.push('\n');
        ConsoleResponse::Html(html)
    }

    pub fn handle_post(&self, request: &ConsoleRequest) -> ConsoleResponse {
        match request.param("action") {
            Some("login") => self.login(request),
            Some("logout") => self.logout(request),
            Some(other) => debug!("Ignoring unknown console action {}", other),
            None => {
                if self.is_authenticated(request) {
                    self.update_settings(request);
                    self.store();
                }
            }
        }

        redirect(CONFIG_URL)
    }

    /// Whether the request may use the console
    ///
    /// An instance without a configuration file is on its first run; every
    /// request is authenticated then.
    pub fn is_authenticated(&self, request: &ConsoleRequest) -> bool {
        if !self.services.is_configured() {
            return true;
        }

        match &request.session_id {
            Some(id) => self.sessions.is_authenticated(id),
            None => {
                warn!("Cannot check console request without session ID, ignoring");
                false
            }
        }
    }

    fn login(&self, request: &ConsoleRequest) {
        let Some(session_id) = &request.session_id else {
            warn!("Cannot authenticate console request without session ID, ignoring");
            return;
        };

        let expected_user = self.settings.get_string(SUPERUSER_USERNAME).unwrap_or_default();
        let expected_password = self.settings.get_string(SUPERUSER_PASSWORD).unwrap_or_default();

        if expected_password.is_empty() {
            warn!(
                "Console login refused: {} is not set",
                SUPERUSER_PASSWORD
            );
            return;
        }

        if request.param("username") == Some(expected_user.as_str())
            && request.param("password") == Some(expected_password.as_str())
        {
            self.sessions.authenticate(session_id);
            info!("Console session authenticated");
        } else {
            warn!("Console login failed for user {:?}", request.param("username"));
        }
    }

    fn logout(&self, request: &ConsoleRequest) {
        match &request.session_id {
            Some(session_id) => self.sessions.invalidate(session_id),
            None => warn!("Cannot invalidate console request without session ID, ignoring"),
        }
    }

    fn update_settings(&self, request: &ConsoleRequest) {
        for key in request.keys() {
            if key.ends_with(GROUP_FIELD_SUFFIX) {
                continue;
            }

            let values = request.values(key);
            let [value] = values.as_slice() else {
                debug!("Ignoring field {} with {} values", key, values.len());
                continue;
            };

            // blank password field: keep the current password
            if key == SUPERUSER_PASSWORD && value.is_empty() {
                continue;
            }

            if self.settings.get_setting(key).is_some() {
                if let Err(e) = self.settings.set_from_string(key, value) {
                    warn!("Unable to update setting {}: {}", key, e);
                }
                continue;
            }

            let group_field = format!("{}{}", key, GROUP_FIELD_SUFFIX);
            if let Err(e) =
                self.settings
                    .create_setting_for_value(request.param(&group_field), key, value)
            {
                warn!("Unable to create setting {}: {}", key, e);
            }
        }
    }

    fn reload(&self) {
        let path = self.services.config_file_path();
        if let Err(e) = self.settings.load_configuration(&path) {
            error!("Unable to reload {}: {}", path.display(), e);
        }
    }

    fn store(&self) {
        let path = self.services.config_file_path();
        if let Err(e) = self.settings.store_configuration(&path) {
            error!("Unable to store {}: {}", path.display(), e);
        }
    }

    fn head(&self) -> Tag {
        let title = self
            .settings
            .get_string(crate::config::settings::APPLICATION_TITLE)
            .unwrap_or_else(|| "Structr".to_string());

        Tag::block("head")
            .child(Tag::block("title").text(format!("Welcome to {} {}", title, crate::VERSION)))
            .child(
                Tag::empty("meta")
                    .attr("http-equiv", "Content-Type")
                    .attr("content", "text/html;charset=utf-8"),
            )
            .child(
                Tag::empty("meta")
                    .attr("name", "viewport")
                    .attr("content", "width=1024, user-scalable=yes"),
            )
            .child(
                Tag::empty("link")
                    .attr("rel", "stylesheet")
                    .attr("href", "/structr/css/config.css"),
            )
            .child(Tag::block("script").attr("src", "/structr/js/config.js"))
    }

    fn header(&self, authenticated: bool) -> Tag {
        let mut menu = Tag::block("ul");

        if authenticated && self.services.is_configured() {
            let logout_form = Tag::block("form")
                .id("logout-form")
                .attr("action", CONFIG_URL)
                .attr("method", "post")
                .child(
                    Tag::empty("input")
                        .attr("type", "hidden")
                        .attr("name", "action")
                        .attr("value", "logout"),
                )
                .child(
                    Tag::block("button")
                        .attr("type", "submit")
                        .text("Logout"),
                );
            menu = menu.child(Tag::block("li").child(logout_form));
        }

        Tag::block("div")
            .id("header")
            .child(Tag::block("div").id("menu").css("menu").child(menu))
    }

    fn config_document(&self, authenticated: bool) -> Document {
        let mut menu = Tag::block("ul").id("configTabsMenu");
        let mut tabs = Vec::new();

        for group in self.settings.groups() {
            menu = menu.child(
                Tag::block("li").child(
                    Tag::block("a")
                        .id(&format!("{}Menu", group.key))
                        .attr("href", format!("#{}", group.key))
                        .child(Tag::block("span").text(group.name.clone())),
                ),
            );

            let settings = self.settings.settings_in_group(&group.key);
            tabs.push(
                Tag::block("div")
                    .css("tab-content")
                    .id(&group.key)
                    .children(settings.iter().map(render_setting))
                    .child(Tag::block("div").attr("style", "clear: both;")),
            );
        }

        menu = menu.child(
            Tag::block("li").child(
                Tag::block("a")
                    .id("servicesMenu")
                    .attr("href", SERVICES_ANCHOR)
                    .child(Tag::block("span").text("Services")),
            ),
        );
        tabs.push(self.services_tab());

        let buttons = Tag::block("div")
            .css("buttons")
            .child(
                Tag::block("button")
                    .attr("type", "button")
                    .attr(
                        "onclick",
                        format!("window.location.href='{}?reload';", CONFIG_URL),
                    )
                    .text("Reload configuration"),
            )
            .child(
                Tag::empty("input")
                    .attr("type", "submit")
                    .attr("value", format!("Save to {}", CONFIG_FILE_NAME)),
            );

        let form = Tag::block("form")
            .css("config-form")
            .attr("action", CONFIG_URL)
            .attr("method", "post")
            .child(
                Tag::block("div").id("main").child(
                    Tag::block("div")
                        .id("configTabs")
                        .child(menu)
                        .children(tabs),
                ),
            )
            .child(buttons);

        let body = Tag::block("body")
            .child(self.header(authenticated))
            .child(form);

        Document::new(self.head(), body)
    }

    fn services_tab(&self) -> Tag {
        let mut table = Tag::block("table").id("services-table").child(
            Tag::block("tr")
                .child(Tag::block("th").text("Service Name"))
                .child(Tag::block("th").attr("colspan", "2")),
        );

        for name in self.services.get_services() {
            let running = self.services.is_ready(&name);
            let (action, label) = if running {
                ("stop", "Stop")
            } else {
                ("start", "Start")
            };

            let button = Tag::block("td").child(
                Tag::block("button")
                    .attr("type", "button")
                    .attr(
                        "onclick",
                        format!("window.location.href='{}?{}={}';", CONFIG_URL, action, name),
                    )
                    .text(label),
            );

            let row = Tag::block("tr").child(Tag::block("td").text(name.clone()));
            table = table.child(if running {
                row.child(button).child(Tag::block("td"))
            } else {
                row.child(Tag::block("td")).child(button)
            });
        }

        Tag::block("div")
            .css("tab-content")
            .id("services")
            .child(table)
            .child(Tag::block("div").attr("style", "clear: both;"))
    }

    fn login_document(&self) -> Document {
        let field_row = |label: &str, id: &str, kind: &str, name: &str| {
            Tag::block("tr")
                .child(
                    Tag::block("td").child(Tag::block("label").attr("for", id).text(label)),
                )
                .child(
                    Tag::block("td").child(
                        Tag::empty("input")
                            .id(id)
                            .attr("type", kind)
                            .attr("name", name),
                    ),
                )
        };

        let form = Tag::block("form")
            .attr("action", CONFIG_URL)
            .attr("method", "post")
            .child(
                Tag::block("table")
                    .child(field_row("Username:", "usernameField", "text", "username"))
                    .child(field_row("Password:", "passwordField", "password", "password"))
                    .child(
                        Tag::block("tr").child(
                            Tag::block("td")
                                .attr("colspan", "2")
                                .css("btn")
                                .child(
                                    Tag::block("button")
                                        .id("loginButton")
                                        .attr("name", "login")
                                        .text("Login"),
                                )
                                .child(
                                    Tag::empty("input")
                                        .attr("type", "hidden")
                                        .attr("name", "action")
                                        .attr("value", "login"),
                                ),
                        ),
                    ),
            );

        let login_box = Tag::block("div")
            .id("login")
            .css("dialog")
            .child(Tag::block("p").text("Welcome to the Structr Configuration Wizard."))
            .child(form);

        let body = Tag::block("body").child(self.header(false)).child(login_box);
        Document::new(self.head(), body)
    }
}

fn render_setting(setting: &Setting) -> Tag {
    let input_type = if setting.key == SUPERUSER_PASSWORD {
        "password"
    } else {
        "text"
    };

    // the stored password is never echoed back
    let value = if setting.key == SUPERUSER_PASSWORD {
        String::new()
    } else {
        setting.value().to_string()
    };

    let mut row = Tag::block("p")
        .css("setting")
        .child(Tag::block("label").attr("for", &setting.key).text(setting.key.clone()))
        .child(
            Tag::empty("input")
                .id(&setting.key)
                .attr("type", input_type)
                .attr("name", &setting.key)
                .attr("value", value),
        )
        .child(
            Tag::empty("input")
                .attr("type", "hidden")
                .attr("name", format!("{}{}", setting.key, GROUP_FIELD_SUFFIX))
                .attr("value", &setting.group),
        );

    if setting.is_dynamic() || setting.is_modified() {
        let label = if setting.is_dynamic() { "Remove" } else { "Reset" };
        row = row.child(
            Tag::block("a")
                .css("reset")
                .attr(
                    "href",
                    format!("{}?reset={}", CONFIG_URL, urlencoding::encode(&setting.key)),
                )
                .text(label),
        );
    }

    row
}

fn redirect(location: &str) -> ConsoleResponse {
    ConsoleResponse::Redirect(location.to_string())
}
