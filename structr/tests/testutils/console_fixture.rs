//! Instance fixture for configuration console tests

#![allow(dead_code)]

use structr::config::settings::{DATABASE_DRIVER, SUPERUSER_PASSWORD};
use structr::config::CONFIG_FILE_NAME;
use structr::console::{ConsoleRequest, ConsoleResponse};
use structr::StructrInstance;
use std::path::PathBuf;

pub const PASSWORD: &str = "correct horse";

pub struct ConsoleFixture {
    instance: StructrInstance,
    temp_dir: tempfile::TempDir,
}

impl ConsoleFixture {
    /// Instance without a configuration file (first run)
    pub fn first_run() -> Result<Self, Box<dyn std::error::Error>> {
        super::test_fixture::init_logging();
        let temp_dir = tempfile::tempdir()?;
        let instance = StructrInstance::open(temp_dir.path(), None)?;
        Ok(Self { instance, temp_dir })
    }

    /// Configured instance with a superuser password and in-memory storage
    pub fn configured() -> Result<Self, Box<dyn std::error::Error>> {
        super::test_fixture::init_logging();
        let temp_dir = tempfile::tempdir()?;
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            format!(
                "\"{}\" = \"memory\"\n\"{}\" = \"{}\"\n",
                DATABASE_DRIVER, SUPERUSER_PASSWORD, PASSWORD
            ),
        )?;
        let instance = StructrInstance::open(temp_dir.path(), None)?;
        Ok(Self { instance, temp_dir })
    }

    pub fn instance(&self) -> &StructrInstance {
        &self.instance
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join(CONFIG_FILE_NAME)
    }

    pub fn config_text(&self) -> String {
        std::fs::read_to_string(self.config_path()).unwrap_or_default()
    }

    pub fn get(&self, request: ConsoleRequest) -> ConsoleResponse {
        self.instance.console().handle_get(&request)
    }

    pub fn post(&self, request: ConsoleRequest) -> ConsoleResponse {
        self.instance.console().handle_post(&request)
    }

    /// Log `session` in with the fixture password
    pub fn login(&self, session: &str) -> ConsoleResponse {
        self.post(
            ConsoleRequest::new(Some(session.to_string()))
                .with_param("action", "login")
                .with_param("username", "superadmin")
                .with_param("password", PASSWORD),
        )
    }

    /// Whether a GET of the console page shows the settings form
    pub fn sees_console(&self, session: Option<&str>) -> bool {
        match self.get(ConsoleRequest::new(session.map(str::to_string))) {
            ConsoleResponse::Html(html) => html.contains("configTabs"),
            ConsoleResponse::Redirect(_) => false,
        }
    }
}
