//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// `[source]` lines for optional values: commented out when unset
    fn optional_source_lines(&self) -> String {
        let file = match &self.source.file {
            Some(path) => format!("file = \"{}\"\n", path.display()),
            None => "# file = \"./snapshot.json\"\n".to_string(),
        };
        let url = match &self.source.url {
            Some(url) => format!("url = \"{}\"\n", url),
            None => "# url = \"https://marketplace.example.com/api/admin/snapshot\"\n".to_string(),
        };
        format!("{}{}", file, url)
    }

    /// Serialize config to a commented TOML document
    pub fn to_toml(&self) -> String {
        format!(
            r#"# testmarket configuration

# Theme: dark, light, terminal
theme = "{theme}"

# Page of a bucket when switching away and back: preserve, reset
tab_policy = "{tab_policy}"

# Record source (TESTMARKET_SOURCE / TESTMARKET_FILE / TESTMARKET_URL override)
[source]
kind = "{kind}"  # file, http, demo
{optional}# Environment variable holding the bearer token for the http source
token_env = "{token_env}"
# Seconds between refetches (0 = only on demand with 'r')
poll_interval_secs = {poll}
timeout_secs = {timeout}
demo_seed = {seed}

# Records per page for each board
[page_sizes]
submissions = {ps_submissions}
assignments = {ps_assignments}
users = {ps_users}
notifications = {ps_notifications}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# JSON file logging (in addition to TUI buffer or stdout)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            theme = self.theme,
            tab_policy = self.listing.tab_policy.as_str(),
            kind = self.source.kind.as_str(),
            optional = self.optional_source_lines(),
            token_env = self.source.token_env,
            poll = self.source.poll_interval_secs,
            timeout = self.source.timeout_secs,
            seed = self.source.demo_seed,
            ps_submissions = self.listing.page_sizes.submissions,
            ps_assignments = self.listing.page_sizes.assignments,
            ps_users = self.listing.page_sizes.users,
            ps_notifications = self.listing.page_sizes.notifications,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
