use bigbike_assistant::Assistant;
use bigbike_core::config::{AppConfig, LoadOptions};
use bigbike_core::Catalog;

use crate::commands::CommandResult;

pub fn run(message: &str) -> CommandResult {
    // Locale comes from config so `BIGBIKE_LOCALE=th` switches the keyword
    // table here the same way it does for the server.
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("chat", "config_validation", error.to_string(), 2)
        }
    };

    let assistant = Assistant::new(Catalog::builtin(), &config.assistant.locale);
    let reply = assistant.answer(message);

    let mut lines = vec![reply.text];
    if !reply.suggestions.is_empty() {
        lines.push(String::new());
        for suggestion in &reply.suggestions {
            lines.push(format!("  try: {suggestion}"));
        }
    }

    CommandResult::success("chat", lines.join("\n"))
}
