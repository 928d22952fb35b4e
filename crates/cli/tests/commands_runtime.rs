use std::env;
use std::sync::{Mutex, OnceLock};

use bigbike_cli::commands::{catalog, chat, compare, doctor, nearest, show};
use serde_json::Value;

#[test]
fn catalog_lists_every_bike_by_default() {
    with_env(&[], || {
        let result = catalog::run(None, None, None);
        assert_eq!(result.exit_code, 0, "expected successful catalog listing");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "catalog");
        assert_eq!(payload["status"], "ok");

        let message = payload["message"].as_str().unwrap_or("");
        assert!(message.starts_with("10 of 10 bikes"));
        assert!(message.contains("yamaha-r1"));
        assert!(message.contains("ducati-panigale-v2"));
    });
}

#[test]
fn catalog_brand_filter_and_price_sort_compose() {
    with_env(&[], || {
        let result = catalog::run(None, Some("Kawasaki"), Some("price_asc"));
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let message = payload["message"].as_str().unwrap_or("");
        assert!(message.starts_with("3 of 10 bikes"));

        let ninja = message.find("kawasaki-ninja-400").expect("ninja 400 listed");
        let h2 = message.find("kawasaki-h2").expect("h2 listed");
        assert!(ninja < h2, "cheapest Kawasaki should come first");
    });
}

#[test]
fn catalog_rejects_an_unknown_sort_key() {
    with_env(&[], || {
        let result = catalog::run(None, None, Some("wheelbase"));
        assert_eq!(result.exit_code, 2, "expected usage failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "usage");
    });
}

#[test]
fn show_renders_the_full_spec_sheet() {
    with_env(&[], || {
        let result = show::run("kawasaki-h2");
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let message = payload["message"].as_str().unwrap_or("");
        assert!(message.contains("Kawasaki Ninja H2"));
        assert!(message.contains("228hp"));
        assert!(message.contains("$29000"));
    });
}

#[test]
fn show_reports_unknown_slugs() {
    with_env(&[], || {
        let result = show::run("vespa-px");
        assert_eq!(result.exit_code, 3, "expected not-found failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "not_found");
    });
}

#[test]
fn compare_marks_the_better_value_per_row() {
    with_env(&[], || {
        let result = compare::run("yamaha-r1", "kawasaki-h2");
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let message = payload["message"].as_str().unwrap_or("");
        assert!(message.contains("Yamaha YZF-R1 vs Kawasaki Ninja H2"));
        // The H2 wins on power, the R1 on price.
        assert!(message.contains("Horsepower"));
        assert!(message.contains("*228"));
        assert!(message.contains("*17999"));
    });
}

#[test]
fn compare_reports_the_first_unknown_slug() {
    with_env(&[], || {
        let result = compare::run("yamaha-r1", "vespa-px");
        assert_eq!(result.exit_code, 3);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "not_found");
        assert!(payload["message"].as_str().unwrap_or("").contains("vespa-px"));
    });
}

#[test]
fn chat_answers_a_lookup_question() {
    with_env(&[], || {
        let result = chat::run("Yamaha R1");
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let message = payload["message"].as_str().unwrap_or("");
        assert!(message.contains("Yamaha YZF-R1: 200HP, 998CC, $17,999."));
        assert!(message.contains("try: "));
    });
}

#[test]
fn chat_fails_fast_on_an_unsupported_locale() {
    with_env(&[("BIGBIKE_LOCALE", "fr")], || {
        let result = chat::run("fastest bikes");
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn nearest_without_coordinates_lists_all_branches() {
    with_env(&[], || {
        let result = nearest::run(None, None);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let message = payload["message"].as_str().unwrap_or("");
        assert!(message.contains("all branches"));
        assert!(message.contains("BigBike Downtown Showroom"));
        assert!(message.contains("BigBike East Outlet"));
    });
}

#[test]
fn nearest_resolves_the_closest_branch() {
    with_env(&[], || {
        let result = nearest::run(Some(13.7563), Some(100.5018));
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        let message = payload["message"].as_str().unwrap_or("");
        assert!(message.contains("BigBike Downtown Showroom"));
        assert!(message.contains("km away"));
    });
}

#[test]
fn doctor_passes_with_a_writable_data_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_dir = dir.path().to_string_lossy().to_string();
    with_env(&[("BIGBIKE_DATA_DIR", &data_dir)], || {
        let output = doctor::run(true);
        let payload = parse_payload(&output);
        assert_eq!(payload["overall_status"], "pass");

        let checks = payload["checks"].as_array().expect("checks array");
        assert_eq!(checks.len(), 3);
        assert!(checks.iter().all(|check| check["status"] == "pass"));
    });
}

#[test]
fn doctor_fails_and_skips_when_config_is_invalid() {
    with_env(&[("BIGBIKE_PORT", "not-a-port")], || {
        let output = doctor::run(true);
        let payload = parse_payload(&output);
        assert_eq!(payload["overall_status"], "fail");

        let checks = payload["checks"].as_array().expect("checks array");
        assert_eq!(checks[0]["name"], "config_validation");
        assert_eq!(checks[0]["status"], "fail");
        assert_eq!(checks[1]["status"], "skipped");
        assert_eq!(checks[2]["status"], "skipped");
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

fn with_env(vars: &[(&str, &str)], body: impl FnOnce()) {
    let _guard = env_lock().lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    const MANAGED: &[&str] = &[
        "BIGBIKE_BIND_ADDRESS",
        "BIGBIKE_PORT",
        "BIGBIKE_DATA_DIR",
        "BIGBIKE_LOCALE",
        "BIGBIKE_LOG_LEVEL",
        "BIGBIKE_LOG_FORMAT",
    ];
    for key in MANAGED {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    body();

    for (key, _) in vars {
        env::remove_var(key);
    }
}
