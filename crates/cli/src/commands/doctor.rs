use bigbike_core::config::{AppConfig, LoadOptions};
use bigbike_core::Catalog;
use bigbike_store::{FileKvStore, KvStore};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_storage_readiness(&config));
            checks.push(check_catalog_integrity());
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(DoctorCheck {
                name: "storage_readiness",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
            checks.push(DoctorCheck {
                name: "catalog_integrity",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_storage_readiness(config: &AppConfig) -> DoctorCheck {
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return DoctorCheck {
                name: "storage_readiness",
                status: CheckStatus::Fail,
                details: format!("could not start async runtime: {error}"),
            }
        }
    };

    let data_dir = config.storage.data_dir.clone();
    let outcome = runtime.block_on(async move {
        let kv = FileKvStore::new(&data_dir);
        kv.ensure_dir().await?;
        kv.put("doctorProbe", "\"ok\"".to_string()).await?;
        let read = kv.get("doctorProbe").await?;
        kv.remove("doctorProbe").await?;
        Ok::<_, bigbike_store::StoreError>(read)
    });

    match outcome {
        Ok(Some(value)) if value == "\"ok\"" => DoctorCheck {
            name: "storage_readiness",
            status: CheckStatus::Pass,
            details: format!(
                "storage round-trip succeeded in {}",
                config.storage.data_dir.display()
            ),
        },
        Ok(_) => DoctorCheck {
            name: "storage_readiness",
            status: CheckStatus::Fail,
            details: "storage probe read back an unexpected value".to_string(),
        },
        Err(error) => DoctorCheck {
            name: "storage_readiness",
            status: CheckStatus::Fail,
            details: format!("storage probe failed: {error}"),
        },
    }
}

fn check_catalog_integrity() -> DoctorCheck {
    let catalog = Catalog::builtin();
    if catalog.is_empty() {
        return DoctorCheck {
            name: "catalog_integrity",
            status: CheckStatus::Fail,
            details: "built-in catalog is empty".to_string(),
        };
    }

    let mut slugs: Vec<&str> = catalog.iter().map(|bike| bike.slug.as_str()).collect();
    let total = slugs.len();
    slugs.sort_unstable();
    slugs.dedup();
    if slugs.len() != total {
        return DoctorCheck {
            name: "catalog_integrity",
            status: CheckStatus::Fail,
            details: "duplicate slugs in the built-in catalog".to_string(),
        };
    }

    DoctorCheck {
        name: "catalog_integrity",
        status: CheckStatus::Pass,
        details: format!("{} bikes across {} brands", total, catalog.brands().len()),
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = vec![report.summary.clone()];
    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("  [{marker:<4}] {}: {}", check.name, check.details));
    }
    lines.join("\n")
}

fn escape_json(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}
