//! Command line / environment configuration

use std::path::PathBuf;

use clap::Parser;
use zone_sync_core::{CoreResult, SyncConfig, SyncReport};
use zone_sync_provider::{ProviderConfig, CF_API_BASE};

/// Every intent applied, skipped or planned; nothing rejected.
pub const EXIT_OK: u8 = 0;
/// Some intent failed, or some line or file was rejected.
pub const EXIT_PARTIAL: u8 = 1;
/// The run could not start or was aborted (bad configuration, unreadable records directory).
pub const EXIT_FATAL: u8 = 2;

/// Create missing DNS records in a Cloudflare zone from `{subdomain}.txt` files.
///
/// Existing records are never updated or deleted; a (name, type) pair that already exists
/// is skipped.
#[derive(Parser, Debug)]
#[command(name = "zone-sync", version, about)]
pub struct Cli {
    /// Directory holding one `{subdomain}.txt` file per subdomain
    #[arg(long, env = "RECORDS_DIR", default_value = "records")]
    pub records_dir: PathBuf,

    /// Apex domain of the managed zone
    #[arg(long, env = "ZONE_APEX", default_value = zone_sync_core::config::DEFAULT_ZONE_APEX)]
    pub zone_apex: String,

    /// Cloudflare zone identifier
    #[arg(long, env = "CLOUDFLARE_ZONE_ID")]
    pub zone_id: String,

    /// Cloudflare API token (DNS edit permission on the zone)
    #[arg(long, env = "CLOUDFLARE_API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    /// Cloudflare API root
    #[arg(long, env = "CLOUDFLARE_API_BASE", default_value = CF_API_BASE)]
    pub api_base: String,

    /// Transport retries per lookup request
    #[arg(long, env = "ZONE_SYNC_MAX_RETRIES", default_value_t = 2)]
    pub max_retries: u32,

    /// Check existing records only, never create
    #[arg(long, env = "ZONE_SYNC_DRY_RUN")]
    pub dry_run: bool,

    /// Exit 0 even when some records failed or were rejected
    #[arg(long, env = "ZONE_SYNC_ALLOW_FAILURES")]
    pub allow_failures: bool,

    /// Write the run report as JSON to this path
    #[arg(long, env = "ZONE_SYNC_REPORT")]
    pub report: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace); `RUST_LOG` takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn sync_config(&self) -> CoreResult<SyncConfig> {
        SyncConfig::new(&self.zone_apex, self.dry_run)
    }

    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig::Cloudflare {
            api_token: self.api_token.trim().to_string(),
            zone_id: self.zone_id.trim().to_string(),
            api_base: self.api_base.clone(),
            max_retries: self.max_retries,
        }
    }

    /// Default filter directive when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Map a finished run to the process exit status.
pub fn exit_status(report: &SyncReport, allow_failures: bool) -> u8 {
    if report.has_failures() && !allow_failures {
        EXIT_PARTIAL
    } else {
        EXIT_OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use zone_sync_core::types::{FileFailure, Outcome, RecordIntent};
    use zone_sync_core::ParseError;
    use zone_sync_provider::RecordData;

    fn parse(args: &[&str]) -> Option<Cli> {
        let mut argv = vec!["zone-sync", "--zone-id", "zone-1", "--api-token", "tok"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv);
        assert!(cli.is_ok(), "parse failed: {cli:?}");
        cli.ok()
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_flow_into_configs() {
        let Some(cli) = parse(&[
            "--zone-apex",
            "Example.COM",
            "--dry-run",
            "--max-retries",
            "5",
            "--api-base",
            "http://127.0.0.1:8080",
            "-vv",
        ]) else {
            return;
        };

        let sync = cli.sync_config();
        assert!(
            matches!(&sync, Ok(c) if c.zone_apex == "example.com" && c.dry_run),
            "{sync:?}"
        );
        assert!(matches!(
            cli.provider_config(),
            ProviderConfig::Cloudflare { ref zone_id, max_retries: 5, ref api_base, .. }
                if zone_id == "zone-1" && api_base == "http://127.0.0.1:8080"
        ));
        assert_eq!(cli.log_level(), "trace");
    }

    #[test]
    fn token_is_redacted_in_debug() {
        let Some(cli) = parse(&[]) else {
            return;
        };
        let debug = format!("{:?}", cli.provider_config());
        assert!(!debug.contains("tok\""), "{debug}");
        assert!(debug.contains("<redacted>"));
    }

    fn report_with(outcome: Option<Outcome>) -> SyncReport {
        let mut report = SyncReport::new("is-cod.in", false);
        if let Some(outcome) = outcome {
            let intent = RecordIntent {
                subdomain: "www".to_string(),
                line: 1,
                fqdn: "www.is-cod.in".to_string(),
                data: RecordData::A {
                    address: "192.0.2.1".to_string(),
                },
            };
            report.record(&intent, outcome);
        }
        report
    }

    #[test]
    fn clean_run_exits_zero() {
        let report = report_with(Some(Outcome::Created {
            record_id: "r1".to_string(),
        }));
        assert_eq!(exit_status(&report, false), EXIT_OK);
        assert_eq!(exit_status(&report_with(None), false), EXIT_OK);
    }

    #[test]
    fn failures_exit_one_unless_allowed() {
        let mut report = report_with(None);
        report.failed_files.push(FileFailure::Parse {
            subdomain: String::new(),
            error: ParseError::EmptySubdomain,
        });
        assert_eq!(exit_status(&report, false), EXIT_PARTIAL);
        assert_eq!(exit_status(&report, true), EXIT_OK);
    }
}
