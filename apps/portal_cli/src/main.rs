use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use portal_core::{load_settings, PortalController};
use shared::domain::Role;
use tracing_subscriber::EnvFilter;

mod session;
mod transcript;

use session::{run_session, AfterDashboard, RealtimeClock, SessionScript, VirtualClock};

#[derive(Parser, Debug)]
#[command(name = "portal-cli", about = "Play one sign-in against the academic portal")]
struct Args {
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    /// Role key or label, e.g. `student` or "Faculty Member".
    #[arg(long, value_parser = parse_role)]
    role: Option<Role>,
    #[arg(long, value_enum, default_value_t = AfterDashboard::Continue)]
    after_dashboard: AfterDashboard,
    /// Wait out every delay instead of jumping between deadlines.
    #[arg(long)]
    realtime: bool,
    /// Print the transcript as a JSON array.
    #[arg(long)]
    json: bool,
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_role(raw: &str) -> Result<Role, String> {
    Role::parse(raw).ok_or_else(|| {
        let known: Vec<&str> = Role::ALL.iter().map(|role| role.label()).collect();
        format!("unknown role '{raw}' (expected one of: {})", known.join(", "))
    })
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings =
        load_settings(args.config.as_deref()).context("failed to load portal settings")?;
    let mut portal = PortalController::new(settings).context("failed to initialize portal")?;
    let script = SessionScript {
        email: args.email,
        password: args.password,
        role: args.role,
        after_dashboard: args.after_dashboard,
    };

    let report = if args.realtime {
        run_session(&mut portal, &mut RealtimeClock::start(), &script).await
    } else {
        run_session(&mut portal, &mut VirtualClock::default(), &script).await
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.transcript)?);
    } else {
        for record in &report.transcript {
            println!("{}", transcript::format_record(record));
        }
        if let Some(dashboard) = &report.dashboard {
            println!("{}", transcript::format_dashboard(dashboard));
        }
    }

    tracing::info!(outcome = ?report.outcome, "session finished");
    Ok(ExitCode::from(report.outcome.exit_code()))
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use shared::domain::Role;

    use super::{parse_role, AfterDashboard, Args};

    #[test]
    fn parses_a_full_command_line() {
        let args = Args::try_parse_from([
            "portal-cli",
            "--email",
            "a.student@parsu.edu.ph",
            "--password",
            "secret1",
            "--role",
            "Faculty Member",
            "--after-dashboard",
            "back",
            "--json",
        ])
        .expect("valid args");

        assert_eq!(args.role, Some(Role::Faculty));
        assert_eq!(args.after_dashboard, AfterDashboard::Back);
        assert!(args.json);
        assert!(!args.realtime);
        assert!(args.config.is_none());
    }

    #[test]
    fn role_is_optional_and_continue_is_the_default() {
        let args = Args::try_parse_from(["portal-cli", "--email", "x", "--password", "y"])
            .expect("valid args");
        assert_eq!(args.role, None);
        assert_eq!(args.after_dashboard, AfterDashboard::Continue);
    }

    #[test]
    fn unknown_roles_list_the_choices() {
        let err = parse_role("dean").expect_err("dean is not a role");
        assert!(err.contains("Student"));
        assert!(err.contains("System Administrator"));
    }
}
