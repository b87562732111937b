use anyhow::{Context, Result};

use benchdash::compare::{ComparisonState, Dashboard, ParamChange, RecordingDispatcher};
use benchdash::format::table_lines;
use benchdash::query::Location;
use benchdash::refs::title_for;
use benchdash::remote::DashboardClient;

use crate::Commands;
use crate::cli_runtime::Settings;

pub(crate) fn handle_command(settings: &Settings, command: Commands) -> Result<()> {
    let client = DashboardClient::new(&settings.config.api_url)?;

    match command {
        Commands::Refs { json } => {
            let catalog = client.fetch_refs().context("fetch refs")?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&catalog).context("serialize refs json")?
                );
            } else {
                for (group, entry) in catalog.entries() {
                    println!("{:<8} {:<28} {}", group.heading(), entry.name, entry.commit_hash);
                }
                println!("{} refs", catalog.len());
            }
        }

        Commands::Compare {
            old,
            new,
            old_workload,
            new_workload,
            json,
        } => {
            let location = Location::new(settings.config.page_url.clone(), settings.query.clone());
            let mut dashboard =
                Dashboard::mount(settings.kind, location, RecordingDispatcher::default());
            let changes = [
                old.map(ParamChange::OldRef),
                new.map(ParamChange::NewRef),
                old_workload.map(ParamChange::OldWorkload),
                new_workload.map(ParamChange::NewWorkload),
            ];
            for change in changes.into_iter().flatten() {
                dashboard.change(change);
            }

            let Some(request) = dashboard.dispatcher().requests.last().cloned() else {
                anyhow::bail!(
                    "missing refs for a {} comparison (pass --old{})",
                    settings.kind.title(),
                    if settings.kind.uses_new_ref() { " and --new" } else { "" }
                );
            };
            let result = client.fetch_comparison(&request.key);
            dashboard.complete(request.generation, result);

            match dashboard.state() {
                ComparisonState::Ready(formatted) => {
                    if json {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(formatted.as_ref())
                                .context("serialize comparison json")?
                        );
                    } else {
                        for line in table_lines(formatted) {
                            println!("{}", line);
                        }
                    }
                    eprintln!("{}", dashboard.location().share_url());
                }
                ComparisonState::Error(msg) => anyhow::bail!("{}", msg),
                ComparisonState::Loading | ComparisonState::NotReady => {
                    anyhow::bail!("comparison did not complete")
                }
            }
        }

        Commands::Link { value } => {
            let title = match client.fetch_refs() {
                Ok(catalog) => title_for(&value, &catalog),
                Err(err) => {
                    tracing::warn!(error = %err, "refs unavailable; using short form");
                    benchdash::refs::short_ref(&value)
                }
            };
            println!("{}", title);
            println!("{}", settings.config.commit_url(&value));
        }
    }
    Ok(())
}
