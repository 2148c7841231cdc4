use crate::submit::print_inspection;
use anyhow::{Context, Result};
use inspection_form::{delete_inspection, InspectionApi, NotificationSink};
use log::info;
use std::io::{BufRead, Write};

/// List stored inspections, newest first
pub async fn list(api: &dyn InspectionApi) -> Result<()> {
    let inspections = api
        .list_inspections()
        .await
        .context("Failed to fetch inspections")?;

    if inspections.is_empty() {
        println!("No inspections yet");
        return Ok(());
    }

    for inspection in &inspections {
        println!(
            "{}  {}  {} images",
            inspection.id,
            inspection.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            inspection.total_images
        );
    }
    info!("Listed {} inspections", inspections.len());
    Ok(())
}

/// Show one inspection with every image and description
pub async fn show(api: &dyn InspectionApi, id: &str) -> Result<()> {
    let inspection = api
        .get_inspection(id)
        .await
        .with_context(|| format!("Failed to fetch inspection {}", id))?;
    print_inspection(&inspection);
    Ok(())
}

/// Delete an inspection after confirmation (skipped with `assume_yes`)
pub async fn delete(
    api: &dyn InspectionApi,
    notifier: &dyn NotificationSink,
    id: &str,
    assume_yes: bool,
) -> Result<()> {
    if !assume_yes {
        let stdin = std::io::stdin();
        if !confirm(&mut stdin.lock(), &mut std::io::stdout(), id)? {
            println!("Deletion cancelled");
            return Ok(());
        }
    }

    delete_inspection(api, notifier, id)
        .await
        .with_context(|| format!("Failed to delete inspection {}", id))
}

/// Ask whether to delete `id`; only an explicit yes confirms
fn confirm(input: &mut impl BufRead, output: &mut impl Write, id: &str) -> Result<bool> {
    write!(
        output,
        "Delete inspection {}? This cannot be undone. [y/N] ",
        id
    )?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
