use anyhow::{Context, Result};
use colored::Colorize;
use log::info;

use crate::api::CloudApiClient;
use crate::config::Config;
use crate::ui::Prompter;

/// Interactive first-run wizard: collect the OAuth token, validate it against
/// the token-issuance endpoint, walk cloud -> folder -> instance, pick the
/// poll interval, and persist the result.
pub async fn setup_command(prompter: &dyn Prompter) -> Result<()> {
    info!("Starting interactive setup");

    let config_path = Config::get_config_path()?;
    if config_path.exists() {
        let overwrite = prompter.confirm("A configuration already exists. Overwrite?", false)?;
        if !overwrite {
            println!("Setup cancelled.");
            return Ok(());
        }
    }

    let oauth_token = prompter.secret("Yandex Cloud OAuth token")?;
    if oauth_token.trim().is_empty() {
        anyhow::bail!("OAuth token must not be empty");
    }

    // Validate the token before anything gets saved
    println!("\nTesting authentication...");
    let mut client = CloudApiClient::new(oauth_token.clone());
    client
        .authenticate()
        .await
        .context("Authentication test failed")?;
    println!("{}", "✓ Authentication successful".green());

    let clouds = client.list_clouds().await?;
    if clouds.is_empty() {
        anyhow::bail!("No clouds are visible to this account");
    }
    let cloud = pick(prompter, "Select cloud", &clouds, |cloud| {
        format!("{} ({})", cloud.name, cloud.id)
    })?;

    let folders = client.list_folders(&cloud.id).await?;
    if folders.is_empty() {
        anyhow::bail!("Cloud '{}' has no folders", cloud.name);
    }
    let folder = pick(prompter, "Select folder", &folders, |folder| {
        format!("{} ({})", folder.name, folder.id)
    })?;

    let instances = client.list_instances(&folder.id).await?;
    if instances.is_empty() {
        anyhow::bail!("Folder '{}' has no compute instances", folder.name);
    }
    let instance = pick(prompter, "Select instance to watch", &instances, |i| {
        let preemptible = if i.scheduling_policy.preemptible {
            ", preemptible"
        } else {
            ""
        };
        format!("{} ({}{})", i.name, i.status, preemptible)
    })?;

    let check_interval = prompter.number("Check interval in seconds", 60)?;
    if check_interval == 0 {
        anyhow::bail!("Check interval must be positive");
    }

    let config = Config {
        oauth_token,
        instance_id: instance.id.clone(),
        instance_name: instance.name.clone(),
        check_interval,
    };
    config.save()?;

    println!(
        "{} Configuration saved, watching instance '{}' every {}s",
        "✓".green(),
        instance.name,
        check_interval
    );
    Ok(())
}

/// Select one item from a list; a single-element list is picked automatically
fn pick<'a, T>(
    prompter: &dyn Prompter,
    prompt: &str,
    items: &'a [T],
    label: fn(&T) -> String,
) -> Result<&'a T> {
    let labels: Vec<String> = items.iter().map(label).collect();

    if items.len() == 1 {
        println!("{}: {} (only choice)", prompt, labels[0]);
        return Ok(&items[0]);
    }

    let index = prompter.select(prompt, &labels)?;
    Ok(&items[index])
}
