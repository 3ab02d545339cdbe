// Profiles usage example for omo-profiles
//
// Run with: RUST_LOG=debug cargo run --example profiles_usage

use omo_profiles::{ActiveState, Config, ProfileManager};
use serde_json::json;

fn describe(state: &ActiveState) -> String {
    match state {
        ActiveState::Absent => "no active config".to_string(),
        ActiveState::Matched { name, .. } => format!("active profile: {name}"),
        ActiveState::Orphan(_) => "active config does not match any profile".to_string(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let base = std::env::temp_dir().join("omo-profiles-demo");
    let manager = ProfileManager::builder()
        .base_dir(&base)
        .backup_retention(3)
        .on_event(|event| println!("  event: {event:?}"))
        .build();

    println!("Base directory: {}", base.display());
    println!("Status: {}", describe(&manager.status()?));

    // A hand-written active config that is not saved anywhere yet
    std::fs::create_dir_all(&base)?;
    std::fs::write(
        manager.config().paths.active_config_path(),
        r#"{"$schema": "https://example.com/oh-my-opencode.schema.json", "agents": {}}"#,
    )?;
    println!("Status: {}", describe(&manager.status()?));

    if !manager.store().exists("original") {
        manager.save_current_as("original", false)?;
    }

    let fast: Config = Config::try_from(json!({
        "agents": { "oracle": { "model": "openai/gpt-5-mini" } }
    }))?;
    if !manager.store().exists("fast") {
        manager.create_profile("fast", fast)?;
    }

    for name in ["fast", "original", "fast"] {
        let backup = manager.switch_profile(name)?;
        println!(
            "Switched to '{name}' (backup: {})",
            backup
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "none".into())
        );
        println!("Status: {}", describe(&manager.status()?));
    }

    println!("Profiles: {:?}", manager.list_profiles()?);
    for backup in manager.list_backups()? {
        println!("Backup {} ({})", backup.filename, backup.timestamp);
    }

    Ok(())
}
