use std::path::PathBuf;

use crate::demo;
use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path, shellexpand_path, SNAPSHOT_FILE};
use crate::store::Salon;

pub fn run(data_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();

    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    } else if !settings_path().exists() {
        // First run: prompt for data dir
        println!("Data directory [{}]: ", settings.data_dir);
        let mut input = String::new();
        std::io::stdin().read_line(&mut input).ok();
        let chosen = input.trim();
        if !chosen.is_empty() {
            settings.data_dir = shellexpand_path(chosen);
        }
    }

    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&resolved)?;

    let snapshot = resolved.join(SNAPSHOT_FILE);
    if snapshot.exists() {
        println!("Using existing data at {}", resolved.display());
        return Ok(());
    }

    Salon::demo().save(&snapshot)?;
    println!("Initialized salon at {}", resolved.display());
    println!("Demo logins (development only):");
    for (email, password) in demo::logins() {
        println!("  {email} / {password}");
    }
    Ok(())
}
