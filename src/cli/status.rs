use crate::error::Result;
use crate::settings::{load_settings, settings_path};
use crate::store::Salon;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let snapshot = settings.snapshot_path();

    println!("Salon:      {}", settings.salon_name);
    println!("Settings:   {}", settings_path().display());
    println!("Data dir:   {}", settings.data_dir);
    println!("Snapshot:   {}", snapshot.display());

    if snapshot.exists() {
        let salon = Salon::load(&snapshot)?;
        let active = salon.employees.iter().filter(|e| e.active).count();
        println!();
        println!("Employees:     {} ({active} active)", salon.employees.len());
        println!("Services:      {}", salon.services.len());
        println!("Transactions:  {}", salon.transactions.len());
    } else {
        println!();
        println!("Snapshot not found. Run `salon init` to set up.");
    }

    Ok(())
}
