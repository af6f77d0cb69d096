//! Reference data commands: regions and wilayas

use crate::config::Settings;
use crate::display::{format_region_list, format_wilaya_details, format_wilaya_list};
use crate::error::{FiscaError, FiscaResult};
use crate::models::{find_wilaya, WILAYAS};
use crate::regions::RegionClient;

/// Fetch and print the region list
///
/// Unlike declaration entry, an explicit listing reports fetch failures.
pub async fn handle_regions_command(settings: &Settings) -> FiscaResult<()> {
    let client = RegionClient::from_settings(settings)?;
    let regions = client.fetch().await?;
    print!("{}", format_region_list(&regions));
    Ok(())
}

/// Print the wilaya table, or the communes of one wilaya
pub fn handle_wilayas_command(code: Option<String>) -> FiscaResult<()> {
    match code {
        Some(code) => {
            let wilaya = find_wilaya(&code).ok_or_else(|| FiscaError::NotFound {
                entity_type: "Wilaya",
                identifier: code.clone(),
            })?;
            print!("{}", format_wilaya_details(wilaya));
        }
        None => print!("{}", format_wilaya_list(&WILAYAS)),
    }
    Ok(())
}
