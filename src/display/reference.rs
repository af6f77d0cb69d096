//! Reference data listings: regions and wilayas

use tabled::builder::Builder;

use crate::models::{Region, Wilaya};

use super::declaration::render;

/// Format the region list returned by the regions endpoint
pub fn format_region_list(regions: &[Region]) -> String {
    if regions.is_empty() {
        return "No regions available.\n".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Direction"]);
    for region in regions {
        builder.push_record([region.id.to_string(), region.name.clone()]);
    }

    let mut output = render(builder, &[0]);
    output.push_str(&format!("\n{} region(s)\n", regions.len()));
    output
}

pub fn format_wilaya_list(wilayas: &[Wilaya]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Code", "Wilaya", "Communes"]);
    for wilaya in wilayas {
        builder.push_record([
            wilaya.code.to_string(),
            wilaya.name.to_string(),
            wilaya.communes.len().to_string(),
        ]);
    }
    render(builder, &[2])
}

/// Format one wilaya with its communes
pub fn format_wilaya_details(wilaya: &Wilaya) -> String {
    let mut output = format!("{} - {}\n", wilaya.code, wilaya.name);
    for commune in wilaya.communes {
        output.push_str(&format!("  {}\n", commune));
    }
    output
}
