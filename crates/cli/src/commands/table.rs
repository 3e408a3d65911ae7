use anyhow::{Context, Result};
use saboteur_core::io::load_groups_csv;
use saboteur_core::model::MembershipTable;
use saboteur_core::report::render_membership_table;

/// Show which element belongs to which group of a sheet.
pub fn table_command(groups: &str, json: bool) -> Result<()> {
    let data = load_groups_csv(groups)
        .with_context(|| format!("Failed to load groups from {groups}"))?;

    if json {
        let table = MembershipTable::from_batch(&data.groups);
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    print!("{}", render_membership_table(&data.groups));
    Ok(())
}
