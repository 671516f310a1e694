// assessa/src/commands/render.rs
//
// Terminal rendering shared by `show` and `configure`.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, Table};

use assessa_core::domain::criteria::{
    CriteriaLevel, CriteriaType, Domain, DomainWeight, Language, distribute_equal_weights,
    total_weight,
};

/// Name of `domain_id` in `lang`, or the id itself for a domain no longer listed.
fn domain_label<'a>(domain_id: &'a str, domains: &'a [Domain], lang: Language) -> &'a str {
    domains
        .iter()
        .find(|d| d.id == domain_id)
        .map(|d| d.name.get(lang))
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(domain_id)
}

pub fn levels_table(levels: &[CriteriaLevel], lang: Language) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["#", "Level", "Value"]);
    for (i, level) in levels.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            level.label.get(lang).to_string(),
            format!("{}", level.value),
        ]);
    }
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

pub fn weights_table(weights: &[DomainWeight], domains: &[Domain], lang: Language) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Domain", "Name", "Weight"]);
    for weight in weights {
        table.add_row(vec![
            weight.domain_id.clone(),
            domain_label(&weight.domain_id, domains, lang).to_string(),
            format!("{}%", weight.weight),
        ]);
    }
    table.add_row(vec![
        String::new(),
        "Total".to_string(),
        format!("{}%", total_weight(weights)),
    ]);
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

/// Live domains with the weight a fresh configuration would start from.
pub fn domains_table(domains: &[Domain], lang: Language) -> Table {
    let seed = distribute_equal_weights(domains);
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Id", "Name", "Seed weight"]);
    for (domain, weight) in domains.iter().zip(&seed) {
        table.add_row(vec![
            domain.id.clone(),
            domain.name.get(lang).to_string(),
            format!("{}%", weight.weight),
        ]);
    }
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

/// Prints the summary of a configuration, the way the wizard's preview step lays it out.
pub fn print_summary(
    criteria_type: CriteriaType,
    levels: &[CriteriaLevel],
    weights: &[DomainWeight],
    domains: &[Domain],
    lang: Language,
) {
    println!("   Type: {}", criteria_type);
    if criteria_type.requires_levels() {
        println!("\n{}", levels_table(levels, lang));
    }
    println!("\n{}", weights_table(weights, domains, lang));
}
