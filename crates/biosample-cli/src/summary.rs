//! Terminal tables for validation summaries and the schema registry.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use biosample_model::AttributeType;
use biosample_report::RunSummary;
use biosample_standards::SchemaRegistry;

/// One row per report group plus a total row:
/// `group, attributes, filled in, invalid`.
pub fn summary_rows(summary: &RunSummary) -> Vec<[String; 4]> {
    let mut rows: Vec<[String; 4]> = summary
        .groups
        .iter()
        .map(|(name, group)| {
            [
                name.clone(),
                group.attributes.to_string(),
                group.filled_in.to_string(),
                group.invalid.to_string(),
            ]
        })
        .collect();
    let attributes: usize = summary.groups.values().map(|g| g.attributes).sum();
    rows.push([
        "TOTAL".to_string(),
        attributes.to_string(),
        summary.filled_in_attributes().to_string(),
        summary.invalid_attributes().to_string(),
    ]);
    rows
}

pub fn summary_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Attributes"),
        header_cell("Filled in"),
        header_cell("Invalid"),
    ]);
    apply_summary_table_style(&mut table);
    for column in 1..4 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for (name, group) in &summary.groups {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(group.attributes),
            Cell::new(group.filled_in),
            count_cell(group.invalid, Color::Red),
        ]);
    }
    let attributes: usize = summary.groups.values().map(|g| g.attributes).sum();
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(attributes).add_attribute(Attribute::Bold),
        Cell::new(summary.filled_in_attributes()).add_attribute(Attribute::Bold),
        count_cell(summary.invalid_attributes(), Color::Red).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Header line printed above the summary table.
pub fn record_counts_line(summary: &RunSummary) -> String {
    format!(
        "Records: {} ({} valid, {} invalid, {} skipped)",
        summary.records + summary.skipped_records,
        summary.valid_records,
        summary.invalid_records,
        summary.skipped_records
    )
}

/// `name, type, allowed values` rows in registry order.
pub fn attribute_rows(
    registry: &SchemaRegistry,
    attribute_type: Option<AttributeType>,
) -> Vec<[String; 3]> {
    registry
        .schemas()
        .iter()
        .filter(|schema| attribute_type.is_none_or(|t| schema.attribute_type == t))
        .map(|schema| {
            [
                schema.name.clone(),
                schema.attribute_type.to_string(),
                schema.allowed_values.join(" | "),
            ]
        })
        .collect()
}

pub fn attribute_table(registry: &SchemaRegistry, attribute_type: Option<AttributeType>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Attribute"),
        header_cell("Type"),
        header_cell("Allowed values"),
    ]);
    apply_table_style(&mut table);
    for [name, type_name, allowed] in attribute_rows(registry, attribute_type) {
        let allowed = if allowed.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(allowed)
        };
        table.add_row(vec![Cell::new(name), Cell::new(type_name), allowed]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .add_attribute(Attribute::Bold)
        .fg(Color::Cyan)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use biosample_report::GroupSummary;

    #[test]
    fn total_row_sums_groups() {
        let mut summary = RunSummary::default();
        summary.groups.insert(
            "integer".to_string(),
            GroupSummary {
                attributes: 4,
                filled_in: 3,
                invalid: 1,
            },
        );
        summary.groups.insert(
            "boolean".to_string(),
            GroupSummary {
                attributes: 2,
                filled_in: 0,
                invalid: 0,
            },
        );
        let rows = summary_rows(&summary);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0], "boolean");
        assert_eq!(rows[2], ["TOTAL", "6", "3", "1"].map(String::from));
    }

    #[test]
    fn attribute_rows_filter_by_type() {
        use biosample_model::AttributeSchema;

        let registry = SchemaRegistry::from_schemas([
            AttributeSchema::new("host_taxid", AttributeType::Integer, Vec::new()),
            AttributeSchema::new(
                "host_sex",
                AttributeType::ValueSet,
                vec!["male".to_string(), "female".to_string()],
            ),
            AttributeSchema::new("smoker", AttributeType::Boolean, Vec::new()),
        ]);
        insta::assert_debug_snapshot!(attribute_rows(&registry, Some(AttributeType::ValueSet)), @r#"
        [
            [
                "host_sex",
                "VALUE_SET",
                "male | female",
            ],
        ]
        "#);
        assert_eq!(attribute_rows(&registry, None).len(), 3);
    }

    #[test]
    fn counts_line_includes_skipped_records() {
        let summary = RunSummary {
            records: 3,
            valid_records: 2,
            invalid_records: 1,
            skipped_records: 2,
            ..RunSummary::default()
        };
        assert_eq!(
            record_counts_line(&summary),
            "Records: 5 (2 valid, 1 invalid, 2 skipped)"
        );
    }
}
