use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use satlife_cli::pipeline::AnalysisOutcome;
use satlife_report::GroupSummary;
use satlife_stats::{AnovaResult, Coefficient, PostHocResult};
use satlife_transform::{CoercionReport, PreparedData};

pub fn print_clean(prepared: &PreparedData, rows: usize) {
    println!(
        "Rows: {} read, {} dropped as incomplete, {} kept",
        prepared.rows_in,
        prepared.rows_dropped,
        prepared.frame.height()
    );
    println!("{}", prepared.frame.head(Some(rows)));

    let mut table = Table::new();
    table.set_header(vec![header_cell("Orbit class"), header_cell("Indicator column")]);
    apply_table_style(&mut table);
    for indicator in prepared.indicators.iter() {
        table.add_row(vec![
            Cell::new(&indicator.category)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&indicator.column),
        ]);
    }
    println!("{table}");
    print_coercions(&prepared.coercions);
}

pub fn print_analysis(outcome: &AnalysisOutcome) {
    let report = &outcome.report;
    println!("Input: {}", report.input);
    println!(
        "Rows: {} read, {} dropped as incomplete, {} kept",
        report.cleaning.rows_in, report.cleaning.rows_dropped, report.cleaning.rows_out
    );
    print_coercions(&report.cleaning.coercions);

    let regression = &report.regression;
    println!();
    println!(
        "Regression: {} ({} observations, {} excluded)",
        regression.response, regression.observations, regression.excluded
    );
    print_coefficients(&regression.coefficients);
    println!(
        "R-squared: {:.4}  Adj. R-squared: {:.4}  F: {}  Prob (F): {}",
        regression.r_squared,
        regression.adj_r_squared,
        optional_number(regression.f_statistic),
        optional_number(regression.f_p_value),
    );

    println!();
    print_groups(&report.groups);
    if let Some(anova) = &report.anova {
        print_anova(anova);
    }
    if let Some(posthoc) = &report.posthoc {
        print_posthoc(posthoc);
    }

    for path in &outcome.plots {
        println!("Plot: {}", path.display());
    }
    if let Some(path) = &outcome.report_path {
        println!("Report: {}", path.display());
    }
}

fn print_coercions(coercions: &[CoercionReport]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Numeric"),
        header_cell("Missing"),
        header_cell("Invalid"),
    ]);
    apply_table_style(&mut table);
    for column in 1..4 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for report in coercions {
        table.add_row(vec![
            Cell::new(&report.column),
            Cell::new(report.coerced),
            count_cell(report.missing, Color::Yellow),
            count_cell(report.invalid(), Color::Red),
        ]);
    }
    println!("{table}");
}

fn print_coefficients(coefficients: &[Coefficient]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Term"),
        header_cell("Coef."),
        header_cell("Std. Err."),
        header_cell("t"),
        header_cell("P>|t|"),
    ]);
    apply_table_style(&mut table);
    for column in 1..5 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for coefficient in coefficients {
        table.add_row(vec![
            Cell::new(&coefficient.term),
            Cell::new(format!("{:.4}", coefficient.estimate)),
            Cell::new(format!("{:.4}", coefficient.std_error)),
            Cell::new(format!("{:.3}", coefficient.t_value)),
            p_value_cell(coefficient.p_value, 0.05),
        ]);
    }
    println!("{table}");
}

fn print_groups(groups: &[GroupSummary]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Orbit class"),
        header_cell("N"),
        header_cell("Mean"),
        header_cell("Min"),
        header_cell("Max"),
    ]);
    apply_table_style(&mut table);
    for column in 1..5 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for group in groups {
        table.add_row(vec![
            Cell::new(&group.category)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(group.count),
            Cell::new(optional_number(group.mean)),
            Cell::new(optional_number(group.min)),
            Cell::new(optional_number(group.max)),
        ]);
    }
    println!("{table}");
}

fn print_anova(anova: &AnovaResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Sum Sq"),
        header_cell("df"),
        header_cell("Mean Sq"),
        header_cell("F"),
        header_cell("PR(>F)"),
    ]);
    apply_table_style(&mut table);
    for column in 1..6 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new("Orbit class"),
        Cell::new(format!("{:.4}", anova.ss_between)),
        Cell::new(anova.df_between),
        Cell::new(format!("{:.4}", anova.ms_between)),
        Cell::new(format!("{:.4}", anova.f_statistic)),
        p_value_cell(anova.p_value, 0.05),
    ]);
    table.add_row(vec![
        Cell::new("Residual"),
        Cell::new(format!("{:.4}", anova.ss_within)),
        Cell::new(anova.df_within),
        Cell::new(format!("{:.4}", anova.ms_within)),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
}

fn print_posthoc(posthoc: &PostHocResult) {
    println!(
        "Pairwise comparisons ({}, alpha = {})",
        posthoc.method, posthoc.alpha
    );
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group 1"),
        header_cell("Group 2"),
        header_cell("Mean diff"),
        header_cell("p-adj"),
        header_cell("Lower"),
        header_cell("Upper"),
        header_cell("Reject"),
    ]);
    apply_table_style(&mut table);
    for column in 2..6 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    align_column(&mut table, 6, CellAlignment::Center);
    for comparison in &posthoc.comparisons {
        table.add_row(vec![
            Cell::new(&comparison.group_a),
            Cell::new(&comparison.group_b),
            Cell::new(format!("{:.4}", comparison.mean_diff)),
            p_value_cell(comparison.p_adjusted, posthoc.alpha),
            Cell::new(format!("{:.4}", comparison.lower)),
            Cell::new(format!("{:.4}", comparison.upper)),
            reject_cell(comparison.reject),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn optional_number(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"))
}

fn p_value_cell(p_value: f64, alpha: f64) -> Cell {
    let cell = Cell::new(format!("{p_value:.4}"));
    if p_value < alpha {
        cell.fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

fn reject_cell(reject: bool) -> Cell {
    if reject {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
