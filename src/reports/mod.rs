use cipherforge::solver::SolveReport;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

pub fn print_solution(report: &SolveReport, normalized_score: f64) {
    println!("\n=== 🏆 FINAL RESULT ===");

    let key = report
        .best_key
        .map(|k| k.render())
        .unwrap_or_else(|| "-".to_string());

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("Score").fg(Color::Cyan),
        Cell::new("Letters"),
        Cell::new("Keys"),
        Cell::new("Keys/s"),
        Cell::new("Rounds"),
        Cell::new("Time (s)"),
        Cell::new("Stop"),
    ]);

    for i in 1..=6 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    let s = &report.stats;
    table.add_row(vec![
        Cell::new(&key).add_attribute(Attribute::Bold),
        Cell::new(format!("{:.2}", normalized_score)).fg(Color::Cyan),
        Cell::new(report.len),
        Cell::new(s.nbr_keys),
        Cell::new(format!("{:.0}", s.rate)),
        Cell::new(s.rounds),
        Cell::new(format!("{:.2}", s.runtime)),
        Cell::new(report.termination),
    ]);
    println!("{}", table);

    println!("Score: {}", report.best_score);
    println!("Key: {}", key);
    match &report.plain {
        Some(plain) => println!("\n{}", plain),
        None => println!("\n(no key scored above zero)"),
    }
}
