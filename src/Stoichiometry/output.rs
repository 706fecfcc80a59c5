use super::extent::{ExtentResult, Role};
use super::reaction::Reaction;
use super::stoich_matrix::StoichiometricMatrix;
use prettytable::{Cell, Row, Table, row};

fn fixed(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}

fn optional(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| fixed(v, precision))
        .unwrap_or_else(|| "-".to_string())
}

/// compound / formula / coefficient table of a (balanced) reaction
pub fn reaction_table(reaction: &Reaction) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Role", "Compound", "Formula", "Coefficient"]);
    for s in &reaction.reactants {
        table.add_row(row!["reactant", s.name, s.formula, s.coefficient]);
    }
    for s in &reaction.products {
        table.add_row(row!["product", s.name, s.formula, s.coefficient]);
    }
    table
}

/// element rows by compound columns
pub fn matrix_table(matrix: &StoichiometricMatrix) -> Table {
    let mut table = Table::new();
    let mut header = vec![Cell::new("Element")];
    header.extend(matrix.compounds.iter().map(|c| Cell::new(c)));
    table.add_row(Row::new(header));
    for (element, entries) in matrix.elements.iter().zip(matrix.entries.iter()) {
        let mut cells = vec![Cell::new(element)];
        cells.extend(entries.iter().map(|f| Cell::new(&f.to_string())));
        table.add_row(Row::new(cells));
    }
    table
}

/// per-species amounts of an extent calculation
pub fn species_table(result: &ExtentResult, precision: usize) -> Table {
    let mut table = Table::new();
    table.add_row(row![
        "Compound",
        "Role",
        "ν",
        "n0, mol",
        "Δn, mol",
        "n, mol",
        "m, g",
        "x",
        "w"
    ]);
    for s in &result.species {
        let role = match s.role {
            Role::Reactant => "reactant",
            Role::Product => "product",
        };
        table.add_row(row![
            s.name,
            role,
            s.coefficient,
            fixed(s.initial_moles, precision),
            fixed(s.reacted_moles, precision),
            fixed(s.displayed_final_moles(), precision),
            optional(s.final_mass.map(|m| m.max(0.0)), precision),
            fixed(s.mole_fraction, precision),
            optional(s.mass_fraction, precision)
        ]);
    }
    table
}

/// limiting reactant, extent, conversion, excess and yields
pub fn summary_table(result: &ExtentResult, precision: usize) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Quantity", "Value"]);
    table.add_row(row!["limiting reactant", result.limiting_reactant]);
    table.add_row(row!["designated reactant", result.designated_reactant]);
    table.add_row(row!["extent, mol", fixed(result.extent, precision)]);
    table.add_row(row!["max extent, mol", fixed(result.max_extent, precision)]);
    table.add_row(row![
        "conversion, %",
        fixed(result.percent_conversion, precision)
    ]);
    for e in &result.excess {
        table.add_row(row![
            format!("excess of {}, %", e.name),
            fixed(e.percent_excess, precision)
        ]);
    }
    for y in &result.yields {
        table.add_row(row![
            format!("yield of {}, %", y.name),
            fixed(y.percent_yield, precision)
        ]);
    }
    table
}

pub fn print_reaction(reaction: &Reaction) {
    println!("{}", reaction.equation());
    reaction_table(reaction).printstd();
}

pub fn print_extent(result: &ExtentResult, precision: usize) {
    summary_table(result, precision).printstd();
    species_table(result, precision).printstd();
    for w in &result.warnings {
        println!("\x1b[31mwarning: {:?}\x1b[0m", w);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Stoichiometry::extent::{ProductInput, ReactantInput, compute_extent};

    #[test]
    fn test_reaction_table_rows() {
        let r = Reaction::from_equation("H2 + O2 -> H2O")
            .unwrap()
            .balanced()
            .unwrap();
        let table = reaction_table(&r);
        assert_eq!(table.len(), 4);
        let rendered = table.to_string();
        assert!(rendered.contains("H2O"));
        let m = matrix_table(&r.matrix().unwrap());
        // header + H + O
        assert_eq!(m.len(), 3);
        assert!(m.to_string().contains("-2"));
    }

    #[test]
    fn test_extent_tables() {
        let reactants = vec![ReactantInput {
            name: "A".to_string(),
            coefficient: 1.0,
            initial_moles: 2.0,
            molar_mass: None,
        }];
        let products = vec![ProductInput {
            name: "B".to_string(),
            coefficient: 1.0,
            molar_mass: None,
        }];
        let result = compute_extent(&reactants, &products, None, None).unwrap();
        let species = species_table(&result, 2);
        assert_eq!(species.len(), 3);
        assert!(species.to_string().contains("2.00"));
        let summary = summary_table(&result, 1);
        // header, 5 scalar rows, 1 yield
        assert_eq!(summary.len(), 7);
        assert!(summary.to_string().contains("100.0"));
    }
}
