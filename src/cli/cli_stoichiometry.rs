use super::cli_main::{get_user_input, prompt};
use crate::Stoichiometry::compound_library::CompoundLibrary;
use crate::Stoichiometry::errors::{StoichError, StoichResult};
use crate::Stoichiometry::extent::{AmountBasis, ExtentRequest};
use crate::Stoichiometry::output::{matrix_table, print_extent, print_reaction};
use crate::Stoichiometry::reaction::Reaction;
use crate::Stoichiometry::stoich_matrix::StoichiometricMatrix;
use crate::settings::CalculatorConfig;
use prettytable::{Table, row};

pub fn balance_menu() {
    println!("\n=== Balance an equation ===");
    println!("Example: C3H8 + O2 -> CO2 + H2O   (arrows: ->, =>, <=>, =, →)");
    prompt("Equation: ");
    let Some(line) = get_user_input() else {
        return;
    };
    match balance_line(&line) {
        Ok((reaction, matrix)) => {
            print_reaction(&reaction);
            matrix_table(&matrix).printstd();
        }
        Err(e) => println!("\x1b[31mError: {}\x1b[0m", e),
    }
}

fn balance_line(line: &str) -> StoichResult<(Reaction, StoichiometricMatrix)> {
    let reaction = Reaction::from_equation(line.trim())?.balanced()?;
    let matrix = reaction.matrix()?;
    Ok((reaction, matrix))
}

pub fn extent_menu(config: &CalculatorConfig, library: &CompoundLibrary) {
    if let Err(e) = run_extent(config, library) {
        println!("\x1b[31mError: {}\x1b[0m", e);
    }
}

fn run_extent(config: &CalculatorConfig, library: &CompoundLibrary) -> StoichResult<()> {
    println!("\n=== Extent of reaction ===");
    println!("Coefficients you type are kept if they balance the equation, otherwise it is balanced.");
    prompt("Equation: ");
    let line = read_line()?;
    let reaction = Reaction::from_equation(line.trim())?;
    let reaction = if reaction.is_balanced()? {
        reaction
    } else {
        let balanced = reaction.balanced()?;
        println!("balanced: {}", balanced);
        balanced
    };

    let names: Vec<&str> = reaction.reactants.iter().map(|s| s.name.as_str()).collect();
    println!("Amounts of {} (e.g. \"2 mol, 64 g\", plain numbers are mol):", names.join(", "));
    prompt("Amounts: ");
    let amounts = parse_amounts(&read_line()?, names.len())?;

    prompt(&format!(
        "Conversion, % [{}]: ",
        config.default_conversion_percent
    ));
    let conversion = parse_conversion(&read_line()?, config.default_conversion_percent)?;

    prompt("Designated reactant (number or name, empty for the limiting one): ");
    let designated = parse_designated(&read_line()?, &reaction)?;

    let mut request = ExtentRequest::from_reaction(&reaction, amounts)?.with_conversion(conversion);
    if let Some(index) = designated {
        request = request.with_designated_reactant(index);
    }
    let result = request.compute(library)?;
    print_extent(&result, config.precision);
    Ok(())
}

fn read_line() -> StoichResult<String> {
    get_user_input().ok_or_else(|| StoichError::ParseError("no input".to_string()))
}

pub fn list_library(library: &CompoundLibrary, precision: usize) {
    let mut table = Table::new();
    table.add_row(row!["Name", "Formula", "M, g/mol"]);
    for name in library.names() {
        if let Some(record) = library.lookup(name) {
            table.add_row(row![
                name,
                record.formula,
                format!("{:.*}", precision, record.molar_mass)
            ]);
        }
    }
    table.printstd();
}

/// `"2 mol, 64 g; 1.5"` -> one amount per reactant, unit defaults to mol
pub fn parse_amounts(line: &str, expected: usize) -> StoichResult<Vec<AmountBasis>> {
    let amounts = line
        .split([',', ';'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(parse_amount)
        .collect::<StoichResult<Vec<_>>>()?;
    if amounts.len() != expected {
        return Err(StoichError::ParseError(format!(
            "expected {} amounts, got {}",
            expected,
            amounts.len()
        )));
    }
    Ok(amounts)
}

fn parse_amount(item: &str) -> StoichResult<AmountBasis> {
    let split = item
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(item.len());
    let (number, unit) = item.split_at(split);
    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| StoichError::ParseError(format!("not a number: '{}'", number.trim())))?;
    match unit.trim() {
        "" | "mol" => Ok(AmountBasis::Moles(value)),
        "g" => Ok(AmountBasis::Mass(value)),
        other => Err(StoichError::ParseError(format!(
            "unknown unit '{}', use mol or g",
            other
        ))),
    }
}

/// percent (optionally followed by `%`) -> fraction; empty line gives the default
pub fn parse_conversion(line: &str, default_percent: f64) -> StoichResult<f64> {
    let text = line.trim().trim_end_matches('%').trim();
    let percent = if text.is_empty() {
        default_percent
    } else {
        text.parse::<f64>()
            .map_err(|_| StoichError::ParseError(format!("not a number: '{}'", text)))?
    };
    if !(percent.is_finite() && percent > 0.0 && percent <= 100.0) {
        return Err(StoichError::InvalidInput(format!(
            "conversion must be in (0, 100] %, got {}",
            percent
        )));
    }
    Ok(percent / 100.0)
}

/// 1-based reactant number or reactant name -> index; empty line means none
pub fn parse_designated(line: &str, reaction: &Reaction) -> StoichResult<Option<usize>> {
    let text = line.trim();
    if text.is_empty() {
        return Ok(None);
    }
    if let Ok(number) = text.parse::<usize>() {
        return if (1..=reaction.reactants.len()).contains(&number) {
            Ok(Some(number - 1))
        } else {
            Err(StoichError::InvalidInput(format!(
                "reactant number must be between 1 and {}",
                reaction.reactants.len()
            )))
        };
    }
    reaction
        .reactants
        .iter()
        .position(|s| s.name == text)
        .map(Some)
        .ok_or_else(|| StoichError::InvalidInput(format!("'{}' is not a reactant", text)))
}
