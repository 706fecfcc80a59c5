use super::cli_examples::examples_menu;
use super::cli_stoichiometry::{balance_menu, extent_menu, list_library};
use crate::Stoichiometry::compound_library::CompoundLibrary;
use crate::settings::CalculatorConfig;
use log::error;
use std::io::{self, Write};

pub fn run_interactive_menu(config: &CalculatorConfig, library: &CompoundLibrary) {
    loop {
        show_main_menu();
        let Some(choice) = get_user_input() else {
            break;
        };

        match choice.trim() {
            "1" => balance_menu(),
            "2" => extent_menu(config, library),
            "3" => list_library(library, config.precision),
            "4" => examples_menu(),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - header text

Yellow (\x1b[33m) - menu options

Cyan (\x1b[36m) - prompts

Reset (\x1b[0m) - back to normal color after each colored section
*/
fn show_main_menu() {
    println!("\x1b[34m\n ChemCalc: reaction balancing and extent of reaction \n\x1b[0m");
    println!("\x1b[33m1. Balance an equation\x1b[0m");
    println!("\x1b[33m2. Extent of reaction\x1b[0m");
    println!("\x1b[33m3. Compound library\x1b[0m");
    println!("\x1b[33m4. Examples\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    prompt("Enter your choice: ");
}

pub(crate) fn prompt(text: &str) {
    print!("\x1b[36m{}\x1b[0m", text);
    if let Err(e) = io::stdout().flush() {
        error!("failed to flush stdout: {}", e);
    }
}

/// one line from stdin, `None` at end of input
pub(crate) fn get_user_input() -> Option<String> {
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input),
        Err(e) => {
            error!("failed to read input: {}", e);
            None
        }
    }
}
