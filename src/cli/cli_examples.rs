use super::cli_main::{get_user_input, prompt};
use crate::Examples::stoichiometry_examples::stoich_examples;

pub fn examples_menu() {
    loop {
        println!("\n=== Examples ===");
        println!("1. Balancing classic reactions");
        println!("2. Stoichiometric matrix and row reduction");
        println!("3. Extent of reaction, mole basis");
        println!("4. Extent of reaction, mass basis with excess reactant");
        println!("5. Partial conversion of a designated reactant");
        println!("6. Molar masses and hydrates");
        println!("0. Back to main menu");
        prompt("Enter your choice: ");

        let Some(choice) = get_user_input() else {
            break;
        };
        match choice.trim() {
            "0" => break,
            other => match other.parse::<usize>() {
                Ok(task) if (1..=6).contains(&task) => stoich_examples(task - 1),
                _ => println!("Invalid choice. Please try again."),
            },
        }
    }
}
