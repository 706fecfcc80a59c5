/// worked examples selectable by task number: balancing, row reduction, extent of reaction
/// on mole and mass basis, partial conversion, molar masses
pub mod stoichiometry_examples;
