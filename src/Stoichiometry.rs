/// eng
/// Error type shared by every stoichiometry routine (`StoichError`) and the `StoichResult` alias
/// ----------------------------------------------------------------
/// ru
/// Тип ошибки, общий для всех стехиометрических функций (`StoichError`), и псевдоним `StoichResult`
pub mod errors;
/// eng
/// Parser of chemical formulas: element symbols with counts, nested groups in (), [] and {}
/// with trailing multipliers, hydrates like CuSO4·5H2O. Unknown characters are skipped.
/// ----------------------------------------------------------------
/// ru
/// Парсер химических формул: символы элементов с индексами, вложенные группы в (), [] и {}
/// с множителями, кристаллогидраты вида CuSO4·5H2O. Неизвестные символы пропускаются.
/// # Examples
/// ```
/// use ChemCalc::Stoichiometry::formula_parser::{parse_formula, to_formula_string};
/// let counts = parse_formula("Ca(OH)2").unwrap();
/// assert_eq!(counts.get("Ca"), Some(&1));
/// assert_eq!(counts.get("O"), Some(&2));
/// assert_eq!(counts.get("H"), Some(&2));
/// assert_eq!(to_formula_string(&parse_formula("K4[Fe(CN)6]").unwrap()), "C6FeK4N6");
/// ```
pub mod formula_parser;
/// exact arbitrary-precision fractions (`num_rational::BigRational`), always in lowest terms
pub mod rational;
/// atomic masses and molar mass of a formula
/// # Examples
/// ```
/// use ChemCalc::Stoichiometry::molmass::calculate_molar_mass;
/// let (m, _) = calculate_molar_mass("H2O").unwrap();
/// assert!((m - 18.015).abs() < 1e-2);
/// ```
pub mod molmass;
/// signed element-by-compound matrix: reactant columns negative, product columns positive
pub mod stoich_matrix;
/// Gauss-Jordan elimination with partial pivoting over exact fractions
pub mod null_space;
/// back-substitution of the free column and scaling to minimal positive integers
pub mod normalizer;
/// eng
/// Balancing of a reaction given as lists of reactant and product formulas.
/// The coefficients are the null-space vector of the stoichiometric matrix scaled to coprime
/// positive integers. A reaction whose null space is not one-dimensional cannot be balanced
/// uniquely and is reported as an error, no guessing is done.
/// ----------------------------------------------------------------
/// ru
/// Уравнивание реакции, заданной списками формул реагентов и продуктов.
/// Коэффициенты - вектор ядра стехиометрической матрицы, приведенный к взаимно простым
/// положительным целым. Если ядро не одномерно, возвращается ошибка.
/// # Examples
/// ```
/// use ChemCalc::Stoichiometry::balancer::balance_formulas;
/// let nu = balance_formulas(&["CH4", "O2"], &["CO2", "H2O"]).unwrap();
/// assert_eq!(nu, vec![1, 2, 1, 2]);
/// let nu = balance_formulas(&["Fe", "O2"], &["Fe2O3"]).unwrap();
/// assert_eq!(nu, vec![4, 3, 2]);
/// ```
pub mod balancer;
/// Reaction value: species names, formulas and coefficients, equation parsing and rendering
/// # Examples
/// ```
/// use ChemCalc::Stoichiometry::reaction::Reaction;
/// let r = Reaction::from_equation("C3H8 + O2 -> CO2 + H2O").unwrap().balanced().unwrap();
/// assert_eq!(r.equation(), "C3H8 + 5O2 → 3CO2 + 4H2O");
/// ```
pub mod reaction;
/// compound name -> formula and molar mass lookup
pub mod compound_library;
/// eng
/// Extent of reaction: limiting reactant, reacted and remaining amounts, conversion,
/// excess of non-limiting reactants, yields and outlet composition.
/// ----------------------------------------------------------------
/// ru
/// Степень полноты реакции: лимитирующий реагент, прореагировавшие и оставшиеся количества,
/// конверсия, избыток нелимитирующих реагентов, выходы продуктов и состав на выходе.
/// # Examples
/// ```
/// use ChemCalc::Stoichiometry::compound_library::CompoundLibrary;
/// use ChemCalc::Stoichiometry::extent::{AmountBasis, ExtentRequest};
/// use ChemCalc::Stoichiometry::reaction::Reaction;
/// let lib = CompoundLibrary::builtin();
/// let r = Reaction::from_equation("H2 + O2 -> H2O").unwrap().balanced().unwrap();
/// let request = ExtentRequest::from_reaction(&r, vec![AmountBasis::Moles(4.0), AmountBasis::Moles(1.0)])
///     .unwrap();
/// let result = request.compute(&lib).unwrap();
/// assert_eq!(result.limiting_reactant, "O2");
/// assert!((result.extent - 1.0).abs() < 1e-12);
/// assert!((result.species("H2").unwrap().final_moles - 2.0).abs() < 1e-12);
/// ```
pub mod extent;
/// prettytable rendering of reactions, matrices and extent results
pub mod output;

#[cfg(test)]
mod extent_tests;
