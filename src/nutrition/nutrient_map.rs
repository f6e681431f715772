//! USDA nutrient name to target nutrient name mapping
//!
//! FDC reports amounts per 100 g in its own units; the target store uses the
//! same units, so a mapped amount is stored unchanged. Names missing from the
//! table are dropped and treated as zero by clients.

use std::collections::HashMap;
use std::sync::LazyLock;

/// (USDA nutrient name, target nutrient name)
///
/// Several USDA names may fold into one target name; the aggregator sums them.
pub const NUTRIENT_MAP: &[(&str, &str)] = &[
    // Macronutrients
    ("Protein", "Protein"),
    ("Carbohydrate, by difference", "Carbohydrates"),
    ("Total lipid (fat)", "Fats"),
    // Carbohydrates
    ("Sugars, Total", "Sugars"),
    ("Fiber, total dietary", "Fiber"),
    // Lipids
    ("Fatty acids, total saturated", "Saturated Fat"),
    ("Fatty acids, total monounsaturated", "Unsaturated Fat"),
    ("Fatty acids, total polyunsaturated", "Unsaturated Fat"),
    // Vitamins
    ("Vitamin A, RAE", "Vitamin A"),
    ("Thiamin", "Vitamin B1"),
    ("Riboflavin", "Vitamin B2"),
    ("Niacin", "Vitamin B3"),
    ("Pantothenic acid", "Vitamin B5"),
    ("Vitamin B-6", "Vitamin B6"),
    ("Biotin", "Vitamin B7"),
    ("Folate, total", "Vitamin B9"),
    ("Vitamin B-12", "Vitamin B12"),
    ("Vitamin C, total ascorbic acid", "Vitamin C"),
    ("Vitamin D (D2 + D3)", "Vitamin D"),
    ("Vitamin E (alpha-tocopherol)", "Vitamin E"),
    ("Vitamin K (phylloquinone)", "Vitamin K"),
    ("Vitamin K (Dihydrophylloquinone)", "Vitamin K"),
    ("Vitamin K (Menaquinone-4)", "Vitamin K"),
    // Minerals
    ("Calcium, Ca", "Calcium"),
    ("Iron, Fe", "Iron"),
    ("Magnesium, Mg", "Magnesium"),
    ("Phosphorus, P", "Phosphorus"),
    ("Potassium, K", "Potassium"),
    ("Sodium, Na", "Sodium"),
    ("Zinc, Zn", "Zinc"),
    ("Copper, Cu", "Copper"),
    ("Manganese, Mn", "Manganese"),
    ("Selenium, Se", "Selenium"),
    // Grams of water are stored as milliliters (1 g = 1 ml).
    // Energy is left out: clients derive calories from the macros.
    ("Water", "Water"),
];

static LOOKUP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| NUTRIENT_MAP.iter().copied().collect());

/// Resolve a USDA nutrient name to its target name
///
/// Returns `None` for nutrients the target store does not track.
pub fn target_nutrient(usda_name: &str) -> Option<&'static str> {
    LOOKUP.get(usda_name).copied()
}

/// Distinct target nutrient names, in table order
pub fn target_nutrients() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::new();
    for &(_, target) in NUTRIENT_MAP {
        if !names.contains(&target) {
            names.push(target);
        }
    }
    names
}
