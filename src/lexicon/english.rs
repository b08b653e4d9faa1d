use super::Lexicon;

pub static ENGLISH: Lexicon = Lexicon {
    code: "en",
    name: "English",
    numbers: &[
        ("one", "1"),
        ("two", "2"),
        ("three", "3"),
        ("four", "4"),
        ("five", "5"),
        ("six", "6"),
        ("seven", "7"),
        ("eight", "8"),
        ("nine", "9"),
        ("ten", "10"),
    ],
    fractions: &[
        ("three quarters", "3/4"),
        ("three-quarters", "3/4"),
        ("a half", "1/2"),
        ("half", "1/2"),
        ("a quarter", "1/4"),
        ("quarter", "1/4"),
    ],
    metric_units: &[
        ("g", "g"),
        ("gram", "g"),
        ("grams", "g"),
        ("kg", "kg"),
        ("kilogram", "kg"),
        ("kilograms", "kg"),
        ("ml", "ml"),
        ("milliliter", "ml"),
        ("milliliters", "ml"),
        ("millilitre", "ml"),
        ("millilitres", "ml"),
        ("l", "l"),
        ("liter", "l"),
        ("liters", "l"),
        ("litre", "l"),
        ("litres", "l"),
        ("oz", "oz"),
        ("ounce", "oz"),
        ("ounces", "oz"),
        ("lb", "lb"),
        ("lbs", "lb"),
        ("pound", "lb"),
        ("pounds", "lb"),
    ],
    volume_units: &[
        ("cup", "cup"),
        ("cups", "cup"),
        ("tablespoon", "tbsp"),
        ("tablespoons", "tbsp"),
        ("tbsp", "tbsp"),
        ("teaspoon", "tsp"),
        ("teaspoons", "tsp"),
        ("tsp", "tsp"),
        ("glass", "glass"),
        ("glasses", "glass"),
    ],
    count_units: &[
        ("bunch", "bunch"),
        ("bunches", "bunch"),
        ("root", "root"),
        ("roots", "root"),
        ("piece", "pc"),
        ("pieces", "pc"),
        ("clove", "clove"),
        ("cloves", "clove"),
        ("sprig", "sprig"),
        ("sprigs", "sprig"),
        ("leaf", "leaf"),
        ("leaves", "leaf"),
    ],
    links: &["of"],
    size_words: &["large", "medium", "small"],
    measured_keywords: &[
        "flour", "sugar", "salt", "oil", "butter", "cream", "milk", "water", "rice", "pasta",
    ],
    counted_keywords: &[
        "egg", "eggs", "onion", "onions", "garlic", "clove", "cloves", "potato", "potatoes",
        "carrot", "carrots", "pepper", "peppers",
    ],
};
