use super::Lexicon;

pub static ROMANIAN: Lexicon = Lexicon {
    code: "ro",
    name: "Romanian",
    numbers: &[
        ("un", "1"),
        ("una", "1"),
        ("o", "1"),
        ("doi", "2"),
        ("două", "2"),
        ("trei", "3"),
        ("patru", "4"),
        ("cinci", "5"),
        ("șase", "6"),
        ("șapte", "7"),
        ("opt", "8"),
        ("nouă", "9"),
        ("zece", "10"),
    ],
    fractions: &[
        ("o jumătate", "1/2"),
        ("jumătate", "1/2"),
        ("un sfert", "1/4"),
        ("trei sferturi", "3/4"),
    ],
    metric_units: &[
        ("g", "g"),
        ("gr", "g"),
        ("gram", "g"),
        ("grame", "g"),
        ("kg", "kg"),
        ("kilogram", "kg"),
        ("kilograme", "kg"),
        ("ml", "ml"),
        ("l", "l"),
        ("litru", "l"),
        ("litri", "l"),
    ],
    volume_units: &[
        ("lingură", "tbsp"),
        ("linguri", "tbsp"),
        ("linguriță", "tsp"),
        ("lingurițe", "tsp"),
        ("cană", "cup"),
        ("căni", "cup"),
        ("pahar", "glass"),
        ("pahare", "glass"),
    ],
    count_units: &[
        ("legătură", "bunch"),
        ("legături", "bunch"),
        ("rădăcină", "root"),
        ("rădăcini", "root"),
        ("bucată", "pc"),
        ("bucăți", "pc"),
        ("foaie", "leaf"),
        ("foi", "leaf"),
        ("cățel", "clove"),
        ("căței", "clove"),
    ],
    links: &["de"],
    size_words: &["mare", "mari", "mic", "mică", "mici", "mijlociu", "mijlocie"],
    measured_keywords: &[
        "făină", "zahăr", "sare", "ulei", "unt", "smântână", "lapte", "apă", "orez", "paste",
        "macaroane",
    ],
    counted_keywords: &[
        "ou", "ouă", "ceapă", "cepe", "usturoi", "cartof", "cartofi", "morcov", "morcovi",
        "ardei", "țelină", "păstârnac",
    ],
};
