/// Universal POS tags and their Spanish display labels.
pub const POS_LABELS: &[(&str, &str)] = &[
    ("PROPN", "Nombre propio"),
    ("AUX", "Verbo auxiliar"),
    ("ADV", "Adverbio"),
    ("ADJ", "Adjetivo"),
    ("CCONJ", "Conjunción de coordinación"),
    ("VERB", "Verbo"),
    ("NOUN", "Sustantivo"),
    ("PRON", "Pronombre"),
    ("DET", "Determinante"),
    ("ADP", "Adposición"),
    ("NUM", "Numeral"),
    ("PUNCT", "Signo de puntuación"),
    ("SYM", "Símbolo"),
    ("X", "Otro"),
];

/// Dependency relations and their Spanish display labels.
pub const DEP_LABELS: &[(&str, &str)] = &[
    ("nsubj", "sujeto nominal"),
    ("cop", "verbo copulativo"),
    ("advmod", "modificador adverbial"),
    ("obj", "objeto"),
    ("amod", "modificador adjetival"),
    ("det", "determinante"),
    ("root", "raíz"),
    ("ROOT", "raíz"),
    ("cc", "conjunción coordinada"),
    ("conj", "conjunción"),
    ("punct", "puntuación"),
    ("case", "caso"),
    ("obl", "complemento oblicuo"),
    ("mark", "marcador"),
    ("xcomp", "complemento abierto"),
    ("aux", "auxiliar"),
    ("fixed", "fijo"),
    ("nmod", "modificador nominal"),
    ("appos", "aposición"),
    ("nummod", "modificador numérico"),
    ("dep", "dependencia"),
];

fn lookup(table: &'static [(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(english, _)| *english == code)
        .map(|(_, spanish)| *spanish)
}

/// Spanish label for a POS tag, if known.
pub fn pos_label(code: &str) -> Option<&'static str> {
    lookup(POS_LABELS, code)
}

/// Spanish label for a dependency relation, if known.
pub fn dep_label(code: &str) -> Option<&'static str> {
    lookup(DEP_LABELS, code)
}

/// POS label with fallback to the raw code.
pub fn pos_label_or_code(code: &str) -> &str {
    pos_label(code).unwrap_or(code)
}

/// Dependency label with fallback to the raw code.
pub fn dep_label_or_code(code: &str) -> &str {
    dep_label(code).unwrap_or(code)
}
