//! Closed-class Spanish vocabulary and suffix heuristics used by the built-in tagger.

pub const DETERMINERS: &[&str] = &[
    "el", "la", "los", "las", "un", "una", "unos", "unas", "lo",
    "este", "esta", "estos", "estas", "ese", "esa", "esos", "esas",
    "aquel", "aquella", "aquellos", "aquellas",
    "mi", "mis", "tu", "tus", "su", "sus",
    "nuestro", "nuestra", "nuestros", "nuestras", "vuestro", "vuestra", "vuestros", "vuestras",
    "cada", "algún", "alguna", "algunos", "algunas", "ningún", "ninguna",
    "todo", "toda", "todos", "todas", "otro", "otra", "otros", "otras",
    "mucho", "mucha", "muchos", "muchas", "poco", "poca", "pocos", "pocas",
    "varios", "varias", "cualquier", "qué", "cuál", "cuánto", "cuánta", "cuántos", "cuántas",
];

/// Articles that double as object clitics when followed by a verb.
pub const CLITIC_ARTICLES: &[&str] = &["la", "las", "lo", "los"];

pub const ADPOSITIONS: &[&str] = &[
    "a", "ante", "bajo", "con", "contra", "de", "desde", "en", "entre", "hacia", "hasta",
    "para", "por", "según", "sin", "sobre", "tras", "durante", "mediante", "al", "del",
];

pub const COORD_CONJUNCTIONS: &[&str] = &["y", "e", "o", "u", "ni", "pero", "sino", "mas"];

pub const SUBORD_CONJUNCTIONS: &[&str] = &[
    "que", "porque", "si", "cuando", "aunque", "como", "mientras", "pues", "donde",
];

pub const PRONOUNS: &[&str] = &[
    "yo", "tú", "él", "ella", "ello", "nosotros", "nosotras", "vosotros", "vosotras",
    "ellos", "ellas", "usted", "ustedes", "mí", "ti", "sí", "conmigo", "contigo",
    "me", "te", "se", "nos", "os", "le", "les",
    "esto", "eso", "aquello", "alguien", "nadie", "algo", "nada", "quien", "quién",
    "quienes", "mío", "tuyo", "suyo",
];

/// Unstressed pronouns that attach to the following verb.
pub const CLITICS: &[&str] = &["me", "te", "se", "nos", "os", "le", "les", "lo", "la", "los", "las"];

pub const AUXILIARIES: &[&str] = &[
    // haber
    "he", "has", "ha", "hemos", "habéis", "han", "había", "habías", "habíamos", "habían",
    "hube", "hubo", "habrá", "habrán", "haya", "hayan", "habría", "habrían", "haber",
    // ser
    "soy", "eres", "es", "somos", "sois", "son", "era", "eras", "éramos", "eran",
    "fui", "fuiste", "fue", "fuimos", "fueron", "será", "serán", "sería", "sea", "sean", "ser",
    // estar
    "estoy", "estás", "está", "estamos", "estáis", "están", "estaba", "estabas", "estábamos",
    "estaban", "estuvo", "estuvieron", "estará", "estarán", "esté", "estén", "estar",
];

/// Forms of `haber`, which take a participle instead of a nominal predicate.
pub const PERFECT_AUXILIARIES: &[&str] = &[
    "he", "has", "ha", "hemos", "habéis", "han", "había", "habías", "habíamos", "habían",
    "hube", "hubo", "habrá", "habrán", "haya", "hayan", "habría", "habrían", "haber",
];

pub const ADVERBS: &[&str] = &[
    "no", "sí", "muy", "ya", "siempre", "nunca", "jamás", "aquí", "allí", "ahí", "allá",
    "hoy", "ayer", "mañana", "bien", "mal", "también", "tampoco", "más", "menos", "casi",
    "todavía", "aún", "pronto", "tarde", "temprano", "lejos", "cerca", "después", "antes",
    "así", "solo", "sólo", "ahora", "entonces", "luego", "bastante", "demasiado", "tan",
    "tanto", "quizás", "quizá", "acaso", "dentro", "fuera", "encima", "debajo", "arriba", "abajo",
];

pub const NUMERALS: &[&str] = &[
    "cero", "uno", "dos", "tres", "cuatro", "cinco", "seis", "siete", "ocho", "nueve", "diez",
    "once", "doce", "veinte", "treinta", "cien", "ciento", "mil", "millón",
];

pub const ADJECTIVES: &[&str] = &[
    "grande", "gran", "pequeño", "pequeña", "pequeños", "pequeñas", "bueno", "buena", "buen",
    "buenos", "buenas", "malo", "mala", "malos", "malas", "nuevo", "nueva", "nuevos", "nuevas",
    "viejo", "vieja", "viejos", "viejas", "alto", "alta", "altos", "altas", "bonito", "bonita",
    "feliz", "felices", "triste", "tristes", "rápido", "rápida", "lento", "lenta", "largo",
    "larga", "corto", "corta", "joven", "jóvenes", "mayor", "menor", "mejor", "peor", "negro",
    "negra", "negros", "negras", "blanco", "blanca", "blancos", "blancas", "rojo", "roja",
    "azul", "azules", "verde", "verdes", "amarillo", "amarilla", "gris", "hermoso", "hermosa",
    "feo", "fea", "gordo", "gorda", "delgado", "delgada", "cansado", "cansada", "listo",
    "lista", "fácil", "difícil", "caliente", "frío", "fría", "rico", "rica", "pobre",
    "importante", "primer", "primero", "primera", "último", "última", "mismo", "misma",
];

/// Common nouns that look like infinitives or participles.
pub const NOUNS: &[&str] = &[
    "lugar", "mujer", "hogar", "mar", "altar", "collar", "taller", "dólar", "azúcar", "bar",
    "placer", "poder", "deber", "ser", "amanecer", "cantar", "pescado", "helado", "soldado",
    "mercado", "estado", "lado", "vestido", "sonido", "partido", "abogado", "cuidado",
];

pub const SYMBOLS: &[char] = &['$', '%', '€', '£', '+', '=', '*', '/', '&', '@', '#', '<', '>', '°', '§'];

pub const PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '¡', '¿', '"', '\'', '(', ')', '[', ']', '{', '}',
    '«', '»', '“', '”', '‘', '’', '…', '-', '—', '–',
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
    "oso", "osa", "osos", "osas", "al", "ales", "ble", "bles", "ico", "ica", "icos", "icas",
    "ivo", "iva", "ivos", "ivas", "ario", "aria", "nte", "ntes", "ista", "ano", "ana", "ino", "ina",
    "ento", "enta", "esco", "esca",
];

const FINITE_SUFFIXES: &[&str] = &[
    "o", "a", "e", "as", "es", "an", "en", "amos", "emos", "imos", "áis", "éis", "ís",
    "ó", "ió", "é", "í", "aron", "ieron", "aba", "aban", "ía", "ían", "rá", "rán", "ría", "rían",
];

pub fn contains(list: &[&str], word: &str) -> bool {
    list.contains(&word)
}

pub fn is_punctuation_char(c: char) -> bool {
    PUNCTUATION.contains(&c)
}

pub fn is_symbol_char(c: char) -> bool {
    SYMBOLS.contains(&c)
}

pub fn is_numeric(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit())
        && word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
}

pub fn is_infinitive(word: &str) -> bool {
    word.chars().count() > 3 && (word.ends_with("ar") || word.ends_with("er") || word.ends_with("ir"))
}

pub fn is_gerund(word: &str) -> bool {
    word.ends_with("ando") || word.ends_with("iendo") || word.ends_with("yendo")
}

pub fn is_participle(word: &str) -> bool {
    ["ado", "ada", "ados", "adas", "ido", "ida", "idos", "idas"]
        .iter()
        .any(|suffix| word.ends_with(suffix) && word.len() > suffix.len() + 1)
}

pub fn has_adjective_suffix(word: &str) -> bool {
    ADJECTIVE_SUFFIXES
        .iter()
        .any(|suffix| word.ends_with(suffix) && word.len() > suffix.len() + 2)
}

pub fn looks_finite(word: &str) -> bool {
    word.chars().count() > 2 && FINITE_SUFFIXES.iter().any(|suffix| word.ends_with(suffix))
}
