//! Identifier pluralization for the generated mapping accessor.
//!
//! Only the last `_`-separated word of an identifier is inflected, so
//! `order_state` becomes `order_states`.

///
/// Inflector
///

pub trait Inflector {
    fn pluralize(&self, word: &str) -> String;
}

impl<F> Inflector for F
where
    F: Fn(&str) -> String,
{
    fn pluralize(&self, word: &str) -> String {
        self(word)
    }
}

///
/// EnglishInflector
///
/// Rule table modelled on the common English inflection rules used by web
/// frameworks: uncountables, irregulars, then suffix rules in priority order.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct EnglishInflector;

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("zombie", "zombies"),
    ("ox", "oxen"),
    ("mouse", "mice"),
    ("louse", "lice"),
];

// (suffix, chars to strip, replacement); first match wins.
const SUFFIX_RULES: &[(&str, usize, &str)] = &[
    ("quiz", 0, "zes"),
    ("matrix", 2, "ices"),
    ("vertex", 2, "ices"),
    ("index", 2, "ices"),
    ("x", 0, "es"),
    ("ch", 0, "es"),
    ("ss", 0, "es"),
    ("sh", 0, "es"),
    ("quy", 1, "ies"),
    ("hive", 0, "s"),
    ("sis", 2, "es"),
    ("tum", 2, "a"),
    ("ium", 2, "a"),
    ("buffalo", 0, "es"),
    ("tomato", 0, "es"),
    ("bus", 0, "es"),
    ("alias", 0, "es"),
    ("status", 0, "es"),
    ("octopus", 2, "i"),
    ("virus", 2, "i"),
    ("axis", 2, "es"),
    ("testis", 2, "es"),
    ("s", 0, ""),
];

impl Inflector for EnglishInflector {
    fn pluralize(&self, word: &str) -> String {
        let (head, last) = word
            .rfind('_')
            .map_or(("", word), |i| word.split_at(i + 1));

        format!("{head}{}", pluralize_word(last))
    }
}

fn pluralize_word(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(single, _)| *single == word) {
        return (*plural).to_string();
    }

    for (suffix, strip, replacement) in SUFFIX_RULES {
        if word.ends_with(suffix) {
            return format!("{}{replacement}", &word[..word.len() - strip]);
        }
    }

    // consonant + y → ies
    if let Some(stem) = word.strip_suffix('y')
        && stem.chars().last().is_some_and(|c| !"aeiouy".contains(c))
    {
        return format!("{stem}ies");
    }

    // [lr]f → ves, [^f]fe → ves
    if let Some(stem) = word.strip_suffix('f')
        && (stem.ends_with('l') || stem.ends_with('r'))
    {
        return format!("{stem}ves");
    }
    if let Some(stem) = word.strip_suffix("fe")
        && !stem.ends_with('f')
    {
        return format!("{stem}ves");
    }

    format!("{word}s")
}
