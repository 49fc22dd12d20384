//! Coerce permissive JSON input into the sectioned document expected by
//! the page template.
//!
//! This file contains the main logic used by the binary
//! `parallel-text-html`.

use std::collections::HashMap;

use anyhow::bail;
use serde::Serialize;
use serde_json::{Map, Value};

/// One unit of original text plus its per-language translations.
///
/// `original` is carried through verbatim, whatever JSON value the
/// author supplied. `translations` maps language codes to translated
/// text and is always present in the output, even when empty.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Sentence {
    pub original: Value,
    pub translations: Map<String, Value>,
    pub root: bool,
}

/// A named group of sentences rendered together on the page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Section {
    #[serde(rename = "sectionTitle")]
    pub title: String,
    pub sentences: Vec<Sentence>,
}

/// The two sequence shapes accepted on input.
enum Shape<'a> {
    /// Every element is an object carrying both `sectionTitle` and
    /// `sentences` keys.
    Sectioned(Vec<&'a Map<String, Value>>),
    /// A flat list of sentences needing grouping and translation
    /// merging.
    Flat(&'a [Value]),
}

/// Decide which of the two sequence shapes `items` is in.
///
/// The sectioned check is strict: a single element missing either key
/// demotes the whole sequence to a flat sentence list. An empty
/// sequence counts as sectioned and yields an empty document.
fn classify(items: &[Value]) -> Shape<'_> {
    let sections = items
        .iter()
        .map(|item| {
            item.as_object()
                .filter(|obj| obj.contains_key("sectionTitle") && obj.contains_key("sentences"))
        })
        .collect::<Option<Vec<_>>>();
    match sections {
        Some(sections) => Shape::Sectioned(sections),
        None => Shape::Flat(items),
    }
}

/// JSON truthiness: `null`, `false`, `0`, and empty strings, arrays
/// and objects are falsy; everything else is truthy.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Pick a section title, falling back to `default_section` when the
/// value is absent or falsy. Truthy non-string values are used through
/// their compact JSON rendering.
fn section_title(title: Option<&Value>, default_section: &str) -> String {
    match title {
        Some(Value::String(title)) if !title.is_empty() => title.clone(),
        Some(value) if truthy(value) => value.to_string(),
        _ => default_section.to_string(),
    }
}

/// Insertion-ordered section accumulator with a title lookup.
///
/// New titles append a section at the end; repeated titles extend the
/// section created at first encounter.
#[derive(Default)]
struct Grouper {
    sections: Vec<Section>,
    by_title: HashMap<String, usize>,
}

impl Grouper {
    fn push(&mut self, title: String, sentence: Sentence) {
        let idx = match self.by_title.get(&title) {
            Some(&idx) => idx,
            None => {
                let idx = self.sections.len();
                self.by_title.insert(title.clone(), idx);
                self.sections.push(Section {
                    title,
                    sentences: Vec::new(),
                });
                idx
            }
        };
        self.sections[idx].sentences.push(sentence);
    }
}

/// Merge the two translation fields of a flat-list entry.
///
/// The `translations` object is the base layer. A singular
/// `translation` then fills the `default_lang` slot when it is a bare
/// string, but only if that language is not already set; in object
/// form it overwrites language by language.
fn merge_translations(
    entry: &Map<String, Value>,
    index: usize,
    default_lang: &str,
) -> anyhow::Result<Map<String, Value>> {
    let mut translations = Map::new();

    match entry.get("translations") {
        None | Some(Value::Null) => {}
        Some(Value::Object(map)) => {
            translations.extend(map.iter().map(|(lang, text)| (lang.clone(), text.clone())));
        }
        Some(other) => {
            bail!("'translations' on entry {index} must be an object if provided, got {other}")
        }
    }

    match entry.get("translation") {
        None | Some(Value::Null) => {}
        Some(Value::String(text)) => {
            translations
                .entry(default_lang)
                .or_insert_with(|| Value::String(text.clone()));
        }
        Some(Value::Object(map)) => {
            for (lang, text) in map {
                translations.insert(lang.clone(), text.clone());
            }
        }
        Some(other) => {
            bail!("'translation' on entry {index} must be a string or object, got {other}")
        }
    }

    Ok(translations)
}

/// Group a flat list of sentence entries into sections.
fn normalize_flat(
    items: &[Value],
    default_section: &str,
    default_lang: &str,
) -> anyhow::Result<Vec<Section>> {
    let mut grouper = Grouper::default();

    // Entries are numbered from 1 in error messages.
    for (index, item) in items.iter().enumerate() {
        let index = index + 1;
        let Some(entry) = item.as_object() else {
            bail!("Entry {index} is not an object: {item}");
        };
        let Some(original) = entry.get("original") else {
            bail!("Entry {index} is missing 'original': {item}");
        };

        let translations = merge_translations(entry, index, default_lang)?;
        let title = section_title(entry.get("section"), default_section);
        grouper.push(
            title,
            Sentence {
                original: original.clone(),
                translations,
                root: entry.get("root").is_some_and(truthy),
            },
        );
    }

    Ok(grouper.sections)
}

/// Fill in defaults for input that is already sectioned.
///
/// Unlike the flat path, a missing `original` is tolerated here and
/// becomes the empty string.
fn normalize_sections(
    sections: &[&Map<String, Value>],
    default_section: &str,
) -> anyhow::Result<Vec<Section>> {
    let mut normalized = Vec::with_capacity(sections.len());

    for section in sections {
        let title = section_title(section.get("sectionTitle"), default_section);
        let entries = match section.get("sentences") {
            Some(Value::Array(entries)) => entries.as_slice(),
            other => bail!("'sentences' in section {title:?} must be an array, got {other:?}"),
        };

        let mut sentences = Vec::with_capacity(entries.len());
        for entry in entries {
            let Some(entry) = entry.as_object() else {
                bail!("Sentence in section {title:?} must be an object: {entry}");
            };
            let translations = match entry.get("translations") {
                None | Some(Value::Null) => Map::new(),
                Some(Value::Object(map)) => map.clone(),
                Some(other) => bail!(
                    "'translations' in section {title:?} must be an object if provided, got {other}"
                ),
            };
            sentences.push(Sentence {
                original: entry
                    .get("original")
                    .cloned()
                    .unwrap_or_else(|| Value::String(String::new())),
                translations,
                root: entry.get("root").is_some_and(truthy),
            });
        }
        normalized.push(Section { title, sentences });
    }

    Ok(normalized)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Coerce decoded JSON into the ordered list of sections expected by
/// the page template.
///
/// Three input shapes are accepted:
///
/// - a flat list of sentence objects, grouped into sections by their
///   `section` field (first-seen title order; `default_section` when
///   the field is absent or falsy);
/// - a list of already-sectioned objects, each carrying `sectionTitle`
///   and `sentences`;
/// - an object wrapping either shape under a `sections` key.
///
/// The first entry violating a required-field or type constraint fails
/// the whole document; errors name the offending entry.
///
/// # Examples
///
/// ```
/// use parallel_text_html::normalize::normalize;
/// use serde_json::json;
///
/// let sections = normalize(
///     &json!([
///         {"original": "Bonjour", "translation": "Hello", "section": "Greetings"},
///         {"original": "Au revoir", "translation": "Goodbye", "section": "Greetings"},
///     ]),
///     "Text",
///     "en",
/// )
/// .unwrap();
/// assert_eq!(sections.len(), 1);
/// assert_eq!(sections[0].title, "Greetings");
/// assert_eq!(sections[0].sentences[1].translations["en"], json!("Goodbye"));
/// ```
pub fn normalize(
    data: &Value,
    default_section: &str,
    default_lang: &str,
) -> anyhow::Result<Vec<Section>> {
    match data {
        Value::Array(items) => match classify(items) {
            Shape::Sectioned(sections) => normalize_sections(&sections, default_section),
            Shape::Flat(items) => normalize_flat(items, default_section, default_lang),
        },
        Value::Object(map) => match map.get("sections") {
            Some(nested) => normalize(nested, default_section, default_lang),
            None => bail!(
                "Unsupported JSON shape (object without 'sections'), \
                 expected a list of sentences or sections"
            ),
        },
        other => bail!(
            "Unsupported JSON shape ({}), expected a list of sentences or sections",
            json_type(other)
        ),
    }
}
