// File: crates/propmap-core/src/attributes.rs
// Summary: Attribute extraction against a dataset allow-list, plus display labels for attributes.

use crate::loader::Dataset;

/// Ordered attribute list: allow-listed keys present in the first feature, in allow-list order.
/// An empty dataset or no matches yields an empty list.
pub fn extract_attributes<S: AsRef<str>>(dataset: &Dataset, allow_list: &[S]) -> Vec<String> {
    let Some(sample) = dataset.first() else { return Vec::new(); };
    allow_list
        .iter()
        .map(AsRef::as_ref)
        .filter(|key| sample.properties.contains_key(*key))
        .map(str::to_string)
        .collect()
}

/// Human label for an attribute: its trailing digit run (`USER_F1990` -> `1990`),
/// or the full name when it does not end in digits.
pub fn attribute_label(name: &str) -> &str {
    let digits = name.bytes().rev().take_while(u8::is_ascii_digit).count();
    if digits == 0 { name } else { &name[name.len() - digits..] }
}
