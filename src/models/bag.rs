//! `Token`, `NameBag`, and `DisregardBag` — the canonical internal form
//! a raw field value is reduced to before similarity scoring.

use std::collections::BTreeMap;

/// One surviving token after splitting and filtering, paired with its
/// normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub original: String,
    pub normalized: String,
}

/// A map from normalized token to the list of original spellings that
/// collapsed to it. `BTreeMap` keeps iteration order deterministic, which
/// matters for reproducing scores across runs.
pub type NameBag = BTreeMap<String, Vec<String>>;

/// Same shape as `NameBag`; entries whose presence must not contribute
/// positively to a match.
pub type DisregardBag = NameBag;

/// Insert a token into a bag, appending to the original-spellings list if
/// the normalized key is already present.
pub fn insert_token(bag: &mut NameBag, token: Token) {
    bag.entry(token.normalized).or_default().push(token.original);
}
