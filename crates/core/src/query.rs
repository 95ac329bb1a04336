use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    Name,
    Phone,
    Email,
    Address,
    Tag,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Phone,
        Field::Email,
        Field::Address,
        Field::Tag,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Address => "address",
            Field::Tag => "tag",
        }
    }
}

/// A record whose fields can be searched word by word.
pub trait Searchable {
    fn words(&self, field: Field) -> Vec<&str>;
}

/// Matches when every keyword is one of the field's words, ignoring ASCII case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeywordsPredicate {
    pub field: Field,
    pub keywords: Vec<String>,
}

impl KeywordsPredicate {
    pub fn parse(field: Field, raw: &str) -> Self {
        Self {
            field,
            keywords: raw.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn is_trivial(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn test<R: Searchable + ?Sized>(&self, record: &R) -> bool {
        if self.keywords.is_empty() {
            return true;
        }
        let words = record.words(self.field);
        self.keywords
            .iter()
            .all(|k| words.iter().any(|w| w.eq_ignore_ascii_case(k)))
    }
}

/// Raw per-field search tokens as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    tokens: BTreeMap<Field, Vec<String>>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, token: impl Into<String>) -> Self {
        self.add(field, token);
        self
    }

    pub fn add(&mut self, field: Field, token: impl Into<String>) {
        self.tokens.entry(field).or_default().push(token.into());
    }

    /// Compose the conjunction of every field's tokens. Fields without tokens
    /// and blank tokens restrict nothing.
    pub fn filter(&self) -> Filter {
        let clauses = self
            .tokens
            .iter()
            .flat_map(|(field, toks)| toks.iter().map(|t| KeywordsPredicate::parse(*field, t)))
            .filter(|p| !p.is_trivial())
            .collect();
        Filter { clauses }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    clauses: Vec<KeywordsPredicate>,
}

impl Filter {
    pub fn matches<R: Searchable + ?Sized>(&self, record: &R) -> bool {
        self.clauses.iter().all(|c| c.test(record))
    }

    pub fn is_unrestricted(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[KeywordsPredicate] {
        &self.clauses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rec {
        name: &'static str,
        tags: Vec<&'static str>,
    }

    impl Searchable for Rec {
        fn words(&self, field: Field) -> Vec<&str> {
            match field {
                Field::Name => self.name.split_whitespace().collect(),
                Field::Tag => self.tags.clone(),
                _ => Vec::new(),
            }
        }
    }

    fn alice() -> Rec {
        Rec {
            name: "Alice Pauline",
            tags: vec!["friends", "work"],
        }
    }

    #[test]
    fn empty_query_matches_everything() {
        let f = Query::new().filter();
        assert!(f.is_unrestricted());
        assert!(f.matches(&alice()));
    }

    #[test]
    fn keywords_within_a_token_are_conjoined() {
        let r = alice();
        assert!(Query::new().with(Field::Name, "alice pauline").filter().matches(&r));
        assert!(!Query::new().with(Field::Name, "alice bob").filter().matches(&r));
    }

    #[test]
    fn keyword_must_be_a_whole_word() {
        assert!(!Query::new().with(Field::Name, "Ali").filter().matches(&alice()));
    }

    #[test]
    fn repeated_tokens_for_one_field_are_conjoined() {
        let r = alice();
        let both = Query::new().with(Field::Tag, "friends").with(Field::Tag, "WORK");
        assert!(both.filter().matches(&r));
        let one_missing = Query::new().with(Field::Tag, "friends").with(Field::Tag, "family");
        assert!(!one_missing.filter().matches(&r));
    }

    #[test]
    fn fields_are_conjoined() {
        let r = alice();
        let q = Query::new().with(Field::Name, "alice").with(Field::Tag, "family");
        assert!(!q.filter().matches(&r));
        let q = Query::new().with(Field::Name, "alice").with(Field::Tag, "work");
        assert!(q.filter().matches(&r));
    }

    #[test]
    fn blank_tokens_restrict_nothing() {
        let q = Query::new().with(Field::Email, "   ").with(Field::Name, "");
        assert!(q.filter().is_unrestricted());
        assert!(q.filter().matches(&alice()));
    }

    #[test]
    fn absent_field_words_fail_real_keywords() {
        let q = Query::new().with(Field::Phone, "9435");
        assert_eq!(q.filter().clauses().len(), 1);
        assert!(!q.filter().matches(&alice()));
    }

    #[test]
    fn clauses_are_labelled_in_field_order() {
        let q = Query::new()
            .with(Field::Tag, "work")
            .with(Field::Email, " ")
            .with(Field::Name, "alice");
        let labels: Vec<&str> = q.filter().clauses().iter().map(|c| c.field.label()).collect();
        assert_eq!(labels, vec!["name", "tag"]);
    }
}
