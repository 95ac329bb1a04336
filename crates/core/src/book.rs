use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::command::{CommandError, CommandExecutor, CommandResult};
use crate::query::{Field, Query, Searchable};

pub const USAGE_ADD: &str = "add n/NAME [p/PHONE] [e/EMAIL] [a/ADDRESS] [t/TAG]...";
pub const USAGE_FIND: &str = "find [n/NAME] [p/PHONE] [e/EMAIL] [a/ADDRESS] [t/TAG]...";
pub const USAGE_DELETE: &str = "delete INDEX";

pub fn usage_lines() -> &'static [&'static str] {
    &[
        USAGE_ADD,
        USAGE_FIND,
        "list",
        USAGE_DELETE,
        "clear",
        "help",
        "exit",
    ]
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Contact {
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            phone: None,
            email: None,
            address: None,
            tags: BTreeSet::new(),
        }
    }

    /// One-line summary used by the output pane.
    pub fn summary(&self) -> String {
        let mut out = self.name.clone();
        for v in [&self.phone, &self.email, &self.address].into_iter().flatten() {
            out.push_str("  ");
            out.push_str(v);
        }
        for t in &self.tags {
            out.push_str(&format!("  [{}]", t));
        }
        out
    }
}

impl Searchable for Contact {
    fn words(&self, field: Field) -> Vec<&str> {
        let text = match field {
            Field::Name => Some(self.name.as_str()),
            Field::Phone => self.phone.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Address => self.address.as_deref(),
            Field::Tag => return self.tags.iter().map(String::as_str).collect(),
        };
        text.map(|t| t.split_whitespace().collect())
            .unwrap_or_default()
    }
}

fn prefix_of(field: Field) -> &'static str {
    match field {
        Field::Name => "n/",
        Field::Phone => "p/",
        Field::Email => "e/",
        Field::Address => "a/",
        Field::Tag => "t/",
    }
}

/// Arguments split at `n/ p/ e/ a/ t/` prefixes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArgMap {
    pub preamble: String,
    values: Vec<(Field, String)>,
}

impl ArgMap {
    /// A prefix only counts at the start of `args` or right after whitespace.
    pub fn tokenize(args: &str) -> Self {
        let mut marks: Vec<(usize, Field)> = Vec::new();
        for field in Field::ALL {
            let p = prefix_of(field);
            for (pos, _) in args.match_indices(p) {
                let at_boundary = pos == 0
                    || args[..pos]
                        .chars()
                        .next_back()
                        .map(char::is_whitespace)
                        .unwrap_or(true);
                if at_boundary {
                    marks.push((pos, field));
                }
            }
        }
        marks.sort_by_key(|(pos, _)| *pos);

        let first = marks.first().map(|(p, _)| *p).unwrap_or(args.len());
        let mut out = ArgMap {
            preamble: args[..first].trim().to_string(),
            values: Vec::new(),
        };
        for (i, (pos, field)) in marks.iter().enumerate() {
            let start = pos + prefix_of(*field).len();
            let end = marks.get(i + 1).map(|(p, _)| *p).unwrap_or(args.len());
            out.values.push((*field, args[start..end].trim().to_string()));
        }
        out
    }

    pub fn value(&self, field: Field) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn values(&self, field: Field) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}

#[derive(Clone, Debug, Default)]
pub struct AddressBook {
    contacts: Vec<Contact>,
    shown: Vec<usize>,
    revision: u64,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_contacts(contacts: Vec<Contact>) -> Self {
        let shown = (0..contacts.len()).collect();
        Self {
            contacts,
            shown,
            revision: 0,
        }
    }

    /// Bumped on every change to the stored contacts.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn shown(&self) -> impl Iterator<Item = &Contact> + '_ {
        self.shown.iter().filter_map(|i| self.contacts.get(*i))
    }

    pub fn shown_len(&self) -> usize {
        self.shown.len()
    }

    fn show_all(&mut self) {
        self.shown = (0..self.contacts.len()).collect();
    }

    fn add(&mut self, args: &str) -> Result<CommandResult, CommandError> {
        let map = ArgMap::tokenize(args);
        let name = map
            .value(Field::Name)
            .filter(|n| !n.is_empty())
            .ok_or(CommandError::MissingField("name"))?;
        if self
            .contacts
            .iter()
            .any(|c| c.name.eq_ignore_ascii_case(name))
        {
            return Err(CommandError::Duplicate(name.to_string()));
        }
        let mut contact = Contact::named(name);
        let optional = |f: Field| map.value(f).filter(|v| !v.is_empty()).map(str::to_string);
        contact.phone = optional(Field::Phone);
        contact.email = optional(Field::Email);
        contact.address = optional(Field::Address);
        if let Some(p) = &contact.phone {
            if !p.chars().all(|c| c.is_ascii_digit() || c == '+' || c == '-') {
                return Err(CommandError::InvalidValue {
                    field: "phone",
                    reason: format!("'{}' may only contain digits, '+' and '-'", p),
                });
            }
        }
        for t in map.values(Field::Tag) {
            if t.is_empty() || t.contains(char::is_whitespace) {
                return Err(CommandError::InvalidValue {
                    field: "tag",
                    reason: format!("'{}' must be a single word", t),
                });
            }
            contact.tags.insert(t.to_string());
        }
        info!(target: "book", "add: {}", contact.name);
        let feedback = format!("Added: {}", contact.summary());
        self.contacts.push(contact);
        self.revision += 1;
        self.show_all();
        Ok(CommandResult::message(feedback))
    }

    fn find(&mut self, args: &str) -> Result<CommandResult, CommandError> {
        if args.trim().is_empty() {
            return Err(CommandError::InvalidFormat { usage: USAGE_FIND });
        }
        let map = ArgMap::tokenize(args);
        let mut query = Query::new();
        for field in Field::ALL {
            for v in map.values(field) {
                query.add(field, v);
            }
        }
        let filter = query.filter();
        let fields: Vec<&str> = filter.clauses().iter().map(|c| c.field.label()).collect();
        debug!(target: "book", "find on [{}]", fields.join(", "));
        self.shown = self
            .contacts
            .iter()
            .enumerate()
            .filter(|(_, c)| filter.matches(*c))
            .map(|(i, _)| i)
            .collect();
        Ok(CommandResult::message(format!(
            "{} contact(s) listed",
            self.shown.len()
        )))
    }

    fn delete(&mut self, args: &str) -> Result<CommandResult, CommandError> {
        let index: usize = args
            .trim()
            .parse()
            .map_err(|_| CommandError::InvalidFormat { usage: USAGE_DELETE })?;
        if index == 0 || index > self.shown.len() {
            return Err(CommandError::IndexOutOfRange(index));
        }
        let removed = self.contacts.remove(self.shown[index - 1]);
        info!(target: "book", "delete: {}", removed.name);
        self.revision += 1;
        self.show_all();
        Ok(CommandResult::message(format!("Deleted: {}", removed.name)))
    }
}

impl CommandExecutor for AddressBook {
    fn execute(&mut self, text: &str) -> Result<CommandResult, CommandError> {
        let s = text.trim();
        let mut parts = s.splitn(2, char::is_whitespace);
        let word = parts.next().unwrap_or("");
        let args = parts.next().unwrap_or("");
        match word {
            "add" => self.add(args),
            "find" => self.find(args),
            "list" => {
                self.show_all();
                Ok(CommandResult::message("Listed all contacts"))
            }
            "delete" => self.delete(args),
            "clear" => {
                self.contacts.clear();
                self.revision += 1;
                self.show_all();
                Ok(CommandResult::message("Contact book has been cleared"))
            }
            "help" => Ok(CommandResult::message(usage_lines().join("\n"))),
            "exit" => Ok(CommandResult::exit("Bye")),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}
