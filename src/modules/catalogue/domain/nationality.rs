use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nationality {
    pub code: String,
    /// Arabic display name.
    pub label: String,
    pub flag: String,
}

impl Nationality {
    pub fn new(code: &str, label: &str, flag: &str) -> Self {
        Self {
            code: code.to_string(),
            label: label.to_string(),
            flag: flag.to_string(),
        }
    }
}

/// Closed set of nationalities a CV may be filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NationalityRegistry {
    entries: Vec<Nationality>,
}

impl Default for NationalityRegistry {
    fn default() -> Self {
        Self {
            entries: vec![
                Nationality::new("philippines", "الفلبين", "🇵🇭"),
                Nationality::new("ethiopia", "إثيوبيا", "🇪🇹"),
                Nationality::new("kenya", "كينيا", "🇰🇪"),
            ],
        }
    }
}

impl NationalityRegistry {
    pub fn new(entries: Vec<Nationality>) -> Self {
        let mut registry = Self {
            entries: Vec::with_capacity(entries.len()),
        };
        for entry in entries {
            registry = registry.with(entry);
        }
        registry
    }

    /// Adds a nationality, replacing an existing entry with the same code.
    pub fn with(mut self, nationality: Nationality) -> Self {
        let code = Self::normalize(&nationality.code);
        let nationality = Nationality { code, ..nationality };

        match self.entries.iter_mut().find(|n| n.code == nationality.code) {
            Some(existing) => *existing = nationality,
            None => self.entries.push(nationality),
        }
        self
    }

    pub fn normalize(code: &str) -> String {
        code.trim().to_ascii_lowercase()
    }

    pub fn get(&self, code: &str) -> Option<&Nationality> {
        let code = Self::normalize(code);
        self.entries.iter().find(|n| n.code == code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Nationality> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
