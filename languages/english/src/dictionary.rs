use std::collections::HashMap;

use lexi_capability::definitions::{Definition, FallbackDefinitions};

/// (word, definition, IPA)
const ENTRIES: &[(&str, &str, &str)] = &[
    ("laureate", "A person honoured with an award for outstanding achievement.", "/ˈlɒr.i.ət/"),
    ("ubiquitous", "Present, appearing, or found everywhere.", "/juːˈbɪk.wɪ.təs/"),
    ("ephemeral", "Lasting for a very short time.", "/ɪˈfem.ər.əl/"),
    ("resilient", "Able to recover quickly from difficult conditions.", "/rɪˈzɪl.i.ənt/"),
    ("meticulous", "Showing great attention to detail; very careful and precise.", "/məˈtɪk.jə.ləs/"),
    ("ambiguous", "Open to more than one interpretation.", "/æmˈbɪɡ.ju.əs/"),
    ("pragmatic", "Dealing with things sensibly and realistically.", "/præɡˈmæt.ɪk/"),
    ("scrutiny", "Critical observation or examination.", "/ˈskruː.tɪ.ni/"),
    ("unprecedented", "Never done or known before.", "/ʌnˈpres.ɪ.den.tɪd/"),
    ("inevitable", "Certain to happen; unavoidable.", "/ɪˈnev.ɪ.tə.bəl/"),
    ("sustainable", "Able to be maintained at a certain rate or level.", "/səˈsteɪ.nə.bəl/"),
    ("government", "The group of people with the authority to govern a country or state.", "/ˈɡʌv.ən.mənt/"),
    ("significant", "Sufficiently great or important to be worthy of attention.", "/sɪɡˈnɪf.ɪ.kənt/"),
    ("policy", "A course of action adopted by an organisation or individual.", "/ˈpɒl.ə.si/"),
];

const EXAMPLE_TEMPLATES: &[&str] = &[
    "I use the word \"{word}\" in my daily conversations.",
    "The word \"{word}\" is commonly used in this context.",
    "Learning \"{word}\" will help improve your vocabulary.",
    "You can find \"{word}\" used frequently in articles.",
];

/// Static definitions and pronunciations for when no model is available
pub struct FallbackDictionary {
    entries: HashMap<&'static str, (&'static str, &'static str)>,
}

impl FallbackDictionary {
    pub fn with_defaults() -> Self {
        let entries = ENTRIES
            .iter()
            .map(|(word, definition, ipa)| (*word, (*definition, *ipa)))
            .collect();

        Self { entries }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word.to_lowercase().as_str())
    }

    /// Example sentence for a word, stable for the same word
    pub fn example_sentence(word: &str) -> String {
        let idx = word.chars().map(|c| c as usize).sum::<usize>() % EXAMPLE_TEMPLATES.len();
        EXAMPLE_TEMPLATES[idx].replace("{word}", word)
    }
}

impl Default for FallbackDictionary {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl FallbackDefinitions for FallbackDictionary {
    fn define(&self, word: &str) -> Definition {
        let key = word.to_lowercase();
        let (definition, pronunciation) = match self.entries.get(key.as_str()) {
            Some((definition, ipa)) => (definition.to_string(), Some(ipa.to_string())),
            None => (
                format!("\"{word}\" is a word you looked up while reading. Add it to your vocabulary to review it later."),
                None,
            ),
        };

        Definition {
            word: word.to_string(),
            definition,
            pronunciation,
            example: Self::example_sentence(word),
            demo_mode: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_word_has_definition_and_ipa() {
        let dict = FallbackDictionary::with_defaults();
        let def = dict.define("Laureate");

        assert!(def.definition.contains("award"));
        assert_eq!(def.pronunciation.as_deref(), Some("/ˈlɒr.i.ət/"));
        assert!(def.demo_mode);
    }

    #[test]
    fn unknown_word_gets_generic_template() {
        let dict = FallbackDictionary::with_defaults();
        let def = dict.define("zeitgeist");

        assert!(def.definition.contains("zeitgeist"));
        assert!(def.pronunciation.is_none());
        assert!(def.example.contains("\"zeitgeist\""));
    }

    #[test]
    fn example_sentence_is_stable() {
        assert_eq!(
            FallbackDictionary::example_sentence("hola"),
            FallbackDictionary::example_sentence("hola")
        );
    }
}
