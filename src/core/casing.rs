use crate::utils::error::Result;
use crate::utils::validation::validate_culture_tag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CasingRules {
    /// Unicode default case mappings.
    #[default]
    Default,
    /// Dotted/dotless i (Turkish, Azerbaijani).
    Turkic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TitleCaseOptions {
    /// Keep words written entirely in capitals (e.g. "NASA") as-is.
    pub preserve_uppercase_words: bool,
}

/// 名字大小寫轉換所使用的文化設定
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Culture {
    tag: String,
    rules: CasingRules,
}

impl Culture {
    pub fn invariant() -> Self {
        Self::default()
    }

    pub fn parse(tag: &str) -> Result<Self> {
        validate_culture_tag("culture", tag)?;

        let tag = tag.trim();
        if tag.is_empty() || tag.eq_ignore_ascii_case("invariant") {
            return Ok(Self::invariant());
        }

        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let rules = match language.as_str() {
            "tr" | "az" => CasingRules::Turkic,
            _ => CasingRules::Default,
        };

        Ok(Self {
            tag: tag.to_string(),
            rules,
        })
    }

    /// Empty for the invariant culture.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn rules(&self) -> CasingRules {
        self.rules
    }

    fn push_upper(&self, c: char, out: &mut String) {
        match (self.rules, c) {
            (CasingRules::Turkic, 'i') => out.push('İ'),
            _ => out.extend(c.to_uppercase()),
        }
    }

    fn push_lower(&self, c: char, out: &mut String) {
        match (self.rules, c) {
            (CasingRules::Turkic, 'I') => out.push('ı'),
            (CasingRules::Turkic, 'İ') => out.push('i'),
            _ => out.extend(c.to_lowercase()),
        }
    }

    /// Upper-cases the first letter of every whitespace-delimited word and
    /// lower-cases the rest. Leading digits and punctuation are copied as-is,
    /// so `3rd` becomes `3Rd`.
    /// Whitespace between words is copied unchanged.
    pub fn to_title_case(&self, text: &str, options: &TitleCaseOptions) -> String {
        let mut out = String::with_capacity(text.len());
        let mut word_start = None;

        for (idx, c) in text.char_indices() {
            if c.is_whitespace() {
                if let Some(start) = word_start.take() {
                    self.push_title_word(&text[start..idx], options, &mut out);
                }
                out.push(c);
            } else if word_start.is_none() {
                word_start = Some(idx);
            }
        }
        if let Some(start) = word_start {
            self.push_title_word(&text[start..], options, &mut out);
        }

        out
    }

    fn push_title_word(&self, word: &str, options: &TitleCaseOptions, out: &mut String) {
        if options.preserve_uppercase_words && is_all_uppercase(word) {
            out.push_str(word);
            return;
        }

        let mut started = false;
        for c in word.chars() {
            if !started && c.is_alphabetic() {
                started = true;
                self.push_upper(c, out);
            } else if started {
                self.push_lower(c, out);
            } else {
                // leading digits or punctuation, e.g. "(bob" or "3rd"
                out.push(c);
            }
        }
    }
}

fn is_all_uppercase(word: &str) -> bool {
    let mut letters = word.chars().filter(|c| c.is_alphabetic()).peekable();
    letters.peek().is_some() && letters.all(char::is_uppercase)
}

/// Culture-independent lower-casing (used for e-mail addresses).
pub fn to_lower_invariant(text: &str) -> String {
    text.to_lowercase()
}
