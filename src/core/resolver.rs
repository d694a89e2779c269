use crate::core::body::load_body;
use crate::core::casing::{to_lower_invariant, Culture, TitleCaseOptions};
use crate::domain::model::{Age, BodyObject, BodyOutcome, BodyUnavailable, ResolvedFields};
use crate::domain::ports::{ConfigProvider, RequestSource};
use crate::utils::error::{IntakeError, Result};

pub const DEFAULT_NAME: &str = "Guest";
pub const DEFAULT_EMAIL: &str = "unknown@example.com";

/// Field values as found in the request, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcquiredFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<String>,
}

impl AcquiredFields {
    /// Absent keys and blank values both count as "not supplied".
    pub fn from_query<S: RequestSource + ?Sized>(source: &S) -> Self {
        let supplied = |key: &str| {
            source
                .query_param(key)
                .filter(|value| !value.trim().is_empty())
                .map(str::to_owned)
        };

        Self {
            name: supplied("name"),
            email: supplied("email"),
            age: supplied("age"),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.name.is_some() && self.email.is_some() && self.age.is_some()
    }

    /// Only reads the properties for fields the query did not supply. A
    /// wrongly typed property leaves its own field unsupplied and is returned.
    pub fn fill_from_body(&mut self, body: &BodyObject) -> Vec<IntakeError> {
        let mut errors = Vec::new();

        for (key, slot) in [("name", &mut self.name), ("email", &mut self.email)] {
            if slot.is_some() {
                continue;
            }
            match body.text_property(key) {
                Ok(value) => *slot = value,
                Err(e) => errors.push(e),
            }
        }
        if self.age.is_none() {
            self.age = body
                .age_property("age")
                .map(|token| token.as_text().to_owned());
        }

        errors
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestFieldResolver {
    culture: Culture,
    options: TitleCaseOptions,
}

impl RequestFieldResolver {
    pub fn new(culture: Culture, options: TitleCaseOptions) -> Self {
        Self { culture, options }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let culture = Culture::parse(config.culture())?;
        let options = TitleCaseOptions {
            preserve_uppercase_words: config.preserve_uppercase_words(),
        };
        Ok(Self::new(culture, options))
    }

    pub fn culture(&self) -> &Culture {
        &self.culture
    }

    pub fn options(&self) -> &TitleCaseOptions {
        &self.options
    }

    /// 解析一個請求：查詢參數優先，缺少的欄位才讀 JSON body
    pub async fn resolve<S: RequestSource + ?Sized>(&self, source: &S) -> ResolvedFields {
        tracing::info!("Processing profile request");

        let mut acquired = AcquiredFields::from_query(source);

        if !acquired.is_complete() {
            match load_body(source).await {
                BodyOutcome::Parsed(body) => {
                    for e in acquired.fill_from_body(&body) {
                        tracing::error!(error = %e, "Unusable body property, using default");
                    }
                }
                BodyOutcome::Unavailable(BodyUnavailable::Empty) => {
                    tracing::debug!("No request body, keeping query values only");
                }
                BodyOutcome::Unavailable(BodyUnavailable::Failed(e)) => {
                    tracing::error!(error = %e, "Error reading JSON body, using defaults");
                }
            }
        }

        self.normalize(acquired)
    }

    pub fn normalize(&self, acquired: AcquiredFields) -> ResolvedFields {
        let name = match non_blank(acquired.name.as_deref()) {
            Some(name) => self.culture.to_title_case(name, &self.options),
            None => DEFAULT_NAME.to_string(),
        };

        let email = match non_blank(acquired.email.as_deref()) {
            Some(email) => to_lower_invariant(email),
            None => DEFAULT_EMAIL.to_string(),
        };

        let age = Age::parse(acquired.age.as_deref());
        if let (Age::NotProvided, Some(raw)) = (age, acquired.age.as_deref()) {
            tracing::debug!("Age '{}' is not a whole number, using sentinel", raw);
        }

        ResolvedFields { name, email, age }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
