//! Company reference data and the knowledge corpus built from it.
//!
//! Reference data is a JSON document describing the company, its FAQs,
//! services and products. The corpus turns it into a fixed, ordered list of
//! `(source_text, canned_response)` entries that a similarity index can be
//! fitted over. Index `i` of the corpus is always entry `i`; nothing mutates
//! a corpus after [`Corpus::build`].
//!
//! Loading never prevents the assistant from starting:
//! [`ReferenceData::load_or_default`] logs the failure and substitutes the
//! built-in company description, and the hand-authored entries guarantee a
//! non-empty corpus either way.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Pricing text used when an offering does not state one.
pub const DEFAULT_PRICING: &str = "competitive rates";

/// Errors raised while reading reference data.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read reference data from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse reference data in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Company identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyInfo {
    pub name: String,
    pub description: String,
    pub expertise: Vec<String>,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        CompanyInfo {
            name: "Aphator Tech".to_string(),
            description: "A leading provider of crypto and tech solutions".to_string(),
            expertise: vec![
                "Blockchain Development".to_string(),
                "Cryptocurrency Consulting".to_string(),
                "Tech Infrastructure".to_string(),
                "Software Development".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// A service or product the company sells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Offering {
    pub name: String,
    pub description: String,
    pub pricing: Option<String>,
}

impl Offering {
    fn pricing_text(&self) -> &str {
        self.pricing.as_deref().unwrap_or(DEFAULT_PRICING)
    }
}

/// The whole reference document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceData {
    pub company_info: CompanyInfo,
    pub faqs: Vec<Faq>,
    pub services: Vec<Offering>,
    pub products: Vec<Offering>,
}

impl ReferenceData {
    /// Parse reference data from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load from `path`, falling back to [`ReferenceData::default`] when the
    /// file is missing or malformed.
    pub fn load_or_default(path: &Path) -> Self {
        match load_reference_data(path) {
            Ok(data) => {
                info!(
                    path = %path.display(),
                    faqs = data.faqs.len(),
                    services = data.services.len(),
                    products = data.products.len(),
                    "loaded reference data"
                );
                data
            }
            Err(err) => {
                warn!(error = %err, "using built-in company description");
                ReferenceData::default()
            }
        }
    }
}

/// Read and parse a reference data file.
pub fn load_reference_data(path: &Path) -> Result<ReferenceData, CorpusError> {
    let content = fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ReferenceData::from_json(&content).map_err(|source| CorpusError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// One `(source_text, canned_response)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusEntry {
    pub source_text: String,
    pub response: String,
}

impl CorpusEntry {
    fn new(source_text: impl Into<String>, response: impl Into<String>) -> Self {
        CorpusEntry {
            source_text: source_text.into(),
            response: response.into(),
        }
    }
}

/// The ordered knowledge corpus.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
}

impl Corpus {
    /// Build the corpus in its fixed order: FAQs, services, products, then
    /// the hand-authored identity and application-development entries.
    pub fn build(data: &ReferenceData) -> Self {
        let company = &data.company_info;
        let mut entries = Vec::new();

        for faq in &data.faqs {
            entries.push(CorpusEntry::new(&faq.question, &faq.answer));
        }
        for service in &data.services {
            entries.push(CorpusEntry::new(
                format!("{} {}", service.name, service.description),
                service_blurb(company, service),
            ));
        }
        for product in &data.products {
            entries.push(CorpusEntry::new(
                format!("{} {}", product.name, product.description),
                product_blurb(company, product),
            ));
        }

        let identity = company_blurb(company);
        entries.push(CorpusEntry::new(
            format!("Tell me about {}", company.name),
            identity.clone(),
        ));
        entries.push(CorpusEntry::new(
            format!("What does {} do", company.name),
            identity,
        ));
        entries.extend(application_entries(&company.name));

        Corpus { entries }
    }

    /// Build from explicit entries, bypassing reference data.
    pub fn from_entries(entries: Vec<CorpusEntry>) -> Self {
        Corpus { entries }
    }

    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CorpusEntry> {
        self.entries.get(index)
    }

    /// Source texts, aligned with [`Corpus::entries`].
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.source_text.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn service_blurb(company: &CompanyInfo, service: &Offering) -> String {
    format!(
        "{} offers {}. {}. The pricing starts at {}.",
        company.name,
        service.name,
        service.description,
        service.pricing_text()
    )
}

fn product_blurb(company: &CompanyInfo, product: &Offering) -> String {
    format!(
        "{}'s {} is {}. It's available at {}.",
        company.name,
        product.name,
        product.description,
        product.pricing_text()
    )
}

fn company_blurb(company: &CompanyInfo) -> String {
    format!(
        "{} is {}. We specialize in {}.",
        company.name,
        company.description,
        company.expertise.join(", ")
    )
}

fn application_entries(company: &str) -> [CorpusEntry; 3] {
    [
        CorpusEntry::new(
            "Can you help me launch an application",
            format!(
                "Yes, {company} specializes in developing and launching applications for various platforms. \
                 Our software development team can help you create mobile apps (iOS/Android), web applications, \
                 and enterprise software solutions. Pricing starts at $10,000 for full applications, with \
                 the exact cost depending on complexity and requirements. Would you like to discuss your specific app idea?"
            ),
        ),
        CorpusEntry::new(
            "How much does app development cost",
            format!(
                "At {company}, application development costs start at $10,000 for basic applications. \
                 The final price depends on factors like complexity, features, platform requirements, and timeline. \
                 We offer both native app development for iOS/Android and cross-platform solutions. \
                 We'd be happy to provide a detailed quote after understanding your specific requirements."
            ),
        ),
        CorpusEntry::new(
            "What kind of applications can you build",
            format!(
                "{company} can develop a wide range of applications including: mobile apps for iOS and Android, \
                 web applications, enterprise software, blockchain dApps, cryptocurrency trading platforms, \
                 NFT marketplaces, fintech solutions, and custom software for specific business needs. \
                 Our development team is skilled in multiple technologies and frameworks to create reliable, \
                 scalable, and secure applications tailored to your requirements."
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> ReferenceData {
        ReferenceData {
            company_info: CompanyInfo::default(),
            faqs: vec![Faq {
                question: "Do you offer audits?".into(),
                answer: "Yes, we audit smart contracts.".into(),
            }],
            services: vec![Offering {
                name: "Blockchain Development".into(),
                description: "Custom chains and dApps".into(),
                pricing: Some("$5,000".into()),
            }],
            products: vec![Offering {
                name: "TradeBotX".into(),
                description: "an automated trading bot".into(),
                pricing: None,
            }],
        }
    }

    #[test]
    fn default_data_describes_company() {
        let data = ReferenceData::default();
        assert_eq!(data.company_info.name, "Aphator Tech");
        assert_eq!(data.company_info.expertise.len(), 4);
        assert!(data.faqs.is_empty());
    }

    #[test]
    fn default_corpus_is_never_empty() {
        let corpus = Corpus::build(&ReferenceData::default());
        assert_eq!(corpus.len(), 5);
        assert_eq!(corpus.texts().count(), corpus.len());
    }

    #[test]
    fn corpus_order_is_faqs_services_products_then_fixed() {
        let corpus = Corpus::build(&sample());
        let texts: Vec<&str> = corpus.texts().collect();
        assert_eq!(texts[0], "Do you offer audits?");
        assert_eq!(texts[1], "Blockchain Development Custom chains and dApps");
        assert_eq!(texts[2], "TradeBotX an automated trading bot");
        assert_eq!(texts[3], "Tell me about Aphator Tech");
        assert_eq!(texts[4], "What does Aphator Tech do");
        assert_eq!(texts[7], "What kind of applications can you build");
        assert_eq!(corpus.len(), 8);
    }

    #[test]
    fn faq_answer_is_verbatim() {
        let corpus = Corpus::build(&sample());
        assert_eq!(
            corpus.get(0).unwrap().response,
            "Yes, we audit smart contracts."
        );
    }

    #[test]
    fn service_blurb_includes_pricing() {
        let corpus = Corpus::build(&sample());
        assert_eq!(
            corpus.get(1).unwrap().response,
            "Aphator Tech offers Blockchain Development. Custom chains and dApps. The pricing starts at $5,000."
        );
    }

    #[test]
    fn product_blurb_defaults_pricing() {
        let corpus = Corpus::build(&sample());
        assert_eq!(
            corpus.get(2).unwrap().response,
            "Aphator Tech's TradeBotX is an automated trading bot. It's available at competitive rates."
        );
    }

    #[test]
    fn identity_entries_share_blurb() {
        let corpus = Corpus::build(&ReferenceData::default());
        let about = &corpus.get(0).unwrap().response;
        assert_eq!(about, &corpus.get(1).unwrap().response);
        assert!(about.starts_with("Aphator Tech is A leading provider"));
        assert!(about.ends_with("Tech Infrastructure, Software Development."));
    }

    #[test]
    fn app_cost_entry_mentions_price() {
        let corpus = Corpus::build(&ReferenceData::default());
        let entry = corpus.get(3).unwrap();
        assert_eq!(entry.source_text, "How much does app development cost");
        assert!(entry.response.contains("$10,000"));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let data = ReferenceData::from_json(r#"{"faqs": [{"question": "Q?"}]}"#).unwrap();
        assert_eq!(data.company_info.name, "Aphator Tech");
        assert_eq!(data.faqs[0].question, "Q?");
        assert_eq!(data.faqs[0].answer, "");
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"company_info": {{"name": "Acme", "description": "a test firm", "expertise": []}},
                "products": [{{"name": "Widget", "description": "a widget", "pricing": "$1"}}]}}"#
        )
        .unwrap();

        let data = load_reference_data(file.path()).unwrap();
        assert_eq!(data.company_info.name, "Acme");
        assert_eq!(data.products[0].pricing.as_deref(), Some("$1"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_reference_data(Path::new("/nonexistent/company_data.json")).unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
    }

    #[test]
    fn load_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = load_reference_data(file.path()).unwrap_err();
        assert!(matches!(err, CorpusError::Parse { .. }));
    }

    #[test]
    fn load_or_default_recovers() {
        let data = ReferenceData::load_or_default(Path::new("/nonexistent/company_data.json"));
        assert_eq!(data, ReferenceData::default());
    }
}
