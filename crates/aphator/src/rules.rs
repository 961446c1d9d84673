//! Ordered keyword rule table for the capability, build-request and
//! direct-entity stages.
//!
//! A rule fires when every one of its trigger groups has at least one phrase
//! occurring in the lowercased utterance. Rules are tried top to bottom and
//! the first hit wins, so priority is the table order and nothing else.

use aphator_classify::Topic;
use aphator_text::contains_any;

use crate::Stage;
use crate::replies;

/// What happens to a rule's reply before it is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Engagement {
    /// Returned verbatim.
    None,
    /// Passed through the engagement injector with this topic hint.
    Topic(Topic),
}

#[derive(Debug)]
pub struct Rule {
    pub name: &'static str,
    pub stage: Stage,
    /// Conjunction of disjunctions: every group needs one matching phrase.
    pub all_of: &'static [&'static [&'static str]],
    pub reply: &'static str,
    pub engagement: Engagement,
}

impl Rule {
    /// Whether this rule fires for an already-lowercased utterance.
    pub fn matches(&self, lower: &str) -> bool {
        !self.all_of.is_empty() && self.all_of.iter().all(|group| contains_any(lower, group))
    }
}

const WANT_TO: &[&str] = &["want to"];
const BUILD_VERBS: &[&str] = &["build", "create", "develop", "launch"];

pub const RULES: &[Rule] = &[
    Rule {
        name: "capabilities",
        stage: Stage::Capability,
        all_of: &[&["how can you help", "what can you do", "assist me", "help me with"]],
        reply: replies::CAPABILITIES,
        engagement: Engagement::None,
    },
    Rule {
        name: "build_application",
        stage: Stage::BuildRequest,
        all_of: &[
            WANT_TO,
            BUILD_VERBS,
            &["app", "application", "website", "software", "platform"],
        ],
        reply: replies::BUILD_APPLICATION,
        engagement: Engagement::Topic(Topic::Application),
    },
    Rule {
        name: "build_blockchain",
        stage: Stage::BuildRequest,
        all_of: &[
            WANT_TO,
            BUILD_VERBS,
            &["blockchain", "smart contract", "dapp", "token"],
        ],
        reply: replies::BUILD_BLOCKCHAIN,
        engagement: Engagement::Topic(Topic::Blockchain),
    },
    Rule {
        name: "build_trading",
        stage: Stage::BuildRequest,
        all_of: &[
            WANT_TO,
            BUILD_VERBS,
            &["trade", "trading", "invest", "investment"],
        ],
        reply: replies::BUILD_TRADING,
        engagement: Engagement::Topic(Topic::CryptoTrading),
    },
    Rule {
        name: "crypto_tracker",
        stage: Stage::EntityKeyword,
        all_of: &[&["cryptotracker", "crypto tracker"]],
        reply: replies::CRYPTO_TRACKER,
        engagement: Engagement::Topic(Topic::CryptoTrading),
    },
    Rule {
        name: "block_secure",
        stage: Stage::EntityKeyword,
        all_of: &[&["blocksecure", "block secure"]],
        reply: replies::BLOCK_SECURE,
        engagement: Engagement::Topic(Topic::Security),
    },
    Rule {
        name: "smart_contract_builder",
        stage: Stage::EntityKeyword,
        all_of: &[&["smartcontract", "smart contract builder", "smart contract"]],
        reply: replies::SMART_CONTRACT_BUILDER,
        engagement: Engagement::Topic(Topic::Blockchain),
    },
    Rule {
        name: "trade_bot_x",
        stage: Stage::EntityKeyword,
        all_of: &[&["tradebotx", "trade bot", "trading bot"]],
        reply: replies::TRADE_BOT_X,
        engagement: Engagement::Topic(Topic::CryptoTrading),
    },
    Rule {
        name: "blockchain",
        stage: Stage::EntityKeyword,
        all_of: &[&["blockchain", "dapp"]],
        reply: replies::BLOCKCHAIN_SERVICE,
        engagement: Engagement::Topic(Topic::Blockchain),
    },
    Rule {
        name: "trading",
        stage: Stage::EntityKeyword,
        all_of: &[&["trading", "crypto trading", "cryptocurrency trading"]],
        reply: replies::TRADING_SERVICE,
        engagement: Engagement::Topic(Topic::CryptoTrading),
    },
    Rule {
        name: "web3",
        stage: Stage::EntityKeyword,
        all_of: &[&["web3"]],
        reply: replies::WEB3_SERVICE,
        engagement: Engagement::Topic(Topic::Blockchain),
    },
    Rule {
        name: "nft",
        stage: Stage::EntityKeyword,
        all_of: &[&["nft"]],
        reply: replies::NFT_SERVICE,
        engagement: Engagement::Topic(Topic::Nft),
    },
    Rule {
        name: "security",
        stage: Stage::EntityKeyword,
        all_of: &[&["security", "cybersecurity", "secure"]],
        reply: replies::SECURITY_SERVICE,
        engagement: Engagement::Topic(Topic::Security),
    },
    Rule {
        name: "contact",
        stage: Stage::EntityKeyword,
        all_of: &[&["contact", "reach", "email", "phone", "call"]],
        reply: replies::CONTACT_INFO,
        engagement: Engagement::None,
    },
    Rule {
        name: "application",
        stage: Stage::EntityKeyword,
        all_of: &[&["app", "application", "software", "mobile app", "web app"]],
        reply: replies::APPLICATION_SERVICE,
        engagement: Engagement::Topic(Topic::Application),
    },
    Rule {
        name: "pricing",
        stage: Stage::EntityKeyword,
        all_of: &[&["price", "pricing", "cost", "how much", "fee", "payment"]],
        reply: replies::PRICING_OVERVIEW,
        engagement: Engagement::None,
    },
];

/// First rule in [`RULES`] matching the lowercased utterance.
pub fn first_match(lower: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.matches(lower))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fired(utterance: &str) -> Option<&'static str> {
        first_match(&utterance.to_lowercase()).map(|r| r.name)
    }

    #[test]
    fn rule_names_are_unique() {
        let mut names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RULES.len());
    }

    #[test]
    fn stages_appear_in_cascade_order() {
        let stages: Vec<Stage> = RULES.iter().map(|r| r.stage).collect();
        let mut sorted = stages.clone();
        sorted.sort();
        assert_eq!(stages, sorted);
    }

    #[test]
    fn capability_question() {
        assert_eq!(fired("What can you do?"), Some("capabilities"));
    }

    #[test]
    fn capability_outranks_entity_keywords() {
        assert_eq!(fired("can you assist me with nft pricing"), Some("capabilities"));
    }

    #[test]
    fn build_request_needs_all_three_parts() {
        assert_eq!(fired("I want to build a mobile app"), Some("build_application"));
        // No "want to": falls to the direct application keyword.
        assert_eq!(fired("build a mobile app"), Some("application"));
        // No build verb: same.
        assert_eq!(fired("I want to see an app"), Some("application"));
    }

    #[test]
    fn build_request_subjects() {
        assert_eq!(fired("we want to launch a token"), Some("build_blockchain"));
        assert_eq!(fired("I want to develop for trading"), Some("build_trading"));
    }

    #[test]
    fn dapp_contains_app() {
        // "dapp" includes the substring "app", and the application subject is checked first.
        assert_eq!(fired("I want to create a dapp"), Some("build_application"));
    }

    #[test]
    fn products_outrank_services() {
        assert_eq!(fired("Tell me about the trading bot"), Some("trade_bot_x"));
        assert_eq!(fired("is BlockSecure good for blockchain"), Some("block_secure"));
        assert_eq!(fired("smart contract audit"), Some("smart_contract_builder"));
    }

    #[test]
    fn service_keywords() {
        assert_eq!(fired("what is blockchain"), Some("blockchain"));
        assert_eq!(fired("crypto trading"), Some("trading"));
        assert_eq!(fired("web3 integration"), Some("web3"));
        assert_eq!(fired("NFT drops"), Some("nft"));
        assert_eq!(fired("cybersecurity"), Some("security"));
        assert_eq!(fired("how do I contact you"), Some("contact"));
    }

    #[test]
    fn application_before_pricing() {
        assert_eq!(fired("how much does app development cost"), Some("application"));
        assert_eq!(fired("what is your pricing"), Some("pricing"));
    }

    #[test]
    fn contact_and_pricing_are_not_engaged() {
        for name in ["contact", "pricing", "capabilities"] {
            let rule = RULES.iter().find(|r| r.name == name).unwrap();
            assert_eq!(rule.engagement, Engagement::None);
        }
    }

    #[test]
    fn no_rule_for_small_talk() {
        assert_eq!(fired("yes"), None);
        assert_eq!(fired(""), None);
    }

    #[test]
    fn empty_rule_never_matches() {
        let rule = Rule {
            name: "empty",
            stage: Stage::EntityKeyword,
            all_of: &[],
            reply: "",
            engagement: Engagement::None,
        };
        assert!(!rule.matches("anything"));
    }
}
