//! Probabilistic follow-up prompts appended to replies.

use aphator_classify::{Topic, infer_topic};
use rand::Rng;

use crate::pick;
use crate::replies::ENGAGEMENT_TEMPLATES;

/// Probability of leaving a reply untouched when none is configured.
pub const DEFAULT_SKIP_PROBABILITY: f64 = 0.7;

/// Appends a topic-aware question to some replies.
///
/// With probability `skip_probability` the reply is returned unchanged.
/// Otherwise the topic (the hint, or one inferred from the reply text) is
/// substituted into a random template and appended after a blank line. A
/// reply with no discernible topic is always returned unchanged.
#[derive(Debug, Clone, Copy)]
pub struct EngagementInjector {
    skip_probability: f64,
}

impl EngagementInjector {
    /// `skip_probability` is clamped to `[0, 1]`; NaN selects the default.
    pub fn new(skip_probability: f64) -> Self {
        let skip_probability = if skip_probability.is_nan() {
            DEFAULT_SKIP_PROBABILITY
        } else {
            skip_probability.clamp(0.0, 1.0)
        };
        EngagementInjector { skip_probability }
    }

    pub fn skip_probability(&self) -> f64 {
        self.skip_probability
    }

    pub fn inject<R: Rng>(&self, reply: &str, topic: Option<Topic>, rng: &mut R) -> String {
        if rng.random_bool(self.skip_probability) {
            return reply.to_string();
        }

        match topic.or_else(|| infer_topic(reply)) {
            Some(topic) => {
                let prompt = pick(ENGAGEMENT_TEMPLATES, rng).replace("{topic}", &topic.label());
                format!("{reply}\n\n{prompt}")
            }
            None => reply.to_string(),
        }
    }
}

impl Default for EngagementInjector {
    fn default() -> Self {
        Self::new(DEFAULT_SKIP_PROBABILITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    fn prompts_for(topic: &str) -> Vec<String> {
        ENGAGEMENT_TEMPLATES
            .iter()
            .map(|t| t.replace("{topic}", topic))
            .collect()
    }

    #[test]
    fn always_skip_leaves_reply_alone() {
        let injector = EngagementInjector::new(1.0);
        let mut rng = rng();
        for _ in 0..20 {
            assert_eq!(
                injector.inject("Blockchain is great.", Some(Topic::Blockchain), &mut rng),
                "Blockchain is great."
            );
        }
    }

    #[test]
    fn never_skip_appends_prompt_for_hint() {
        let injector = EngagementInjector::new(0.0);
        let out = injector.inject("Here you go.", Some(Topic::CryptoTrading), &mut rng());
        let (body, prompt) = out.split_once("\n\n").unwrap();
        assert_eq!(body, "Here you go.");
        assert!(prompts_for("crypto trading").contains(&prompt.to_string()));
    }

    #[test]
    fn topic_is_inferred_from_reply() {
        let injector = EngagementInjector::new(0.0);
        let out = injector.inject("We audit NFT collections.", None, &mut rng());
        let (_, prompt) = out.split_once("\n\n").unwrap();
        // "audit" hits security before "nft" is considered.
        assert!(prompts_for("security").contains(&prompt.to_string()));
    }

    #[test]
    fn no_topic_no_prompt() {
        let injector = EngagementInjector::new(0.0);
        assert_eq!(
            injector.inject("Have a nice day.", None, &mut rng()),
            "Have a nice day."
        );
    }

    #[test]
    fn probability_is_clamped() {
        assert_eq!(EngagementInjector::new(3.0).skip_probability(), 1.0);
        assert_eq!(EngagementInjector::new(-1.0).skip_probability(), 0.0);
        assert_eq!(
            EngagementInjector::new(f64::NAN).skip_probability(),
            DEFAULT_SKIP_PROBABILITY
        );
    }

    #[test]
    fn default_skips_most_of_the_time() {
        let injector = EngagementInjector::default();
        let mut rng = rng();
        let appended = (0..1000)
            .filter(|_| {
                injector
                    .inject("x", Some(Topic::Nft), &mut rng)
                    .contains("\n\n")
            })
            .count();
        // Expect about 300 of 1000.
        assert!((200..400).contains(&appended), "appended {appended} times");
    }
}
