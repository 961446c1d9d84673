//! The response selection cascade.
//!
//! Stages run in a fixed order and the first one producing a reply wins:
//!
//! 1. learned-pattern shortcut
//! 2. greeting
//! 3. farewell
//! 4. to 6. the keyword [`rules`](crate::rules) table (capabilities, build
//!    requests, direct entity keywords)
//! 7. TF-IDF similarity against the corpus
//! 8. context follow-up after an accepted invitation
//! 9. intent-specific answers
//! 10. questions about learning
//! 11. fallback (apologetic when the user sounds unhappy)
//!
//! Intent and sentiment are computed once per turn, after the learned-pattern
//! check. Whatever text is finally returned is what gets recorded in the
//! session's context and pattern cache.

use aphator_classify::{
    Intent, Sentiment, analyze_sentiment, detect_intent, infer_topic, is_farewell, is_greeting,
};
use aphator_memory::ConversationContext;
use aphator_text::contains_any;
use rand::Rng;
use tracing::debug;

use crate::rules::{self, Engagement};
use crate::{Engine, Reply, Session, Stage, pick, replies};

/// Phrases in the previous reply that count as an open invitation.
pub const INVITATION_PHRASES: &[&str] = &[
    "would you like",
    "more information",
    "tell me",
    "interested in",
];

/// Words in the current utterance that accept an invitation.
pub const AFFIRMATIVE_WORDS: &[&str] =
    &["yes", "sure", "okay", "please", "interested", "tell me"];

/// Triggers for the question about how the assistant learns.
pub const LEARNING_TRIGGERS: &[&str] = &["learn", "train", "teaching", "model", "improve"];

impl Engine {
    /// Run one turn and return the reply together with the stage that chose it.
    pub fn select<R: Rng>(&self, session: &mut Session<R>, utterance: &str) -> Reply {
        let reply = self.cascade(session, utterance);

        session.patterns.record(utterance, &reply.text);
        session.context.record(utterance, &reply.text);

        debug!(stage = ?reply.stage, turns = session.context.len(), "selected reply");
        reply
    }

    fn cascade<R: Rng>(&self, session: &mut Session<R>, utterance: &str) -> Reply {
        let Session {
            context,
            patterns,
            rng,
        } = session;

        if let Some(cached) = patterns.lookup(utterance) {
            debug!("using learned response");
            let text = self.engagement.inject(cached, None, rng);
            return Reply::new(Stage::LearnedPattern, text);
        }

        let lower = utterance.to_lowercase();
        let intent = detect_intent(utterance);
        let sentiment = analyze_sentiment(utterance);
        debug!(%intent, %sentiment, "classified utterance");

        if is_greeting(utterance) {
            let mut text = pick(replies::GREETINGS, rng).to_string();
            if !context.is_empty() {
                if let Some(interest) = context.dominant_topic() {
                    text.push_str(&replies::greeting_continuation(interest));
                }
            }
            return Reply::new(Stage::Greeting, text);
        }

        if is_farewell(utterance) {
            return Reply::new(Stage::Farewell, pick(replies::FAREWELLS, rng));
        }

        if let Some(rule) = rules::first_match(&lower) {
            debug!(rule = rule.name, "keyword rule fired");
            let text = match rule.engagement {
                Engagement::Topic(topic) => self.engagement.inject(rule.reply, Some(topic), rng),
                Engagement::None => rule.reply.to_string(),
            };
            return Reply::new(rule.stage, text);
        }

        if let Some(entry) = self.most_similar(utterance) {
            let topic = infer_topic(&entry.response);
            let text = self.engagement.inject(&entry.response, topic, rng);
            return Reply::new(Stage::Similarity, text);
        }

        if let Some(text) = follow_up(context, &lower) {
            return Reply::new(Stage::FollowUp, text);
        }

        if let Some(text) = intent_answer(intent) {
            return Reply::new(Stage::IntentAnswer, text);
        }

        if contains_any(&lower, LEARNING_TRIGGERS) {
            return Reply::new(Stage::LearningQuestion, replies::LEARNING);
        }

        let text = match sentiment {
            Sentiment::Negative => replies::APOLOGETIC_FALLBACK,
            _ => pick(replies::FALLBACKS, rng),
        };
        Reply::new(Stage::Fallback, text)
    }
}

/// Deep-dive reply when the previous bot turn invited more detail and the
/// user (already lowercased in `lower`) accepted.
pub fn follow_up(context: &ConversationContext, lower: &str) -> Option<&'static str> {
    let last = context.last_exchange()?;
    let previous = last.bot_response.to_lowercase();

    if !contains_any(&previous, INVITATION_PHRASES) || !contains_any(lower, AFFIRMATIVE_WORDS) {
        return None;
    }

    infer_topic(&previous).map(replies::deep_dive)
}

/// Canned answer for the intents that have one.
pub fn intent_answer(intent: Intent) -> Option<&'static str> {
    match intent {
        Intent::Opinion => Some(replies::OPINION),
        Intent::Comparison => Some(replies::COMPARISON),
        Intent::Problem => Some(replies::PROBLEM),
        Intent::Clarification => Some(replies::CLARIFICATION),
        _ => None,
    }
}
