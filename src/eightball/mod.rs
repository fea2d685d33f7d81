pub mod phrases;
pub mod random;
pub mod trigger;

use std::sync::Arc;

use phrases::EIGHTBALL_PHRASES;
use random::EightballRandom;
use trigger::{is_eightball_question, is_question, ADHOC_RESPONSE_CHANCE};

/// How the eight-ball answers a message posted to a channel.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OutgoingAnswer {
    /// The message was a question directed at the bot.
    Triggered(&'static str),
    /// The message was an unrelated question that the bot decided to answer anyway.
    AdHoc(&'static str),
    /// The bot stays quiet.
    Silent,
}

/// A magic eight-ball.
#[derive(Clone)]
pub struct Eightball {
    random: Arc<dyn EightballRandom>,
}

impl Eightball {
    pub fn new(random: impl EightballRandom + 'static) -> Self {
        Self {
            random: Arc::new(random),
        }
    }
}

impl Eightball {
    /// Returns a uniformly chosen phrase from `EIGHTBALL_PHRASES`.
    pub fn choose(&self) -> &'static str {
        EIGHTBALL_PHRASES[self.random.next_index(EIGHTBALL_PHRASES.len())]
    }

    /// Returns true with a probability of `ADHOC_RESPONSE_CHANCE`.
    pub fn should_give_adhoc_response(&self) -> bool {
        self.random.next_unit() <= ADHOC_RESPONSE_CHANCE
    }

    /// Decides how to answer a message seen by an outgoing webhook.
    ///
    /// Questions directed at the bot are always answered. Any other question is answered with a
    /// probability of `ADHOC_RESPONSE_CHANCE`, and everything else is ignored.
    pub fn answer_outgoing(&self, text: &str) -> OutgoingAnswer {
        if is_eightball_question(text) {
            OutgoingAnswer::Triggered(self.choose())
        } else if is_question(text) && self.should_give_adhoc_response() {
            OutgoingAnswer::AdHoc(self.choose())
        } else {
            OutgoingAnswer::Silent
        }
    }
}
