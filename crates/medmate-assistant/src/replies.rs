//! Canned replies for the MedMate assistant.
//!
//! Topics are tried in order and the first whose keyword appears in the
//! message (case-insensitive) wins.

/// Greeting shown when a session opens.
pub const GREETING: &str = "Hi! I'm your MedMate AI assistant. I can help you with questions about medicines, health tips, drug interactions, and more. How can I assist you today?";

/// Reply when no topic matches.
pub const FALLBACK_REPLY: &str = "I understand you're asking about health or medication topics. While I can provide general information, I recommend consulting with a healthcare professional for personalized medical advice. Is there a specific medication or health topic you'd like to know more about?";

/// A scripted topic: trigger keywords and the reply they produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topic {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub reply: &'static str,
}

/// Topics in priority order.
pub const TOPICS: &[Topic] = &[
    Topic {
        name: "pain",
        keywords: &["headache", "pain"],
        reply: "For headaches, you might consider over-the-counter pain relievers like acetaminophen or ibuprofen. However, if headaches persist or are severe, please consult with a healthcare professional. Make sure to follow dosage instructions on the medication.",
    },
    Topic {
        name: "fever",
        keywords: &["fever", "temperature"],
        reply: "For fever management, acetaminophen or ibuprofen can help reduce temperature. Stay hydrated, rest, and monitor your temperature. If fever is high (over 103°F/39.4°C) or persists for more than 3 days, seek medical attention.",
    },
    Topic {
        name: "interactions",
        keywords: &["drug interaction", "medication", "medicine"],
        reply: "Drug interactions can be serious. Always inform your doctor or pharmacist about all medications you're taking, including over-the-counter drugs and supplements. Use the drug interaction checker in our app, but always verify with a healthcare professional.",
    },
    Topic {
        name: "reminders",
        keywords: &["reminder", "schedule"],
        reply: "Setting medication reminders is crucial for treatment effectiveness. Use our reminder feature to set up alerts for your medications. Take medicines at the same time each day for best results.",
    },
    Topic {
        name: "side_effects",
        keywords: &["side effect"],
        reply: "Side effects vary by medication. Common ones include nausea, dizziness, or drowsiness. Always read medication labels and consult your doctor if you experience concerning side effects. Never stop prescribed medications without medical guidance.",
    },
    Topic {
        name: "dosage",
        keywords: &["dosage", "dose"],
        reply: "Always follow the dosage instructions provided by your doctor or on the medication label. Never exceed recommended doses. If you miss a dose, take it as soon as you remember, unless it's almost time for the next dose.",
    },
    Topic {
        name: "thanks",
        keywords: &["thank", "thanks"],
        reply: "You're welcome! I'm here to help with any health or medication questions. Remember, while I can provide general information, always consult healthcare professionals for personalized medical advice.",
    },
    Topic {
        name: "greeting",
        keywords: &["hello", "hi", "hey"],
        reply: "Hello! I'm here to help you with medication management, health tips, and general wellness questions. What would you like to know?",
    },
];

/// First topic matching the message, if any.
pub fn match_topic(message: &str) -> Option<&'static Topic> {
    let lower = message.to_lowercase();
    TOPICS
        .iter()
        .find(|topic| topic.keywords.iter().any(|k| lower.contains(k)))
}

/// Scripted reply for a user message.
pub fn reply_to(message: &str) -> &'static str {
    match_topic(message).map_or(FALLBACK_REPLY, |t| t.reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_matching() {
        assert_eq!(match_topic("I have a HEADACHE").unwrap().name, "pain");
        assert_eq!(match_topic("my temperature is up").unwrap().name, "fever");
        assert_eq!(match_topic("Any side effect?").unwrap().name, "side_effects");
        assert_eq!(match_topic("what dose?").unwrap().name, "dosage");
        assert_eq!(match_topic("thanks a lot").unwrap().name, "thanks");
        assert_eq!(match_topic("hey there").unwrap().name, "greeting");
        assert!(match_topic("xyz").is_none());
    }

    #[test]
    fn test_earlier_topics_win() {
        // "pain" and "medication" both match; pain comes first
        assert_eq!(match_topic("pain medication").unwrap().name, "pain");
        // "schedule my medicine" hits interactions before reminders
        assert_eq!(match_topic("schedule my medicine").unwrap().name, "interactions");
    }

    #[test]
    fn test_substring_matching() {
        // "hi" matches inside other words, as the keyword list is substring-based
        assert_eq!(match_topic("which one").unwrap().name, "greeting");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(reply_to("qwerty"), FALLBACK_REPLY);
        assert_eq!(reply_to(""), FALLBACK_REPLY);
    }
}
