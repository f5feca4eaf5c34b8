use regex::Regex;

use crate::kafka_types::is_internal;

/// Decides which Topics should be aggregated.
///
/// A Topic is selected if it matches at least one `include` [`Regex`] (or if there are none),
/// and none of the `exclude` ones. Internal Topics are selected only if `include_internal` is set.
#[derive(Debug, Clone, Default)]
pub struct TopicFilter {
    pub include: Vec<Regex>,
    pub exclude: Vec<Regex>,
    pub include_internal: bool,
}

impl TopicFilter {
    pub fn matches(&self, topic: &str) -> bool {
        if !self.include_internal && is_internal(topic) {
            return false;
        }

        (self.include.is_empty() || self.include.iter().any(|r| r.is_match(topic)))
            && !self.exclude.iter().any(|r| r.is_match(topic))
    }
}
