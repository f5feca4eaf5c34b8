use std::collections::{BTreeSet, HashMap, HashSet};

use crate::kafka_types::TopicPartition;

/// Consumer Group Member
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Member {
    /// Identifier
    pub id: String,

    /// Value of `client.id` set by the Consumer
    pub client_id: String,

    /// Host where the Consumer is running
    pub client_host: String,
}

/// Consumer Group Member, paired with the set of [`TopicPartition`] assigned to it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberWithAssignment {
    /// The [`Member`] itself
    pub member: Member,

    /// The [`HashSet`] of [`TopicPartition`] assigned to the [`Member`]
    pub assignment: HashSet<TopicPartition>,
}

/// Consumer Group
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    /// Group name
    pub name: String,

    /// Type of Protocol used by this Group
    pub protocol_type: String,

    /// Group Protocol of `protocol_type` used by this Group
    pub protocol: String,

    /// Group state
    pub state: String,
}

/// Consumer Group, paired with a map of [`MemberWithAssignment`] indexed by [`Member::id`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupWithMembers {
    pub group: Group,
    pub members: HashMap<String, MemberWithAssignment>,
}

impl GroupWithMembers {
    pub fn name(&self) -> &str {
        &self.group.name
    }

    /// Topics consumed by this Group, according to the assignments of its members.
    pub fn topics(&self) -> BTreeSet<&str> {
        self.members
            .values()
            .flat_map(|m| m.assignment.iter().map(|tp| tp.topic.as_str()))
            .collect()
    }

    /// Returns `true` if at least one member of this Group is assigned a Partition of `topic`.
    pub fn is_bound_to(&self, topic: &str) -> bool {
        self.topics().contains(topic)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn build_group() -> GroupWithMembers {
        let mut members = HashMap::new();
        members.insert(
            "m1".to_string(),
            MemberWithAssignment {
                member: Member {
                    id: "m1".to_string(),
                    ..Default::default()
                },
                assignment: HashSet::from([
                    TopicPartition::new("orders".to_string(), 0),
                    TopicPartition::new("payments".to_string(), 1),
                ]),
            },
        );
        members.insert(
            "m2".to_string(),
            MemberWithAssignment {
                member: Member {
                    id: "m2".to_string(),
                    ..Default::default()
                },
                assignment: HashSet::from([TopicPartition::new("orders".to_string(), 1)]),
            },
        );

        GroupWithMembers {
            group: Group {
                name: "billing".to_string(),
                ..Default::default()
            },
            members,
        }
    }

    #[test]
    fn topics_of_group() {
        let g = build_group();

        assert_eq!(g.name(), "billing");
        assert_eq!(g.topics().into_iter().collect::<Vec<_>>(), vec!["orders", "payments"]);
    }

    #[test]
    fn bound_to_topic() {
        let g = build_group();

        assert!(g.is_bound_to("orders"));
        assert!(g.is_bound_to("payments"));
        assert!(!g.is_bound_to("shipments"));
        assert!(!GroupWithMembers::default().is_bound_to("orders"));
    }
}
