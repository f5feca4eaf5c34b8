use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use konsumer_offsets::ConsumerProtocolAssignment;
use rdkafka::groups::{GroupInfo, GroupList};

use crate::kafka_types::{Group, GroupWithMembers, Member, MemberWithAssignment, TopicPartition};

/// Converts the [`GroupList`] returned by the Cluster into [`GroupWithMembers`].
///
/// Members' assignments are decoded from the Consumer Protocol: members whose assignment
/// can't be decoded are kept, with an empty assignment.
pub(super) fn groups_from(gl: &GroupList) -> Vec<Arc<GroupWithMembers>> {
    gl.groups().iter().map(|g| Arc::new(group_from(g))).collect()
}

fn group_from(g: &GroupInfo) -> GroupWithMembers {
    let mut members = HashMap::with_capacity(g.members().len());

    for m in g.members() {
        members.insert(
            m.id().to_string(),
            MemberWithAssignment {
                member: Member {
                    id: m.id().to_string(),
                    client_id: m.client_id().to_string(),
                    client_host: m.client_host().to_string(),
                },
                assignment: m.assignment().map(|a| decode_assignment(g.name(), a)).unwrap_or_default(),
            },
        );
    }

    GroupWithMembers {
        group: Group {
            name: g.name().to_string(),
            protocol: g.protocol().to_string(),
            protocol_type: g.protocol_type().to_string(),
            state: g.state().to_string(),
        },
        members,
    }
}

fn decode_assignment(group: &str, assignment_bytes: &[u8]) -> HashSet<TopicPartition> {
    // Empty when the member has not been assigned anything yet (e.g. rebalancing)
    if assignment_bytes.is_empty() {
        return HashSet::new();
    }

    match ConsumerProtocolAssignment::try_from(assignment_bytes) {
        Ok(cpa) => cpa
            .assigned_topic_partitions
            .into_iter()
            .flat_map(TopicPartition::vec_from)
            .collect(),
        Err(e) => {
            warn!("Unable to parse 'assignment' bytes of a member of Consumer Group '{group}': {e}");
            HashSet::new()
        },
    }
}

/// Selects the Consumer Groups that consume `topic`.
pub(super) fn bound_to(groups: &[Arc<GroupWithMembers>], topic: &str) -> Vec<Arc<GroupWithMembers>> {
    groups.iter().filter(|g| g.is_bound_to(topic)).cloned().collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn build_group(name: &str, topics: &[&str]) -> Arc<GroupWithMembers> {
        let mut members = HashMap::new();
        members.insert(
            format!("{name}-member"),
            MemberWithAssignment {
                member: Member::default(),
                assignment: topics.iter().map(|t| TopicPartition::new(t.to_string(), 0)).collect(),
            },
        );

        Arc::new(GroupWithMembers {
            group: Group {
                name: name.to_string(),
                ..Default::default()
            },
            members,
        })
    }

    #[test]
    fn select_bound_groups() {
        let groups = vec![
            build_group("billing", &["orders", "payments"]),
            build_group("shipping", &["shipments"]),
            build_group("audit", &["orders"]),
            build_group("idle", &[]),
        ];

        let bound = bound_to(&groups, "orders");
        assert_eq!(bound.iter().map(|g| g.name()).collect::<Vec<_>>(), vec!["billing", "audit"]);
        assert!(Arc::ptr_eq(&bound[0], &groups[0]));

        assert!(bound_to(&groups, "unknown").is_empty());
    }

    #[test]
    fn empty_assignment() {
        assert!(decode_assignment("billing", &[]).is_empty());
    }
}
