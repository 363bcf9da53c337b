//! Tests for dataset module

use super::dataset::*;
use crate::filter::{Filter, SemanticEq};
use crate::message::Message;

fn corpus() -> Vec<Message> {
    vec![
        Message::channel(3, "alice@example.com", "design", "ui", "mockups attached"),
        Message::channel(1, "bob@example.com", "design", "lunch", "pizza?"),
        Message::channel(2, "carol@example.com", "backend", "deploy", "release is out"),
        Message::direct(
            4,
            "alice@example.com",
            vec!["bob@example.com".into()],
            "ping",
        ),
    ]
}

#[test]
fn test_all_messages_keeps_everything_in_id_order() {
    // Arrange
    let all = MessageListData::all_messages();

    // Act
    let added = all.add_messages(&corpus());

    // Assert
    assert_eq!(added, 4);
    assert_eq!(all.message_ids(), vec![1, 2, 3, 4]);
    assert_eq!(all.first_id(), Some(1));
    assert_eq!(all.last_id(), Some(4));
}

#[test]
fn test_add_messages_only_keeps_matches() {
    let design = MessageListData::new(Filter::parse("channel:design").unwrap());

    let added = design.add_messages(&corpus());

    assert_eq!(added, 2);
    assert_eq!(design.message_ids(), vec![1, 3]);
}

#[test]
fn test_add_messages_does_not_count_duplicates() {
    let all = MessageListData::all_messages();
    all.add_messages(&corpus());

    let added = all.add_messages(&corpus()[..2]);

    assert_eq!(added, 0);
    assert_eq!(all.len(), 4);
}

#[test]
fn test_populate_from_superset() {
    // Arrange
    let all = MessageListData::all_messages();
    all.add_messages(&corpus());

    // Act
    let narrowed =
        MessageListData::populate_from(Filter::parse("sender:alice@example.com").unwrap(), &all);

    // Assert
    assert_eq!(narrowed.message_ids(), vec![3, 4]);
    assert_eq!(all.len(), 4, "superset must be untouched");
}

#[test]
fn test_remove_messages() {
    let all = MessageListData::all_messages();
    all.add_messages(&corpus());

    let removed = all.remove_messages(&[2, 99]);

    assert_eq!(removed, 1);
    assert!(all.get(2).is_none());
    assert_eq!(all.get(3).map(|m| m.topic), Some(Some("ui".to_string())));
}

#[test]
fn test_empty_list() {
    let list = MessageListData::new(Filter::parse("is:starred").unwrap());

    assert!(list.is_empty());
    assert_eq!(list.first_id(), None);
    assert_eq!(list.last_id(), None);
}

#[test]
fn test_dataset_filter_is_the_construction_filter() {
    let filter = Filter::parse("topic:deploy").unwrap();
    let list = MessageListData::new(filter.clone());

    assert!(Dataset::filter(&list).semantic_eq(&filter));
}
