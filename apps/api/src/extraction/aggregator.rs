use serde::Serialize;

use crate::models::{DerogatoryItem, ItemKind};

/// All findings of one kind, in the order they were found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KindGroup {
    pub kind: ItemKind,
    pub items: Vec<DerogatoryItem>,
}

/// Groups findings by kind. Groups come out in first-seen kind order and keep
/// item insertion order. No deduplication.
pub fn group_by_kind(items: &[DerogatoryItem]) -> Vec<KindGroup> {
    let mut groups: Vec<KindGroup> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|g| g.kind == item.kind) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(KindGroup {
                kind: item.kind,
                items: vec![item.clone()],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_preserve_first_seen_order() {
        let items = vec![
            DerogatoryItem::new(ItemKind::HardInquiry, "CITI"),
            DerogatoryItem::new(ItemKind::WrongName, "JON DOE"),
            DerogatoryItem::new(ItemKind::HardInquiry, "CHASE"),
        ];
        let groups = group_by_kind(&items);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].kind, ItemKind::HardInquiry);
        assert_eq!(groups[0].items[0].details, "CITI");
        assert_eq!(groups[0].items[1].details, "CHASE");
        assert_eq!(groups[1].kind, ItemKind::WrongName);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let item = DerogatoryItem::new(ItemKind::OldAddress, "1 A ST 11111");
        let groups = group_by_kind(&[item.clone(), item]);
        assert_eq!(groups[0].items.len(), 2);
    }

    #[test]
    fn test_empty_input_has_no_groups() {
        assert!(group_by_kind(&[]).is_empty());
    }
}
